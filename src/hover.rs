//! Hover provider for N-Triples documents.
//!
//! Hovering an `<iri>` that has a `skos:prefLabel` in the same document shows
//! the label and the IRI:
//!
//! ```text
//! **prefLabel:** Paris
//!
//! `<http://example.org/paris>`
//! ```
//!
//! IRIs without a label produce no hover.
//!
//! # Configuration
//!
//! Hover can be disabled via [`Settings::hover`], and the reported range is
//! chosen by [`Settings::hover_range`]:
//!
//! ```toml
//! hover = true
//! hover_range = "occurrence"
//! ```

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};

use crate::{
    config::{HoverRange, Settings},
    index::DocumentIndex,
    resolve::resolve,
};

/// Generate hover content for the IRI at the cursor position.
///
/// # Returns
///
/// `Some(Hover)` with markdown content, or `None` if:
/// - Hover is disabled in settings
/// - Cursor is not on an IRI
/// - The IRI has no label in this document
pub fn hover(index: &DocumentIndex, position: Position, settings: &Settings) -> Option<Hover> {
    if !settings.hover {
        return None;
    }

    let occurrence = resolve(index, position.line, position.character)?;
    let label = index.label(&occurrence.iri)?;

    let range = match settings.hover_range {
        HoverRange::Occurrence => occurrence.range(),
        HoverRange::IdentifierLength => Range {
            start: position,
            end: Position::new(
                position.line,
                position.character + occurrence.iri.delimited_utf16_len(),
            ),
        },
    };

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format!(
                "**prefLabel:** {label}\n\n`{}`",
                occurrence.iri.delimited()
            ),
        }),
        range: Some(range),
    })
}
