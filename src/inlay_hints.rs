//! Inline labels after each labelled `<iri>`.

use tower_lsp::lsp_types::{InlayHint, InlayHintLabel, InlayHintTooltip, Position, Range};

use crate::{config::Settings, index::DocumentIndex};

/// Hints for lines `start_line..=end_line`, in document order.
pub fn hints_in_lines(index: &DocumentIndex, start_line: u32, end_line: u32) -> Vec<InlayHint> {
    if start_line > end_line {
        return Vec::new();
    }

    index
        .occurrences_by_line
        .range(start_line..=end_line)
        .flat_map(|(_, occurrences)| occurrences)
        .filter_map(|occurrence| {
            let label = index.label(&occurrence.iri)?;
            Some(InlayHint {
                position: Position::new(occurrence.line, occurrence.end),
                label: InlayHintLabel::String(label.to_string()),
                kind: None,
                text_edits: None,
                tooltip: Some(InlayHintTooltip::String(occurrence.iri.delimited())),
                padding_left: Some(true),
                padding_right: None,
                data: None,
            })
        })
        .collect()
}

pub fn inlay_hints(index: &DocumentIndex, range: Range, settings: &Settings) -> Option<Vec<InlayHint>> {
    if !settings.inlay_hints {
        return None;
    }

    Some(hints_in_lines(index, range.start.line, range.end.line))
}
