//! Lexical scan for `<iri>` occurrences.
//!
//! The triple parser does not report where a term sits in the text, so the
//! positions come from this separate pass over the raw lines. A match is a
//! `<`, one or more characters other than `>`, and the next `>` on the same
//! line. Columns are counted in UTF-16 code units, the unit LSP positions use.

use std::borrow::Cow;

use ropey::Rope;

use crate::{index::Occurrence, iri::Iri};

/// Iterate over the lines of a document with their terminators removed.
///
/// Line breaks are `\n`, `\r\n` and `\r`, matching how editors number lines.
pub(crate) fn document_lines(rope: &Rope) -> impl Iterator<Item = (u32, Cow<'_, str>)> + '_ {
    rope.lines().enumerate().map(|(number, slice)| {
        let line = match Cow::from(slice) {
            Cow::Borrowed(text) => Cow::Borrowed(text.trim_end_matches(is_line_break)),
            Cow::Owned(text) => Cow::Owned(text.trim_end_matches(is_line_break).to_string()),
        };
        (number as u32, line)
    })
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Find every delimited IRI in `text`, in line order then left to right.
pub fn scan(text: &str) -> Vec<Occurrence> {
    let rope = Rope::from_str(text);
    let mut occurrences = Vec::new();
    for (line, content) in document_lines(&rope) {
        scan_line(line, &content, &mut occurrences);
    }
    occurrences
}

fn scan_line(line: u32, text: &str, out: &mut Vec<Occurrence>) {
    let mut column = 0u32;
    // Column of the `<` that opened the pending match.
    let mut open: Option<u32> = None;
    let mut content = String::new();

    for ch in text.chars() {
        match (open, ch) {
            (None, '<') => {
                open = Some(column);
                content.clear();
            }
            (Some(start), '>') => {
                if !content.is_empty() {
                    out.push(Occurrence {
                        line,
                        start,
                        end: column + 1,
                        iri: Iri::new(content.as_str()),
                    });
                }
                open = None;
            }
            (Some(_), c) => content.push(c),
            (None, _) => {}
        }
        column += ch.len_utf16() as u32;
    }
}
