use crate::{
    index::{DocumentIndex, Occurrence},
    iri::Iri,
};

/// The occurrence covering `(line, character)`, if any.
///
/// Occurrences on a line never overlap, so at most one matches; should that
/// change, the first in scan order is returned.
pub fn resolve(index: &DocumentIndex, line: u32, character: u32) -> Option<&Occurrence> {
    index
        .occurrences_on(line)
        .iter()
        .find(|occurrence| occurrence.contains(character))
}

impl DocumentIndex {
    /// The IRI under the cursor.
    pub fn identifier_at(&self, line: u32, character: u32) -> Option<&Iri> {
        resolve(self, line, character).map(|occurrence| &occurrence.iri)
    }
}
