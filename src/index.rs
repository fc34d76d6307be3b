//! The per-document index: parsed labels merged with lexical positions.
//!
//! Labels and the set of known identifiers come from the parsed statements.
//! Positions come from [`crate::scanner`]. The two views are joined by IRI.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tower_lsp::lsp_types::{Position, Range};

use crate::{
    error::ParseError,
    iri::Iri,
    ntriples::{NTriplesParser, Term, Triple, TripleParser},
    scanner,
};

/// `skos:prefLabel`, the only predicate that names an IRI.
pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

/// One `<iri>` in the text. `start..end` is half-open, in UTF-16 units,
/// and includes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occurrence {
    pub line: u32,
    pub start: u32,
    pub end: u32,
    pub iri: Iri,
}

impl Occurrence {
    pub fn contains(&self, character: u32) -> bool {
        self.start <= character && character < self.end
    }

    pub fn range(&self) -> Range {
        Range {
            start: Position::new(self.line, self.start),
            end: Position::new(self.line, self.end),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentIndex {
    /// IRI to its `skos:prefLabel`. The last statement wins.
    pub labels: HashMap<Iri, String>,
    /// Every IRI seen as a subject or object. Predicates are not included.
    pub known_identifiers: HashSet<Iri>,
    /// Occurrences per line, in scan order.
    pub occurrences_by_line: BTreeMap<u32, Vec<Occurrence>>,
    /// Where each IRI first appears in the text.
    pub first_position: HashMap<Iri, Position>,
}

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub identifiers: usize,
    pub labels: usize,
    pub occurrences: usize,
    pub lines: usize,
}

/// Build an index for an N-Triples document.
pub fn build_index(text: &str) -> Result<DocumentIndex, ParseError> {
    DocumentIndex::build(&NTriplesParser, text)
}

impl DocumentIndex {
    pub fn build<P: TripleParser + ?Sized>(parser: &P, text: &str) -> Result<Self, ParseError> {
        let triples = parser.parse(text)?;
        let occurrences = scanner::scan(text);
        Ok(Self::from_parts(&triples, occurrences))
    }

    /// Merge parsed statements with scanned occurrences.
    ///
    /// `occurrences` must be in scan order: the first one seen for an IRI
    /// becomes its first position.
    pub fn from_parts(triples: &[Triple], occurrences: Vec<Occurrence>) -> Self {
        let mut index = DocumentIndex::default();

        for triple in triples {
            if let Some((subject, label)) = pref_label(triple) {
                index.labels.insert(subject.clone(), label.to_string());
            }
            if let Some(subject) = triple.subject.as_iri() {
                index.known_identifiers.insert(subject.clone());
            }
            if let Some(object) = triple.object.as_iri() {
                index.known_identifiers.insert(object.clone());
            }
        }

        for occurrence in occurrences {
            index
                .first_position
                .entry(occurrence.iri.clone())
                .or_insert_with(|| Position::new(occurrence.line, occurrence.start));
            index
                .occurrences_by_line
                .entry(occurrence.line)
                .or_default()
                .push(occurrence);
        }

        index
    }

    /// The label to display for `iri`. An empty `""` label shows nothing.
    pub fn label(&self, iri: &Iri) -> Option<&str> {
        self.labels
            .get(iri)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    pub fn occurrences_on(&self, line: u32) -> &[Occurrence] {
        self.occurrences_by_line
            .get(&line)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn first_position(&self, iri: &Iri) -> Option<Position> {
        self.first_position.get(iri).copied()
    }

    /// All occurrences in document order.
    pub fn occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences_by_line.values().flatten()
    }

    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            identifiers: self.known_identifiers.len(),
            labels: self.labels.len(),
            occurrences: self.occurrences().count(),
            lines: self.occurrences_by_line.len(),
        }
    }
}

/// `(subject, label)` when the triple is `<s> skos:prefLabel "label"`.
///
/// Language-tagged labels count. Literals with an explicit datatype do not.
fn pref_label(triple: &Triple) -> Option<(&Iri, &str)> {
    if triple.predicate.as_str() != PREF_LABEL {
        return None;
    }
    match (&triple.subject, &triple.object) {
        (Term::Iri(subject), Term::Literal(literal)) if literal.datatype.is_none() => {
            Some((subject, literal.value.as_str()))
        }
        _ => None,
    }
}
