use itertools::Itertools;
use serde::Serialize;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::{config::Settings, index::DocumentIndex, iri::Iri};

/// An IRI used as subject or object with no `skos:prefLabel`, anchored at its
/// first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLabel {
    pub iri: Iri,
    pub line: u32,
    pub character: u32,
}

impl MissingLabel {
    pub fn range(&self) -> Range {
        Range {
            start: Position::new(self.line, self.character),
            end: Position::new(self.line, self.character + self.iri.delimited_utf16_len()),
        }
    }

    pub fn message(&self) -> String {
        format!("No skos:prefLabel for {}", self.iri.delimited())
    }
}

/// Known IRIs lacking a label, sorted by position.
///
/// An IRI the parser saw but the scanner never matched (its text differs
/// after unescaping, for example) has no position and is skipped.
pub fn missing_labels(index: &DocumentIndex) -> Vec<MissingLabel> {
    index
        .known_identifiers
        .iter()
        .filter(|iri| !index.labels.contains_key(*iri))
        .filter_map(|iri| {
            index.first_position(iri).map(|position| MissingLabel {
                iri: iri.clone(),
                line: position.line,
                character: position.character,
            })
        })
        .sorted_by(|a, b| {
            (a.line, a.character, &a.iri).cmp(&(b.line, b.character, &b.iri))
        })
        .collect()
}

pub fn diagnostics(index: &DocumentIndex, settings: &Settings) -> Option<Vec<Diagnostic>> {
    if !settings.missing_label_diagnostics {
        return None;
    }

    let diags = missing_labels(index)
        .into_iter()
        .map(|missing| Diagnostic {
            range: missing.range(),
            message: missing.message(),
            source: Some("nt-pref-ls".into()),
            severity: Some(DiagnosticSeverity::HINT),
            ..Default::default()
        })
        .collect();

    Some(diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::Occurrence,
        ntriples::{Term, Triple},
        test_utils::{index_of, label_line},
    };

    #[test]
    fn test_diagnostics_for_unlabelled_subject() {
        let text = format!(
            "{}\n\n<http://x/lyon> <http://x/p> \"v\" .\n",
            label_line("http://x/paris", "Paris")
        );
        let index = index_of(&text);

        let diags = diagnostics(&index, &Settings::default()).unwrap();

        assert_eq!(diags.len(), 1, "Should have 1 diagnostic for lyon");
        assert_eq!(diags[0].severity, Some(DiagnosticSeverity::HINT));
        assert_eq!(diags[0].source, Some("nt-pref-ls".to_string()));
        assert_eq!(diags[0].message, "No skos:prefLabel for <http://x/lyon>");
        assert_eq!(
            diags[0].range,
            Range {
                start: Position::new(2, 0),
                end: Position::new(2, 15),
            }
        );
    }

    #[test]
    fn test_unlabelled_object_is_reported() {
        let text = format!(
            "{}\n<http://x/a> <http://x/knows> <http://x/b> .\n",
            label_line("http://x/a", "A")
        );
        let missing = missing_labels(&index_of(&text));

        assert_eq!(
            missing,
            vec![MissingLabel {
                iri: "http://x/b".into(),
                line: 1,
                character: 30,
            }]
        );
    }

    #[test]
    fn test_predicate_only_iri_is_not_reported() {
        let index = index_of(&label_line("http://x/a", "A"));
        assert!(missing_labels(&index).is_empty());
    }

    #[test]
    fn test_anchor_is_first_occurrence() {
        let text = "<a:x> <a:p> <a:y> .\n<a:y> <a:p> <a:x> .\n";
        let missing = missing_labels(&index_of(text));
        let anchors: Vec<(String, u32, u32)> = missing
            .iter()
            .map(|m| (m.iri.to_string(), m.line, m.character))
            .collect();
        assert_eq!(
            anchors,
            vec![("a:x".to_string(), 0, 0), ("a:y".to_string(), 0, 12)]
        );
    }

    #[test]
    fn test_identifier_without_position_is_skipped() {
        let triples = vec![Triple {
            subject: Term::Iri("http://x/unseen".into()),
            predicate: "http://x/p".into(),
            object: Term::Iri("http://x/seen".into()),
        }];
        let occurrences = vec![Occurrence {
            line: 0,
            start: 4,
            end: 19,
            iri: "http://x/seen".into(),
        }];
        let index = DocumentIndex::from_parts(&triples, occurrences);

        let missing = missing_labels(&index);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].iri.as_str(), "http://x/seen");
    }

    #[test]
    fn test_diagnostics_are_stable() {
        let text = "<a:1> <a:p> <a:2> .\n<a:3> <a:p> <a:4> .\n<a:5> <a:p> <a:1> .\n";
        let index = index_of(text);

        let first = diagnostics(&index, &Settings::default()).unwrap();
        let second = diagnostics(&index, &Settings::default()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_diagnostics_disabled_by_setting() {
        let index = index_of("<a:1> <a:p> <a:2> .");
        let settings = Settings {
            missing_label_diagnostics: false,
            ..Settings::default()
        };
        assert!(diagnostics(&index, &settings).is_none());
    }

    #[test]
    fn test_empty_document_has_no_diagnostics() {
        let diags = diagnostics(&index_of(""), &Settings::default()).unwrap();
        assert!(diags.is_empty());
    }
}
