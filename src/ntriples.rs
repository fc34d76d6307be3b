//! N-Triples statement parser.
//!
//! Produces the `(subject, predicate, object)` statements of a document in
//! document order. Term positions are not tracked here; see
//! [`crate::scanner`] for that.
//!
//! ```text
//! triple    ::= subject predicate object '.'
//! subject   ::= IRIREF | BLANK_NODE_LABEL
//! predicate ::= IRIREF
//! object    ::= IRIREF | BLANK_NODE_LABEL | literal
//! literal   ::= STRING_LITERAL_QUOTE ('^^' IRIREF | LANGTAG)?
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use ropey::Rope;

use crate::{error::ParseError, iri::Iri, scanner::document_lines};

/// `LANGTAG` without the leading `@`.
static LANG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+(-[a-zA-Z0-9]+)*").expect("valid language tag regex"));

/// IRI scheme, e.g. `http:` or `urn:`.
static IRI_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").expect("valid IRI scheme regex"));

/// A literal value. `datatype` is only set when the document writes one
/// explicitly with `^^`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<Iri>,
    pub language: Option<String>,
}

/// A subject or object position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(Iri),
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

/// Turns document text into statements.
pub trait TripleParser {
    /// Statements must come back in document order.
    fn parse(&self, text: &str) -> Result<Vec<Triple>, ParseError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NTriplesParser;

impl TripleParser for NTriplesParser {
    fn parse(&self, text: &str) -> Result<Vec<Triple>, ParseError> {
        parse(text)
    }
}

/// Parse a whole N-Triples document.
pub fn parse(text: &str) -> Result<Vec<Triple>, ParseError> {
    let rope = Rope::from_str(text);
    let mut triples = Vec::new();
    for (line, content) in document_lines(&rope) {
        let content: &str = match line {
            0 => content.strip_prefix('\u{feff}').unwrap_or(&content),
            _ => &content,
        };
        let mut cursor = Cursor::new(content, line as usize + 1);
        if let Some(triple) = cursor.statement()? {
            triples.push(triple);
        }
    }
    Ok(triples)
}

/// Parser state over a single line.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self { text, pos: 0, line }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.pos += 1;
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), None | Some('#'))
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let column = self.text[..self.pos].chars().count() + 1;
        ParseError::syntax(self.line, column, message)
    }

    /// One statement, or `None` for a blank or comment-only line.
    fn statement(&mut self) -> Result<Option<Triple>, ParseError> {
        self.skip_ws();
        if self.at_line_end() {
            return Ok(None);
        }

        let subject = match self.peek() {
            Some('<') => Term::Iri(self.iri()?),
            Some('_') => Term::BlankNode(self.blank_node()?),
            _ => return Err(self.error("expected an IRI or blank node as subject")),
        };
        self.skip_ws();

        if self.peek() != Some('<') {
            return Err(self.error("expected an IRI as predicate"));
        }
        let predicate = self.iri()?;
        self.skip_ws();

        let object = match self.peek() {
            Some('<') => Term::Iri(self.iri()?),
            Some('_') => Term::BlankNode(self.blank_node()?),
            Some('"') => Term::Literal(self.literal()?),
            _ => return Err(self.error("expected an IRI, blank node or literal as object")),
        };
        self.skip_ws();

        if !self.eat('.') {
            return Err(self.error("expected '.' at end of statement"));
        }
        self.skip_ws();
        if !self.at_line_end() {
            return Err(self.error("unexpected content after '.'"));
        }

        Ok(Some(Triple {
            subject,
            predicate,
            object,
        }))
    }

    fn iri(&mut self) -> Result<Iri, ParseError> {
        let start = self.pos;
        self.eat('<');
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated IRI")),
                Some('>') => break,
                Some('\\') => value.push(self.unicode_escape()?),
                Some(c) if is_forbidden_in_iri(c) => {
                    return Err(self.error(format!("invalid character {c:?} in IRI")))
                }
                Some(c) => value.push(c),
            }
        }
        if !IRI_SCHEME.is_match(&value) {
            self.pos = start;
            return Err(self.error(format!("IRI <{value}> is not absolute")));
        }
        Ok(Iri::new(value))
    }

    fn blank_node(&mut self) -> Result<String, ParseError> {
        if !self.rest().starts_with("_:") {
            return Err(self.error("expected '_:' to start a blank node"));
        }
        self.pos += 2;
        let label_start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{00B7}') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        // A label cannot end with '.', that one terminates the statement.
        while self.text[label_start..self.pos].ends_with('.') {
            self.pos -= 1;
        }
        let label = &self.text[label_start..self.pos];
        match label.chars().next() {
            None => Err(self.error("empty blank node label")),
            Some(c) if c == '-' || c == '.' || c == '\u{00B7}' => {
                Err(self.error(format!("blank node label cannot start with {c:?}")))
            }
            Some(_) => Ok(label.to_string()),
        }
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        self.eat('"');
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string literal")),
                Some('"') => break,
                Some('\\') => value.push(self.string_escape()?),
                Some(c) => value.push(c),
            }
        }

        let mut literal = Literal {
            value,
            datatype: None,
            language: None,
        };
        if self.rest().starts_with("^^") {
            self.pos += 2;
            if self.peek() != Some('<') {
                return Err(self.error("expected a datatype IRI after '^^'"));
            }
            literal.datatype = Some(self.iri()?);
        } else if self.eat('@') {
            let Some(tag) = LANG_TAG.find(self.rest()) else {
                return Err(self.error("invalid language tag"));
            };
            literal.language = Some(tag.as_str().to_string());
            self.pos += tag.end();
        }
        Ok(literal)
    }

    /// Escapes allowed inside IRIs: `\uXXXX` and `\UXXXXXXXX`.
    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        match self.bump() {
            Some('u') => self.hex_char(4),
            Some('U') => self.hex_char(8),
            _ => Err(self.error("invalid escape sequence")),
        }
    }

    fn string_escape(&mut self) -> Result<char, ParseError> {
        match self.peek() {
            Some('u' | 'U') => self.unicode_escape(),
            Some(c) => {
                let unescaped = match c {
                    't' => '\t',
                    'b' => '\u{8}',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\u{c}',
                    '"' => '"',
                    '\'' => '\'',
                    '\\' => '\\',
                    _ => return Err(self.error(format!("invalid escape sequence \\{c}"))),
                };
                self.bump();
                Ok(unescaped)
            }
            None => Err(self.error("unterminated escape sequence")),
        }
    }

    fn hex_char(&mut self, digits: usize) -> Result<char, ParseError> {
        let hex = self.rest().get(..digits).unwrap_or_default();
        if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.error(format!("expected {digits} hex digits")));
        }
        let code = u32::from_str_radix(hex, 16).map_err(|e| self.error(e.to_string()))?;
        let c = char::from_u32(code)
            .ok_or_else(|| self.error(format!("invalid code point U+{code:X}")))?;
        self.pos += digits;
        Ok(c)
    }
}

fn is_forbidden_in_iri(c: char) -> bool {
    matches!(c, '<' | '"' | '{' | '}' | '|' | '^' | '`' | '\x00'..='\x20')
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    #[test]
    fn test_parse_iri_statement() {
        let triples = parse("<http://x/a> <http://x/p> <http://x/b> .").unwrap();
        assert_eq!(
            triples,
            vec![Triple {
                subject: Term::Iri("http://x/a".into()),
                predicate: "http://x/p".into(),
                object: Term::Iri("http://x/b".into()),
            }]
        );
    }

    #[test]
    fn test_parse_literals() {
        let text = format!(
            "<http://x/a> <{PREF_LABEL}> \"Paris\" .\n\
             <http://x/a> <{PREF_LABEL}> \"Parigi\"@it-IT .\n\
             <http://x/a> <http://x/n> \"3\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n"
        );
        let triples = parse(&text).unwrap();
        assert_eq!(triples.len(), 3);

        let objects: Vec<&Term> = triples.iter().map(|t| &t.object).collect();
        assert_eq!(
            objects[0],
            &Term::Literal(Literal {
                value: "Paris".into(),
                datatype: None,
                language: None,
            })
        );
        assert_eq!(
            objects[1],
            &Term::Literal(Literal {
                value: "Parigi".into(),
                datatype: None,
                language: Some("it-IT".into()),
            })
        );
        match objects[2] {
            Term::Literal(Literal { datatype, .. }) => assert_eq!(
                datatype.as_ref().map(Iri::as_str),
                Some("http://www.w3.org/2001/XMLSchema#integer")
            ),
            other => panic!("Expected a literal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_blank_nodes_and_comments() {
        let text = "# header comment\n\
                    \n\
                    _:b1 <http://x/p> _:b2.   # trailing\n\
                    _:b2 <http://x/p> <http://x/c> .\n";
        let triples = parse(text).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, Term::BlankNode("b1".into()));
        assert_eq!(triples[0].object, Term::BlankNode("b2".into()));
    }

    #[test]
    fn test_parse_escapes() {
        let text = r#"<http://x/café> <http://x/p> "tab\there \"quoted\" \U0001F600" ."#;
        let triples = parse(text).unwrap();
        assert_eq!(triples[0].subject, Term::Iri("http://x/caf\u{e9}".into()));
        match &triples[0].object {
            Term::Literal(literal) => {
                assert_eq!(literal.value, "tab\there \"quoted\" \u{1F600}")
            }
            other => panic!("Expected a literal, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_order_is_document_order() {
        let text = "<a:1> <a:p> <a:x> .\n<a:2> <a:p> <a:x> .\n<a:3> <a:p> <a:x> .";
        let subjects: Vec<String> = parse(text)
            .unwrap()
            .iter()
            .filter_map(|t| t.subject.as_iri().map(Iri::to_string))
            .collect();
        assert_eq!(subjects, vec!["a:1", "a:2", "a:3"]);
    }

    #[test]
    fn test_missing_dot_is_an_error() {
        let err = parse("<a:s> <a:p> <a:o>\n").unwrap_err();
        assert_eq!(err, ParseError::syntax(1, 18, "expected '.' at end of statement"));
    }

    #[test]
    fn test_error_reports_line() {
        let text = "<a:s> <a:p> <a:o> .\n<a:s> \"not a predicate\" <a:o> .\n";
        assert_eq!(parse(text).unwrap_err().line(), 2);
    }

    #[test]
    fn test_literal_subject_is_rejected() {
        assert!(parse("\"lit\" <a:p> <a:o> .").is_err());
    }

    #[test]
    fn test_relative_iri_is_rejected() {
        assert!(parse("<relative> <a:p> <a:o> .").is_err());
    }

    #[test]
    fn test_unterminated_terms_are_rejected() {
        assert!(parse("<a:s> <a:p> \"open .").is_err());
        assert!(parse("<a:s> <a:p> <a:o .").is_err());
        assert!(parse("<a:s> <a:p> \"x\"@ .").is_err());
    }

    #[test]
    fn test_leading_byte_order_mark_is_skipped() {
        let triples = parse("\u{feff}<a:s> <a:p> <a:o> .\n<a:s> <a:p> <a:x> .").unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, Term::Iri("a:s".into()));

        // Only at the start of the document.
        assert!(parse("<a:s> <a:p> <a:o> .\n\u{feff}<a:s> <a:p> <a:x> .").is_err());
    }

    #[test]
    fn test_plain_and_string_typed_literals_differ() {
        let text = "<a:s> <a:p> \"x\" .\n\
                    <a:s> <a:p> \"x\"^^<http://www.w3.org/2001/XMLSchema#string> .";
        let triples = parse(text).unwrap();
        let datatypes: Vec<Option<&str>> = triples
            .iter()
            .map(|t| match &t.object {
                Term::Literal(literal) => literal.datatype.as_ref().map(Iri::as_str),
                other => panic!("Expected a literal, got {:?}", other),
            })
            .collect();
        assert_eq!(
            datatypes,
            vec![None, Some("http://www.w3.org/2001/XMLSchema#string")]
        );
    }

    #[test]
    fn test_trailing_content_is_rejected() {
        assert!(parse("<a:s> <a:p> <a:o> . <a:s>").is_err());
    }
}
