use std::{fmt, sync::Arc};

use serde::Serialize;

/// An absolute IRI, stored without its `<` `>` delimiters.
///
/// Equality and hashing are by exact string content. Cloning is cheap so the
/// same identifier can key several index maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Iri(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The form the identifier takes in a document: `<iri>`.
    pub fn delimited(&self) -> String {
        format!("<{}>", self.0)
    }

    /// Length of [`Iri::delimited`] in UTF-16 code units.
    pub fn delimited_utf16_len(&self) -> u32 {
        self.0.encode_utf16().count() as u32 + 2
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri::new(value)
    }
}
