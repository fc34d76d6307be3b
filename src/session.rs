//! Open documents and their current index.
//!
//! Each entry is replaced whole: an index is built outside the lock and then
//! swapped in, so readers see either the old index or the new one. A failed
//! build leaves the previous entry in place.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tower_lsp::lsp_types::Url;

use crate::{
    error::ParseError,
    index::DocumentIndex,
    ntriples::{NTriplesParser, TripleParser},
};

#[derive(Debug, Default)]
pub struct DocumentSessions<P = NTriplesParser> {
    parser: P,
    entries: RwLock<HashMap<Url, Arc<DocumentIndex>>>,
}

impl<P: TripleParser> DocumentSessions<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn open(&self, uri: Url, text: &str) -> Result<Arc<DocumentIndex>, ParseError> {
        self.install(uri, text).await
    }

    /// Full-text update. Incremental edits are not supported.
    pub async fn update(&self, uri: Url, text: &str) -> Result<Arc<DocumentIndex>, ParseError> {
        self.install(uri, text).await
    }

    pub async fn close(&self, uri: &Url) -> Option<Arc<DocumentIndex>> {
        self.entries.write().await.remove(uri)
    }

    pub async fn get(&self, uri: &Url) -> Option<Arc<DocumentIndex>> {
        self.entries.read().await.get(uri).cloned()
    }

    pub async fn uris(&self) -> Vec<Url> {
        self.entries.read().await.keys().cloned().collect()
    }

    async fn install(&self, uri: Url, text: &str) -> Result<Arc<DocumentIndex>, ParseError> {
        let index = Arc::new(DocumentIndex::build(&self.parser, text)?);
        self.entries.write().await.insert(uri, index.clone());
        Ok(index)
    }
}
