//! Language server wiring.
//!
//! [`Backend`] is the only place that knows LSP method names. It forwards to a
//! [`DocumentFeatures`] implementation, by default [`Workspace`].

use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    Diagnostic, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, Hover, HoverParams, HoverProviderCapability, InitializeParams,
    InitializeResult, InitializedParams, InlayHint, InlayHintParams, MessageType, OneOf, Position,
    Range, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{async_trait, Client, LanguageServer};
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    diagnostics::diagnostics,
    error::ParseError,
    hover::hover,
    index::{DocumentIndex, IndexSummary},
    inlay_hints::inlay_hints,
    session::DocumentSessions,
};

pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// One method per editor capability.
#[async_trait]
pub trait DocumentFeatures: Send + Sync + 'static {
    async fn configure(&self, settings: Settings);
    async fn on_open(&self, uri: Url, text: &str) -> std::result::Result<IndexSummary, ParseError>;
    async fn on_change(&self, uri: Url, text: &str)
        -> std::result::Result<IndexSummary, ParseError>;
    async fn on_close(&self, uri: &Url);
    async fn hover(&self, uri: &Url, position: Position) -> Option<Hover>;
    /// Diagnostics for the document's current index; empty when it has none.
    async fn diagnostics(&self, uri: &Url) -> Vec<Diagnostic>;
    async fn inlay_hints(&self, uri: &Url, range: Range) -> Vec<InlayHint>;
}

/// Open documents plus the active settings.
#[derive(Debug, Default)]
pub struct Workspace {
    sessions: DocumentSessions,
    settings: RwLock<Settings>,
}

impl Workspace {
    pub fn new(settings: Settings) -> Self {
        Self {
            sessions: DocumentSessions::default(),
            settings: RwLock::new(settings),
        }
    }

    pub async fn index(&self, uri: &Url) -> Option<Arc<DocumentIndex>> {
        self.sessions.get(uri).await
    }

    async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }
}

#[async_trait]
impl DocumentFeatures for Workspace {
    async fn configure(&self, settings: Settings) {
        *self.settings.write().await = settings;
    }

    async fn on_open(&self, uri: Url, text: &str) -> std::result::Result<IndexSummary, ParseError> {
        Ok(self.sessions.open(uri, text).await?.summary())
    }

    async fn on_change(
        &self,
        uri: Url,
        text: &str,
    ) -> std::result::Result<IndexSummary, ParseError> {
        Ok(self.sessions.update(uri, text).await?.summary())
    }

    async fn on_close(&self, uri: &Url) {
        self.sessions.close(uri).await;
    }

    async fn hover(&self, uri: &Url, position: Position) -> Option<Hover> {
        let index = self.index(uri).await?;
        hover(&index, position, &self.settings().await)
    }

    async fn diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        let Some(index) = self.index(uri).await else {
            return Vec::new();
        };
        diagnostics(&index, &self.settings().await).unwrap_or_default()
    }

    async fn inlay_hints(&self, uri: &Url, range: Range) -> Vec<InlayHint> {
        let Some(index) = self.index(uri).await else {
            return Vec::new();
        };
        inlay_hints(&index, range, &self.settings().await).unwrap_or_default()
    }
}

pub struct Backend<F = Workspace> {
    client: Client,
    features: Arc<F>,
}

impl Backend<Workspace> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(Workspace::default()))
    }
}

impl<F: DocumentFeatures> Backend<F> {
    pub fn with_features(client: Client, features: Arc<F>) -> Self {
        Self { client, features }
    }

    /// Report the outcome of a rebuild, then publish diagnostics for whatever
    /// index is now current.
    async fn after_build(
        &self,
        uri: Url,
        version: Option<i32>,
        outcome: std::result::Result<IndexSummary, ParseError>,
    ) {
        let version = published_version(version, &outcome);
        match outcome {
            Ok(summary) => {
                info!(
                    %uri,
                    identifiers = summary.identifiers,
                    labels = summary.labels,
                    "document indexed"
                );
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!(
                            "indexed {} IRIs / {} prefLabels ({uri})",
                            summary.identifiers, summary.labels
                        ),
                    )
                    .await;
            }
            Err(err) => {
                warn!(%uri, error = %err, "keeping previous index");
                self.client
                    .log_message(MessageType::WARNING, format!("{uri}: {err}"))
                    .await;
            }
        }

        let diagnostics = self.features.diagnostics(&uri).await;
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

/// Diagnostics after a failed build describe the previous text, so they must
/// not claim the version that failed to parse.
fn published_version(
    version: Option<i32>,
    outcome: &std::result::Result<IndexSummary, ParseError>,
) -> Option<i32> {
    outcome.as_ref().ok().and(version)
}

#[async_trait]
impl<F: DocumentFeatures> LanguageServer for Backend<F> {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!(client = ?params.client_info, "initialize");

        #[allow(deprecated)]
        let root_dir = params
            .root_uri
            .as_ref()
            .or_else(|| params.workspace_folders.as_ref()?.first().map(|f| &f.uri))
            .and_then(|uri| uri.to_file_path().ok());

        let settings = match Settings::new(root_dir.as_deref(), &params.capabilities) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %err, "falling back to default settings");
                Settings::default()
            }
        };
        debug!(?settings, "settings loaded");
        self.features.configure(settings).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                inlay_hint_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, format!("{SERVER_NAME} initialized"))
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        let outcome = self
            .features
            .on_open(document.uri.clone(), &document.text)
            .await;
        self.after_build(document.uri, Some(document.version), outcome)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        // Full sync: the last change carries the whole text.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };
        let outcome = self.features.on_change(uri.clone(), &change.text).await;
        self.after_build(uri, Some(params.text_document.version), outcome)
            .await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.features.on_close(&uri).await;
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position = params.text_document_position_params;
        Ok(self
            .features
            .hover(&position.text_document.uri, position.position)
            .await)
    }

    async fn inlay_hint(&self, params: InlayHintParams) -> Result<Option<Vec<InlayHint>>> {
        let hints = self
            .features
            .inlay_hints(&params.text_document.uri, params.range)
            .await;
        Ok(Some(hints))
    }
}
