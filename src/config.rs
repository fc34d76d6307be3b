use std::path::Path;

use anyhow::anyhow;
use config::{Config, File};
use serde::Deserialize;
use tower_lsp::lsp_types::ClientCapabilities;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hover: bool,
    pub inlay_hints: bool,
    /// Hint at IRIs that are used as subject or object but have no label
    pub missing_label_diagnostics: bool,
    pub hover_range: HoverRange,
}

/// Range attached to a hover response.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoverRange {
    /// The hovered `<iri>` exactly.
    Occurrence,
    /// From the cursor, as long as the delimited IRI. Can overshoot the
    /// occurrence when the cursor is not on its first character.
    IdentifierLength,
}

impl Settings {
    /// Load settings from the user config directory and the workspace root.
    ///
    /// Files are optional and may be in any format `config` understands,
    /// e.g. `~/.config/nt-pref-ls/settings.toml` or `<root>/.nt-pref-ls.json`.
    /// Later sources override earlier ones.
    pub fn new(
        root_dir: Option<&Path>,
        capabilities: &ClientCapabilities,
    ) -> anyhow::Result<Settings> {
        let expanded = shellexpand::tilde("~/.config/nt-pref-ls/settings");
        let mut builder = Config::builder().add_source(File::with_name(&expanded).required(false));

        if let Some(root_dir) = root_dir {
            builder = builder.add_source(
                File::with_name(&format!(
                    "{}/.nt-pref-ls",
                    root_dir
                        .to_str()
                        .ok_or(anyhow!("Can't convert root_dir to str"))?
                ))
                .required(false),
            );
        }

        let settings = builder
            .set_default("hover", true)?
            .set_default("inlay_hints", true)?
            .set_default("missing_label_diagnostics", true)?
            .set_default("hover_range", "occurrence")?
            .set_override_option(
                "inlay_hints",
                capabilities.text_document.as_ref().and_then(|it| {
                    match it.inlay_hint.is_none() {
                        true => Some(false),
                        false => None,
                    }
                }),
            )?
            .build()
            .map_err(|err| anyhow!("Build err: {err}"))?;

        let settings = settings.try_deserialize::<Settings>()?;

        anyhow::Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            hover: true,
            inlay_hints: true,
            missing_label_diagnostics: true,
            hover_range: HoverRange::Occurrence,
        }
    }
}
