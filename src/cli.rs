//! Command line interface.
//!
//! With no subcommand the binary runs the language server on stdio, which is
//! how editors launch it. `check` indexes one file and prints the same
//! missing-label hints the server would publish.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::{
    diagnostics::{missing_labels, MissingLabel},
    index::{build_index, IndexSummary},
};

#[derive(Parser, Debug)]
#[command(name = "nt-pref-ls", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set. Logs go to stderr.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the language server over stdio (default)
    Serve,
    /// Index a file and report IRIs without a prefLabel
    Check {
        path: PathBuf,
        /// Print a JSON report instead of one line per hint
        #[arg(long)]
        json: bool,
    },
}

/// Install the global subscriber. Stdout carries LSP messages, so logs go to
/// stderr.
pub fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: PathBuf,
    pub summary: IndexSummary,
    pub missing_labels: Vec<MissingLabel>,
}

pub fn check(path: &Path) -> anyhow::Result<CheckReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let index = build_index(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(CheckReport {
        path: path.to_path_buf(),
        summary: index.summary(),
        missing_labels: missing_labels(&index),
    })
}

/// Print a report as `file:line:col: hint: message` lines, 1-based.
pub fn write_report(out: &mut impl Write, report: &CheckReport, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    for missing in &report.missing_labels {
        writeln!(
            out,
            "{}:{}:{}: hint: {}",
            report.path.display(),
            missing.line + 1,
            missing.character + 1,
            missing.message()
        )?;
    }
    Ok(())
}
