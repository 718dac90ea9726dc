// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Diagnostics from dbt Fusion
//!
//! When a fusion executable is configured, opening or saving a model runs
//! a static-analysis compile of just that model and streams its findings
//! back as diagnostics.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌── stdout lines ──┐
//! dbt compile ... ─────┤                  ├──► mpsc ──► accumulate ──► publish (after each entry)
//!                      └── stderr lines ──┘                      └──► publish (on exit)
//! ```
//!
//! Each output line is a JSON log record:
//!
//! ```json
//! {"data": {"version": "2.0.0"},
//!  "info": {"code": "1000", "level": "error",
//!           "msg": "error: dbt1000: no such column --> models/orders.sql:3:5"}}
//! ```
//!
//! A new run does not cancel an older one for the same document; whichever
//! publishes last wins.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tower_lsp::lsp_types::{
    Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url,
};
use tower_lsp::Client;
use tracing::{debug, info, warn};

/// `--version` output prefix identifying dbt Fusion
const FUSION_VERSION_PREFIX: &str = "dbt-fusion";

/// Pending diagnostics between the stream readers and the publisher
const CHANNEL_CAPACITY: usize = 100;

static ANSI_COLOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\u001b\[[0-9;]*m|\x1b\[[0-9;]*m)").expect("valid ansi colour regex")
});

static IN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\(in .*:\d*\))").expect("valid in-path regex"));

/// Errors from running dbt Fusion
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticError {
    /// The executable is missing or is not dbt Fusion
    #[error("dbt Fusion is not available at '{path}': {reason}")]
    FusionUnavailable { path: String, reason: String },

    #[error("Failed to start dbt Fusion: {0}")]
    Spawn(#[source] std::io::Error),

    /// Artifact directories could not be created
    #[error("Failed to prepare fusion artifacts at {path}: {source}")]
    Artifacts {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Receives diagnostics as a run produces them
#[async_trait]
pub trait DiagnosticSink: Send + Sync {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>);
}

#[async_trait]
impl DiagnosticSink for Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.publish_diagnostics(uri, diagnostics, None).await;
    }
}

/// One JSON log record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FusionLog {
    pub data: FusionLogData,
    pub info: FusionLogInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FusionLogData {
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FusionLogInfo {
    pub code: String,
    pub level: String,
    pub msg: String,
}

/// A log message split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// File the message points at, if it has a location
    pub path: Option<String>,
    pub message: String,
    pub position: Position,
}

impl FusionLog {
    /// File path the record refers to, and the diagnostic for it
    pub fn to_diagnostic(&self) -> (Option<String>, Diagnostic) {
        let parsed = parse_message(&self.info.msg, &self.info.code, &self.info.level);
        let code = (!self.info.code.is_empty()).then(|| NumberOrString::String(self.info.code.clone()));
        let diagnostic = Diagnostic {
            range: Range::new(parsed.position, parsed.position),
            severity: Some(severity(&self.info.level)),
            code,
            source: Some(format!("dbt Fusion {}", self.data.version)),
            message: parsed.message,
            ..Default::default()
        };
        (parsed.path, diagnostic)
    }
}

pub fn severity(level: &str) -> DiagnosticSeverity {
    match level {
        "error" => DiagnosticSeverity::ERROR,
        "warning" => DiagnosticSeverity::WARNING,
        "info" => DiagnosticSeverity::INFORMATION,
        _ => DiagnosticSeverity::HINT,
    }
}

/// Split `<message> --> <path>:<line>:<col>` and clean up the message
pub fn parse_message(msg: &str, code: &str, level: &str) -> ParsedMessage {
    let clean = ANSI_COLOUR.replace_all(msg, "");
    let parts: Vec<&str> = clean.split(" --> ").collect();
    let [message, location] = parts.as_slice() else {
        return ParsedMessage {
            path: None,
            message: clean.into_owned(),
            position: Position::default(),
        };
    };

    let message = clean_message(message, code, level);
    let location = location.trim();
    let file = location.split(' ').next().unwrap_or_default();
    let pieces: Vec<&str> = file.split(':').collect();
    if pieces.len() < 3 {
        return ParsedMessage {
            path: None,
            message,
            position: Position::default(),
        };
    }

    ParsedMessage {
        path: Some(pieces[0].to_string()),
        message,
        position: Position::new(one_based(pieces[1]), one_based(pieces[2])),
    }
}

fn clean_message(message: &str, code: &str, level: &str) -> String {
    let mut message = message.trim().replace(r"\n", "");
    if let Some(rest) = message.strip_prefix(&format!("{level}: ")) {
        message = rest.to_string();
    }
    for prefix in [format!("{code}: "), format!("dbt{code}: ")] {
        if let Some(rest) = message.strip_prefix(&prefix) {
            message = rest.to_string();
            break;
        }
    }
    IN_PATH.replace_all(&message, "").trim().to_string()
}

/// One-based text number to a zero-based position; garbage becomes 0
fn one_based(text: &str) -> u32 {
    text.parse::<u32>().map(|n| n.saturating_sub(1)).unwrap_or(0)
}

/// `--select` argument for a document: the path after the last `models`
/// segment with `/` turned into `.`, or `*` outside a models directory
pub fn model_selector(uri: &Url) -> String {
    let segments: Vec<&str> = uri.path_segments().map(Iterator::collect).unwrap_or_default();
    let Some(index) = segments.iter().rposition(|segment| *segment == "models") else {
        return "*".to_string();
    };
    let selector = segments[index + 1..].join(".");
    let selector = selector.strip_suffix(".sql").unwrap_or(&selector);
    if selector.is_empty() {
        "*".to_string()
    } else {
        selector.to_string()
    }
}

/// Check that `executable --version` reports dbt Fusion
pub async fn validate_fusion(executable: &str) -> Result<String, DiagnosticError> {
    let unavailable = |reason: String| DiagnosticError::FusionUnavailable {
        path: executable.to_string(),
        reason,
    };
    let output = Command::new(executable)
        .arg("--version")
        .output()
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.starts_with(FUSION_VERSION_PREFIX) {
        Ok(version)
    } else {
        Err(unavailable(format!("unexpected --version output '{version}'")))
    }
}

/// Runs dbt Fusion compiles and publishes their diagnostics
#[derive(Debug, Clone)]
pub struct FusionRunner {
    executable: String,
    /// Parent of the per-project artifact directories
    artifacts_root: PathBuf,
}

impl FusionRunner {
    pub fn new(executable: impl Into<String>, artifacts_root: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            artifacts_root: artifacts_root.into(),
        }
    }

    /// `~/.dbt/dbt-language-server/fusion-artifacts`
    pub fn default_artifacts_root() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(|home| {
                PathBuf::from(home)
                    .join(".dbt")
                    .join("dbt-language-server")
                    .join("fusion-artifacts")
            })
    }

    /// Create `<root>/<project>/{target,log}`
    pub async fn prepare_artifacts(&self, project: &str) -> Result<PathBuf, DiagnosticError> {
        let dir = self.artifacts_root.join(project);
        for sub in ["target", "log"] {
            let path = dir.join(sub);
            tokio::fs::create_dir_all(&path)
                .await
                .map_err(|source| DiagnosticError::Artifacts { path, source })?;
        }
        Ok(dir)
    }

    /// Compile the model behind `uri` and publish its diagnostics to `sink`
    pub async fn run(
        &self,
        uri: Url,
        project: &str,
        project_root: &Path,
        sink: &dyn DiagnosticSink,
    ) -> Result<(), DiagnosticError> {
        let artifacts = self.prepare_artifacts(project).await?;
        let selector = model_selector(&uri);
        let target = artifacts.join("target");
        let log = artifacts.join("log");

        let mut command = Command::new(&self.executable);
        command
            .args(["compile", "-q", "--static-analysis", "on", "--log-format", "json", "--no-write-json"])
            .arg("--target-path")
            .arg(&target)
            .arg("--log-path")
            .arg(&log)
            .args(["--select", selector.as_str()])
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        info!(executable = %self.executable, %selector, "running dbt Fusion compile");

        let mut child = command.spawn().map_err(DiagnosticError::Spawn)?;
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(read_stream(stdout, "stdout", uri.to_string(), tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(read_stream(stderr, "stderr", uri.to_string(), tx.clone()));
        }
        drop(tx);

        let mut diagnostics = Vec::new();
        while let Some(diagnostic) = rx.recv().await {
            diagnostics.push(diagnostic);
            sink.publish(uri.clone(), diagnostics.clone()).await;
        }

        match child.wait().await {
            Ok(status) if !status.success() => debug!(%status, "dbt Fusion compile reported failure"),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to wait for dbt Fusion"),
        }

        debug!(count = diagnostics.len(), "fusion diagnostics complete");
        sink.publish(uri, diagnostics).await;
        Ok(())
    }
}

/// Forward diagnostics for `uri` found in one output stream
async fn read_stream<R>(stream: R, name: &'static str, uri: String, tx: mpsc::Sender<Diagnostic>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(stream = name, error = %e, "error reading dbt Fusion output");
                break;
            }
        };
        debug!(stream = name, %line, "fusion output");

        let entry: FusionLog = match serde_json::from_str(&line) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(stream = name, error = %e, "skipping non-JSON fusion output");
                continue;
            }
        };
        let (path, diagnostic) = entry.to_diagnostic();
        let Some(path) = path.filter(|path| !path.is_empty()) else {
            continue;
        };
        if uri.contains(&path) && tx.send(diagnostic).await.is_err() {
            break;
        }
    }
}
