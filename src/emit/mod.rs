//! Emission of modular artifacts from one source blueprint.
//!
//! Every run loads the source once, derives each view, writes it, and records
//! its digest. A failed write is recorded for that file only; the manifest is
//! written last and never lists itself.
mod prompt;
mod views;
mod writer;

pub use prompt::render_build_prompt;
pub use views::{
    altitude_view, backbone_branches, ci_config, ctb_view, imo_view, infer_databases,
    match_database, stack_view, AltitudeView, CiConfig, CtbView, DatabaseRecord, DatabaseRule,
    ImoView, StackView, DATABASE_RULES, ORCHESTRATION_GATES,
};
pub use writer::render_json;

use crate::blueprint::Blueprint;
use crate::error::{BlueprintError, Result};
use crate::manifest::{Manifest, ManifestEntry};
use crate::paths::{
    ALTITUDE_FILE, BUILD_PROMPT_FILE, CI_CONFIG_FILE, CTB_FILE, IMO_FILE, MANIFEST_FILE,
    STACK_FILE,
};
use crate::util::utc_timestamp;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one artifact.
#[derive(Debug, Clone)]
pub enum FileStatus {
    Written(ManifestEntry),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file: String,
    pub status: FileStatus,
}

impl FileOutcome {
    fn from_result(file: &str, result: Result<ManifestEntry>) -> Self {
        let status = match result {
            Ok(entry) => {
                tracing::info!(file, bytes = entry.size_bytes, sha256 = %entry.sha256, "artifact written");
                FileStatus::Written(entry)
            }
            Err(err) => {
                let reason = error_chain(&err);
                tracing::error!(file, error = %reason, "artifact failed");
                FileStatus::Failed(reason)
            }
        };
        Self {
            file: file.to_string(),
            status,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.status, FileStatus::Written(_))
    }
}

/// Result of one emission run, including partial failures.
#[derive(Debug, Clone)]
pub struct EmitReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub generated_at: String,
    /// One entry per artifact in write order; the manifest is last.
    pub outcomes: Vec<FileOutcome>,
    pub manifest: Manifest,
}

impl EmitReport {
    /// True only when every artifact, manifest included, was written.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::succeeded)
    }

    pub fn failed_files(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .map(|outcome| outcome.file.as_str())
            .collect()
    }
}

/// Emits the six views and manifest for one source into one directory.
#[derive(Debug, Clone)]
pub struct Emitter {
    source: PathBuf,
    output_dir: PathBuf,
    generated_at: String,
}

impl Emitter {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            generated_at: utc_timestamp(),
        }
    }

    /// Pin the run timestamp used by the manifest and build prompt.
    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = generated_at.into();
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory, load the source, then emit every artifact.
    ///
    /// Returns `Err` only when nothing could be emitted (directory or source
    /// load failure). Per-file failures are reported in the `EmitReport`.
    pub fn emit_all(&self) -> Result<EmitReport> {
        fs::create_dir_all(&self.output_dir).map_err(|source| BlueprintError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        let blueprint = Blueprint::load(&self.source)?;
        tracing::info!(source = %self.source.display(), "blueprint loaded");
        Ok(self.emit_blueprint(&blueprint))
    }

    /// Emit artifacts from an already-loaded blueprint.
    pub fn emit_blueprint(&self, blueprint: &Blueprint) -> EmitReport {
        let mut manifest = Manifest::new(&self.generated_at, &self.source);
        let mut outcomes = vec![
            self.emit_json(&mut manifest, ALTITUDE_FILE, &altitude_view(blueprint)),
            self.emit_json(&mut manifest, IMO_FILE, &imo_view(blueprint)),
            self.emit_json(&mut manifest, CTB_FILE, &ctb_view(blueprint)),
            self.emit_json(&mut manifest, STACK_FILE, &stack_view(blueprint)),
        ];
        let prompt = render_build_prompt(blueprint, &self.generated_at);
        outcomes.push(self.record(
            &mut manifest,
            BUILD_PROMPT_FILE,
            writer::write_artifact_text(&self.output_dir, BUILD_PROMPT_FILE, &prompt),
        ));
        outcomes.push(self.emit_json(&mut manifest, CI_CONFIG_FILE, &ci_config(blueprint)));

        let manifest_result =
            writer::write_artifact_json(&self.output_dir, MANIFEST_FILE, &manifest);
        outcomes.push(FileOutcome::from_result(MANIFEST_FILE, manifest_result));

        EmitReport {
            source: self.source.clone(),
            output_dir: self.output_dir.clone(),
            generated_at: self.generated_at.clone(),
            outcomes,
            manifest,
        }
    }

    fn emit_json<T: Serialize>(&self, manifest: &mut Manifest, name: &str, view: &T) -> FileOutcome {
        let result = writer::write_artifact_json(&self.output_dir, name, view);
        self.record(manifest, name, result)
    }

    fn record(&self, manifest: &mut Manifest, name: &str, result: Result<ManifestEntry>) -> FileOutcome {
        if let Ok(entry) = &result {
            manifest.record(name, entry.clone());
        }
        FileOutcome::from_result(name, result)
    }
}

fn error_chain(err: &BlueprintError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
