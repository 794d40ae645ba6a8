//! Digest inventory of one emission run and its integrity check.
//!
//! The manifest is built up as each artifact is written, then persisted last.
//! It never lists itself.
use crate::error::{BlueprintError, Result};
use crate::paths::BlueprintPaths;
use crate::util::sha256_hex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Current `manifest_version` value.
pub const MANIFEST_VERSION: &str = "1.0";
/// Declared type for JSON artifacts.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Declared type for text artifacts.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Digest, size and declared type of one emitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub sha256: String,
    pub size_bytes: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl ManifestEntry {
    /// Describe exactly the bytes that were written.
    pub fn for_bytes(bytes: &[u8], content_type: &str) -> Self {
        Self {
            sha256: sha256_hex(bytes),
            size_bytes: bytes.len() as u64,
            content_type: content_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSummary {
    pub total_files: usize,
    pub total_size_bytes: u64,
}

/// On-disk layout of `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: String,
    pub generated_at: String,
    pub source_blueprint: String,
    pub files: BTreeMap<String, ManifestEntry>,
    pub summary: ManifestSummary,
}

impl Manifest {
    pub fn new(generated_at: &str, source_blueprint: &Path) -> Self {
        Self {
            manifest_version: MANIFEST_VERSION.to_string(),
            generated_at: generated_at.to_string(),
            source_blueprint: source_blueprint.display().to_string(),
            files: BTreeMap::new(),
            summary: ManifestSummary::default(),
        }
    }

    /// Record a written file and refresh the summary totals.
    pub fn record(&mut self, name: &str, entry: ManifestEntry) {
        self.files.insert(name.to_string(), entry);
        self.summary = ManifestSummary {
            total_files: self.files.len(),
            total_size_bytes: self.files.values().map(|entry| entry.size_bytes).sum(),
        };
    }

    /// Load `manifest.json` from a blueprint directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = BlueprintPaths::new(dir.to_path_buf()).manifest_path();
        if !path.is_file() {
            return Err(BlueprintError::MissingFile { path });
        }
        let bytes = fs::read(&path).map_err(|source| BlueprintError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|err| BlueprintError::malformed(&path, err))
    }
}

/// Integrity result for one manifest entry.
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    pub file: String,
    pub problems: Vec<String>,
}

impl FileCheck {
    pub fn ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Outcome of re-hashing every file a manifest lists.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestCheck {
    pub directory: String,
    pub passed: bool,
    pub files: Vec<FileCheck>,
    pub summary_problems: Vec<String>,
}

/// Re-hash every listed file and compare sizes, digests and summary totals.
pub fn verify_manifest(dir: &Path) -> Result<ManifestCheck> {
    let manifest = Manifest::load(dir)?;
    let paths = BlueprintPaths::new(dir.to_path_buf());
    let mut files = Vec::new();
    let mut actual_total = 0u64;

    for (name, entry) in &manifest.files {
        let mut problems = Vec::new();
        let path = paths.file(name);
        match fs::read(&path) {
            Ok(bytes) => {
                actual_total += bytes.len() as u64;
                if bytes.len() as u64 != entry.size_bytes {
                    problems.push(format!(
                        "size mismatch: manifest records {} bytes, found {}",
                        entry.size_bytes,
                        bytes.len()
                    ));
                }
                let digest = sha256_hex(&bytes);
                if digest != entry.sha256 {
                    problems.push(format!(
                        "sha256 mismatch: manifest records {}, found {digest}",
                        entry.sha256
                    ));
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                problems.push(format!("file not found at {}", path.display()));
            }
            Err(err) => {
                problems.push(format!("failed to read file - {err}"));
            }
        }
        tracing::debug!(file = %name, problems = problems.len(), "manifest entry checked");
        files.push(FileCheck {
            file: name.clone(),
            problems,
        });
    }

    let listed_total: u64 = manifest.files.values().map(|entry| entry.size_bytes).sum();
    let mut summary_problems = Vec::new();
    if manifest.summary.total_files != manifest.files.len() {
        summary_problems.push(format!(
            "summary.total_files is {}, manifest lists {} files",
            manifest.summary.total_files,
            manifest.files.len()
        ));
    }
    if manifest.summary.total_size_bytes != listed_total {
        summary_problems.push(format!(
            "summary.total_size_bytes is {}, entries sum to {listed_total}",
            manifest.summary.total_size_bytes
        ));
    }
    tracing::debug!(listed_total, actual_total, "manifest totals compared");

    let passed = files.iter().all(FileCheck::ok) && summary_problems.is_empty();
    Ok(ManifestCheck {
        directory: dir.display().to_string(),
        passed,
        files,
        summary_problems,
    })
}
