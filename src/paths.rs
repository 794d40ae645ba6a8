//! Typed paths into an emitted blueprint directory.
//!
//! Centralizing the artifact names keeps the emitter, the gate runner and the
//! manifest check agreeing on one layout.
use std::path::PathBuf;

/// Multi-altitude planning breakdown.
pub const ALTITUDE_FILE: &str = "01_altitude.json";
/// Input / middle / output structure.
pub const IMO_FILE: &str = "02_imo.json";
/// Governance backbone (HEIR canopy, star, branches).
pub const CTB_FILE: &str = "03_ctb.json";
/// Technology stack and deployment.
pub const STACK_FILE: &str = "04_stack.json";
/// Human-readable build instructions.
pub const BUILD_PROMPT_FILE: &str = "05_build_prompt.txt";
/// CI pipeline configuration.
pub const CI_CONFIG_FILE: &str = "06_ci_config.json";
/// Digest inventory of the files above.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Artifacts a complete emission run produces, in write order (manifest last).
pub const EMITTED_FILES: [&str; 7] = [
    ALTITUDE_FILE,
    IMO_FILE,
    CTB_FILE,
    STACK_FILE,
    BUILD_PROMPT_FILE,
    CI_CONFIG_FILE,
    MANIFEST_FILE,
];

/// Convenience wrapper for locating artifacts under one blueprint directory.
#[derive(Debug, Clone)]
pub struct BlueprintPaths {
    root: PathBuf,
}

impl BlueprintPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of an artifact by file name.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.file(MANIFEST_FILE)
    }
}
