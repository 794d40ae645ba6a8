//! Gate validation of an emitted blueprint directory.
//!
//! All four gates always run. Findings accumulate across gates so a single run
//! surfaces the complete defect list; warnings never fail a gate.
mod rules;

pub use rules::{is_present, validate_altitude, validate_ctb, validate_imo, validate_stack};

use crate::error::BlueprintError;
use crate::paths::{BlueprintPaths, ALTITUDE_FILE, CTB_FILE, IMO_FILE, STACK_FILE};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Required field missing or mistyped; fails the gate.
    Error,
    /// Recommended field missing; informational.
    Warning,
}

/// One schema violation or advisory, attributed to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Accumulated errors and warnings for one run.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Findings {
    pub fn error(&mut self, file: &str, message: impl Into<String>) {
        self.errors.push(Finding {
            file: file.to_string(),
            severity: Severity::Error,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, file: &str, message: impl Into<String>) {
        self.warnings.push(Finding {
            file: file.to_string(),
            severity: Severity::Warning,
            message: message.into(),
        });
    }
}

/// The four structural gates, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Altitude,
    Imo,
    Ctb,
    Stack,
}

impl Gate {
    pub const ALL: [Gate; 4] = [Gate::Altitude, Gate::Imo, Gate::Ctb, Gate::Stack];

    pub fn file_name(self) -> &'static str {
        match self {
            Gate::Altitude => ALTITUDE_FILE,
            Gate::Imo => IMO_FILE,
            Gate::Ctb => CTB_FILE,
            Gate::Stack => STACK_FILE,
        }
    }

    /// Run this gate's rules against a parsed document.
    pub fn validate(self, data: &Value, findings: &mut Findings) -> bool {
        match self {
            Gate::Altitude => validate_altitude(data, findings),
            Gate::Imo => validate_imo(data, findings),
            Gate::Ctb => validate_ctb(data, findings),
            Gate::Stack => validate_stack(data, findings),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GateOutcome {
    pub file: String,
    pub passed: bool,
}

/// Full result of running every gate over one directory.
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    pub directory: String,
    pub passed: bool,
    pub gates: Vec<GateOutcome>,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

fn load_document(path: &Path) -> Result<Value, BlueprintError> {
    if !path.is_file() {
        return Err(BlueprintError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| BlueprintError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|err| BlueprintError::malformed(path, err))
}

/// Load one gate's file and validate it.
///
/// A missing, unreadable or malformed file is recorded as an error and the
/// gate fails without running its rules.
pub fn load_and_validate(dir: &Path, gate: Gate, findings: &mut Findings) -> bool {
    let file = gate.file_name();
    let path = BlueprintPaths::new(dir.to_path_buf()).file(file);
    match load_document(&path) {
        Ok(data) => gate.validate(&data, findings),
        Err(BlueprintError::MissingFile { path }) => {
            findings.error(file, format!("File not found at {}", path.display()));
            false
        }
        Err(BlueprintError::MalformedInput { detail, .. }) => {
            findings.error(file, format!("Invalid JSON - {detail}"));
            false
        }
        Err(err) => {
            let detail = std::error::Error::source(&err)
                .map(ToString::to_string)
                .unwrap_or_else(|| err.to_string());
            findings.error(file, format!("Failed to read file - {detail}"));
            false
        }
    }
}

/// Run all four gates against `dir`, never stopping early.
pub fn run_all_gates(dir: &Path) -> GateReport {
    let mut findings = Findings::default();
    let mut gates = Vec::new();
    for gate in Gate::ALL {
        let passed = load_and_validate(dir, gate, &mut findings);
        tracing::debug!(file = gate.file_name(), passed, "gate evaluated");
        gates.push(GateOutcome {
            file: gate.file_name().to_string(),
            passed,
        });
    }

    // Gate results and accumulated errors must agree before reporting success.
    let passed = gates.iter().all(|gate| gate.passed) && findings.errors.is_empty();
    tracing::info!(
        errors = findings.errors.len(),
        warnings = findings.warnings.len(),
        passed,
        "gate run complete"
    );
    GateReport {
        directory: dir.display().to_string(),
        passed,
        gates,
        errors: findings.errors,
        warnings: findings.warnings,
    }
}
