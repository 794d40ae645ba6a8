//! Shared helpers for driving the `blueprint` binary in integration tests.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp workspace holding one source blueprint and an output directory.
pub struct Workspace {
    _temp: TempDir,
    pub source: PathBuf,
    pub out: PathBuf,
}

impl Workspace {
    pub fn with_source(source: &Value) -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let source_path = temp.path().join("blueprint.json");
        std::fs::write(
            &source_path,
            serde_json::to_string_pretty(source).expect("serialize source"),
        )
        .expect("write source");
        let out = temp.path().join("blueprints").join("sample");
        Self {
            _temp: temp,
            source: source_path,
            out,
        }
    }

    pub fn emit(&self) -> Output {
        run(&[
            "emit",
            &self.source.display().to_string(),
            &self.out.display().to_string(),
        ])
    }

    pub fn gate(&self, extra: &[&str]) -> Output {
        let dir = self.out.display().to_string();
        let mut args = vec!["gate", dir.as_str()];
        args.extend_from_slice(extra);
        run(&args)
    }

    pub fn verify(&self, extra: &[&str]) -> Output {
        let dir = self.out.display().to_string();
        let mut args = vec!["verify", dir.as_str()];
        args.extend_from_slice(extra);
        run(&args)
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.out.join(name)
    }
}

/// Run the binary with logging held at the default level.
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blueprint"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run blueprint")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json file")
}

/// A source covering every tier plus meta and trunk_root.
pub fn full_source() -> Value {
    json!({
        "project_slug": "atlas",
        "meta": {
            "blueprint_version_hash": "9f2c1d",
            "doctrine": ["HEIR", "ORBT", "IMO"]
        },
        "trunk_root": {
            "schema_enforcement": ["Neon Postgres primary", "Firebase auth", "BigQuery analytics"],
            "telemetry": {"provider": "posthog"}
        },
        "altitudes": {
            "30000": {
                "project_name": "Atlas",
                "objective": "Unify the sales pipeline",
                "stakeholders": ["sales", "ops"]
            },
            "20000": {
                "inputs": ["crm export"],
                "outputs": ["weekly report"],
                "data_flow": {"crm": "warehouse"}
            },
            "10000": {
                "documentation_plan": {"readme": true},
                "decision_points": ["pick vendor"],
                "llms": ["planner"]
            },
            "5000": {"tasks": ["wire ingest", "ship dashboard"]}
        }
    })
}
