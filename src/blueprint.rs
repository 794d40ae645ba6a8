//! Source blueprint loading and altitude tier defaulting.
//!
//! The source document has no enforced schema. Accessors return `None` for
//! anything missing or shaped unexpectedly so the emitter can fall back to
//! empty containers without scattering conditionals.
use crate::error::{BlueprintError, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

/// Placeholder project name for a synthesized strategic tier.
pub const UNNAMED_PROJECT: &str = "Unnamed";
/// Placeholder objective for a synthesized strategic tier.
pub const UNSPECIFIED_OBJECTIVE: &str = "Not specified";

/// One of the four fixed planning granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeLevel {
    /// 30,000 ft: strategic vision.
    Strategic,
    /// 20,000 ft: system architecture.
    Architecture,
    /// 10,000 ft: implementation.
    Implementation,
    /// 5,000 ft: tactical execution.
    Tactical,
}

impl AltitudeLevel {
    /// All tiers from highest to lowest altitude.
    pub const ALL: [AltitudeLevel; 4] = [
        AltitudeLevel::Strategic,
        AltitudeLevel::Architecture,
        AltitudeLevel::Implementation,
        AltitudeLevel::Tactical,
    ];

    /// Key used for this tier under `altitudes`.
    pub fn key(self) -> &'static str {
        match self {
            AltitudeLevel::Strategic => "30000",
            AltitudeLevel::Architecture => "20000",
            AltitudeLevel::Implementation => "10000",
            AltitudeLevel::Tactical => "5000",
        }
    }
}

/// A parsed source blueprint. Constructed fresh for every run.
#[derive(Debug, Clone, Default)]
pub struct Blueprint {
    root: Map<String, Value>,
}

impl Blueprint {
    /// Load and parse a blueprint file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BlueprintError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path).map_err(|source| BlueprintError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|err| BlueprintError::malformed(path, err))?;
        Self::from_value(value)
            .map_err(|detail| BlueprintError::malformed(path, detail))
    }

    /// Wrap an already-parsed document; the top level must be an object.
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(format!(
                "expected a JSON object at the top level, found {}",
                value_kind(&other)
            )),
        }
    }

    /// The `altitudes` mapping, when it is an object.
    pub fn altitudes(&self) -> Option<&Map<String, Value>> {
        self.root.get("altitudes").and_then(Value::as_object)
    }

    /// A tier exactly as the source carries it, whatever its type.
    pub fn tier(&self, level: AltitudeLevel) -> Option<&Value> {
        self.altitudes()?.get(level.key())
    }

    /// A field inside a tier; `None` unless the tier is an object holding it.
    pub fn tier_field(&self, level: AltitudeLevel, key: &str) -> Option<&Value> {
        self.tier(level)?.as_object()?.get(key)
    }

    /// The `meta` value as given.
    pub fn meta(&self) -> Option<&Value> {
        self.root.get("meta")
    }

    pub fn meta_field(&self, key: &str) -> Option<&Value> {
        self.meta()?.as_object()?.get(key)
    }

    /// The `project_slug` value as given.
    pub fn project_slug(&self) -> Option<&Value> {
        self.root.get("project_slug")
    }

    pub fn trunk_root_field(&self, key: &str) -> Option<&Value> {
        self.root.get("trunk_root")?.as_object()?.get(key)
    }
}

/// Resolve a tier to its canonical shape.
///
/// A tier present in the source is kept verbatim; an absent one becomes the
/// skeleton for its level, so emitted output always carries all four tiers.
pub fn canonical_tier(level: AltitudeLevel, existing: Option<&Value>, project_slug: &str) -> Value {
    match existing {
        Some(value) => value.clone(),
        None => tier_skeleton(level, project_slug),
    }
}

/// Empty skeleton for a tier, with every named field present.
pub fn tier_skeleton(level: AltitudeLevel, project_slug: &str) -> Value {
    match level {
        AltitudeLevel::Strategic => {
            let project_name = if project_slug.is_empty() {
                UNNAMED_PROJECT
            } else {
                project_slug
            };
            json!({
                "project_name": project_name,
                "objective": UNSPECIFIED_OBJECTIVE,
                "success_criteria": [],
                "stakeholders": []
            })
        }
        AltitudeLevel::Architecture => json!({
            "components": [],
            "roles": [],
            "stages": [],
            "inputs": [],
            "outputs": []
        }),
        AltitudeLevel::Implementation => json!({
            "steps": [],
            "apis_services": [],
            "decision_points": [],
            "llms": [],
            "compliance": []
        }),
        AltitudeLevel::Tactical => json!({
            "documentation_plan": [],
            "agent_roles": {},
            "handoffs": [],
            "firebreak_queue": {}
        }),
    }
}

/// Short name of a JSON value's type for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "blueprint_tests.rs"]
mod tests;
