//! Required-field rules for the four structural artifacts.
//!
//! Each validator appends findings and returns whether the document passed.
//! Warnings never affect the returned value.
use super::Findings;
use crate::blueprint::AltitudeLevel;
use crate::paths::{ALTITUDE_FILE, CTB_FILE, IMO_FILE, STACK_FILE};
use serde_json::Value;

const STRATEGIC_REQUIRED: [&str; 2] = ["project_name", "objective"];
const IMO_SECTIONS: [&str; 3] = ["input", "middle", "output"];
const CTB_SECTIONS: [&str; 3] = ["heir_canopy", "star", "branches"];
const HEIR_FIELDS: [&str; 4] = ["history", "enforcement", "integrity", "repair"];
const STACK_SECTIONS: [&str; 3] = ["languages", "frameworks", "deployment"];

/// Empty strings, empty containers, `null`, `false` and zero count as absent.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// `01_altitude.json`: all four tiers as objects, 30k names the project.
///
/// A missing `altitudes` key stops this document's checks immediately.
pub fn validate_altitude(data: &Value, findings: &mut Findings) -> bool {
    let Some(altitudes) = data.get("altitudes") else {
        findings.error(ALTITUDE_FILE, "Missing 'altitudes' root object");
        return false;
    };
    let Some(altitudes) = altitudes.as_object() else {
        findings.error(ALTITUDE_FILE, "'altitudes' must be an object");
        return false;
    };

    let mut passed = true;
    for level in AltitudeLevel::ALL {
        match altitudes.get(level.key()) {
            None => {
                findings.error(
                    ALTITUDE_FILE,
                    format!("Missing altitude level '{}'", level.key()),
                );
                passed = false;
            }
            Some(tier) if !tier.is_object() => {
                findings.error(
                    ALTITUDE_FILE,
                    format!("Altitude '{}' must be an object", level.key()),
                );
                passed = false;
            }
            Some(_) => {}
        }
    }

    if let Some(strategic) = altitudes
        .get(AltitudeLevel::Strategic.key())
        .and_then(Value::as_object)
    {
        for field in STRATEGIC_REQUIRED {
            if !is_present(strategic.get(field)) {
                findings.error(
                    ALTITUDE_FILE,
                    format!("Missing required field 'altitudes.30000.{field}'"),
                );
                passed = false;
            }
        }
    }

    passed
}

/// `02_imo.json`: input, middle and output objects.
pub fn validate_imo(data: &Value, findings: &mut Findings) -> bool {
    let mut passed = true;
    for section in IMO_SECTIONS {
        match data.get(section) {
            None => {
                findings.error(IMO_FILE, format!("Missing required section '{section}'"));
                passed = false;
            }
            Some(value) if !value.is_object() => {
                findings.error(IMO_FILE, format!("Section '{section}' must be an object"));
                passed = false;
            }
            Some(_) => {}
        }
    }

    if let Some(middle) = data.get("middle").and_then(Value::as_object) {
        if !middle.contains_key("orchestration") {
            findings.warn(
                IMO_FILE,
                "'middle.orchestration' recommended for tooling clarity",
            );
        }
    }

    passed
}

/// `03_ctb.json`: canopy, star and a branch array.
pub fn validate_ctb(data: &Value, findings: &mut Findings) -> bool {
    let mut passed = true;
    for section in CTB_SECTIONS {
        if data.get(section).is_none() {
            findings.error(CTB_FILE, format!("Missing required section '{section}'"));
            passed = false;
        }
    }

    if let Some(canopy) = data.get("heir_canopy") {
        for field in HEIR_FIELDS {
            if canopy.get(field).is_none() {
                findings.warn(CTB_FILE, format!("HEIR canopy missing '{field}' field"));
            }
        }
    }

    match data.get("branches") {
        Some(Value::Array(branches)) if branches.is_empty() => {
            findings.warn(CTB_FILE, "No branches defined");
        }
        Some(Value::Array(_)) | None => {}
        Some(_) => {
            findings.error(CTB_FILE, "'branches' must be an array");
            passed = false;
        }
    }

    passed
}

/// `04_stack.json`: languages, frameworks and deployment.
pub fn validate_stack(data: &Value, findings: &mut Findings) -> bool {
    let mut passed = true;
    for section in STACK_SECTIONS {
        if data.get(section).is_none() {
            findings.error(STACK_FILE, format!("Missing required section '{section}'"));
            passed = false;
        }
    }

    if let Some(deployment) = data.get("deployment") {
        if deployment.get("target").is_none() {
            findings.warn(STACK_FILE, "'deployment.target' not specified");
        }
    }

    passed
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
