//! Human-readable build instructions (`05_build_prompt.txt`).
use crate::blueprint::{AltitudeLevel, Blueprint, UNNAMED_PROJECT, UNSPECIFIED_OBJECTIVE};
use crate::util::plain_text;
use serde_json::Value;

const HEAVY_RULE_WIDTH: usize = 60;

const BUILD_SEQUENCE: [&str; 6] = [
    "1. Validate all gates (make gate)",
    "2. Set up infrastructure from 04_stack.json",
    "3. Implement IMO structure from 02_imo.json",
    "4. Apply CTB governance from 03_ctb.json",
    "5. Follow altitude plan from 01_altitude.json",
    "6. Deploy per 06_ci_config.json",
];

/// Number of entries in a list or mapping; anything else counts as zero.
fn count(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        _ => 0,
    }
}

fn stakeholders(value: Option<&Value>) -> String {
    match value {
        None => "None listed".to_string(),
        Some(Value::Array(items)) => items.iter().map(plain_text).collect::<Vec<_>>().join(", "),
        Some(other) => plain_text(other),
    }
}

fn push_section(lines: &mut Vec<String>, title: &str) {
    let rule = "-".repeat(HEAVY_RULE_WIDTH);
    lines.push(rule.clone());
    lines.push(title.to_string());
    lines.push(rule);
    lines.push(String::new());
}

/// Render the build prompt. Deterministic apart from `generated_at`.
///
/// Reads the source tiers directly, so counts reflect what the author wrote
/// rather than the synthesized skeletons.
pub fn render_build_prompt(blueprint: &Blueprint, generated_at: &str) -> String {
    let heavy = "=".repeat(HEAVY_RULE_WIDTH);
    let strategic = |key: &str| blueprint.tier_field(AltitudeLevel::Strategic, key);
    let field_count =
        |level: AltitudeLevel, key: &str| count(blueprint.tier_field(level, key));

    let project = strategic("project_name")
        .or_else(|| blueprint.project_slug())
        .map(plain_text)
        .unwrap_or_else(|| UNNAMED_PROJECT.to_string());
    let objective = strategic("objective")
        .map(plain_text)
        .unwrap_or_else(|| UNSPECIFIED_OBJECTIVE.to_string());
    let version = blueprint
        .meta_field("blueprint_version_hash")
        .map(plain_text)
        .unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        heavy.clone(),
        "BLUEPRINT BUILD INSTRUCTIONS".to_string(),
        heavy.clone(),
        String::new(),
        format!("Project: {project}"),
        format!("Objective: {objective}"),
        format!("Blueprint Version: {version}"),
        String::new(),
    ];

    push_section(&mut lines, "ALTITUDE BREAKDOWN");
    lines.extend([
        "30,000 ft - STRATEGIC VISION".to_string(),
        format!("  Stakeholders: {}", stakeholders(strategic("stakeholders"))),
        format!(
            "  Success Criteria: {} defined",
            field_count(AltitudeLevel::Strategic, "success_criteria")
        ),
        String::new(),
        "20,000 ft - SYSTEM ARCHITECTURE".to_string(),
        format!(
            "  Components: {} components",
            field_count(AltitudeLevel::Architecture, "components")
        ),
        format!(
            "  Roles: {} roles",
            field_count(AltitudeLevel::Architecture, "roles")
        ),
        String::new(),
        "10,000 ft - IMPLEMENTATION".to_string(),
        format!(
            "  Steps: {} implementation steps",
            field_count(AltitudeLevel::Implementation, "steps")
        ),
        format!(
            "  APIs/Services: {} integrations",
            field_count(AltitudeLevel::Implementation, "apis_services")
        ),
        String::new(),
        "5,000 ft - TACTICAL EXECUTION".to_string(),
        format!(
            "  Agent Roles: {} agents",
            field_count(AltitudeLevel::Tactical, "agent_roles")
        ),
        format!(
            "  Handoffs: {} handoff points",
            field_count(AltitudeLevel::Tactical, "handoffs")
        ),
        String::new(),
    ]);

    push_section(&mut lines, "DOCTRINE ENFORCEMENT");
    if let Some(Value::Array(doctrine)) = blueprint.meta_field("doctrine") {
        for item in doctrine {
            lines.push(format!("  ✓ {}", plain_text(item)));
        }
    }
    lines.push(String::new());

    push_section(&mut lines, "BUILD SEQUENCE");
    lines.extend(BUILD_SEQUENCE.iter().map(|step| step.to_string()));
    lines.extend([
        String::new(),
        heavy.clone(),
        format!("Generated: {generated_at}"),
        heavy,
        String::new(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        let bp = Blueprint::from_value(value).expect("object blueprint");
        render_build_prompt(&bp, "2024-05-01T12:00:00.000000Z")
    }

    #[test]
    fn renders_counts_and_scalars_from_source_tiers() {
        let text = render(json!({
            "project_slug": "atlas",
            "meta": {"blueprint_version_hash": "abc123", "doctrine": ["HEIR", "ORBT"]},
            "altitudes": {
                "30000": {
                    "project_name": "Atlas Portal",
                    "objective": "Ship the portal",
                    "stakeholders": ["ops", "finance"],
                    "success_criteria": ["a", "b", "c"]
                },
                "20000": {"components": ["api", "ui"], "roles": ["admin"]},
                "10000": {"steps": [1, 2, 3, 4], "apis_services": ["stripe"]},
                "5000": {"agent_roles": {"builder": {}, "reviewer": {}}, "handoffs": ["qa"]}
            }
        }));
        for expected in [
            "Project: Atlas Portal",
            "Objective: Ship the portal",
            "Blueprint Version: abc123",
            "  Stakeholders: ops, finance",
            "  Success Criteria: 3 defined",
            "  Components: 2 components",
            "  Roles: 1 roles",
            "  Steps: 4 implementation steps",
            "  APIs/Services: 1 integrations",
            "  Agent Roles: 2 agents",
            "  Handoffs: 1 handoff points",
            "  ✓ HEIR",
            "  ✓ ORBT",
            "6. Deploy per 06_ci_config.json",
            "Generated: 2024-05-01T12:00:00.000000Z",
        ] {
            assert!(
                text.lines().any(|line| line == expected),
                "missing line {expected:?} in:\n{text}"
            );
        }
    }

    #[test]
    fn falls_back_when_source_is_empty() {
        let text = render(json!({}));
        assert!(text.contains("Project: Unnamed\n"));
        assert!(text.contains("Objective: Not specified\n"));
        assert!(text.contains("Blueprint Version: N/A\n"));
        assert!(text.contains("  Stakeholders: None listed\n"));
        assert!(text.contains("  Agent Roles: 0 agents\n"));
    }

    #[test]
    fn project_falls_back_to_slug() {
        let text = render(json!({"project_slug": "atlas"}));
        assert!(text.contains("Project: atlas\n"));
    }

    #[test]
    fn layout_starts_with_rule_and_ends_with_newline() {
        let text = render(json!({}));
        let first = text.lines().next().expect("first line");
        assert_eq!(first, "=".repeat(60));
        assert!(text.ends_with(&format!("{}\n", "=".repeat(60))));
        assert!(text.contains("\n----"));
    }

    #[test]
    fn same_source_and_timestamp_render_identically() {
        let source = json!({"project_slug": "atlas", "meta": {"doctrine": ["HEIR"]}});
        assert_eq!(render(source.clone()), render(source));
    }
}
