use super::*;
use serde_json::json;

fn blueprint(value: Value) -> Blueprint {
    Blueprint::from_value(value).expect("object blueprint")
}

fn to_value<T: Serialize>(view: &T) -> Value {
    serde_json::to_value(view).expect("serialize view")
}

#[test]
fn altitude_view_fills_missing_tiers_and_keeps_present_ones() {
    let bp = blueprint(json!({
        "project_slug": "atlas",
        "altitudes": {"20000": {"components": ["api"], "custom": true}},
        "meta": {"doctrine": ["HEIR"]}
    }));
    let view = to_value(&altitude_view(&bp));
    let tiers = view["altitudes"].as_object().expect("altitudes object");
    let keys: Vec<&str> = tiers.keys().map(String::as_str).collect();
    assert_eq!(keys, ["30000", "20000", "10000", "5000"]);
    assert_eq!(tiers["20000"], json!({"components": ["api"], "custom": true}));
    assert_eq!(tiers["30000"]["project_name"], "atlas");
    assert_eq!(tiers["10000"]["steps"], json!([]));
    assert_eq!(view["meta"], json!({"doctrine": ["HEIR"]}));
}

#[test]
fn altitude_view_of_empty_source_has_empty_meta() {
    let view = to_value(&altitude_view(&Blueprint::default()));
    assert_eq!(view["meta"], json!({}));
    assert_eq!(view["altitudes"]["5000"]["agent_roles"], json!({}));
}

#[test]
fn imo_view_copies_sourced_lists_and_fixed_gates() {
    let bp = blueprint(json!({
        "altitudes": {
            "20000": {"inputs": ["crm export"], "outputs": ["dashboard"]},
            "10000": {
                "apis_services": ["stripe"],
                "decision_points": ["approve"],
                "llms": ["gpt"],
                "documentation_plan": ["runbook"]
            }
        }
    }));
    let view = to_value(&imo_view(&bp));
    assert_eq!(view["input"]["data_sources"], json!(["crm export"]));
    assert_eq!(view["input"]["external_apis"], json!(["stripe"]));
    assert_eq!(
        view["middle"]["orchestration"]["gates"],
        json!(["gate_01", "gate_02", "gate_03", "gate_04"])
    );
    assert_eq!(view["middle"]["orchestration"]["decision_points"], json!(["approve"]));
    assert_eq!(view["middle"]["processing"]["llms"], json!(["gpt"]));
    assert_eq!(view["output"]["deliverables"], json!(["dashboard"]));
    assert_eq!(view["output"]["documentation"], json!(["runbook"]));
    assert_eq!(view["doctrine"]["orbt"]["train"], "How to learn");
}

#[test]
fn imo_view_defaults_to_empty_lists() {
    let view = to_value(&imo_view(&Blueprint::default()));
    assert_eq!(view["input"]["data_sources"], json!([]));
    assert_eq!(view["output"]["deliverables"], json!([]));
    let sections: Vec<&str> = view
        .as_object()
        .expect("imo object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(sections, ["input", "middle", "output", "doctrine"]);
}

#[test]
fn ctb_view_has_fixed_canopy_and_four_branches() {
    let bp = blueprint(json!({
        "project_slug": "atlas",
        "meta": {"unique_id": "ATL-1", "blueprint_version_hash": "abc123"},
        "trunk_root": {"schema_enforcement": ["Neon vault"], "telemetry": {"sink": "otel"}}
    }));
    let view = to_value(&ctb_view(&bp));
    assert_eq!(view["heir_canopy"]["history"], "Audit trail and lineage tracking");
    assert_eq!(view["star"]["project_name"], "atlas");
    assert_eq!(view["star"]["unique_id"], "ATL-1");
    assert_eq!(view["star"]["blueprint_version"], "abc123");
    let branches = view["branches"].as_array().expect("branches array");
    let names: Vec<&str> = branches.iter().filter_map(|b| b["name"].as_str()).collect();
    assert_eq!(names, ["doctrine", "input", "middle", "output"]);
    assert_eq!(branches[0]["nodes"][1]["type"], "process");
    assert_eq!(branches[3]["nodes"], json!([]));
    assert_eq!(view["schema_foundation"], json!(["Neon vault"]));
    assert_eq!(view["telemetry"], json!({"sink": "otel"}));
}

#[test]
fn neon_string_maps_to_postgres_vault() {
    let databases = infer_databases(Some(&json!(["Neon Postgres vault"])), &DATABASE_RULES);
    assert_eq!(
        databases,
        vec![DatabaseRecord {
            name: "PostgreSQL",
            provider: "Neon",
            purpose: "vault"
        }]
    );
    assert_eq!(
        serde_json::to_value(databases[0]).expect("serialize record"),
        json!({"name": "PostgreSQL", "provider": "Neon", "purpose": "vault"})
    );
}

#[test]
fn first_matching_rule_wins_and_unmatched_entries_are_skipped() {
    let entries = json!([
        "Neon and Firebase mirror",
        "BigQuery warehouse",
        "SQLite scratch",
        {"Neon": true},
        "Firebase workbench"
    ]);
    let purposes: Vec<&str> = infer_databases(Some(&entries), &DATABASE_RULES)
        .iter()
        .map(|record| record.purpose)
        .collect();
    assert_eq!(purposes, ["vault", "warehouse", "workbench"]);
    assert!(infer_databases(None, &DATABASE_RULES).is_empty());
    assert!(infer_databases(Some(&json!("Neon")), &DATABASE_RULES).is_empty());
}

#[test]
fn custom_rule_tables_are_honoured() {
    let rules = [DatabaseRule {
        token: "Redis",
        record: DatabaseRecord {
            name: "Redis",
            provider: "Upstash",
            purpose: "cache",
        },
    }];
    assert_eq!(
        match_database("Redis session cache", &rules).map(|r| r.provider),
        Some("Upstash")
    );
    assert!(match_database("Neon vault", &rules).is_none());
}

#[test]
fn stack_view_uses_constant_lists_and_sourced_doctrine() {
    let bp = blueprint(json!({"meta": {"doctrine": ["HEIR", "ORBT"]}}));
    let view = to_value(&stack_view(&bp));
    assert_eq!(view["languages"], json!(["Python 3.11+", "TypeScript", "JavaScript"]));
    assert_eq!(view["frameworks"], json!(["Next.js 14", "FastAPI", "React 18"]));
    assert_eq!(view["databases"], json!([]));
    assert_eq!(view["deployment"]["target"], "multi-platform");
    assert_eq!(view["deployment"]["platforms"][1]["name"], "Render");
    assert_eq!(view["doctrine"], json!(["HEIR", "ORBT"]));
}

#[test]
fn ci_config_pulls_only_meta_from_source() {
    let bp = blueprint(json!({"meta": {"blueprint_version_hash": "v9", "doctrine": ["HEIR"]}}));
    let view = to_value(&ci_config(&bp));
    assert_eq!(view["meta"], json!({"blueprint_version": "v9", "doctrine": ["HEIR"]}));
    assert_eq!(
        view["pipelines"]["validate"]["steps"][0],
        json!({"name": "Run gate validation", "command": "make gate"})
    );
    assert_eq!(
        view["pipelines"]["deploy"]["steps"][1],
        json!({"name": "Deploy backend", "platform": "render"})
    );
    assert_eq!(view["doctrine_checks"]["on_failure"], "block_merge");

    let empty = to_value(&ci_config(&Blueprint::default()));
    assert_eq!(empty["meta"], json!({"blueprint_version": "", "doctrine": []}));
}
