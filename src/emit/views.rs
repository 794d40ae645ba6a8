//! Derived JSON views of a blueprint.
//!
//! Each view is a plain serde struct; field order is the emitted key order.
//! Values copied from the source stay `serde_json::Value` so they round-trip
//! verbatim, including key order.
use crate::blueprint::{canonical_tier, AltitudeLevel, Blueprint};
use serde::Serialize;
use serde_json::{json, Value};

/// Gate identifiers the orchestration bay always carries.
pub const ORCHESTRATION_GATES: [&str; 4] = ["gate_01", "gate_02", "gate_03", "gate_04"];

fn sourced_list(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or_else(|| json!([]))
}

fn sourced_object(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or_else(|| json!({}))
}

fn sourced_string(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or_else(|| json!(""))
}

// 01_altitude.json

#[derive(Debug, Serialize)]
pub struct AltitudeView {
    pub altitudes: AltitudeTiers,
    pub meta: Value,
}

#[derive(Debug, Serialize)]
pub struct AltitudeTiers {
    #[serde(rename = "30000")]
    pub strategic: Value,
    #[serde(rename = "20000")]
    pub architecture: Value,
    #[serde(rename = "10000")]
    pub implementation: Value,
    #[serde(rename = "5000")]
    pub tactical: Value,
}

pub fn altitude_view(blueprint: &Blueprint) -> AltitudeView {
    let slug = blueprint
        .project_slug()
        .and_then(Value::as_str)
        .unwrap_or_default();
    let tier = |level: AltitudeLevel| canonical_tier(level, blueprint.tier(level), slug);
    AltitudeView {
        altitudes: AltitudeTiers {
            strategic: tier(AltitudeLevel::Strategic),
            architecture: tier(AltitudeLevel::Architecture),
            implementation: tier(AltitudeLevel::Implementation),
            tactical: tier(AltitudeLevel::Tactical),
        },
        meta: sourced_object(blueprint.meta()),
    }
}

// 02_imo.json

#[derive(Debug, Serialize)]
pub struct ImoView {
    pub input: ImoInput,
    pub middle: ImoMiddle,
    pub output: ImoOutput,
    pub doctrine: ImoDoctrine,
}

#[derive(Debug, Serialize)]
pub struct ImoInput {
    pub data_sources: Value,
    pub external_apis: Value,
    pub user_inputs: Vec<Value>,
    pub config_files: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ImoMiddle {
    pub orchestration: Orchestration,
    pub processing: Processing,
}

#[derive(Debug, Serialize)]
pub struct Orchestration {
    pub tools: Vec<Value>,
    pub gates: [&'static str; 4],
    pub orchestrators: Vec<Value>,
    pub decision_points: Value,
}

#[derive(Debug, Serialize)]
pub struct Processing {
    pub llms: Value,
    pub transformations: Vec<Value>,
    pub validations: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ImoOutput {
    pub deliverables: Value,
    pub artifacts: Vec<Value>,
    pub documentation: Value,
    pub deployments: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ImoDoctrine {
    pub orbt: Orbt,
}

/// Operate / repair / build / train discipline labels.
#[derive(Debug, Serialize)]
pub struct Orbt {
    pub operate: &'static str,
    pub repair: &'static str,
    pub build: &'static str,
    pub train: &'static str,
}

pub const ORBT: Orbt = Orbt {
    operate: "How to run the system",
    repair: "How to fix issues",
    build: "How to enhance",
    train: "How to learn",
};

pub fn imo_view(blueprint: &Blueprint) -> ImoView {
    let arch = |key: &str| sourced_list(blueprint.tier_field(AltitudeLevel::Architecture, key));
    let implementation =
        |key: &str| sourced_list(blueprint.tier_field(AltitudeLevel::Implementation, key));
    ImoView {
        input: ImoInput {
            data_sources: arch("inputs"),
            external_apis: implementation("apis_services"),
            user_inputs: Vec::new(),
            config_files: Vec::new(),
        },
        middle: ImoMiddle {
            orchestration: Orchestration {
                tools: Vec::new(),
                gates: ORCHESTRATION_GATES,
                orchestrators: Vec::new(),
                decision_points: implementation("decision_points"),
            },
            processing: Processing {
                llms: implementation("llms"),
                transformations: Vec::new(),
                validations: Vec::new(),
            },
        },
        output: ImoOutput {
            deliverables: arch("outputs"),
            artifacts: Vec::new(),
            // 10k tier, not 5k.
            documentation: implementation("documentation_plan"),
            deployments: Vec::new(),
        },
        doctrine: ImoDoctrine { orbt: ORBT },
    }
}

// 03_ctb.json

#[derive(Debug, Serialize)]
pub struct CtbView {
    pub heir_canopy: HeirCanopy,
    pub star: Star,
    pub branches: Vec<Branch>,
    pub schema_foundation: Value,
    pub telemetry: Value,
}

#[derive(Debug, Serialize)]
pub struct HeirCanopy {
    pub history: &'static str,
    pub enforcement: &'static str,
    pub integrity: &'static str,
    pub repair: &'static str,
}

pub const HEIR_CANOPY: HeirCanopy = HeirCanopy {
    history: "Audit trail and lineage tracking",
    enforcement: "Doctrine compliance checks",
    integrity: "Data validation and verification",
    repair: "Self-healing and recovery mechanisms",
};

#[derive(Debug, Serialize)]
pub struct Star {
    pub project_name: Value,
    pub unique_id: Value,
    pub blueprint_version: Value,
}

#[derive(Debug, Serialize)]
pub struct Branch {
    pub name: &'static str,
    pub category: &'static str,
    pub nodes: Vec<BranchNode>,
}

#[derive(Debug, Serialize)]
pub struct BranchNode {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// The four backbone branches; only `doctrine` starts with nodes.
pub fn backbone_branches() -> Vec<Branch> {
    vec![
        Branch {
            name: "doctrine",
            category: "governance",
            nodes: vec![
                BranchNode {
                    id: "doctrine-001",
                    label: "HEIR Compliance",
                    kind: "validation",
                },
                BranchNode {
                    id: "doctrine-002",
                    label: "ORBT Discipline",
                    kind: "process",
                },
            ],
        },
        Branch {
            name: "input",
            category: "data_ingestion",
            nodes: Vec::new(),
        },
        Branch {
            name: "middle",
            category: "orchestration",
            nodes: Vec::new(),
        },
        Branch {
            name: "output",
            category: "delivery",
            nodes: Vec::new(),
        },
    ]
}

pub fn ctb_view(blueprint: &Blueprint) -> CtbView {
    CtbView {
        heir_canopy: HEIR_CANOPY,
        star: Star {
            project_name: sourced_string(blueprint.project_slug()),
            unique_id: sourced_string(blueprint.meta_field("unique_id")),
            blueprint_version: sourced_string(blueprint.meta_field("blueprint_version_hash")),
        },
        branches: backbone_branches(),
        schema_foundation: sourced_list(blueprint.trunk_root_field("schema_enforcement")),
        telemetry: sourced_object(blueprint.trunk_root_field("telemetry")),
    }
}

// 04_stack.json

#[derive(Debug, Serialize)]
pub struct StackView {
    pub languages: [&'static str; 3],
    pub frameworks: [&'static str; 3],
    pub databases: Vec<DatabaseRecord>,
    pub deployment: Deployment,
    pub integrations: Integrations,
    pub doctrine: Value,
}

pub const LANGUAGES: [&str; 3] = ["Python 3.11+", "TypeScript", "JavaScript"];
pub const FRAMEWORKS: [&str; 3] = ["Next.js 14", "FastAPI", "React 18"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseRecord {
    pub name: &'static str,
    pub provider: &'static str,
    pub purpose: &'static str,
}

/// Substring token mapped to the database it implies.
#[derive(Debug, Clone, Copy)]
pub struct DatabaseRule {
    pub token: &'static str,
    pub record: DatabaseRecord,
}

/// Inference rules, evaluated in order; the first matching token wins.
pub const DATABASE_RULES: [DatabaseRule; 3] = [
    DatabaseRule {
        token: "Neon",
        record: DatabaseRecord {
            name: "PostgreSQL",
            provider: "Neon",
            purpose: "vault",
        },
    },
    DatabaseRule {
        token: "Firebase",
        record: DatabaseRecord {
            name: "Firebase",
            provider: "Google",
            purpose: "workbench",
        },
    },
    DatabaseRule {
        token: "BigQuery",
        record: DatabaseRecord {
            name: "BigQuery",
            provider: "Google",
            purpose: "warehouse",
        },
    },
];

/// Match one schema-enforcement string against the rule table.
pub fn match_database(entry: &str, rules: &[DatabaseRule]) -> Option<DatabaseRecord> {
    rules
        .iter()
        .find(|rule| entry.contains(rule.token))
        .map(|rule| rule.record)
}

/// One record per matching string; non-strings and unmatched strings are skipped.
pub fn infer_databases(schema_enforcement: Option<&Value>, rules: &[DatabaseRule]) -> Vec<DatabaseRecord> {
    let Some(entries) = schema_enforcement.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|entry| match_database(entry, rules))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct Deployment {
    pub target: &'static str,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Serialize)]
pub struct Platform {
    pub name: &'static str,
    pub purpose: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Integrations {
    pub mcp_servers: [&'static str; 3],
    pub apis: Vec<Value>,
}

pub fn stack_view(blueprint: &Blueprint) -> StackView {
    StackView {
        languages: LANGUAGES,
        frameworks: FRAMEWORKS,
        databases: infer_databases(
            blueprint.trunk_root_field("schema_enforcement"),
            &DATABASE_RULES,
        ),
        deployment: Deployment {
            target: "multi-platform",
            platforms: vec![
                Platform {
                    name: "Vercel",
                    purpose: "frontend",
                },
                Platform {
                    name: "Render",
                    purpose: "backend",
                },
            ],
        },
        integrations: Integrations {
            mcp_servers: ["composio", "firebase", "github"],
            apis: Vec::new(),
        },
        doctrine: sourced_list(blueprint.meta_field("doctrine")),
    }
}

// 06_ci_config.json

#[derive(Debug, Serialize)]
pub struct CiConfig {
    pub version: &'static str,
    pub doctrine_checks: DoctrineChecks,
    pub pipelines: Pipelines,
    pub notifications: Notifications,
    pub meta: CiMeta,
}

#[derive(Debug, Serialize)]
pub struct DoctrineChecks {
    pub enabled: bool,
    pub gates: [&'static str; 4],
    pub on_failure: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Pipelines {
    pub validate: Pipeline,
    pub build: Pipeline,
    pub deploy: Pipeline,
}

#[derive(Debug, Serialize)]
pub struct Pipeline {
    pub trigger: &'static str,
    pub steps: Vec<PipelineStep>,
}

/// A pipeline step runs either a command or a platform deployment.
#[derive(Debug, Serialize)]
pub struct PipelineStep {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<&'static str>,
}

impl PipelineStep {
    fn command(name: &'static str, command: &'static str) -> Self {
        Self {
            name,
            command: Some(command),
            platform: None,
        }
    }

    fn deploy(name: &'static str, platform: &'static str) -> Self {
        Self {
            name,
            command: None,
            platform: Some(platform),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Notifications {
    pub on_failure: [&'static str; 1],
    pub on_success: [&'static str; 1],
}

#[derive(Debug, Serialize)]
pub struct CiMeta {
    pub blueprint_version: Value,
    pub doctrine: Value,
}

pub fn ci_config(blueprint: &Blueprint) -> CiConfig {
    CiConfig {
        version: "1.0",
        doctrine_checks: DoctrineChecks {
            enabled: true,
            gates: ["01_altitude", "02_imo", "03_ctb", "04_stack"],
            on_failure: "block_merge",
        },
        pipelines: Pipelines {
            validate: Pipeline {
                trigger: "on_pull_request",
                steps: vec![
                    PipelineStep::command("Run gate validation", "make gate"),
                    PipelineStep::command(
                        "Check doctrine compliance",
                        "python tools/repo_compliance_check.py",
                    ),
                ],
            },
            build: Pipeline {
                trigger: "on_push_to_main",
                steps: vec![
                    PipelineStep::command(
                        "Install dependencies",
                        "npm install && pip install -r requirements.txt",
                    ),
                    PipelineStep::command("Build artifacts", "make build"),
                    PipelineStep::command("Run tests", "make test"),
                ],
            },
            deploy: Pipeline {
                trigger: "on_tag",
                steps: vec![
                    PipelineStep::deploy("Deploy frontend", "vercel"),
                    PipelineStep::deploy("Deploy backend", "render"),
                ],
            },
        },
        notifications: Notifications {
            on_failure: ["github_status"],
            on_success: ["github_status"],
        },
        meta: CiMeta {
            blueprint_version: sourced_string(blueprint.meta_field("blueprint_version_hash")),
            doctrine: sourced_list(blueprint.meta_field("doctrine")),
        },
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
