//! Console rendering for emit, gate and verify runs.
//!
//! Renderers return strings so the CLI stays a thin print loop and the layout
//! can be asserted in tests.
use crate::emit::{EmitReport, FileStatus};
use crate::gate::GateReport;
use crate::manifest::ManifestCheck;

const RULE_WIDTH: usize = 60;

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    push_line(out, &rule);
    push_line(out, title);
    push_line(out, &rule);
}

/// Header printed before the source is loaded.
pub fn render_emit_header(source: &str, output_dir: &str) -> String {
    let mut out = String::new();
    push_banner(&mut out, "Blueprint Engine - Emit Steps");
    push_line(&mut out, &format!("Source: {source}"));
    push_line(&mut out, &format!("Output: {output_dir}"));
    out
}

pub fn render_emit_report(report: &EmitReport) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("[OK] Loaded blueprint: {}", report.source.display()),
    );
    push_line(&mut out, "");
    push_line(&mut out, "Emitting modular files...");
    push_line(&mut out, &rule);
    for outcome in &report.outcomes {
        match &outcome.status {
            FileStatus::Written(entry) => push_line(
                &mut out,
                &format!("[OK] Emitted: {} ({} bytes)", outcome.file, entry.size_bytes),
            ),
            FileStatus::Failed(reason) => push_line(
                &mut out,
                &format!("[FAIL] Failed to emit {}: {reason}", outcome.file),
            ),
        }
    }
    push_line(&mut out, &rule);
    if report.success() {
        push_line(
            &mut out,
            &format!(
                "[SUCCESS] All files emitted to {}",
                report.output_dir.display()
            ),
        );
    } else {
        push_line(&mut out, "[FAILURE] Some files failed to emit");
    }
    out
}

pub fn render_gate_report(report: &GateReport) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    push_banner(&mut out, "Blueprint Engine - Gate Validation");
    push_line(
        &mut out,
        &format!("Validating blueprints in: {}", report.directory),
    );
    push_line(&mut out, "");
    for gate in &report.gates {
        let verdict = if gate.passed { "[PASS]" } else { "[FAIL]" };
        push_line(&mut out, &format!("Gate: {}... {verdict}", gate.file));
    }
    push_line(&mut out, "");
    push_line(&mut out, &rule);

    if !report.errors.is_empty() {
        push_line(&mut out, &format!("ERRORS ({}):", report.errors.len()));
        for error in &report.errors {
            push_line(&mut out, &format!("  [X] {error}"));
        }
        push_line(&mut out, "");
    }
    if !report.warnings.is_empty() {
        push_line(&mut out, &format!("WARNINGS ({}):", report.warnings.len()));
        for warning in &report.warnings {
            push_line(&mut out, &format!("  [!] {warning}"));
        }
        push_line(&mut out, "");
    }

    push_line(&mut out, &rule);
    if report.passed {
        push_line(&mut out, "Result: [SUCCESS] ALL GATES PASSED");
    } else {
        push_line(&mut out, "Result: [FAILURE] VALIDATION FAILED");
    }
    out
}

pub fn render_manifest_check(check: &ManifestCheck) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    push_banner(&mut out, "Blueprint Engine - Manifest Verification");
    push_line(&mut out, &format!("Verifying manifest in: {}", check.directory));
    push_line(&mut out, "");
    for file in &check.files {
        if file.ok() {
            push_line(&mut out, &format!("[OK] {}", file.file));
            continue;
        }
        push_line(&mut out, &format!("[FAIL] {}", file.file));
        for problem in &file.problems {
            push_line(&mut out, &format!("  [X] {problem}"));
        }
    }
    for problem in &check.summary_problems {
        push_line(&mut out, &format!("[FAIL] manifest.json: {problem}"));
    }
    push_line(&mut out, &rule);
    if check.passed {
        push_line(&mut out, "Result: [SUCCESS] MANIFEST MATCHES");
    } else {
        push_line(&mut out, "Result: [FAILURE] MANIFEST MISMATCH");
    }
    out
}
