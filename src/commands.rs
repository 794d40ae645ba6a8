//! Command runners behind the CLI.
//!
//! Each runner returns `Ok(true)` on full success and `Ok(false)` when the run
//! completed but found failures; `Err` means the run could not proceed.
use crate::cli::{EmitArgs, GateArgs, VerifyArgs};
use anyhow::{anyhow, Context, Result};
use blueprint_engine::emit::Emitter;
use blueprint_engine::error::BlueprintError;
use blueprint_engine::{gate, manifest, report};
use serde::Serialize;

/// Emit every artifact for one source blueprint.
pub fn run_emit(args: &EmitArgs) -> Result<bool> {
    print!(
        "{}",
        report::render_emit_header(
            &args.blueprint.display().to_string(),
            &args.output_dir.display().to_string(),
        )
    );
    println!();

    let emitter = Emitter::new(&args.blueprint, &args.output_dir);
    let emitted = match emitter.emit_all() {
        Ok(emitted) => emitted,
        Err(BlueprintError::MissingFile { path }) => {
            println!("Error: Blueprint not found at {}", path.display());
            return Ok(false);
        }
        Err(BlueprintError::MalformedInput { detail, .. }) => {
            println!("Error: Invalid JSON in blueprint - {detail}");
            return Ok(false);
        }
        Err(BlueprintError::Read { source, .. }) => {
            println!("Error: Failed to load blueprint - {source}");
            return Ok(false);
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("emit {} into {}", args.blueprint.display(), args.output_dir.display())
            })
        }
    };

    print!("{}", report::render_emit_report(&emitted));
    Ok(emitted.success())
}

/// Run all gates over an emitted directory.
pub fn run_gate(args: &GateArgs) -> Result<bool> {
    if !args.blueprints_dir.is_dir() {
        return Err(anyhow!(
            "Directory not found: {}",
            args.blueprints_dir.display()
        ));
    }
    let gate_report = gate::run_all_gates(&args.blueprints_dir);
    if args.json {
        print_json(&gate_report)?;
    } else {
        print!("{}", report::render_gate_report(&gate_report));
    }
    Ok(gate_report.passed)
}

/// Re-hash the files listed in `manifest.json`.
pub fn run_verify(args: &VerifyArgs) -> Result<bool> {
    if !args.blueprints_dir.is_dir() {
        return Err(anyhow!(
            "Directory not found: {}",
            args.blueprints_dir.display()
        ));
    }
    let check = manifest::verify_manifest(&args.blueprints_dir)
        .with_context(|| format!("verify manifest in {}", args.blueprints_dir.display()))?;
    if args.json {
        print_json(&check)?;
    } else {
        print!("{}", report::render_manifest_check(&check));
    }
    Ok(check.passed)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{text}");
    Ok(())
}
