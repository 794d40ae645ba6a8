//! CLI argument parsing for the emit and gate steps.
//!
//! The CLI is thin: it resolves paths and hands off to the library so the same
//! core logic can run under other callers.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "blueprint",
    version,
    about = "Emit modular blueprint artifacts and validate them through gates",
    after_help = "Commands:\n  emit <blueprint.json> <output_dir>  Emit modular files and manifest.json\n  gate <blueprints_dir>               Validate 01_altitude..04_stack\n  verify <blueprints_dir>             Re-hash files listed in manifest.json\n\nExamples:\n  blueprint emit blueprint.json blueprints/sample_blueprint\n  blueprint gate blueprints/sample_blueprint\n  blueprint gate blueprints/sample_blueprint --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Raise the default log level to debug (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Emit(EmitArgs),
    Gate(GateArgs),
    Verify(VerifyArgs),
}

/// Emit command inputs.
#[derive(Parser, Debug)]
#[command(about = "Emit modular blueprint files from a source blueprint")]
pub struct EmitArgs {
    /// Source blueprint JSON
    #[arg(value_name = "BLUEPRINT")]
    pub blueprint: PathBuf,

    /// Directory to write emitted files into (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

/// Gate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Validate emitted blueprint files against gate rules")]
pub struct GateArgs {
    /// Directory holding 01_altitude.json through 04_stack.json
    #[arg(value_name = "BLUEPRINTS_DIR")]
    pub blueprints_dir: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Verify command inputs.
#[derive(Parser, Debug)]
#[command(about = "Check emitted files against manifest.json digests")]
pub struct VerifyArgs {
    /// Directory holding manifest.json and the files it lists
    #[arg(value_name = "BLUEPRINTS_DIR")]
    pub blueprints_dir: PathBuf,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}
