//! Blueprint emitter and gate validator.
//!
//! The emitter turns one planning blueprint into six modular artifacts plus a
//! digest manifest; the gate runner checks the four structural artifacts for
//! required fields before downstream tooling consumes them.
pub mod blueprint;
pub mod emit;
pub mod error;
pub mod gate;
pub mod manifest;
pub mod paths;
pub mod report;
pub mod util;

pub use blueprint::{AltitudeLevel, Blueprint};
pub use emit::{EmitReport, Emitter};
pub use error::BlueprintError;
pub use gate::{run_all_gates, Finding, GateReport, Severity};
pub use manifest::{verify_manifest, Manifest, ManifestCheck, ManifestEntry};
