//! SnapRuler Application
//!
//! Headless shell that drives a drawing session from a recorded script and
//! reports the published state.

mod help;
mod replay;

pub use help::{StepDoc, StepRegistry};
pub use replay::{AppError, Report, Script, Step, load_config, load_script, run_script};
