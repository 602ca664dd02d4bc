//! Main application entry point (native).

use snapruler_app::{AppError, StepRegistry, load_config, load_script, run_script};
use snapruler_core::SessionConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[cfg(feature = "native")]
fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut script_path = None;
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                StepRegistry::print_all();
                return ExitCode::SUCCESS;
            }
            "--config" => config_path = args.next().map(PathBuf::from),
            _ => script_path = Some(PathBuf::from(arg)),
        }
    }
    let Some(script_path) = script_path else {
        StepRegistry::print_all();
        return ExitCode::FAILURE;
    };

    match run(script_path, config_path) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "native")]
fn run(script_path: PathBuf, config_path: Option<PathBuf>) -> Result<String, AppError> {
    let config = match config_path {
        Some(path) => load_config(&path)?,
        None => SessionConfig::default(),
    };
    log::info!("Replaying {:?}", script_path);
    let script = load_script(&script_path)?;
    let report = run_script(config, &script)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
