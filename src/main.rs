use hmi_canvas::{layout_to_json, load_layout};
use log::{error, info};
use std::process::ExitCode;

const USAGE: &str = "usage: hmi_canvas <layout.json> [output.json]";

/// Migrates a saved dashboard layout: legacy `zIndex` fields become `z` and the stacking
/// order is repaired. The result is written to `output.json`, or printed when omitted.
fn run(input: &str, output: Option<&str>) -> Result<(), String> {
    let json = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {input}: {e}"))?;
    let widgets =
        load_layout(&json).map_err(|e| format!("Failed to parse layout {input}: {e}"))?;
    let migrated =
        layout_to_json(&widgets).map_err(|e| format!("Failed to serialize layout: {e}"))?;

    match output {
        Some(path) => {
            std::fs::write(path, migrated).map_err(|e| format!("Failed to write {path}: {e}"))?;
            info!("Migrated {} widgets into {path}", widgets.len());
        }
        None => println!("{migrated}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    // Set up logging for development
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (input, output) = match args.as_slice() {
        [input] => (input.as_str(), None),
        [input, output] => (input.as_str(), Some(output.as_str())),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
