//! Human-readable error descriptions and structured JSON error formatting.

use std::fmt;

/// Which startup step failed; attached to reports with `wrap_err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Calibration,
    Properties,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Config => "failed to load config",
            Stage::Calibration => "failed to load calibration",
            Stage::Properties => "failed to load properties",
        })
    }
}

/// Everything below the outermost context, joined for display.
fn causes(err: &eyre::Report) -> String {
    err.chain()
        .skip(1)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use fod_core::error::BuildError;

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingFingerprintService => {
                "What happened: No fingerprint service was provided to the controller.\nHow to fix: Pass one via with_fingerprint(...).".to_string()
            }
            BuildError::MissingDisplayService => {
                "What happened: No display service was provided to the controller.\nHow to fix: Pass one via with_display(...).".to_string()
            }
            BuildError::InvalidCalibration(msg) => format!(
                "What happened: Invalid calibration table ({msg}).\nLikely causes: Brightness not strictly increasing, or alpha outside 0..=255.\nHow to fix: Correct the CSV rows and rerun."
            ),
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    let detail = causes(err);
    let lower = detail.to_ascii_lowercase();

    match err.downcast_ref::<Stage>() {
        Some(Stage::Calibration) => {
            if lower.contains("calibration csv must have headers") {
                return "Invalid headers in calibration CSV. Expected 'brightness,alpha'.".to_string();
            }
            return format!(
                "What happened: Calibration CSV could not be used ({detail}).\nHow to fix: Provide a 'brightness,alpha' CSV with at least one row, or drop --calibration to use the stock table."
            );
        }
        Some(Stage::Config) => {
            return format!(
                "What happened: Configuration is invalid or unreadable ({detail}).\nLikely causes: Missing file, TOML syntax error, or out-of-range values.\nHow to fix: Edit the TOML config and try again."
            );
        }
        Some(Stage::Properties) => {
            return format!(
                "What happened: Properties could not be loaded ({detail}).\nHow to fix: Use KEY=VALUE for --prop and check --prop-file paths."
            );
        }
        None => {}
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 2 for config, 3 for calibration, 1 for everything else.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use fod_core::error::BuildError;
    match err.downcast_ref::<Stage>() {
        Some(Stage::Config) => return 2,
        Some(Stage::Calibration) => return 3,
        _ => {}
    }
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::InvalidConfig(_)) => 2,
        Some(BuildError::InvalidCalibration(_)) => 3,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = match err.downcast_ref::<Stage>() {
        Some(Stage::Config) => "Config",
        Some(Stage::Calibration) => "Calibration",
        Some(Stage::Properties) => "Properties",
        None => "Error",
    };
    json!({
        "reason": reason,
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
