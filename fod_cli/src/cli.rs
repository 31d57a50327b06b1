//! CLI argument definitions and shared statics.

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "fodctl", version, about = "In-display fingerprint sensor control")]
pub struct Cli {
    /// Path to config TOML (typed); built-in panel defaults when absent
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Optional calibration CSV (strict header), overrides [calibration].csv
    #[arg(long, value_name = "FILE")]
    pub calibration: Option<PathBuf>,

    /// Print results and logs as JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Seed a system property (repeatable), e.g. ro.product.device=OnePlus7
    #[arg(long = "prop", value_name = "KEY=VALUE")]
    pub props: Vec<String>,

    /// Load properties from a build.prop-style file; --prop wins on conflicts
    #[arg(long = "prop-file", value_name = "FILE")]
    pub prop_files: Vec<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the dim alpha for a panel brightness
    DimAlpha {
        #[arg(long, allow_hyphen_values = true)]
        brightness: i32,
    },
    /// Dim amount for a framework brightness on this device
    DimAmount {
        #[arg(long, allow_hyphen_values = true)]
        brightness: i32,
    },
    /// Print the active calibration table
    Table,
    /// Finger pressed on the sensor
    Press,
    /// Finger lifted from the sensor
    Release,
    /// FOD view hidden by the framework
    Hide,
    /// Run an enrollment start/finish cycle
    Enroll,
    /// Toggle long-press detection
    #[command(group(ArgGroup::new("toggle").required(true).args(["enable", "disable"])))]
    LongPress {
        #[arg(long, action = ArgAction::SetTrue)]
        enable: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        disable: bool,
    },
    /// Dispatch an acquired event to a logging callback
    Acquired {
        #[arg(long, allow_hyphen_values = true)]
        info: i32,
        #[arg(long, allow_hyphen_values = true)]
        code: i32,
    },
    /// Ask whether an error's toast is suppressed
    Error {
        #[arg(long, allow_hyphen_values = true)]
        error: i32,
        #[arg(long, allow_hyphen_values = true)]
        code: i32,
    },
    /// Print sensor position and size
    Geometry,
    /// Feed an alert slider key event
    Slider {
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        scan_code: i32,
    },
    /// Copy persisted hall sensor calibration into the driver
    RestoreHall,
    /// Quick health check (config, calibration, variant)
    SelfCheck,
}
