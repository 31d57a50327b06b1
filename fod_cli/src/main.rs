#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod cli;
mod commands;
mod error_fmt;

use clap::Parser;
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::sync::Arc;

use fod_config::Config;
use fod_core::CalibrationTable;
use fod_hardware::{PropFile, StaticProperties};

use crate::cli::{Cli, FILE_GUARD, JSON_MODE};
use crate::error_fmt::{Stage, exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        tracing::error!(error = %err, "fodctl failed");
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = match cli.config.as_deref() {
        Some(path) => fod_config::load_file(path).wrap_err(Stage::Config)?,
        None => Config::default(),
    };
    init_tracing(cli.json, &cli.log_level, &cfg.logging);
    tracing::debug!(config = ?cli.config, "configuration loaded");

    let calibration = load_calibration(cli.calibration.as_ref(), &cfg)?;
    let properties = load_properties(&cli.props, &cli.prop_files).wrap_err(Stage::Properties)?;

    let ctx = commands::Context::new(&cfg, calibration, properties, cli.json)?;
    commands::dispatch(&ctx, &cli.cmd)
}

/// CLI flag first, then `[calibration].csv`, then the stock table.
fn load_calibration(flag: Option<&PathBuf>, cfg: &Config) -> Result<CalibrationTable> {
    let Some(path) = flag.or(cfg.calibration.csv.as_ref()) else {
        return Ok(CalibrationTable::reference());
    };
    let rows = fod_config::load_calibration_csv(path).wrap_err(Stage::Calibration)?;
    let table = CalibrationTable::try_from(rows.as_slice())
        .map_err(eyre::Report::new)
        .wrap_err(Stage::Calibration)?;
    tracing::info!(path = %path.display(), points = table.len(), "calibration table loaded");
    Ok(table)
}

fn load_properties(assignments: &[String], files: &[PathBuf]) -> Result<Arc<StaticProperties>> {
    let file_props = PropFile::load(files)?;
    let mut pairs: Vec<(String, String)> = file_props.into_iter().collect();
    for a in assignments {
        pairs.push(StaticProperties::parse_assignment(a)?);
    }
    Ok(Arc::new(pairs.into_iter().collect()))
}

fn init_tracing(json: bool, level: &str, logging: &fod_config::Logging) {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console logs go to stderr so stdout stays machine-readable.
    let console = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter)
            .boxed()
    };

    let file_layer = logging.file.as_deref().map(|file| {
        let path = std::path::Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "fod.log".into(), |n| n.to_string_lossy().into_owned());
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        let file_level = logging.level.as_deref().unwrap_or("info");
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(EnvFilter::try_new(file_level).unwrap_or_else(|_| EnvFilter::new("info")))
    });

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();
}
