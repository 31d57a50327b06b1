#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and calibration table parsing for the FOD controller.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//!   Every section is optional; omitted values fall back to the stock
//!   panel defaults.
//! - The calibration CSV loader enforces headers and reports the offending
//!   line on parse errors. Ordering rules are checked when the table is
//!   built in `fod_core`.
use serde::Deserialize;
use std::path::PathBuf;

/// Calibration CSV schema.
///
/// Expected headers:
/// brightness,alpha
///
/// Example:
/// brightness,alpha
/// 0,255
/// 1,241
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationRow {
    pub brightness: i32,
    pub alpha: i32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceCfg {
    /// Property holding the device model identifier
    pub model_property: String,
    /// Models whose dim amount is computed from the calibration table
    pub table_models: Vec<String>,
}

impl Default for DeviceCfg {
    fn default() -> Self {
        Self {
            model_property: "ro.product.device".to_string(),
            table_models: vec!["OnePlus7".to_string()],
        }
    }
}

/// On-screen sensor geometry in panel pixels.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SensorCfg {
    pub position_x: i32,
    pub position_y: i32,
    pub size: i32,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            position_x: 444,
            position_y: 1966,
            size: 190,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DimCfg {
    /// Multiplier from framework brightness to panel brightness
    pub brightness_scale: f64,
    pub icon_dim_property: String,
    /// Icon dim percent used when the property is unset
    pub icon_dim_default: String,
}

impl Default for DimCfg {
    fn default() -> Self {
        Self {
            brightness_scale: 4.011_765,
            icon_dim_property: "persist.vendor.sys.fod.icon.dim".to_string(),
            icon_dim_default: "90".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsCfg {
    pub hbm_enable: PathBuf,
    pub dim_alpha: PathBuf,
    pub hall_calibration: PathBuf,
    pub hall_persist: PathBuf,
}

impl Default for PathsCfg {
    fn default() -> Self {
        Self {
            // "friginer" is the vendor's spelling
            hbm_enable: PathBuf::from("/sys/class/drm/card0-DSI-1/op_friginer_print_hbm"),
            dim_alpha: PathBuf::from("/sys/class/drm/card0-DSI-1/dim_alpha"),
            hall_calibration: PathBuf::from(
                "/sys/bus/platform/devices/soc:tri_state_key/hall_data_calib",
            ),
            hall_persist: PathBuf::from("/mnt/vendor/persist/engineermode/tri_state_hall_data"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationCfg {
    /// Optional CSV replacing the built-in brightness/alpha table
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub device: DeviceCfg,
    pub sensor: SensorCfg,
    pub dim: DimCfg,
    pub paths: PathsCfg,
    pub calibration: CalibrationCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_calibration_csv(path: &std::path::Path) -> eyre::Result<Vec<CalibrationRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open calibration CSV {:?}: {}", path, e))?;
    parse_calibration(rdr)
}

/// Parse calibration rows from any reader (headers required).
pub fn parse_calibration_csv(data: &[u8]) -> eyre::Result<Vec<CalibrationRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);
    parse_calibration(rdr)
}

fn parse_calibration<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
) -> eyre::Result<Vec<CalibrationRow>> {
    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {}", e))?
        .clone();
    let expected = ["brightness", "alpha"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "calibration CSV must have headers 'brightness,alpha', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<CalibrationRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("calibration CSV has no rows");
    }
    Ok(rows)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Device
        if self.device.model_property.trim().is_empty() {
            eyre::bail!("device.model_property must not be empty");
        }
        if self.device.table_models.iter().any(|m| m.trim().is_empty()) {
            eyre::bail!("device.table_models must not contain empty names");
        }

        // Sensor
        if self.sensor.size < 0 {
            eyre::bail!("sensor.size must be >= 0");
        }

        // Dim
        if !(self.dim.brightness_scale.is_finite() && self.dim.brightness_scale > 0.0) {
            eyre::bail!("dim.brightness_scale must be a finite value > 0");
        }
        if self.dim.icon_dim_property.trim().is_empty() {
            eyre::bail!("dim.icon_dim_property must not be empty");
        }
        match self.dim.icon_dim_default.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => {}
            _ => eyre::bail!(
                "dim.icon_dim_default must be a number, got {:?}",
                self.dim.icon_dim_default
            ),
        }

        // Paths
        for (name, p) in [
            ("paths.hbm_enable", &self.paths.hbm_enable),
            ("paths.dim_alpha", &self.paths.dim_alpha),
            ("paths.hall_calibration", &self.paths.hall_calibration),
            ("paths.hall_persist", &self.paths.hall_persist),
        ] {
            if p.as_os_str().is_empty() {
                eyre::bail!("{name} must not be empty");
            }
        }

        // Logging
        if let Some(r) = self.logging.rotation.as_deref()
            && !matches!(r, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {r:?}");
        }

        Ok(())
    }
}
