//! Three-position alert slider: key handling and hall sensor calibration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fod_hardware::SysfsNode;
use fod_traits::{RingerMode, RingerService, Vibrator};
use tracing::{debug, warn};

use crate::error::FodError;
use crate::service_error::map_service_error;

pub const SCAN_CODE_NORMAL: i32 = 601;
pub const SCAN_CODE_VIBRATE: i32 = 602;
pub const SCAN_CODE_SILENT: i32 = 603;

const HAPTIC_PULSE: Duration = Duration::from_millis(50);
const HALL_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPosition {
    Top,
    Middle,
    Bottom,
}

impl SliderPosition {
    pub fn from_scan_code(scan_code: i32) -> Option<Self> {
        match scan_code {
            SCAN_CODE_NORMAL => Some(Self::Top),
            SCAN_CODE_VIBRATE => Some(Self::Middle),
            SCAN_CODE_SILENT => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn ringer_mode(self) -> RingerMode {
        match self {
            Self::Top => RingerMode::Normal,
            Self::Middle => RingerMode::Vibrate,
            Self::Bottom => RingerMode::Silent,
        }
    }
}

pub struct KeyHandler {
    ringer: Arc<dyn RingerService>,
    vibrator: Option<Arc<dyn Vibrator>>,
}

impl KeyHandler {
    pub fn new(ringer: Arc<dyn RingerService>, vibrator: Option<Arc<dyn Vibrator>>) -> Self {
        Self { ringer, vibrator }
    }

    /// Returns true when the key was consumed by the slider.
    pub fn handle_key(&self, scan_code: i32) -> bool {
        let Some(position) = SliderPosition::from_scan_code(scan_code) else {
            return false;
        };
        let mode = position.ringer_mode();
        if let Err(e) = self.ringer.set_ringer_mode(mode) {
            let err = map_service_error("set_ringer_mode", &*e);
            warn!(?mode, error = %err, "ringer service call failed");
        }
        self.haptic_feedback();
        true
    }

    fn haptic_feedback(&self) {
        let Some(vibrator) = self.vibrator.as_ref() else {
            return;
        };
        if !vibrator.has_vibrator() {
            return;
        }
        if let Err(e) = vibrator.vibrate(HAPTIC_PULSE) {
            debug!(error = %e, "haptic feedback failed");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallPaths {
    /// Factory calibration persisted by engineering mode.
    pub persist: PathBuf,
    /// Driver node accepting the calibration at boot.
    pub calibration: PathBuf,
}

impl Default for HallPaths {
    fn default() -> Self {
        Self {
            persist: PathBuf::from("/mnt/vendor/persist/engineermode/tri_state_hall_data"),
            calibration: PathBuf::from(
                "/sys/bus/platform/devices/soc:tri_state_key/hall_data_calib",
            ),
        }
    }
}

/// Split persisted hall data on `,` or `;`, dropping trailing empty fields.
pub fn parse_hall_data(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split([',', ';']).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Copy the persisted hall calibration into the driver.
///
/// `Ok(false)` means there was nothing usable to restore.
pub fn restore_hall_calibration(paths: &HallPaths) -> Result<bool, FodError> {
    let Some(line) = SysfsNode::new(&paths.persist).read_line() else {
        debug!(path = %paths.persist.display(), "no persisted hall data");
        return Ok(false);
    };
    let fields = parse_hall_data(&line);
    if fields.len() != HALL_FIELDS {
        warn!(fields = fields.len(), "unexpected hall data layout; skipping");
        return Ok(false);
    }
    SysfsNode::new(&paths.calibration)
        .write(fields.join(","))
        .map_err(|e| FodError::Io(e.to_string()))?;
    Ok(true)
}
