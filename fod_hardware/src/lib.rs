pub mod error;
pub mod props;
pub mod sysfs;

pub use props::{PropFile, StaticProperties};
pub use sysfs::SysfsNode;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use fod_traits::{
    DisplayMode, DisplayService, FingerprintService, FingerprintStatus, RingerMode,
    RingerService, ServiceError, Vibrator,
};

use crate::error::HwError;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulated vendor display service.
///
/// Every mode starts at 0. Calls are recorded in order and the latest value
/// per mode is tracked so callers can compare before/after snapshots.
#[derive(Debug, Default)]
pub struct SimulatedDisplay {
    calls: Mutex<Vec<(DisplayMode, i32)>>,
    modes: Mutex<BTreeMap<DisplayMode, i32>>,
    fail: bool,
}

impl SimulatedDisplay {
    pub fn new() -> Self {
        let modes = DisplayMode::ALL.iter().map(|m| (*m, 0)).collect();
        Self {
            calls: Mutex::new(Vec::new()),
            modes: Mutex::new(modes),
            fail: false,
        }
    }

    /// A display that records calls but reports every one as failed.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<(DisplayMode, i32)> {
        lock(&self.calls).clone()
    }

    pub fn modes(&self) -> BTreeMap<DisplayMode, i32> {
        lock(&self.modes).clone()
    }

    pub fn mode(&self, mode: DisplayMode) -> i32 {
        lock(&self.modes).get(&mode).copied().unwrap_or_default()
    }
}

impl DisplayService for SimulatedDisplay {
    fn set_mode(&self, mode: DisplayMode, value: i32) -> Result<(), ServiceError> {
        lock(&self.calls).push((mode, value));
        if self.fail {
            return Err(Box::new(HwError::Injected("display set_mode")));
        }
        lock(&self.modes).insert(mode, value);
        tracing::debug!(?mode, code = mode.code(), value, "display set_mode (simulated)");
        Ok(())
    }
}

/// Simulated vendor fingerprint extensions service.
#[derive(Debug, Default)]
pub struct SimulatedFingerprint {
    statuses: Mutex<Vec<FingerprintStatus>>,
    fail: bool,
}

impl SimulatedFingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            statuses: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn statuses(&self) -> Vec<FingerprintStatus> {
        lock(&self.statuses).clone()
    }
}

impl FingerprintService for SimulatedFingerprint {
    fn update_status(&self, status: FingerprintStatus) -> Result<(), ServiceError> {
        lock(&self.statuses).push(status);
        if self.fail {
            return Err(Box::new(HwError::Injected("fingerprint update_status")));
        }
        tracing::debug!(?status, code = status.code(), "fingerprint update_status (simulated)");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimulatedRinger {
    mode: Mutex<Option<RingerMode>>,
}

impl SimulatedRinger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Option<RingerMode> {
        *lock(&self.mode)
    }
}

impl RingerService for SimulatedRinger {
    fn set_ringer_mode(&self, mode: RingerMode) -> Result<(), ServiceError> {
        *lock(&self.mode) = Some(mode);
        tracing::debug!(?mode, "ringer mode set (simulated)");
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimulatedVibrator {
    present: bool,
    pulses: Mutex<Vec<Duration>>,
}

impl SimulatedVibrator {
    pub fn new(present: bool) -> Self {
        Self {
            present,
            pulses: Mutex::new(Vec::new()),
        }
    }

    pub fn pulses(&self) -> Vec<Duration> {
        lock(&self.pulses).clone()
    }
}

impl Vibrator for SimulatedVibrator {
    fn has_vibrator(&self) -> bool {
        self.present
    }

    fn vibrate(&self, duration: Duration) -> Result<(), ServiceError> {
        lock(&self.pulses).push(duration);
        Ok(())
    }
}
