//! `DeviceController`: the framework-facing facade.
//!
//! Every operation is synchronous and infallible from the caller's point of
//! view. Vendor-service failures are logged and dropped, sysfs writes are
//! best-effort and sysfs reads fall back to defaults. The only shared mutable
//! resource is the callback slot; it is locked just long enough to clone the
//! `Arc`, so a callback may re-enter the controller without deadlocking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use fod_hardware::SysfsNode;
use fod_traits::{
    DisplayMode, DisplayService, FingerprintService, FingerprintStatus, InscreenCallback,
    PropertyStore, ServiceError,
};
use tracing::{error, info, trace, warn};

use crate::calibration::CalibrationTable;
use crate::config::{DimSettings, SensorGeometry, SysfsPaths};
use crate::dim::{DimCalculator, parse_icon_dim_percent};
use crate::service_error::{map_callback_error, map_service_error};
use crate::status::SensorState;
use crate::variant::DeviceVariant;

/// `acquiredInfo` value carrying vendor finger-contact events.
pub const FINGERPRINT_ACQUIRED_VENDOR: i32 = 6;
pub const VENDOR_CODE_FINGER_DOWN: i32 = 0;
pub const VENDOR_CODE_FINGER_UP: i32 = 1;
/// Vendor error whose toast is suppressed when paired with `SUPPRESSED_VENDOR_CODE`.
pub const FINGERPRINT_ERROR_VENDOR: i32 = 8;
pub const SUPPRESSED_VENDOR_CODE: i32 = 6;

/// AOD value while the sensor is pressed.
const AOD_SUPPRESS: i32 = 2;
const ICON_DIM_FALLBACK: f32 = 90.0;

pub struct DeviceController {
    pub(crate) fingerprint: Arc<dyn FingerprintService>,
    pub(crate) display: Arc<dyn DisplayService>,
    pub(crate) properties: Arc<dyn PropertyStore>,
    pub(crate) variant: DeviceVariant,
    pub(crate) dim: DimCalculator,
    pub(crate) dim_settings: DimSettings,
    pub(crate) hbm_enable: SysfsNode,
    pub(crate) dim_alpha: SysfsNode,
    pub(crate) geometry: SensorGeometry,
    pub(crate) callback: Mutex<Option<Arc<dyn InscreenCallback>>>,
    pub(crate) pressed: AtomicBool,
    pub(crate) enrolling: AtomicBool,
}

impl core::fmt::Debug for DeviceController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceController")
            .field("variant", &self.variant)
            .field("state", &self.state())
            .field("geometry", &self.geometry)
            .field("hbm_enable", &self.hbm_enable.path())
            .field("dim_alpha", &self.dim_alpha.path())
            .finish_non_exhaustive()
    }
}

impl DeviceController {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        fingerprint: Arc<dyn FingerprintService>,
        display: Arc<dyn DisplayService>,
        properties: Arc<dyn PropertyStore>,
        variant: DeviceVariant,
        table: CalibrationTable,
        dim_settings: DimSettings,
        paths: SysfsPaths,
        geometry: SensorGeometry,
    ) -> Self {
        Self {
            fingerprint,
            display,
            properties,
            variant,
            dim: DimCalculator::new(table, dim_settings.brightness_scale),
            dim_settings,
            hbm_enable: SysfsNode::new(paths.hbm_enable),
            dim_alpha: SysfsNode::new(paths.dim_alpha),
            geometry,
            callback: Mutex::new(None),
            pressed: AtomicBool::new(false),
            enrolling: AtomicBool::new(false),
        }
    }

    // ── Vendor plumbing ──────────────────────────────────────────────────────

    fn update_status(&self, status: FingerprintStatus) {
        if let Err(e) = self.fingerprint.update_status(status) {
            let err = map_service_error("update_status", &*e);
            warn!(?status, code = status.code(), error = %err, "fingerprint service call failed");
        }
    }

    fn set_mode(&self, mode: DisplayMode, value: i32) {
        if let Err(e) = self.display.set_mode(mode, value) {
            let err = map_service_error("set_mode", &*e);
            warn!(?mode, code = mode.code(), value, error = %err, "display service call failed");
        }
    }

    // ── Enrollment ───────────────────────────────────────────────────────────

    pub fn on_start_enroll(&self) {
        self.enrolling.store(true, Ordering::Release);
        self.update_status(FingerprintStatus::DisableLongPress);
        self.update_status(FingerprintStatus::ResumeEnroll);
    }

    pub fn on_finish_enroll(&self) {
        self.enrolling.store(false, Ordering::Release);
        self.update_status(FingerprintStatus::FinishEnroll);
    }

    // ── Press / release ──────────────────────────────────────────────────────

    pub fn on_press(&self) {
        self.pressed.store(true, Ordering::Release);
        let generic = !self.variant.is_table_driven();
        if generic {
            self.set_mode(DisplayMode::Aod, AOD_SUPPRESS);
        }
        self.set_mode(DisplayMode::SetDim, 1);
        if generic {
            self.hbm_enable.write_best_effort(1);
        }
        self.set_mode(DisplayMode::NotifyPress, 1);
    }

    pub fn on_release(&self) {
        self.clear_press();
    }

    pub fn on_show_fod_view(&self) {
        trace!("show FOD view");
    }

    pub fn on_hide_fod_view(&self) {
        self.clear_press();
    }

    /// Inverse of `on_press`, shared by release and hide.
    fn clear_press(&self) {
        let generic = !self.variant.is_table_driven();
        if generic {
            self.set_mode(DisplayMode::Aod, 0);
        }
        self.set_mode(DisplayMode::SetDim, 0);
        if generic {
            self.hbm_enable.write_best_effort(0);
        }
        self.set_mode(DisplayMode::NotifyPress, 0);
        self.pressed.store(false, Ordering::Release);
    }

    // ── Acquisition events ───────────────────────────────────────────────────

    /// Dispatch a vendor finger-contact event to the registered callback.
    ///
    /// Returns whether the event was handled. Callback failures are logged
    /// and still count as handled.
    pub fn handle_acquired(&self, acquired_info: i32, vendor_code: i32) -> bool {
        let callback = {
            let slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(cb) => Arc::clone(cb),
                None => return false,
            }
        };

        if acquired_info != FINGERPRINT_ACQUIRED_VENDOR {
            return false;
        }

        let (op, result): (&'static str, Result<(), ServiceError>) = match vendor_code {
            VENDOR_CODE_FINGER_DOWN => ("on_finger_down", callback.on_finger_down()),
            VENDOR_CODE_FINGER_UP => ("on_finger_up", callback.on_finger_up()),
            _ => return false,
        };
        if let Err(e) = result {
            let err = map_callback_error(op, &*e);
            error!(error = %err, "callback dispatch failed");
        }
        true
    }

    /// Whether the framework should suppress the error toast for this pair.
    pub fn handle_error(&self, error: i32, vendor_code: i32) -> bool {
        error == FINGERPRINT_ERROR_VENDOR && vendor_code == SUPPRESSED_VENDOR_CODE
    }

    pub fn set_long_press_enabled(&self, enabled: bool) {
        self.update_status(FingerprintStatus::long_press(enabled));
    }

    /// Replace the registered callback; `None` unregisters.
    pub fn set_callback(&self, callback: Option<Arc<dyn InscreenCallback>>) {
        let mut slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = callback;
    }

    pub fn has_callback(&self) -> bool {
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // ── Dimming ──────────────────────────────────────────────────────────────

    pub fn get_dim_amount(&self, brightness: i32) -> i32 {
        let dim_amount = match self.variant {
            DeviceVariant::TableDriven => {
                let percent = self.icon_dim_percent();
                self.dim.compute_dim_amount(brightness, percent)
            }
            DeviceVariant::Generic => self.dim_alpha.read_or(0),
        };
        info!(brightness, variant = ?self.variant, "dim_amount = {}", dim_amount);
        dim_amount
    }

    /// Icon dim percent from the property store, read on every call.
    fn icon_dim_percent(&self) -> f32 {
        let raw = self.properties.get_or(
            &self.dim_settings.icon_dim_property,
            &self.dim_settings.icon_dim_default,
        );
        if let Some(v) = parse_icon_dim_percent(&raw) {
            return v;
        }
        let fallback =
            parse_icon_dim_percent(&self.dim_settings.icon_dim_default).unwrap_or(ICON_DIM_FALLBACK);
        warn!(
            property = %self.dim_settings.icon_dim_property,
            value = %raw,
            fallback,
            "unparsable icon dim percent"
        );
        fallback
    }

    pub fn should_boost_brightness(&self) -> bool {
        self.variant.is_table_driven()
    }

    // ── Geometry & accessors ─────────────────────────────────────────────────

    pub fn get_position_x(&self) -> i32 {
        self.geometry.position_x
    }

    pub fn get_position_y(&self) -> i32 {
        self.geometry.position_y
    }

    pub fn get_size(&self) -> i32 {
        self.geometry.size
    }

    pub fn variant(&self) -> DeviceVariant {
        self.variant
    }

    pub fn state(&self) -> SensorState {
        SensorState::from_flags(
            self.pressed.load(Ordering::Acquire),
            self.enrolling.load(Ordering::Acquire),
        )
    }

    pub fn calibration(&self) -> &CalibrationTable {
        self.dim.table()
    }

    pub fn dim_calculator(&self) -> &DimCalculator {
        &self.dim
    }

    pub fn hbm_node(&self) -> &SysfsNode {
        &self.hbm_enable
    }

    pub fn dim_alpha_node(&self) -> &SysfsNode {
        &self.dim_alpha
    }
}
