//! Type-state builder for `DeviceController`.
//!
//! The builder enforces at compile time that both vendor services are
//! provided before `build()` is available. `try_build()` is always available
//! for dynamic checks.

use std::marker::PhantomData;
use std::sync::Arc;

use fod_hardware::StaticProperties;
use fod_traits::{DisplayService, FingerprintService, PropertyStore};

use crate::calibration::CalibrationTable;
use crate::config::{DimSettings, SensorGeometry, SysfsPaths, VariantRule};
use crate::controller::DeviceController;
use crate::error::{BuildError, Result};
use crate::variant::DeviceVariant;

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `DeviceController`. Optional pieces fall back to the stock
/// panel defaults.
pub struct ControllerBuilder<F, D> {
    fingerprint: Option<Arc<dyn FingerprintService>>,
    display: Option<Arc<dyn DisplayService>>,
    properties: Option<Arc<dyn PropertyStore>>,
    calibration: Option<CalibrationTable>,
    dim: Option<DimSettings>,
    paths: Option<SysfsPaths>,
    geometry: Option<SensorGeometry>,
    rule: Option<VariantRule>,
    variant: Option<DeviceVariant>,
    _f: PhantomData<F>,
    _d: PhantomData<D>,
}

impl Default for ControllerBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            fingerprint: None,
            display: None,
            properties: None,
            calibration: None,
            dim: None,
            paths: None,
            geometry: None,
            rule: None,
            variant: None,
            _f: PhantomData,
            _d: PhantomData,
        }
    }
}

impl DeviceController {
    /// Start building a controller.
    pub fn builder() -> ControllerBuilder<Missing, Missing> {
        ControllerBuilder::default()
    }
}

impl<F, D> ControllerBuilder<F, D> {
    /// Fallible build available in any type-state; returns detailed error for missing pieces.
    pub fn try_build(self) -> Result<DeviceController> {
        let fingerprint = self
            .fingerprint
            .ok_or_else(|| eyre::Report::new(BuildError::MissingFingerprintService))?;
        let display = self
            .display
            .ok_or_else(|| eyre::Report::new(BuildError::MissingDisplayService))?;

        let dim = self.dim.unwrap_or_default();
        if !(dim.brightness_scale.is_finite() && dim.brightness_scale > 0.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "brightness_scale must be finite and > 0",
            )));
        }
        let geometry = self.geometry.unwrap_or_default();
        if geometry.size < 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "sensor size must be >= 0",
            )));
        }

        let properties: Arc<dyn PropertyStore> = self
            .properties
            .unwrap_or_else(|| Arc::new(StaticProperties::new()));
        let variant = match self.variant {
            Some(v) => v,
            None => DeviceVariant::resolve(properties.as_ref(), &self.rule.unwrap_or_default()),
        };

        Ok(DeviceController::assemble(
            fingerprint,
            display,
            properties,
            variant,
            self.calibration.unwrap_or_default(),
            dim,
            self.paths.unwrap_or_default(),
            geometry,
        ))
    }
}

/// Chainable setters that do not affect type-state.
impl<F, D> ControllerBuilder<F, D> {
    pub fn with_properties(mut self, properties: Arc<dyn PropertyStore>) -> Self {
        self.properties = Some(properties);
        self
    }
    pub fn with_calibration(mut self, table: CalibrationTable) -> Self {
        self.calibration = Some(table);
        self
    }
    pub fn with_dim_settings(mut self, dim: DimSettings) -> Self {
        self.dim = Some(dim);
        self
    }
    pub fn with_paths(mut self, paths: SysfsPaths) -> Self {
        self.paths = Some(paths);
        self
    }
    pub fn with_geometry(mut self, geometry: SensorGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
    pub fn with_variant_rule(mut self, rule: VariantRule) -> Self {
        self.rule = Some(rule);
        self
    }
    /// Models that select table-driven dimming; the property key is unchanged.
    pub fn with_table_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rule = self.rule.take().unwrap_or_default();
        rule.table_models = models.into_iter().map(Into::into).collect();
        self.rule = Some(rule);
        self
    }
    /// Skip property resolution and force a variant.
    pub fn with_variant(mut self, variant: DeviceVariant) -> Self {
        self.variant = Some(variant);
        self
    }
    /// Apply the device, sensor, dim and paths sections of a loaded config.
    ///
    /// The calibration CSV is not read here; load it with
    /// `fod_config::load_calibration_csv` and pass it to `with_calibration`.
    pub fn apply_config(self, cfg: &fod_config::Config) -> Self {
        self.with_variant_rule((&cfg.device).into())
            .with_geometry((&cfg.sensor).into())
            .with_dim_settings((&cfg.dim).into())
            .with_paths((&cfg.paths).into())
    }
}

// Setters that advance type-state
impl<D> ControllerBuilder<Missing, D> {
    pub fn with_fingerprint(
        self,
        fingerprint: Arc<dyn FingerprintService>,
    ) -> ControllerBuilder<Set, D> {
        ControllerBuilder {
            fingerprint: Some(fingerprint),
            display: self.display,
            properties: self.properties,
            calibration: self.calibration,
            dim: self.dim,
            paths: self.paths,
            geometry: self.geometry,
            rule: self.rule,
            variant: self.variant,
            _f: PhantomData,
            _d: PhantomData,
        }
    }
}

impl<F> ControllerBuilder<F, Missing> {
    pub fn with_display(self, display: Arc<dyn DisplayService>) -> ControllerBuilder<F, Set> {
        ControllerBuilder {
            fingerprint: self.fingerprint,
            display: Some(display),
            properties: self.properties,
            calibration: self.calibration,
            dim: self.dim,
            paths: self.paths,
            geometry: self.geometry,
            rule: self.rule,
            variant: self.variant,
            _f: PhantomData,
            _d: PhantomData,
        }
    }
}

impl ControllerBuilder<Set, Set> {
    /// Validate and build. Only available once both vendor services are set.
    pub fn build(self) -> Result<DeviceController> {
        self.try_build()
    }
}
