//! `From` implementations bridging `fod_config` types to `fod_core` types.

use crate::config::{DimSettings, SensorGeometry, SysfsPaths, VariantRule};
use crate::slider::HallPaths;

// ── VariantRule ──────────────────────────────────────────────────────────────

impl From<&fod_config::DeviceCfg> for VariantRule {
    fn from(c: &fod_config::DeviceCfg) -> Self {
        Self {
            model_property: c.model_property.clone(),
            table_models: c.table_models.clone(),
        }
    }
}

// ── SensorGeometry ───────────────────────────────────────────────────────────

impl From<&fod_config::SensorCfg> for SensorGeometry {
    fn from(c: &fod_config::SensorCfg) -> Self {
        Self {
            position_x: c.position_x,
            position_y: c.position_y,
            size: c.size,
        }
    }
}

// ── DimSettings ──────────────────────────────────────────────────────────────

impl From<&fod_config::DimCfg> for DimSettings {
    fn from(c: &fod_config::DimCfg) -> Self {
        Self {
            brightness_scale: c.brightness_scale,
            icon_dim_property: c.icon_dim_property.clone(),
            icon_dim_default: c.icon_dim_default.clone(),
        }
    }
}

// ── Paths ────────────────────────────────────────────────────────────────────

impl From<&fod_config::PathsCfg> for SysfsPaths {
    fn from(c: &fod_config::PathsCfg) -> Self {
        Self {
            hbm_enable: c.hbm_enable.clone(),
            dim_alpha: c.dim_alpha.clone(),
        }
    }
}

impl From<&fod_config::PathsCfg> for HallPaths {
    fn from(c: &fod_config::PathsCfg) -> Self {
        Self {
            persist: c.hall_persist.clone(),
            calibration: c.hall_calibration.clone(),
        }
    }
}
