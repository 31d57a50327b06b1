//! Runtime configuration types for the controller.
//!
//! These are what `DeviceController` consumes. They are separate from the
//! TOML-deserialized config in `fod_config`; see `conversions` for the mapping.

use std::path::PathBuf;

pub const DEFAULT_BRIGHTNESS_SCALE: f64 = 4.011_765;
pub const DEFAULT_MODEL_PROPERTY: &str = "ro.product.device";
pub const DEFAULT_ICON_DIM_PROPERTY: &str = "persist.vendor.sys.fod.icon.dim";
pub const DEFAULT_ICON_DIM_PERCENT: &str = "90";

/// Injectable sysfs node paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsPaths {
    /// High-brightness enable node written on press/release.
    pub hbm_enable: PathBuf,
    /// Panel-provided dim alpha, read for the generic variant.
    pub dim_alpha: PathBuf,
}

impl Default for SysfsPaths {
    fn default() -> Self {
        Self {
            hbm_enable: PathBuf::from("/sys/class/drm/card0-DSI-1/op_friginer_print_hbm"),
            dim_alpha: PathBuf::from("/sys/class/drm/card0-DSI-1/dim_alpha"),
        }
    }
}

/// Sensor position and size on the panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGeometry {
    pub position_x: i32,
    pub position_y: i32,
    pub size: i32,
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self {
            position_x: 444,
            position_y: 1966,
            size: 190,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimSettings {
    pub brightness_scale: f64,
    pub icon_dim_property: String,
    /// Raw property text used when the icon dim property is unset.
    pub icon_dim_default: String,
}

impl Default for DimSettings {
    fn default() -> Self {
        Self {
            brightness_scale: DEFAULT_BRIGHTNESS_SCALE,
            icon_dim_property: DEFAULT_ICON_DIM_PROPERTY.to_string(),
            icon_dim_default: DEFAULT_ICON_DIM_PERCENT.to_string(),
        }
    }
}

/// How the device variant is resolved at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRule {
    pub model_property: String,
    /// Models that use table-driven dimming.
    pub table_models: Vec<String>,
}

impl Default for VariantRule {
    fn default() -> Self {
        Self {
            model_property: DEFAULT_MODEL_PROPERTY.to_string(),
            table_models: vec!["OnePlus7".to_string()],
        }
    }
}
