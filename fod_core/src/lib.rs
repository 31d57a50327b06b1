#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! In-display fingerprint sensor control (hardware-agnostic).
//!
//! This crate sits between the biometrics framework and the vendor services.
//! All hardware interaction goes through the `fod_traits` service traits and
//! the injectable sysfs paths in `config::SysfsPaths`.
//!
//! ## Architecture
//!
//! - **Calibration**: brightness → dim alpha table (`calibration` module)
//! - **Dimming**: truncating integer interpolation and dim amount (`dim` module)
//! - **Variant**: generic vs. table-driven panels, resolved once (`variant` module)
//! - **Controller**: press/release, enrollment, callbacks (`DeviceController`)
//! - **Slider**: alert slider keys and hall calibration restore (`slider` module)

pub mod builder;
pub mod calibration;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod dim;
pub mod error;
pub mod mocks;
pub mod service_error;
pub mod slider;
pub mod status;
pub mod variant;

pub use builder::ControllerBuilder;
pub use calibration::{CalibrationTable, REFERENCE_TABLE};
pub use config::{DimSettings, SensorGeometry, SysfsPaths, VariantRule};
pub use controller::DeviceController;
pub use dim::{DimCalculator, interpolate};
pub use error::{BuildError, FodError, Result};
pub use slider::{HallPaths, KeyHandler, SliderPosition, restore_hall_calibration};
pub use status::SensorState;
pub use variant::DeviceVariant;
