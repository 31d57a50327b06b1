use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum FodError {
    #[error("vendor service error during {op}: {detail}")]
    Service { op: &'static str, detail: String },
    #[error("callback {op} failed: {detail}")]
    Callback { op: &'static str, detail: String },
    #[error("calibration error: {0}")]
    Calibration(String),
    #[error("io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing fingerprint service")]
    MissingFingerprintService,
    #[error("missing display service")]
    MissingDisplayService,
    #[error("invalid calibration table: {0}")]
    InvalidCalibration(String),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
