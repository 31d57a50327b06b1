pub mod ops;

pub use ops::{DisplayMode, FingerprintStatus, RingerMode};

/// Error type crossing every service seam.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Vendor fingerprint extensions service (`updateStatus`).
pub trait FingerprintService: Send + Sync {
    fn update_status(&self, status: FingerprintStatus) -> Result<(), ServiceError>;
}

/// Vendor display service (`setMode`).
pub trait DisplayService: Send + Sync {
    fn set_mode(&self, mode: DisplayMode, value: i32) -> Result<(), ServiceError>;
}

/// Listener registered by the biometrics framework.
pub trait InscreenCallback: Send + Sync {
    fn on_finger_down(&self) -> Result<(), ServiceError>;
    fn on_finger_up(&self) -> Result<(), ServiceError>;
}

/// Read-only system property lookup.
pub trait PropertyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Property value, or `default` when unset or empty.
    fn get_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(v) if !v.is_empty() => v,
            _ => default.to_string(),
        }
    }
}

/// Audio manager seam used by the alert slider.
pub trait RingerService: Send + Sync {
    fn set_ringer_mode(&self, mode: RingerMode) -> Result<(), ServiceError>;
}

pub trait Vibrator: Send + Sync {
    fn has_vibrator(&self) -> bool;
    fn vibrate(&self, duration: std::time::Duration) -> Result<(), ServiceError>;
}

impl<T: PropertyStore + ?Sized> PropertyStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
