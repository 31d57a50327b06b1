//! Maps `ServiceError` from trait boundaries to typed `FodError`.
//!
//! The traits in `fod_traits` use `Box<dyn Error + Send + Sync>`; this module
//! converts those to our typed error enum so every failure is logged the
//! same way, whichever backend produced it.

use fod_hardware::error::HwError;

use crate::error::FodError;

/// Map a vendor-service error to a typed `FodError`.
///
/// Known hardware errors are downcast first; anything else is kept as text.
pub fn map_service_error(op: &'static str, e: &(dyn std::error::Error + 'static)) -> FodError {
    if let Some(hw) = e.downcast_ref::<HwError>() {
        return match hw {
            HwError::Io { .. } => FodError::Io(hw.to_string()),
            other => FodError::Service {
                op,
                detail: other.to_string(),
            },
        };
    }
    FodError::Service {
        op,
        detail: e.to_string(),
    }
}

pub fn map_callback_error(op: &'static str, e: &(dyn std::error::Error + 'static)) -> FodError {
    FodError::Callback {
        op,
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hw_io_maps_to_io() {
        let e = HwError::Io {
            path: "/sys/x".into(),
            source: std::io::Error::other("denied"),
        };
        assert!(matches!(map_service_error("set_mode", &e), FodError::Io(_)));
    }

    #[test]
    fn foreign_errors_keep_op_name() {
        let e = std::io::Error::other("dead object");
        match map_service_error("update_status", &e) {
            FodError::Service { op, detail } => {
                assert_eq!(op, "update_status");
                assert!(detail.contains("dead object"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
