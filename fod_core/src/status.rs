//! Sensor interaction state reported by the controller.

/// Press dominates: a press during enrollment reports `Pressed` until release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    Idle,
    EnrollInProgress,
    Pressed,
}

impl SensorState {
    pub(crate) fn from_flags(pressed: bool, enrolling: bool) -> Self {
        if pressed {
            Self::Pressed
        } else if enrolling {
            Self::EnrollInProgress
        } else {
            Self::Idle
        }
    }
}
