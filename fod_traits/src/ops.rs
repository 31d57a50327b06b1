//! Vendor op-codes understood by the fingerprint and display services.

/// Status codes accepted by the vendor fingerprint extensions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerprintStatus {
    EnableLongPress,
    DisableLongPress,
    ResumeEnroll,
    FinishEnroll,
}

impl FingerprintStatus {
    /// Raw value passed to `updateStatus` on the vendor side.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::EnableLongPress => 3,
            Self::DisableLongPress => 4,
            Self::ResumeEnroll => 8,
            Self::FinishEnroll => 10,
        }
    }

    /// Map a long-press toggle to its status code.
    #[inline]
    pub const fn long_press(enabled: bool) -> Self {
        if enabled {
            Self::EnableLongPress
        } else {
            Self::DisableLongPress
        }
    }
}

/// Display modes accepted by the vendor display service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayMode {
    /// Always-on-display suppression; 2 while pressed, 0 otherwise.
    Aod,
    NotifyPress,
    SetDim,
}

impl DisplayMode {
    pub const ALL: [Self; 3] = [Self::Aod, Self::NotifyPress, Self::SetDim];

    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::Aod => 8,
            Self::NotifyPress => 9,
            Self::SetDim => 10,
        }
    }
}

/// Ringer modes selected by the three-position alert slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingerMode {
    Normal,
    Vibrate,
    Silent,
}
