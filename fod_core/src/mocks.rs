//! Test and helper callbacks for fod_core

use std::sync::atomic::{AtomicUsize, Ordering};

use fod_traits::{InscreenCallback, ServiceError};

/// Callback that counts finger events and can be told to fail every call.
#[derive(Debug, Default)]
pub struct CountingCallback {
    down: AtomicUsize,
    up: AtomicUsize,
    fail: bool,
}

impl CountingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn downs(&self) -> usize {
        self.down.load(Ordering::SeqCst)
    }

    pub fn ups(&self) -> usize {
        self.up.load(Ordering::SeqCst)
    }

    fn result(&self, op: &str) -> Result<(), ServiceError> {
        if self.fail {
            Err(format!("{op}: dead object").into())
        } else {
            Ok(())
        }
    }
}

impl InscreenCallback for CountingCallback {
    fn on_finger_down(&self) -> Result<(), ServiceError> {
        self.down.fetch_add(1, Ordering::SeqCst);
        self.result("on_finger_down")
    }

    fn on_finger_up(&self) -> Result<(), ServiceError> {
        self.up.fetch_add(1, Ordering::SeqCst);
        self.result("on_finger_up")
    }
}

/// Callback that only logs; used by the CLI when replaying events.
#[derive(Debug, Default)]
pub struct LoggingCallback;

impl InscreenCallback for LoggingCallback {
    fn on_finger_down(&self) -> Result<(), ServiceError> {
        tracing::info!("onFingerDown");
        Ok(())
    }

    fn on_finger_up(&self) -> Result<(), ServiceError> {
        tracing::info!("onFingerUp");
        Ok(())
    }
}
