//! Kernel sysfs node access.
//!
//! Nodes are written without a trailing newline and read as a single
//! whitespace-delimited token, matching what the panel driver expects.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{HwError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsNode {
    path: PathBuf,
}

impl SysfsNode {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write<T: Display>(&self, value: T) -> Result<()> {
        let text = value.to_string();
        std::fs::write(&self.path, text.as_bytes()).map_err(|source| HwError::Io {
            path: self.path.clone(),
            source,
        })?;
        trace!(path = %self.path.display(), value = %text, "sysfs write");
        Ok(())
    }

    pub fn read<T: FromStr>(&self) -> Result<T> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| HwError::Io {
            path: self.path.clone(),
            source,
        })?;
        let token = raw.split_whitespace().next().unwrap_or_default();
        token.parse::<T>().map_err(|_| HwError::Parse {
            path: self.path.clone(),
            value: token.to_string(),
        })
    }

    /// Write and drop any failure; the node may be absent on some panels.
    pub fn write_best_effort<T: Display>(&self, value: T) {
        if let Err(e) = self.write(value) {
            debug!(error = %e, "sysfs write ignored");
        }
    }

    /// Read a value, substituting `default` on any I/O or parse failure.
    pub fn read_or<T: FromStr>(&self, default: T) -> T {
        match self.read() {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "sysfs read failed; using default");
                default
            }
        }
    }

    /// First line of the node with the trailing newline stripped, if readable.
    pub fn read_line(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        raw.lines().next().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_or_falls_back_on_missing_node() {
        let node = SysfsNode::new("/nonexistent/fod/dim_alpha");
        assert_eq!(node.read_or(0i32), 0);
        assert_eq!(node.read_or(7i32), 7);
    }

    #[test]
    fn write_best_effort_never_panics() {
        let node = SysfsNode::new("/nonexistent/fod/hbm");
        node.write_best_effort(1);
        assert!(!node.exists());
    }
}
