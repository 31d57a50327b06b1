//! Property stores.
//!
//! `StaticProperties` is an in-memory map seeded by the caller.
//! `PropFile` parses `build.prop`-style `key=value` files; later files win.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use fod_traits::PropertyStore;
use tracing::debug;

use crate::error::{HwError, Result};

#[derive(Debug, Default)]
pub struct StaticProperties {
    values: RwLock<HashMap<String, String>>,
}

impl StaticProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut map = self
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(key.into(), value.into());
    }

    /// Parse a `KEY=VALUE` pair as given on the command line.
    pub fn parse_assignment(s: &str) -> Result<(String, String)> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| HwError::Property(format!("expected KEY=VALUE, got {s:?}")))?;
        let key = k.trim();
        if key.is_empty() {
            return Err(HwError::Property(format!("empty key in {s:?}")));
        }
        Ok((key.to_string(), v.trim().to_string()))
    }
}

impl FromIterator<(String, String)> for StaticProperties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl PropertyStore for StaticProperties {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

#[derive(Debug, Default)]
pub struct PropFile {
    values: HashMap<String, String>,
}

impl PropFile {
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self> {
        let mut values = HashMap::new();
        for p in paths {
            let path = p.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| HwError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let before = values.len();
            parse_into(&text, &mut values);
            debug!(
                path = %path.display(),
                added = values.len().saturating_sub(before),
                "loaded property file"
            );
        }
        Ok(Self { values })
    }

    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        parse_into(text, &mut values);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_into(text: &str, out: &mut HashMap<String, String>) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // `import` and other directives carry no '='
        if let Some((k, v)) = line.split_once('=') {
            let key = k.trim();
            if !key.is_empty() {
                out.insert(key.to_string(), v.trim().to_string());
            }
        }
    }
}

impl IntoIterator for PropFile {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl PropertyStore for PropFile {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
