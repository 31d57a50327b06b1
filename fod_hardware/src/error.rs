use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("io on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {value:?} from {path:?}")]
    Parse { path: PathBuf, value: String },
    #[error("property {0}")]
    Property(String),
    #[error("simulated failure: {0}")]
    Injected(&'static str),
}

pub type Result<T> = std::result::Result<T, HwError>;
