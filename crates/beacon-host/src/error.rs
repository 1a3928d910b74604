//! error types for the host runtime

use beacon_native::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("module not loaded")]
    NotLoaded,

    #[error("module already loaded: {0}")]
    AlreadyLoaded(&'static str),

    #[error("failed to load module {module}: {source}")]
    Load {
        module: &'static str,
        #[source]
        source: ExportError,
    },

    #[error("unknown capability: {0}")]
    UnknownCapability(String),
}

pub type Result<T> = std::result::Result<T, HostError>;
