//! error types for export surfaces

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("export surface is sealed, cannot bind {0}")]
    Sealed(String),

    #[error("capability already bound: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
