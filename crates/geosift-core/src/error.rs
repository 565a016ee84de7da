//! Error types for geosift

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeosiftError {
    // Filter construction errors
    #[error("Invalid filter: {reason}")]
    InvalidFilter { reason: String },

    #[error("Unsupported distance unit: {unit}")]
    UnsupportedUnit { unit: String },

    // CRS errors
    #[error("Unknown CRS: {name}")]
    UnknownCrs { name: String },

    #[error("Projection from {from} to {to} failed: {reason}")]
    ProjectionFailed {
        from: String,
        to: String,
        reason: String,
    },

    // Document decoding errors
    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String },

    // IO errors (fatal index read failures)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeosiftError>;
