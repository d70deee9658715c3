//! Error types for the editing core.
//!
//! Most editor operations have defined no-op behavior instead of failing; these
//! errors only cover parsing user-supplied values and validating loaded projects.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid color {0:?}: expected 6 hex digits, optionally prefixed with '#'")]
    InvalidFormat(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellKeyError {
    #[error("Invalid cell key {0:?}: expected two integers joined by a comma")]
    InvalidFormat(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Aida count must be greater than zero")]
    ZeroAidaCount,

    #[error("Strand count {0} is outside 1..=6")]
    StrandsOutOfRange(u32),

    /// A dimension used by the active shape is zero, negative or not finite.
    #[error("Invalid {field}: {value} inches")]
    InvalidDimension {
        field: &'static str,
        value: f64,
    },
}

/// A persisted project payload was rejected. Nothing is applied when this is returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Malformed project document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
