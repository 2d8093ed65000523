//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::GeoPoint;

/// Errors raised while validating configuration and coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("coordinate {0} is not a finite WGS-84 position")]
    InvalidCoordinate(GeoPoint),
}

/// Shorthand result type for `wr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
