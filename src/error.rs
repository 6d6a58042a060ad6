//! Error types and handling

use thiserror::Error;

/// Failures of the few operations that cannot fall back to a sentinel value.
///
/// Symbol accessors never return this; they mirror the library's own
/// conventions (empty string, `-1`, or `None`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("null symbol set handle")]
    NullHandle,
    #[error("symbol could not be rendered as XML")]
    Xml,
    #[error("native call failed with status {0}")]
    Native(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
