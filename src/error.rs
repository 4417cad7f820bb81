use thiserror::Error;

/// Errors raised by buffer construction and the transformation engines.
///
/// Every variant is produced during argument validation, before any output
/// is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Filter type is not one of `blur`, `sharpen` or `custom`
    #[error("invalid filter type `{0}`; expected one of blur, sharpen, custom")]
    InvalidFilterType(String),
    /// Predefined kernel name is not one of `blur` or `sharpen`
    #[error("invalid kernel kind `{0}`; expected one of blur, sharpen")]
    InvalidKernelKind(String),
    /// Image rank, channel count or size is unusable for filtering
    #[error("invalid image dimension: {0}")]
    InvalidImageDimension(String),
    /// Custom kernel rank or channel count is unusable
    #[error("invalid filter dimension: {0}")]
    InvalidFilterDimension(String),
    /// A scalar argument is out of range or unrecognized
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Buffer has the wrong rank or channel count for the operation
    #[error("dimension error: {0}")]
    DimensionError(String),
    /// Buffer is not a 3 or 4 channel image
    #[error("invalid type: {0}")]
    InvalidType(String),
    /// Sample count does not match the requested shape
    #[error("size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch {
        /// Product of the requested shape
        expected: usize,
        /// Number of samples supplied
        actual: usize,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
