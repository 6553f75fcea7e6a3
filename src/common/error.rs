use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Everything that can go wrong while encoding a symbol.
///
/// Only [`QrError::DataTooLarge`] is reachable through well-formed calls to the
/// top level `create` functions. The other variants report misuse of the lower
/// level building blocks.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QrError {
    #[error("Data too large for the requested version and error correction level")]
    DataTooLarge,

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Not supported: {0}")]
    NotSupported(&'static str),

    #[error("Out of range: {0}")]
    OutOfRange(&'static str),

    #[error("Division by zero in GF(256)")]
    DivideByZero,
}

pub type QrResult<T> = Result<T, QrError>;

#[cfg(test)]
mod error_tests {
    use super::QrError;

    #[test]
    fn test_display() {
        assert_eq!(
            QrError::DataTooLarge.to_string(),
            "Data too large for the requested version and error correction level"
        );
        assert_eq!(
            QrError::OutOfRange("version").to_string(),
            "Out of range: version"
        );
        assert_eq!(
            QrError::NotSupported("structured append").to_string(),
            "Not supported: structured append"
        );
    }
}
