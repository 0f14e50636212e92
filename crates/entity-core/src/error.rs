//! Error types for the value model.

use thiserror::Error;

/// Errors raised while building tagged wrapper values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude must be a finite number between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude must be a finite number between -180 and 180, got {0}")]
    InvalidLongitude(f64),

    /// A non-finite float cannot back a double wrapper.
    #[error("double value must be finite, got {0}")]
    NonFiniteDouble(f64),
}

/// Result type for value model operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_offending_value() {
        assert!(CoreError::InvalidLatitude(91.5).to_string().contains("91.5"));
        assert!(CoreError::InvalidLongitude(-200.0).to_string().contains("-200"));
    }
}
