use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` and `Invalid` are distinguished here so callers can log the
/// root cause; every external surface must collapse both into one
/// undifferentiated unauthenticated response.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Secret key too short: minimum {min} bytes, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("Failed to create token: {0}")]
    CreationFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
