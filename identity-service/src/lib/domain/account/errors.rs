use std::fmt;

use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username contains invalid characters (only letters, digits, and underscore allowed)")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password-policy validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// First credential-format violation found while validating raw input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid full name: {0}")]
    FullName(#[from] FullNameError),
}

/// Account field a uniqueness constraint can fire on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Username,
    Email,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Username => write!(f, "username"),
            ConflictField::Email => write!(f, "email"),
        }
    }
}

/// Errors the persistence collaborator reports to the core.
///
/// The adapter owns the translation from driver errors into this contract;
/// the core never inspects driver types or error text. `field` is `None`
/// when the adapter could not attribute the conflict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("unique constraint violated")]
    UniquenessConflict { field: Option<ConflictField> },

    #[error("database error: {0}")]
    Database(String),
}

/// Closed error taxonomy surfaced by the authentication core.
///
/// Every collaborator failure maps to exactly one member; transports only
/// translate these into status codes.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{}", already_exists_message(.field))]
    AlreadyExists { field: Option<ConflictField> },

    #[error("account not found: {0}")]
    NotFound(String),

    #[error("invalid credentials")]
    Unauthenticated,

    #[error("internal error: {0}")]
    Internal(String),
}

fn already_exists_message(field: &Option<ConflictField>) -> String {
    match field {
        Some(field) => format!("{field} already exists"),
        None => "account already exists".to_string(),
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        AuthError::InvalidArgument(err.to_string())
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniquenessConflict { field } => AuthError::AlreadyExists { field },
            RepositoryError::Database(detail) => AuthError::Internal(detail),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        // A mismatch never reaches here; hashing errors are structural
        AuthError::Internal(err.to_string())
    }
}

impl From<auth::TokenError> for AuthError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            // Indistinguishable to callers; root cause stays in server logs
            auth::TokenError::Expired | auth::TokenError::Invalid(_) => AuthError::Unauthenticated,
            auth::TokenError::KeyTooShort { .. } | auth::TokenError::CreationFailed(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
