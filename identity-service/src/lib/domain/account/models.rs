use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::CredentialError;
use crate::account::errors::EmailError;
use crate::account::errors::FullNameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::UsernameError;

/// Account aggregate entity.
///
/// Owned by the persistence collaborator; the service reads and writes it but
/// never exposes `password_hash` in any outward view.
#[derive(Clone)]
pub struct Account {
    pub username: Username,
    pub email: EmailAddress,
    pub full_name: Option<FullName>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        username: Username,
        email: EmailAddress,
        full_name: Option<FullName>,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            full_name,
            password_hash,
            created_at,
        }
    }
}

// Hand-written so the hash can never leak through debug formatting
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Username value type
///
/// 3-30 bytes, ASCII letters, digits, and underscore only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 30;

    /// Create a new valid username.
    ///
    /// Length is checked before the character set, so the first violated
    /// rule is the one reported.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - length outside 3-30
    /// * `InvalidCharacters` - anything but ASCII letters, digits, `_`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// RFC 5322 parse plus the stricter shape the service requires: a dotted
/// domain ending in an alphabetic segment of at least two characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - empty, contains whitespace, fails the RFC parse,
    ///   or the domain has no dot / no alphabetic TLD of length >= 2
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::InvalidFormat("email is required".to_string()));
        }
        if email.chars().any(|c| c.is_whitespace()) {
            return Err(EmailError::InvalidFormat(
                "email must not contain whitespace".to_string(),
            ));
        }

        email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        Self::with_valid_domain(&email)?;

        Ok(Self(email))
    }

    fn with_valid_domain(email: &str) -> Result<(), EmailError> {
        // The parse above guarantees a single unquoted '@'
        let domain = email.rsplit('@').next().unwrap_or_default();
        let tld = domain.rsplit('.').next().unwrap_or_default();

        if tld.len() == domain.len() {
            return Err(EmailError::InvalidFormat(
                "email domain must contain a dot".to_string(),
            ));
        }
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(EmailError::InvalidFormat(
                "email domain must end in a top-level domain of at least two letters".to_string(),
            ));
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted for registration or login.
///
/// Exists only for the duration of a call; the debug representation is
/// redacted so the plaintext cannot reach logs or error strings.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Create a password that satisfies the format policy.
    ///
    /// Checks run in a fixed order: length, then uppercase, lowercase, digit.
    ///
    /// # Errors
    /// * `TooShort` - fewer than 8 bytes
    /// * `MissingUppercase` / `MissingLowercase` / `MissingDigit`
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.len() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: password.len(),
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(Self(password))
    }

    /// Access the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"<redacted>").finish()
    }
}

/// Optional display name, at most 100 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MAX_LENGTH: usize = 100;

    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        if full_name.len() > Self::MAX_LENGTH {
            return Err(FullNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: full_name.len(),
            });
        }
        Ok(Self(full_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw registration input as received from a transport.
///
/// Transient; never persisted. `validate` turns it into a checked command,
/// running the validators in a fixed order (username, email, password, full
/// name) so the first violated rule is the one reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Empty string means absent
    pub full_name: String,
}

impl Credentials {
    pub fn validate(self) -> Result<RegisterCommand, CredentialError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let full_name = if self.full_name.is_empty() {
            None
        } else {
            Some(FullName::new(self.full_name)?)
        };

        Ok(RegisterCommand {
            username,
            email,
            password,
            full_name,
        })
    }
}

/// Command to register a new account, all fields validated.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub full_name: Option<FullName>,
}

/// Result of a successful login.
///
/// Carries the payload alongside the encoded token so callers can expose the
/// token ID and timestamps without re-deserializing the token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: Account,
    pub access_token: String,
    pub payload: auth::TokenPayload,
}
