//! Authentication primitives library
//!
//! Provides the cryptographic building blocks for identity services:
//! - Password hashing (Argon2id)
//! - Session token creation and verification
//!
//! Transport and storage concerns live in the service crates; this crate only
//! deals with password material and token payloads.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenMaker;
//! use chrono::Duration;
//!
//! let maker = TokenMaker::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let (token, payload) = maker.create_token("alice", Duration::minutes(15)).unwrap();
//! let verified = maker.verify_token(&token).unwrap();
//! assert_eq!(verified, payload);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Clock;
pub use token::SystemClock;
pub use token::TokenError;
pub use token::TokenMaker;
pub use token::TokenPayload;
