use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::TokenError;
use super::payload::TokenPayload;

/// Minimum length of the signing secret, in bytes.
pub const MIN_SECRET_SIZE: usize = 32;

/// Session token maker bound to a single secret key.
///
/// The key is injected at construction and immutable afterwards; the maker is
/// safe to share behind an `Arc` across any number of concurrent callers.
/// Signs with HS256. Expiry is evaluated against the injected [`Clock`]
/// rather than the signing library, so it stays deterministic under test.
pub struct TokenMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Box<dyn Clock>,
}

impl TokenMaker {
    /// Create a token maker using the wall clock.
    ///
    /// # Errors
    /// * `KeyTooShort` - `secret` is shorter than [`MIN_SECRET_SIZE`] bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_clock(secret, Box::new(SystemClock))
    }

    /// Create a token maker with an explicit time source.
    pub fn with_clock(secret: &[u8], clock: Box<dyn Clock>) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_SIZE {
            return Err(TokenError::KeyTooShort {
                min: MIN_SECRET_SIZE,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        })
    }

    /// Issue a token for `subject` valid for `duration`.
    ///
    /// Returns the encoded token together with the payload it was derived
    /// from, so callers can expose the token ID and timestamps without
    /// re-deserializing the token.
    ///
    /// # Errors
    /// * `CreationFailed` - signing failed; never returned for any
    ///   particular subject or duration value
    pub fn create_token(
        &self,
        subject: &str,
        duration: Duration,
    ) -> Result<(String, TokenPayload), TokenError> {
        let payload = TokenPayload::new(subject, duration, self.clock.now());
        let header = Header::new(self.algorithm);

        let token = encode(&header, &payload, &self.encoding_key)
            .map_err(|e| TokenError::CreationFailed(e.to_string()))?;

        Ok((token, payload))
    }

    /// Verify a token and return its payload.
    ///
    /// The signature is authenticated first; only then is expiry checked
    /// against the injected clock. Callers surfacing these errors must not
    /// distinguish `Invalid` from `Expired` outside their own logs.
    ///
    /// # Errors
    /// * `Invalid` - the signature does not verify (tampering, wrong key) or
    ///   the encoding is malformed
    /// * `Expired` - the signature verifies but `expires_at` has passed
    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<TokenPayload>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        let payload = token_data.claims;
        if payload.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    struct FrozenClock(DateTime<Utc>);

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn maker_at(instant: DateTime<Utc>) -> TokenMaker {
        TokenMaker::with_clock(SECRET, Box::new(FrozenClock(instant)))
            .expect("Failed to create token maker")
    }

    #[test]
    fn test_create_and_verify() {
        let maker = TokenMaker::new(SECRET).expect("Failed to create token maker");

        let (token, payload) = maker
            .create_token("alice", Duration::minutes(15))
            .expect("Failed to create token");
        assert!(!token.is_empty());
        assert_eq!(payload.subject, "alice");
        assert_eq!(payload.expires_at, payload.issued_at + Duration::minutes(15));

        let verified = maker.verify_token(&token).expect("Failed to verify token");
        assert_eq!(verified, payload);
    }

    #[test]
    fn test_rejects_short_secret() {
        let result = TokenMaker::new(b"too_short");
        assert!(matches!(result, Err(TokenError::KeyTooShort { .. })));
    }

    #[test]
    fn test_verify_expired_token() {
        let issued = Utc::now();
        let maker = maker_at(issued);
        let (token, payload) = maker
            .create_token("alice", Duration::minutes(5))
            .expect("Failed to create token");

        // Still valid exactly at expiry
        let at_expiry = maker_at(payload.expires_at);
        assert!(at_expiry.verify_token(&token).is_ok());

        // Invalid one second past expiry
        let past_expiry = maker_at(payload.expires_at + Duration::seconds(1));
        let result = past_expiry.verify_token(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let maker = TokenMaker::new(SECRET).expect("Failed to create token maker");
        let other = TokenMaker::new(b"another_secret_key_32_bytes_long!!")
            .expect("Failed to create token maker");

        let (token, _) = maker
            .create_token("alice", Duration::minutes(15))
            .expect("Failed to create token");

        let result = other.verify_token(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let maker = TokenMaker::new(SECRET).expect("Failed to create token maker");
        let (token, _) = maker
            .create_token("alice", Duration::minutes(15))
            .expect("Failed to create token");

        // Flip the first character of the payload segment
        let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(segments.len(), 3);
        let flipped = if segments[1].starts_with('A') { "B" } else { "A" };
        segments[1].replace_range(0..1, flipped);
        let tampered = segments.join(".");

        let result = maker.verify_token(&tampered);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_malformed_token() {
        let maker = TokenMaker::new(SECRET).expect("Failed to create token maker");

        let result = maker.verify_token("not.a.token");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_fails_even_if_tampered() {
        // Expiry is only reported for authentic tokens; a tampered expired
        // token is Invalid, not Expired
        let issued = Utc::now();
        let maker = maker_at(issued);
        let (token, payload) = maker
            .create_token("alice", Duration::minutes(5))
            .expect("Failed to create token");

        let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
        let flipped = if segments[1].starts_with('A') { "B" } else { "A" };
        segments[1].replace_range(0..1, flipped);
        let tampered = segments.join(".");

        let past_expiry = maker_at(payload.expires_at + Duration::seconds(1));
        let result = past_expiry.verify_token(&tampered);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
