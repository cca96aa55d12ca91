use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Contents of a session token.
///
/// Created fresh per issued token and embedded inside it; verifying the token
/// reproduces this payload exactly. Field names follow the registered claim
/// names so the encoded form stays interoperable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Unique token identifier
    #[serde(rename = "jti")]
    pub token_id: Uuid,

    /// Subject the token was issued to (username)
    #[serde(rename = "sub")]
    pub subject: String,

    /// Issuance time
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiry time
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenPayload {
    /// Create a payload for `subject` valid for `duration` from `now`.
    ///
    /// Timestamps are truncated to whole seconds to match the encoded
    /// precision, so a decoded payload compares equal to the created one.
    pub fn new(subject: impl Into<String>, duration: Duration, now: DateTime<Utc>) -> Self {
        let issued_at = truncate_to_seconds(now);

        Self {
            token_id: Uuid::new_v4(),
            subject: subject.into(),
            issued_at,
            expires_at: issued_at + duration,
        }
    }

    /// Whether the payload has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload() {
        let now = Utc::now();
        let payload = TokenPayload::new("alice", Duration::minutes(15), now);

        assert_eq!(payload.subject, "alice");
        assert_eq!(payload.expires_at - payload.issued_at, Duration::minutes(15));
        assert_eq!(payload.issued_at.timestamp(), now.timestamp());
        assert_eq!(payload.issued_at.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_fresh_token_id_per_payload() {
        let now = Utc::now();
        let first = TokenPayload::new("alice", Duration::minutes(15), now);
        let second = TokenPayload::new("alice", Duration::minutes(15), now);

        assert_ne!(first.token_id, second.token_id);
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let payload = TokenPayload::new("alice", Duration::seconds(60), now);

        assert!(!payload.is_expired(payload.issued_at));
        assert!(!payload.is_expired(payload.expires_at));
        assert!(payload.is_expired(payload.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let payload = TokenPayload::new("alice", Duration::hours(1), Utc::now());

        let json = serde_json::to_string(&payload).unwrap();
        let decoded: TokenPayload = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, payload);
        // Encoded form uses the registered claim names
        assert!(json.contains("\"sub\""));
        assert!(json.contains("\"jti\""));
        assert!(json.contains("\"iat\""));
        assert!(json.contains("\"exp\""));
    }
}
