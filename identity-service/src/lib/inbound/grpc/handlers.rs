use chrono::DateTime;
use chrono::Utc;
use tonic::Status;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::proto::Account as ProtoAccount;

pub mod login;
pub mod register;

/// Translate a domain error into a gRPC status.
///
/// Internal detail never crosses the wire; it is logged here instead.
pub(crate) fn status_from_error(err: AuthError) -> Status {
    match err {
        AuthError::InvalidArgument(message) => Status::invalid_argument(message),
        e @ AuthError::AlreadyExists { .. } => Status::already_exists(e.to_string()),
        e @ AuthError::NotFound(_) => Status::not_found(e.to_string()),
        e @ AuthError::Unauthenticated => Status::unauthenticated(e.to_string()),
        AuthError::Internal(detail) => {
            tracing::error!(error = %detail, "Internal error");
            Status::internal("internal error")
        }
    }
}

pub(crate) fn timestamp(instant: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: instant.timestamp(),
        nanos: instant.timestamp_subsec_nanos() as i32,
    }
}

impl From<&Account> for ProtoAccount {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.as_str().to_string(),
            full_name: account
                .full_name
                .as_ref()
                .map(|name| name.as_str().to_string())
                .unwrap_or_default(),
            email: account.email.as_str().to_string(),
            created_at: Some(timestamp(account.created_at)),
        }
    }
}
