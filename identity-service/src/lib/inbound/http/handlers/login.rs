use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::UsernameError;
use crate::account::models::Account;
use crate::account::models::Password;
use crate::account::models::Username;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let (username, password) = body.try_into_parts()?;

    let outcome = state
        .auth_service
        .login(username, password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            account: (&outcome.account).into(),
            session_id: outcome.payload.token_id.to_string(),
            access_token: outcome.access_token,
            access_token_issued_at: outcome.payload.issued_at,
            access_token_expired_at: outcome.payload.expires_at,
        },
    ))
}

/// HTTP request body for logging in (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl LoginRequestBody {
    // Same format rules as registration, checked in the same order
    fn try_into_parts(self) -> Result<(Username, Password), ParseLoginRequestError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok((username, password))
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub account: AccountData,
    pub session_id: String,
    pub access_token: String,
    pub access_token_issued_at: DateTime<Utc>,
    pub access_token_expired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub username: String,
    pub full_name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.as_str().to_string(),
            full_name: account.full_name.as_ref().map(|name| name.as_str().to_string()),
            email: account.email.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}
