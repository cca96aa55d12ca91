use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::login::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Username;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Return the account of the authenticated caller.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    // The subject came out of a verified token; a malformed one means the
    // token was minted for a subject this service never issued
    let username = Username::new(principal.username)
        .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;

    state
        .auth_service
        .get_account(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
