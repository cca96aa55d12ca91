use std::sync::Arc;

use tonic::Status;

use super::status_from_error;
use super::timestamp;
use crate::account::models::Password;
use crate::account::models::Username;
use crate::account::ports::AuthServicePort;
use crate::domain::account::service::AuthService;
use crate::outbound::repositories::account::PostgresAccountRepository;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login(
    service: Arc<AuthService<PostgresAccountRepository>>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    // Same format rules as registration, checked in the same order
    let username = Username::new(request.username)
        .map_err(|e| Status::invalid_argument(format!("Invalid username: {e}")))?;
    let password = Password::new(request.password)
        .map_err(|e| Status::invalid_argument(format!("Invalid password: {e}")))?;

    let outcome = service
        .login(username, password)
        .await
        .map_err(status_from_error)?;

    Ok(LoginResponse {
        account: Some((&outcome.account).into()),
        session_id: outcome.payload.token_id.to_string(),
        access_token: outcome.access_token,
        access_token_issued_at: Some(timestamp(outcome.payload.issued_at)),
        access_token_expired_at: Some(timestamp(outcome.payload.expires_at)),
    })
}
