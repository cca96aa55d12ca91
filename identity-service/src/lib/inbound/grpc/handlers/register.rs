use std::sync::Arc;

use tonic::Status;

use super::status_from_error;
use crate::account::models::Credentials;
use crate::account::ports::AuthServicePort;
use crate::domain::account::service::AuthService;
use crate::outbound::repositories::account::PostgresAccountRepository;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register(
    service: Arc<AuthService<PostgresAccountRepository>>,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let credentials = Credentials {
        username: request.username,
        email: request.email,
        password: request.password,
        full_name: request.full_name,
    };

    let command = credentials
        .validate()
        .map_err(|e| Status::invalid_argument(e.to_string()))?;

    let account = service
        .register(command)
        .await
        .map_err(status_from_error)?;

    Ok(RegisterResponse {
        account: Some((&account).into()),
    })
}
