use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenMaker;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::models::Account;
use crate::account::models::LoginOutcome;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Authentication service implementation.
///
/// Stateless per call: the only shared pieces are the repository handle and
/// the token maker's immutable key. Each use case is a linear pipeline; the
/// first failing step aborts the call with a classified error and no step
/// before the persistence write has side effects.
pub struct AuthService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_maker: Arc<TokenMaker>,
    token_duration: Duration,
}

impl<R> AuthService<R>
where
    R: AccountRepository,
{
    /// Create the service with injected collaborators.
    ///
    /// # Arguments
    /// * `repository` - account persistence implementation
    /// * `token_maker` - token maker holding the process secret
    /// * `token_duration` - validity window for issued tokens
    pub fn new(repository: Arc<R>, token_maker: Arc<TokenMaker>, token_duration: Duration) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_maker,
            token_duration,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError> {
        let RegisterCommand {
            username,
            email,
            password,
            full_name,
        } = command;

        // Hashing is the one expensive step; run it off the async runtime
        let hasher = self.password_hasher;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))??;

        let account = Account::new(username, email, full_name, password_hash, Utc::now());

        Ok(self.repository.create(account).await?)
    }

    async fn login(
        &self,
        username: Username,
        password: Password,
    ) -> Result<LoginOutcome, AuthError> {
        let account = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::NotFound(username.to_string()))?;

        let hasher = self.password_hasher;
        let stored_hash = account.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(password.expose(), &stored_hash))
                .await
                .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))??;

        if !matches {
            return Err(AuthError::Unauthenticated);
        }

        let (access_token, payload) = self
            .token_maker
            .create_token(account.username.as_str(), self.token_duration)?;

        Ok(LoginOutcome {
            account,
            access_token,
            payload,
        })
    }

    async fn get_account(&self, username: &Username) -> Result<Account, AuthError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AuthError::NotFound(username.to_string()))
    }
}
