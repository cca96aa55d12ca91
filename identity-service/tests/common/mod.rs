use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenMaker;
use chrono::Duration;
use identity_service::account::errors::ConflictField;
use identity_service::account::errors::RepositoryError;
use identity_service::account::models::Account;
use identity_service::account::models::Credentials;
use identity_service::account::models::RegisterCommand;
use identity_service::account::models::Username;
use identity_service::account::ports::AccountRepository;
use identity_service::domain::account::service::AuthService;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// In-memory account store enforcing the same uniqueness guarantees as the
/// Postgres adapter: both checks and the insert happen under one lock, so
/// racing registrations see exactly one winner.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(RepositoryError::UniquenessConflict {
                field: Some(ConflictField::Username),
            });
        }
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(RepositoryError::UniquenessConflict {
                field: Some(ConflictField::Email),
            });
        }

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| &a.username == username).cloned())
    }
}

pub struct TestHarness {
    pub service: Arc<AuthService<InMemoryAccountRepository>>,
    pub repository: Arc<InMemoryAccountRepository>,
    pub token_maker: Arc<TokenMaker>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_token_duration(Duration::minutes(15))
    }

    pub fn with_token_duration(token_duration: Duration) -> Self {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let token_maker = Arc::new(TokenMaker::new(TEST_SECRET).unwrap());
        let service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&token_maker),
            token_duration,
        ));

        Self {
            service,
            repository,
            token_maker,
        }
    }
}

pub fn register_command(username: &str, email: &str, password: &str) -> RegisterCommand {
    Credentials {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        full_name: String::new(),
    }
    .validate()
    .unwrap()
}

pub fn username(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}
