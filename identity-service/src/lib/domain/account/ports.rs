use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::RepositoryError;
use crate::account::models::Account;
use crate::account::models::LoginOutcome;
use crate::account::models::Password;
use crate::account::models::RegisterCommand;
use crate::account::models::Username;

/// Port for the authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account from validated credentials.
    ///
    /// # Returns
    /// The created account (callers must not expose its password hash)
    ///
    /// # Errors
    /// * `AlreadyExists` - username or email is already taken
    /// * `Internal` - hashing or persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError>;

    /// Authenticate an account and issue a session token.
    ///
    /// # Errors
    /// * `NotFound` - no account with this username
    /// * `Unauthenticated` - password does not match
    /// * `Internal` - hash verification or token issuance failed
    async fn login(&self, username: Username, password: Password)
        -> Result<LoginOutcome, AuthError>;

    /// Retrieve an account by username.
    ///
    /// # Errors
    /// * `NotFound` - no account with this username
    /// * `Internal` - persistence failed
    async fn get_account(&self, username: &Username) -> Result<Account, AuthError>;
}

/// Persistence operations for the account aggregate.
///
/// Account creation must be a single atomic write enforcing both uniqueness
/// constraints; the adapter reports conflicts through the structured
/// `UniquenessConflict` signal rather than driver error text.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UniquenessConflict` - username or email already present; `field`
    ///   names the conflicting column when the adapter can attribute it
    /// * `Database` - any other persistence failure
    async fn create(&self, account: Account) -> Result<Account, RepositoryError>;

    /// Retrieve an account by username.
    ///
    /// # Returns
    /// `None` when no account has this username
    ///
    /// # Errors
    /// * `Database` - persistence failure
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, RepositoryError>;
}
