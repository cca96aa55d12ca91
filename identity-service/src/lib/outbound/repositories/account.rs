use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::ConflictField;
use crate::account::errors::RepositoryError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const INSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (username, email, full_name, password_hash, created_at)
    VALUES ($1, $2, $3, $4, $5)
"#;

const SELECT_BY_USERNAME: &str = r#"
    SELECT username, email, full_name, password_hash, created_at
    FROM accounts
    WHERE username = $1
"#;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    username: String,
    email: String,
    full_name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    // Rows were validated on insert; a row that no longer parses is corrupt
    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| RepositoryError::Database(format!("corrupt account row: {e}")))?;
        let email = EmailAddress::new(row.email)
            .map_err(|e| RepositoryError::Database(format!("corrupt account row: {e}")))?;
        let full_name = row
            .full_name
            .map(FullName::new)
            .transpose()
            .map_err(|e| RepositoryError::Database(format!("corrupt account row: {e}")))?;

        Ok(Account::new(
            username,
            email,
            full_name,
            row.password_hash,
            row.created_at,
        ))
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, RepositoryError> {
        sqlx::query(INSERT_ACCOUNT)
            .bind(account.username.as_str())
            .bind(account.email.as_str())
            .bind(account.full_name.as_ref().map(|name| name.as_str()))
            .bind(&account.password_hash)
            .bind(account.created_at)
            .execute(&self.pool)
            .await
            .map_err(classify_write_error)?;

        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(SELECT_BY_USERNAME)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }
}

/// Translate a driver error into the collaborator contract.
///
/// Unique violations are attributed by constraint name; an unrecognized
/// unique constraint still surfaces as a conflict, just without a field.
fn classify_write_error(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("accounts_pkey") => Some(ConflictField::Username),
                Some("accounts_email_key") => Some(ConflictField::Email),
                _ => None,
            };
            return RepositoryError::UniquenessConflict { field };
        }
    }
    RepositoryError::Database(err.to_string())
}
