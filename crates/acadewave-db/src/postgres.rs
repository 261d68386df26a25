use acadewave_models::{Account, AccountId, NewAccount, Role};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::directory::{AccountDirectory, DirectoryError, DuplicateField};

const ACCOUNT_COLUMNS: &str = "id, email, username, password_hash, is_active, role, created_at";

/// PostgreSQL-backed account directory.
///
/// Uniqueness of `email` and `username` is enforced by the
/// `accounts_email_key` and `accounts_username_key` constraints, so two
/// racing inserts cannot both commit.
#[derive(Debug, Clone)]
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: AccountId,
    email: String,
    username: String,
    password_hash: String,
    is_active: bool,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DirectoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e| DirectoryError::Backend(sqlx::Error::Decode(Box::new(e))))?;

        Ok(Account {
            id: row.id,
            email: row.email,
            username: row.username,
            password_hash: row.password_hash,
            is_active: row.is_active,
            role,
            created_at: row.created_at,
        })
    }
}

fn map_unique_violation(err: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some("accounts_username_key") => DirectoryError::Duplicate(DuplicateField::Username),
            _ => DirectoryError::Duplicate(DuplicateField::Email),
        };
    }
    DirectoryError::Backend(err)
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1 OR username = $1 LIMIT 1"
        ))
        .bind(identity)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"INSERT INTO accounts (id, email, username, password_hash, is_active, role, created_at)
               VALUES ($1, $2, $3, $4, FALSE, $5, $6)
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(AccountId::new())
        .bind(&new_account.email)
        .bind(&new_account.username)
        .bind(&new_account.password_hash)
        .bind(new_account.role.as_str())
        .bind(new_account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Account::try_from(row)
    }

    async fn activate(&self, id: AccountId) -> Result<Account, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"UPDATE accounts SET is_active = TRUE
               WHERE id = $1 AND is_active = FALSE
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Account::try_from(row),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(DirectoryError::AlreadyVerified),
                None => Err(DirectoryError::NotFound),
            },
        }
    }

    async fn update_password_hash(
        &self,
        id: AccountId,
        password_hash: &str,
    ) -> Result<(), DirectoryError> {
        let result = sqlx::query("UPDATE accounts SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DirectoryError::NotFound);
        }
        Ok(())
    }

    async fn update_username(
        &self,
        id: AccountId,
        username: &str,
    ) -> Result<Account, DirectoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "UPDATE accounts SET username = $1 WHERE id = $2 RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(username)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.map(Account::try_from)
            .transpose()?
            .ok_or(DirectoryError::NotFound)
    }
}
