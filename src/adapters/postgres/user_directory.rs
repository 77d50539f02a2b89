//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, Role, UserId};
use crate::ports::{UserAccount, UserDirectory};

use super::map_db_error;

/// sqlx-backed user directory.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    role: String,
    organization_id: Option<Uuid>,
    full_name: String,
    email: String,
    phone: Option<String>,
    is_active: bool,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid role value: {}", row.role),
            )
        })?;
        Ok(UserAccount {
            id: UserId::from_uuid(row.id),
            role,
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, role, organization_id, full_name, email, phone, is_active
             FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        row.map(UserAccount::try_from).transpose()
    }

    async fn activate(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }

    async fn create_inactive_admin(&self, account: &UserAccount) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, role, organization_id, full_name, email, phone, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.role.as_str())
        .bind(account.organization_id.as_ref().map(|o| *o.as_uuid()))
        .bind(&account.full_name)
        .bind(&account.email)
        .bind(&account.phone)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }
}
