//! PostgreSQL Identity Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, UserId};
use domain_identity::{normalize_email, IdentityPort, NewUser, Role, User};

use crate::error::DatabaseError;
use crate::repositories::users::{NewUserRecord, UserRepository, UserRow};

/// PostgreSQL-backed implementation of the IdentityPort trait
#[derive(Debug, Clone)]
pub struct PostgresIdentityAdapter {
    repository: UserRepository,
    pool: PgPool,
}

impl PostgresIdentityAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresIdentityAdapter {}

#[async_trait]
impl HealthCheckable for PostgresIdentityAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-identity-adapter").await
    }
}

#[async_trait]
impl IdentityPort for PostgresIdentityAdapter {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
        let row = self.repository.get_by_id(id.into()).await?;
        row.map(row_to_user).transpose()
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
        let row = self.repository.find_by_email(email).await?;
        row.map(row_to_user).transpose()
    }

    #[instrument(skip(self, user), fields(role = %user.role))]
    async fn create_user(&self, user: NewUser) -> Result<User, PortError> {
        debug!("Inserting user");
        let row = self
            .repository
            .insert(NewUserRecord {
                id: UserId::new_v7().into(),
                email: normalize_email(&user.email),
                password_hash: user.password_hash,
                name: user.name,
                role: user.role.as_str(),
            })
            .await?;
        row_to_user(row)
    }

    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    async fn update_role(&self, id: UserId, role: Role) -> Result<User, PortError> {
        let row = self.repository.update_role(id.into(), role.as_str()).await?;
        row_to_user(row)
    }
}

fn row_to_user(row: UserRow) -> Result<User, PortError> {
    let role = row.role.parse::<Role>().map_err(DatabaseError::Decode)?;
    Ok(User {
        id: UserId::from(row.id),
        email: row.email,
        password_hash: row.password_hash,
        name: row.name,
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
