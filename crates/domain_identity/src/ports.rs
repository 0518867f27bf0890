//! Identity Domain Ports
//!
//! The `IdentityPort` trait is everything the identity domain needs from its
//! user store. Adapters:
//!
//! - **Internal Adapter**: PostgreSQL (`infra_db::adapters::PostgresIdentityAdapter`)
//! - **Mock Adapter**: in-memory, behind the `mock` feature
//!
//! ```rust,ignore
//! let users: Arc<dyn IdentityPort> = Arc::new(PostgresIdentityAdapter::new(pool));
//! let service = IdentityService::new(users, allow_list);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, UserId};

use crate::user::{NewUser, Role, User};

/// Port for user storage
#[async_trait]
pub trait IdentityPort: DomainPort {
    /// Retrieves a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError>;

    /// Retrieves a user by email, compared case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError>;

    /// Creates a user
    ///
    /// Fails with `PortError::Conflict` when the email is already registered.
    async fn create_user(&self, user: NewUser) -> Result<User, PortError>;

    /// Overwrites a user's role
    async fn update_role(&self, id: UserId, role: Role) -> Result<User, PortError>;
}

/// Mock implementation of IdentityPort for testing
///
/// Stores users in memory; email uniqueness is enforced under the write lock.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

    use crate::allow_list::normalize_email;

    /// In-memory mock implementation of IdentityPort
    #[derive(Debug, Default, Clone)]
    pub struct MockIdentityPort {
        users: Arc<RwLock<HashMap<UserId, User>>>,
    }

    impl MockIdentityPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with users for testing
        pub async fn with_users(users: Vec<User>) -> Self {
            let port = Self::new();
            for user in users {
                port.users.write().await.insert(user.id, user);
            }
            port
        }

        /// Number of stored users
        pub async fn len(&self) -> usize {
            self.users.read().await.len()
        }

        /// True when no users are stored
        pub async fn is_empty(&self) -> bool {
            self.users.read().await.is_empty()
        }
    }

    impl DomainPort for MockIdentityPort {}

    #[async_trait]
    impl HealthCheckable for MockIdentityPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-identity-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl IdentityPort for MockIdentityPort {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PortError> {
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortError> {
            let email = normalize_email(email);
            Ok(self
                .users
                .read()
                .await
                .values()
                .find(|u| normalize_email(&u.email) == email)
                .cloned())
        }

        async fn create_user(&self, user: NewUser) -> Result<User, PortError> {
            let email = normalize_email(&user.email);
            let mut users = self.users.write().await;

            if users.values().any(|u| normalize_email(&u.email) == email) {
                return Err(PortError::conflict(format!("email {} already registered", email)));
            }

            let now = Utc::now();
            let created = User {
                id: UserId::new_v7(),
                email,
                password_hash: user.password_hash,
                name: user.name,
                role: user.role,
                created_at: now,
                updated_at: now,
            };
            users.insert(created.id, created.clone());
            Ok(created)
        }

        async fn update_role(&self, id: UserId, role: Role) -> Result<User, PortError> {
            let mut users = self.users.write().await;
            let user = users
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("User", id))?;
            user.role = role;
            user.updated_at = Utc::now();
            Ok(user.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockIdentityPort;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            name: "Test User".to_string(),
            role: Role::Owner,
        }
    }

    #[tokio::test]
    async fn test_mock_port_create_and_find() {
        let port = MockIdentityPort::new();
        let user = port.create_user(new_user("artist@example.com")).await.unwrap();

        let by_id = port.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "artist@example.com");

        let by_email = port.find_by_email("ARTIST@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_mock_port_rejects_duplicate_email_any_case() {
        let port = MockIdentityPort::new();
        port.create_user(new_user("artist@example.com")).await.unwrap();

        let err = port.create_user(new_user("Artist@Example.com")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_port_update_role() {
        let port = MockIdentityPort::new();
        let user = port.create_user(new_user("artist@example.com")).await.unwrap();

        let updated = port.update_role(user.id, Role::Admin).await.unwrap();
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_mock_port_update_role_unknown_user() {
        let port = MockIdentityPort::new();
        let err = port.update_role(UserId::new(), Role::Admin).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
