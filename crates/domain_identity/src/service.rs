//! Identity application service
//!
//! Registration and login both consult the same injected [`AdminAllowList`]:
//! registration decides the initial role, login promotes an existing account
//! whose email was added to the list after it registered.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

use crate::allow_list::{normalize_email, AdminAllowList};
use crate::error::IdentityError;
use crate::gate::Caller;
use crate::password::{hash_password, verify_password, verify_without_account};
use crate::ports::IdentityPort;
use crate::user::{NewUser, Role, User};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Input for [`IdentityService::register`]
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Input for [`IdentityService::login`]
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration, login, and current-user lookups
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn IdentityPort>,
    allow_list: AdminAllowList,
}

impl IdentityService {
    pub fn new(users: Arc<dyn IdentityPort>, allow_list: AdminAllowList) -> Self {
        Self { users, allow_list }
    }

    pub fn allow_list(&self) -> &AdminAllowList {
        &self.allow_list
    }

    /// Creates an account
    ///
    /// The role is `Admin` when the email is allow-listed, `Owner` otherwise.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<User, IdentityError> {
        let email = normalize_email(&registration.email);
        let name = registration.name.trim().to_string();

        if !email.validate_email() {
            return Err(IdentityError::Validation("email address is not valid".to_string()));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::Validation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if name.is_empty() {
            return Err(IdentityError::Validation("name must not be blank".to_string()));
        }

        let role = self.role_for(&email);
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .users
            .create_user(NewUser {
                email: email.clone(),
                password_hash,
                name,
                role,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    IdentityError::EmailTaken(email.clone())
                } else {
                    IdentityError::Port(e)
                }
            })?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Checks credentials and applies allow-list promotion
    ///
    /// The returned user carries the role the session must be issued with.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, IdentityError> {
        let user = match self.users.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => {
                verify_without_account(&credentials.password);
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !verify_password(&credentials.password, &user.password_hash)? {
            warn!(user_id = %user.id, "failed login attempt");
            return Err(IdentityError::InvalidCredentials);
        }

        if self.allow_list.contains(&user.email) && !user.is_admin() {
            let promoted = self.users.update_role(user.id, Role::Admin).await?;
            info!(user_id = %promoted.id, "user promoted to admin by allow-list");
            return Ok(promoted);
        }

        Ok(user)
    }

    /// Profile of the authenticated caller
    pub async fn current_user(&self, caller: &Caller) -> Result<User, IdentityError> {
        let principal = caller.require_authenticated()?;
        self.users
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| IdentityError::UserNotFound(principal.user_id.to_string()))
    }

    fn role_for(&self, email: &str) -> Role {
        if self.allow_list.contains(email) {
            Role::Admin
        } else {
            Role::Owner
        }
    }
}
