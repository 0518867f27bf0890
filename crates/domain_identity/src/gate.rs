//! Authorization gate
//!
//! Every protected operation first resolves a [`Caller`] from the request's
//! session token and then checks one of three policies:
//!
//! | Scope      | Requirement                                   | Denial            |
//! |------------|-----------------------------------------------|-------------------|
//! | Dashboard  | authenticated                                 | `Unauthenticated` |
//! | Admin      | authenticated with [`Role::Admin`]            | `Unauthenticated` / `Forbidden` + redirect to dashboard |
//! | Ownership  | authenticated id equals the resource owner id | `Forbidden`       |

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::UserId;

use crate::error::IdentityError;
use crate::user::Role;

/// Where authenticated non-admins are sent when they hit an admin route
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Where anonymous callers are sent when they hit a protected route
pub const LOGIN_PATH: &str = "/login";

/// Identity and role of an authenticated caller, as carried by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Ownership policy: the caller must be the resource's owner
    pub fn require_owner_of(&self, owner_id: UserId) -> Result<(), IdentityError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            debug!(caller = %self.user_id, owner = %owner_id, "ownership check failed");
            Err(IdentityError::forbidden("You do not own this resource"))
        }
    }

    /// The resource owner or any admin
    pub fn require_owner_or_admin(&self, owner_id: UserId) -> Result<(), IdentityError> {
        if self.is_admin() {
            return Ok(());
        }
        self.require_owner_of(owner_id)
    }
}

/// Request-scoped caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn authenticated(user_id: UserId, role: Role) -> Self {
        Caller::Authenticated(Principal::new(user_id, role))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.principal().map(|p| p.user_id)
    }

    /// Dashboard policy
    pub fn require_authenticated(&self) -> Result<&Principal, IdentityError> {
        self.principal().ok_or(IdentityError::Unauthenticated)
    }

    /// Admin policy
    ///
    /// Authenticated non-admins are pointed back at their own dashboard
    /// rather than shown a bare error.
    pub fn require_admin(&self) -> Result<&Principal, IdentityError> {
        let principal = self.require_authenticated()?;
        if principal.is_admin() {
            Ok(principal)
        } else {
            debug!(caller = %principal.user_id, "non-admin caller denied admin scope");
            Err(IdentityError::Forbidden {
                message: "Administrator access required".to_string(),
                redirect: Some(DASHBOARD_PATH.to_string()),
            })
        }
    }
}

/// Access scope declared by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Public,
    Dashboard,
    Admin,
}

impl AccessScope {
    /// Evaluates the scope's policy for a caller
    ///
    /// Returns the principal when the scope requires one.
    pub fn authorize<'a>(&self, caller: &'a Caller) -> Result<Option<&'a Principal>, IdentityError> {
        match self {
            AccessScope::Public => Ok(caller.principal()),
            AccessScope::Dashboard => caller.require_authenticated().map(Some),
            AccessScope::Admin => caller.require_admin().map(Some),
        }
    }
}
