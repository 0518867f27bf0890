//! Identity Domain
//!
//! Users, their roles, and the authorization gate that every dashboard and
//! admin operation passes through.
//!
//! # Role Model
//!
//! ```text
//! register(email) ──► Owner ──(email in allow-list, at login)──► Admin
//!        └──────────(email in allow-list)─────────────────────► Admin
//! ```
//!
//! Roles are only ever raised by the admin allow-list. The allow-list is an
//! injected [`AdminAllowList`] shared by registration and login so the two
//! enforcement points cannot drift apart.

pub mod user;
pub mod allow_list;
pub mod password;
pub mod gate;
pub mod ports;
pub mod service;
pub mod error;

pub use user::{User, Role, NewUser};
pub use allow_list::{AdminAllowList, normalize_email};
pub use gate::{Caller, Principal, AccessScope, DASHBOARD_PATH, LOGIN_PATH};
pub use ports::IdentityPort;
pub use service::{IdentityService, Registration, Credentials};
pub use error::IdentityError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockIdentityPort;
