//! Core Kernel - Foundational types shared by every directory crate
//!
//! This crate provides the building blocks used across the domain modules:
//! - Strongly-typed identifiers for users, listings, and claims
//! - Port contracts (`DomainPort`, `PortError`, health checks) for adapters
//! - The error taxonomy every domain error is classified into

pub mod identifiers;
pub mod ports;
pub mod error;

pub use identifiers::{UserId, ListingId, ClaimId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::ErrorKind;
