//! Request and response bodies
//!
//! Field names are camelCase on the wire.

pub mod auth;
pub mod claims;
pub mod listings;
