//! Request handlers, one module per route group

pub mod health;
pub mod auth;
pub mod listings;
pub mod dashboard;
pub mod claims;
pub mod admin;
