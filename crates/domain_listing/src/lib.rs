//! Listing Domain
//!
//! Tattoo shop listings and the read side of the directory: browsing by
//! state, city, and style, free-text search, and the owner's dashboard view.
//!
//! A listing's `owner_id` is written by exactly one operation, the approval
//! of a claim (see `domain_claims`). Nothing in this crate sets it.

pub mod listing;
pub mod slug;
pub mod query;
pub mod ports;
pub mod service;
pub mod error;

pub use listing::{Listing, ListingStatus, NewListing};
pub use slug::slugify;
pub use query::{ListingQuery, StateSummary, CitySummary, StyleSummary, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use ports::ListingPort;
pub use service::DirectoryService;
pub use error::ListingError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockListingPort;
