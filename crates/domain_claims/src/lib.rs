//! Listing Claims Domain
//!
//! A shop owner claims a directory listing; an administrator approves or
//! denies the claim; approval hands the listing to the claimant.
//!
//! # Claim Lifecycle
//!
//! ```text
//!            submit              review (admin)
//!   (none) ─────────► Pending ──────────────────► Approved  (listing.owner_id = claimant)
//!                        │   └─────────────────► Denied
//!                        │ withdraw (claimant)
//!                        ▼
//!                    (deleted)
//! ```
//!
//! `Approved` and `Denied` are terminal. A user holds at most one claim per
//! listing, whatever its status, so a denied claimant cannot resubmit; a
//! withdrawn claim frees the pair.

pub mod claim;
pub mod ports;
pub mod workflow;
pub mod error;

pub use claim::{Claim, ClaimStatus, ReviewDecision, NewClaim, ClaimDetail};
pub use ports::{ClaimPort, ClaimQuery, ReviewRecord};
pub use workflow::{ClaimWorkflow, SubmitClaim, ClaimView};
pub use error::ClaimError;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockClaimPort;
