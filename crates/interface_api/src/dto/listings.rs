//! Listing DTOs

use serde::Serialize;

use domain_listing::Listing;

/// One page of browse results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub limit: u32,
    pub offset: u32,
}
