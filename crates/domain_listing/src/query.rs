//! Directory browse/search queries and facet summaries

use serde::{Deserialize, Serialize};

use crate::listing::Listing;
use crate::slug::slugify;

/// Page size used when a query does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Upper bound on page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filters for browsing active listings
///
/// `state`, `city`, and `style` are matched against slugs; `text` is a
/// case-insensitive substring match on name and city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingQuery {
    pub state: Option<String>,
    pub city: Option<String>,
    pub style: Option<String>,
    #[serde(rename = "q")]
    pub text: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListingQuery {
    pub fn by_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Default::default()
        }
    }

    pub fn by_city(state: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            city: Some(city.into()),
            ..Default::default()
        }
    }

    pub fn by_style(style: impl Into<String>) -> Self {
        Self {
            style: Some(style.into()),
            ..Default::default()
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Slugifies facet filters, trims text, drops blanks, and clamps paging
    pub fn normalized(&self) -> Self {
        let facet = |v: &Option<String>| {
            v.as_deref().map(slugify).filter(|s| !s.is_empty())
        };
        Self {
            state: facet(&self.state),
            city: facet(&self.city),
            style: facet(&self.style),
            text: self
                .text
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            limit: Some(self.limit().clamp(1, MAX_PAGE_SIZE)),
            offset: Some(self.offset()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// In-memory evaluation of the filters (paging is applied by the caller)
    ///
    /// Only active listings ever match.
    pub fn matches(&self, listing: &Listing) -> bool {
        if !listing.is_active() {
            return false;
        }
        if let Some(ref state) = self.state {
            if &listing.state_slug != state {
                return false;
            }
        }
        if let Some(ref city) = self.city {
            if &listing.city_slug != city {
                return false;
            }
        }
        if let Some(ref style) = self.style {
            if !listing.styles.iter().any(|s| s == style) {
                return false;
            }
        }
        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            if !listing.name.to_lowercase().contains(&needle)
                && !listing.city.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// A state with at least one active listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub state: String,
    pub state_slug: String,
    pub listing_count: i64,
}

/// A city with at least one active listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    pub city: String,
    pub city_slug: String,
    pub state_slug: String,
    pub listing_count: i64,
}

/// A style used by at least one active listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSummary {
    pub style: String,
    pub listing_count: i64,
}
