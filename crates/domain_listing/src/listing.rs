//! Listing aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ListingId, UserId};

use crate::slug::slugify;

/// Publication status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Submitted but not yet visible in the directory
    Pending,
    /// Visible in browse and search
    Active,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Active => "active",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ListingStatus::Pending),
            "active" => Ok(ListingStatus::Active),
            other => Err(format!("unknown listing status '{}'", other)),
        }
    }
}

/// A tattoo shop in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier
    pub id: ListingId,
    /// Stable URL identity
    pub slug: String,
    /// Shop name
    pub name: String,
    /// Owning user; `None` means the listing is unclaimed
    pub owner_id: Option<UserId>,
    /// Publication status
    pub status: ListingStatus,
    pub city: String,
    pub city_slug: String,
    pub state: String,
    pub state_slug: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    /// Style slugs, e.g. `["traditional", "blackwork"]`
    pub styles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn is_claimed(&self) -> bool {
        self.owner_id.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Builds a listing from creation data; used by in-memory adapters
    pub fn from_new(new: NewListing) -> Self {
        let now = Utc::now();
        Self {
            id: ListingId::new_v7(),
            slug: new.slug(),
            city_slug: slugify(&new.city),
            state_slug: slugify(&new.state),
            name: new.name,
            owner_id: None,
            status: new.status,
            city: new.city,
            state: new.state,
            address: new.address,
            phone: new.phone,
            website: new.website,
            description: new.description,
            styles: new.styles.iter().map(|s| slugify(s)).collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data for creating a listing
///
/// New listings are always unclaimed.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: String,
    /// Explicit slug; derived from name and city when absent
    pub slug: Option<String>,
    pub status: ListingStatus,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub styles: Vec<String>,
}

impl NewListing {
    /// Minimal active listing
    pub fn new(name: impl Into<String>, city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            status: ListingStatus::Active,
            city: city.into(),
            state: state.into(),
            address: None,
            phone: None,
            website: None,
            description: None,
            styles: Vec::new(),
        }
    }

    pub fn with_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = styles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    /// Resolved slug: explicit, or `slugify("<name> <city>")`
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) => slugify(slug),
            None => slugify(&format!("{} {}", self.name, self.city)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_listing_is_unclaimed() {
        let listing = Listing::from_new(NewListing::new("Iron Anchor", "Austin", "Texas"));
        assert!(!listing.is_claimed());
        assert!(listing.is_active());
        assert_eq!(listing.slug, "iron-anchor-austin");
        assert_eq!(listing.state_slug, "texas");
    }

    #[test]
    fn test_styles_are_slugified() {
        let listing = Listing::from_new(
            NewListing::new("Iron Anchor", "Austin", "Texas")
                .with_styles(["American Traditional", "Black & Grey"]),
        );
        assert_eq!(listing.styles, vec!["american-traditional", "black-grey"]);
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let listing = Listing::from_new(NewListing::new("Iron Anchor", "Austin", "Texas"));
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("citySlug").is_some());
        assert_eq!(json["status"], "active");
    }
}
