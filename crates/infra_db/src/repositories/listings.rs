//! Listing repository implementation
//!
//! Directory reads only ever see `status = 'active'` rows; owner-scoped and
//! id/slug lookups see every status.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const LISTING_COLUMNS: &str = "id, slug, name, owner_id, status, city, city_slug, state, \
     state_slug, address, phone, website, description, styles, created_at, updated_at";

/// Repository for directory listings
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a listing by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ListingRow>, DatabaseError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1");
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Retrieves a listing by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ListingRow>, DatabaseError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE slug = $1");
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Inserts a listing
    ///
    /// # Errors
    ///
    /// `DuplicateEntry { constraint: "listings_slug_key" }` when the slug is taken
    pub async fn insert(&self, listing: &ListingRow) -> Result<ListingRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO listings (
                id, slug, name, owner_id, status, city, city_slug, state, state_slug,
                address, phone, website, description, styles, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {LISTING_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(listing.id)
            .bind(&listing.slug)
            .bind(&listing.name)
            .bind(listing.owner_id)
            .bind(&listing.status)
            .bind(&listing.city)
            .bind(&listing.city_slug)
            .bind(&listing.state)
            .bind(&listing.state_slug)
            .bind(&listing.address)
            .bind(&listing.phone)
            .bind(&listing.website)
            .bind(&listing.description)
            .bind(&listing.styles)
            .bind(listing.created_at)
            .bind(listing.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Sets a listing's owner outside of a claim review
    pub async fn set_owner(&self, id: Uuid, owner_id: Uuid) -> Result<ListingRow, DatabaseError> {
        let sql = format!(
            "UPDATE listings SET owner_id = $2, updated_at = $3 WHERE id = $1 RETURNING {LISTING_COLUMNS}"
        );
        sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Listing", id))
    }

    /// Active listings matching the filters, ordered by name
    ///
    /// Filters are already slugified; `None` means "any".
    pub async fn search(&self, filter: &ListingFilter<'_>) -> Result<Vec<ListingRow>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {LISTING_COLUMNS}
            FROM listings
            WHERE status = 'active'
              AND ($1::text IS NULL OR state_slug = $1)
              AND ($2::text IS NULL OR city_slug = $2)
              AND ($3::text IS NULL OR $3 = ANY(styles))
              AND ($4::text IS NULL OR name ILIKE $4 OR city ILIKE $4)
            ORDER BY name, slug
            LIMIT $5 OFFSET $6
            "#
        );
        let pattern = filter.text.map(|t| format!("%{}%", escape_like(t)));

        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(filter.state_slug)
            .bind(filter.city_slug)
            .bind(filter.style)
            .bind(pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Every listing owned by a user
    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<ListingRow>, DatabaseError> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE owner_id = $1 ORDER BY name");
        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Active listing counts per state
    pub async fn count_by_state(&self) -> Result<Vec<StateCountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, StateCountRow>(
            r#"
            SELECT state, state_slug, COUNT(*) AS listing_count
            FROM listings
            WHERE status = 'active'
            GROUP BY state, state_slug
            ORDER BY state
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active listing counts per city within a state
    pub async fn count_by_city(&self, state_slug: &str) -> Result<Vec<CityCountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CityCountRow>(
            r#"
            SELECT city, city_slug, state_slug, COUNT(*) AS listing_count
            FROM listings
            WHERE status = 'active' AND state_slug = $1
            GROUP BY city, city_slug, state_slug
            ORDER BY city
            "#,
        )
        .bind(state_slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active listing counts per style
    pub async fn count_by_style(&self) -> Result<Vec<StyleCountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, StyleCountRow>(
            r#"
            SELECT style, COUNT(*) AS listing_count
            FROM listings, unnest(styles) AS style
            WHERE status = 'active'
            GROUP BY style
            ORDER BY style
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// Escapes LIKE metacharacters so user text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Search filters with paging
#[derive(Debug, Clone, Default)]
pub struct ListingFilter<'a> {
    pub state_slug: Option<&'a str>,
    pub city_slug: Option<&'a str>,
    pub style: Option<&'a str>,
    pub text: Option<&'a str>,
    pub limit: i64,
    pub offset: i64,
}

/// Database row for a listing
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub owner_id: Option<Uuid>,
    pub status: String,
    pub city: String,
    pub city_slug: String,
    pub state: String,
    pub state_slug: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub styles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StateCountRow {
    pub state: String,
    pub state_slug: String,
    pub listing_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CityCountRow {
    pub city: String,
    pub city_slug: String,
    pub state_slug: String,
    pub listing_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StyleCountRow {
    pub style: String,
    pub listing_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ink"), "ink");
        assert_eq!(escape_like("100%_real"), "100\\%\\_real");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    fn unescape(escaped: &str) -> Option<String> {
        let mut out = String::new();
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => out.push(chars.next()?),
                '%' | '_' => return None,
                other => out.push(other),
            }
        }
        Some(out)
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_bare_wildcards(text in "[a-z%_\\\\ ]{0,24}") {
            // `unescape` rejects any wildcard not preceded by a backslash
            prop_assert_eq!(unescape(&escape_like(&text)), Some(text));
        }
    }
}
