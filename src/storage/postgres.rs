//! Postgres-backed store.
//!
//! Two collection tables: `listings` keeps its review references in a
//! `TEXT[]` column, `reviews` holds the review documents. `seq` only orders
//! listings by insertion.

use super::DocumentStore;
use crate::domain::model::{DocumentId, Listing, ListingDetail, ListingInput, Review, ReviewInput};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::collections::HashMap;
use tracing::debug;

const LISTING_COLUMNS: &str = "id, title, description, price, location, country, reviews";
const REVIEW_COLUMNS: &str = "id, listing_id, rating, comment, created_at";

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Connects and creates the collection tables if they are missing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: PgPool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS listings (
                seq BIGSERIAL,
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                location TEXT NOT NULL DEFAULT '',
                country TEXT NOT NULL DEFAULT '',
                reviews TEXT[] NOT NULL DEFAULT '{}'
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                listing_id TEXT NOT NULL,
                rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
                comment TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        debug!("listings/reviews tables ready");
        Ok(Self { pool })
    }
}

fn parse_id(raw: &str) -> Result<DocumentId> {
    Ok(raw.parse::<DocumentId>()?)
}

fn listing_from_row(row: &PgRow) -> Result<Listing> {
    let id: String = row.try_get("id")?;
    let reviews: Vec<String> = row.try_get("reviews")?;
    Ok(Listing {
        id: parse_id(&id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        location: row.try_get("location")?,
        country: row.try_get("country")?,
        reviews: reviews.iter().map(|r| parse_id(r)).collect::<Result<_>>()?,
    })
}

fn review_from_row(row: &PgRow) -> Result<Review> {
    let id: String = row.try_get("id")?;
    let listing_id: String = row.try_get("listing_id")?;
    let rating: i16 = row.try_get("rating")?;
    Ok(Review {
        id: parse_id(&id)?,
        listing_id: parse_id(&listing_id)?,
        rating: u8::try_from(rating)?,
        comment: row.try_get("comment")?,
        created_at: row.try_get("created_at")?,
    })
}

fn id_strings(ids: &[DocumentId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings ORDER BY seq");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(listing_from_row).collect()
    }

    async fn find_listing(&self, id: &DocumentId) -> Result<Option<Listing>> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(listing_from_row).transpose()
    }

    async fn find_listing_detail(&self, id: &DocumentId) -> Result<Option<ListingDetail>> {
        let Some(listing) = self.find_listing(id).await? else {
            return Ok(None);
        };
        if listing.reviews.is_empty() {
            return Ok(Some(ListingDetail {
                listing,
                reviews: Vec::new(),
            }));
        }

        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ANY($1)");
        let rows = sqlx::query(&sql)
            .bind(id_strings(&listing.reviews))
            .fetch_all(&self.pool)
            .await?;
        let mut by_id: HashMap<DocumentId, Review> = HashMap::with_capacity(rows.len());
        for row in &rows {
            let review = review_from_row(row)?;
            by_id.insert(review.id, review);
        }
        let reviews = listing
            .reviews
            .iter()
            .filter_map(|rid| by_id.remove(rid))
            .collect();
        Ok(Some(ListingDetail { listing, reviews }))
    }

    async fn insert_listing(&self, input: ListingInput) -> Result<Listing> {
        let listing = Listing::new(input);
        sqlx::query(
            "INSERT INTO listings (id, title, description, price, location, country, reviews)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(listing.id.to_string())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.location)
        .bind(&listing.country)
        .bind(id_strings(&listing.reviews))
        .execute(&self.pool)
        .await?;
        Ok(listing)
    }

    async fn update_listing(&self, id: &DocumentId, input: ListingInput) -> Result<Option<Listing>> {
        let sql = format!(
            "UPDATE listings
             SET title = $2, description = $3, price = $4, location = $5, country = $6
             WHERE id = $1
             RETURNING {LISTING_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .bind(input.title)
            .bind(input.description)
            .bind(input.price)
            .bind(input.location)
            .bind(input.country)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(listing_from_row).transpose()
    }

    async fn delete_listing(&self, id: &DocumentId) -> Result<Option<Listing>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("DELETE FROM listings WHERE id = $1 RETURNING {LISTING_COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
        let Some(listing) = row.as_ref().map(listing_from_row).transpose()? else {
            tx.rollback().await?;
            return Ok(None);
        };

        let removed = sqlx::query("DELETE FROM reviews WHERE listing_id = $1 OR id = ANY($2)")
            .bind(id.to_string())
            .bind(id_strings(&listing.reviews))
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        debug!(listing = %listing.id, reviews = removed, "listing deleted with its reviews");
        Ok(Some(listing))
    }

    async fn add_review(&self, listing_id: &DocumentId, input: ReviewInput) -> Result<Option<Review>> {
        let mut tx = self.pool.begin().await?;

        // Lock the listing row so a concurrent delete cannot orphan the review.
        let exists = sqlx::query("SELECT id FROM listings WHERE id = $1 FOR UPDATE")
            .bind(listing_id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            tx.rollback().await?;
            return Ok(None);
        }

        let review = Review::new(*listing_id, input);
        sqlx::query(
            "INSERT INTO reviews (id, listing_id, rating, comment, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(review.id.to_string())
        .bind(listing_id.to_string())
        .bind(i16::from(review.rating))
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE listings SET reviews = array_append(reviews, $2)
             WHERE id = $1 AND NOT ($2 = ANY(reviews))",
        )
        .bind(listing_id.to_string())
        .bind(review.id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(review))
    }

    async fn remove_review(&self, listing_id: &DocumentId, review_id: &DocumentId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE listings SET reviews = array_remove(reviews, $2) WHERE id = $1")
            .bind(listing_id.to_string())
            .bind(review_id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reviews WHERE id = $1 AND listing_id = $2")
            .bind(review_id.to_string())
            .bind(listing_id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn replace_all(&self, inputs: Vec<ListingInput>) -> Result<usize> {
        let listings: Vec<Listing> = inputs.into_iter().map(Listing::new).collect();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM listings").execute(&mut *tx).await?;

        if !listings.is_empty() {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO listings (id, title, description, price, location, country, reviews) ",
            );
            builder.push_values(&listings, |mut row, listing| {
                row.push_bind(listing.id.to_string())
                    .push_bind(listing.title.clone())
                    .push_bind(listing.description.clone())
                    .push_bind(listing.price)
                    .push_bind(listing.location.clone())
                    .push_bind(listing.country.clone())
                    .push_bind(Vec::<String>::new());
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(listings.len())
    }
}
