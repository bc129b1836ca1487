//! Persistence for listings and reviews.
//!
//! Both backends treat the review writes that touch two collections (adding a
//! review, removing one, deleting a listing together with its reviews) as a
//! single unit of work, so a listing never holds a reference to a missing
//! review and a review never outlives its listing.

use crate::domain::model::{DocumentId, Listing, ListingDetail, ListingInput, Review, ReviewInput};
use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Cheap round trip used by the health check.
    async fn ping(&self) -> Result<()>;

    /// All listings in insertion order.
    async fn list_listings(&self) -> Result<Vec<Listing>>;

    async fn find_listing(&self, id: &DocumentId) -> Result<Option<Listing>>;

    /// The listing with its review references expanded.
    async fn find_listing_detail(&self, id: &DocumentId) -> Result<Option<ListingDetail>>;

    async fn insert_listing(&self, input: ListingInput) -> Result<Listing>;

    /// Overwrites the editable fields. `None` if the listing does not exist.
    async fn update_listing(&self, id: &DocumentId, input: ListingInput) -> Result<Option<Listing>>;

    /// Deletes the listing and every review it references.
    /// `None` if there was nothing to delete.
    async fn delete_listing(&self, id: &DocumentId) -> Result<Option<Listing>>;

    /// Inserts a review and appends its reference to the listing.
    /// `None` (and nothing written) if the listing does not exist.
    async fn add_review(&self, listing_id: &DocumentId, input: ReviewInput) -> Result<Option<Review>>;

    /// Detaches the reference from the listing and deletes the review document.
    /// A review owned by another listing is left alone. Missing listings or
    /// reviews are not an error.
    async fn remove_review(&self, listing_id: &DocumentId, review_id: &DocumentId) -> Result<()>;

    /// Empties both collections and inserts `inputs`. Returns the number inserted.
    async fn replace_all(&self, inputs: Vec<ListingInput>) -> Result<usize>;
}
