//! In-process store. Used by `STORE_BACKEND=memory` and by the tests.

use super::DocumentStore;
use crate::domain::model::{DocumentId, Listing, ListingDetail, ListingInput, Review, ReviewInput};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    listings: Vec<Listing>,
    reviews: HashMap<DocumentId, Review>,
}

impl Collections {
    fn listing_mut(&mut self, id: &DocumentId) -> Option<&mut Listing> {
        self.listings.iter_mut().find(|l| &l.id == id)
    }
}

/// Every operation takes the lock once, so multi-document writes are atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn review_count(&self) -> usize {
        self.inner.read().await.reviews.len()
    }

    pub async fn find_review(&self, id: &DocumentId) -> Option<Review> {
        self.inner.read().await.reviews.get(id).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_listings(&self) -> Result<Vec<Listing>> {
        Ok(self.inner.read().await.listings.clone())
    }

    async fn find_listing(&self, id: &DocumentId) -> Result<Option<Listing>> {
        let inner = self.inner.read().await;
        Ok(inner.listings.iter().find(|l| &l.id == id).cloned())
    }

    async fn find_listing_detail(&self, id: &DocumentId) -> Result<Option<ListingDetail>> {
        let inner = self.inner.read().await;
        let Some(listing) = inner.listings.iter().find(|l| &l.id == id).cloned() else {
            return Ok(None);
        };
        let reviews = listing
            .reviews
            .iter()
            .filter_map(|rid| inner.reviews.get(rid).cloned())
            .collect();
        Ok(Some(ListingDetail { listing, reviews }))
    }

    async fn insert_listing(&self, input: ListingInput) -> Result<Listing> {
        let listing = Listing::new(input);
        self.inner.write().await.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_listing(&self, id: &DocumentId, input: ListingInput) -> Result<Option<Listing>> {
        let mut inner = self.inner.write().await;
        Ok(inner.listing_mut(id).map(|listing| {
            listing.apply(input);
            listing.clone()
        }))
    }

    async fn delete_listing(&self, id: &DocumentId) -> Result<Option<Listing>> {
        let mut inner = self.inner.write().await;
        let Some(pos) = inner.listings.iter().position(|l| &l.id == id) else {
            return Ok(None);
        };
        let listing = inner.listings.remove(pos);
        for review_id in &listing.reviews {
            inner.reviews.remove(review_id);
        }
        Ok(Some(listing))
    }

    async fn add_review(&self, listing_id: &DocumentId, input: ReviewInput) -> Result<Option<Review>> {
        let mut inner = self.inner.write().await;
        let review = Review::new(*listing_id, input);
        let Some(listing) = inner.listing_mut(listing_id) else {
            return Ok(None);
        };
        listing.attach_review(review.id);
        inner.reviews.insert(review.id, review.clone());
        Ok(Some(review))
    }

    async fn remove_review(&self, listing_id: &DocumentId, review_id: &DocumentId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(listing) = inner.listing_mut(listing_id) {
            listing.detach_review(review_id);
        }
        let owned = inner
            .reviews
            .get(review_id)
            .is_some_and(|review| &review.listing_id == listing_id);
        if owned {
            inner.reviews.remove(review_id);
        }
        Ok(())
    }

    async fn replace_all(&self, inputs: Vec<ListingInput>) -> Result<usize> {
        let mut inner = self.inner.write().await;
        inner.reviews.clear();
        inner.listings = inputs.into_iter().map(Listing::new).collect();
        Ok(inner.listings.len())
    }
}
