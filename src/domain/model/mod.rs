//! Listings and the reviews attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod id;
pub mod samples;
pub mod validation;

pub use id::{DocumentId, InvalidDocumentId};
pub use samples::sample_listings;
pub use validation::{validate_listing, validate_review, ValidationErrors};

/// The five user-editable listing fields, already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub country: String,
}

/// A rentable property.
///
/// `reviews` is the listing's reference set: ids of the review documents it
/// owns, in the order they were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: DocumentId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub country: String,
    #[serde(default)]
    pub reviews: Vec<DocumentId>,
}

impl Listing {
    pub fn new(input: ListingInput) -> Self {
        Self {
            id: DocumentId::new(),
            title: input.title,
            description: input.description,
            price: input.price,
            location: input.location,
            country: input.country,
            reviews: Vec::new(),
        }
    }

    /// Overwrites every editable field; the reference set is left alone.
    pub fn apply(&mut self, input: ListingInput) {
        self.title = input.title;
        self.description = input.description;
        self.price = input.price;
        self.location = input.location;
        self.country = input.country;
    }

    /// Appends a review reference unless it is already present.
    pub fn attach_review(&mut self, review_id: DocumentId) {
        if !self.reviews.contains(&review_id) {
            self.reviews.push(review_id);
        }
    }

    /// Removes a review reference. Returns whether it was present.
    pub fn detach_review(&mut self, review_id: &DocumentId) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r != review_id);
        self.reviews.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: DocumentId,
    pub listing_id: DocumentId,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(listing_id: DocumentId, input: ReviewInput) -> Self {
        Self {
            id: DocumentId::new(),
            listing_id,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }
}

/// A listing with its review references expanded, in reference order.
/// References to reviews that no longer exist are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub reviews: Vec<Review>,
}
