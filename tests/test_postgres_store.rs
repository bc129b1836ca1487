//! Postgres store round trip.
//!
//! Runs only when DATABASE_URL is set (a `.env` file works). Only rows created
//! here are touched, unless CLEAR_DB=true, which also exercises `replace_all`.

use std::env;
use wanderlust::{DocumentId, DocumentStore, ListingInput, PostgresStore, ReviewInput};

fn cabin() -> ListingInput {
    ListingInput {
        title: "Cabin".into(),
        description: "Woods".into(),
        price: 100.0,
        location: "Aspen".into(),
        country: "USA".into(),
    }
}

async fn connect() -> Result<Option<PostgresStore>, Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping Postgres store test");
        return Ok(None);
    };
    Ok(Some(PostgresStore::connect(&url).await?))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_listing_and_review_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    store.ping().await?;

    let listing = store.insert_listing(cabin()).await?;
    let found = store.find_listing(&listing.id).await?.expect("inserted listing");
    assert_eq!(found, listing);
    assert!(store
        .list_listings()
        .await?
        .iter()
        .any(|l| l.id == listing.id));

    let review = store
        .add_review(&listing.id, ReviewInput { rating: 5, comment: "Great".into() })
        .await?
        .expect("listing exists");
    let detail = store.find_listing_detail(&listing.id).await?.unwrap();
    assert_eq!(detail.listing.reviews, vec![review.id]);
    assert_eq!(detail.reviews.len(), 1);
    assert_eq!(detail.reviews[0].comment, "Great");
    assert_eq!(detail.reviews[0].rating, 5);

    let mut edited = cabin();
    edited.title = "Lodge".into();
    let updated = store.update_listing(&listing.id, edited).await?.unwrap();
    assert_eq!(updated.title, "Lodge");
    assert_eq!(updated.reviews, vec![review.id]);

    store.remove_review(&listing.id, &review.id).await?;
    store.remove_review(&listing.id, &review.id).await?;
    let detail = store.find_listing_detail(&listing.id).await?.unwrap();
    assert!(detail.listing.reviews.is_empty());
    assert!(detail.reviews.is_empty());

    let second = store
        .add_review(&listing.id, ReviewInput { rating: 3, comment: "Fine".into() })
        .await?
        .unwrap();
    let other = store.insert_listing(cabin()).await?;
    store.remove_review(&other.id, &second.id).await?;
    let detail = store.find_listing_detail(&listing.id).await?.unwrap();
    assert_eq!(detail.listing.reviews, vec![second.id]);
    assert_eq!(detail.reviews.len(), 1);
    assert!(store.delete_listing(&other.id).await?.is_some());

    assert!(store.delete_listing(&listing.id).await?.is_some());
    assert!(store.delete_listing(&listing.id).await?.is_none());
    assert!(store.find_listing(&listing.id).await?.is_none());
    let orphan: Option<(String,)> = sqlx::query_as("SELECT id FROM reviews WHERE id = $1")
        .bind(second.id.to_string())
        .fetch_optional(store.pool())
        .await?;
    assert!(orphan.is_none(), "reviews are deleted with their listing");

    assert!(store
        .add_review(&DocumentId::new(), ReviewInput { rating: 4, comment: "Nope".into() })
        .await?
        .is_none());

    // Wipes both tables, so it runs last and only on request.
    if env::var("CLEAR_DB").unwrap_or_default() == "true" {
        let inserted = store.replace_all(vec![cabin(), cabin(), cabin()]).await?;
        assert_eq!(inserted, 3);
        assert_eq!(store.list_listings().await?.len(), 3);
    }
    Ok(())
}
