pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::model::{DocumentId, Listing, ListingDetail, ListingInput, Review, ReviewInput};
pub use storage::{DocumentStore, MemoryStore, PostgresStore};
pub use transport::http::{create_router, AppState};
