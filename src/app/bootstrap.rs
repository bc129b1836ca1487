//! Store startup shared by the server and the seed binary.

use crate::domain::model::sample_listings;
use crate::infra::config::{self, StoreBackend};
use crate::storage::{DocumentStore, MemoryStore, PostgresStore};
use std::sync::Arc;
use tracing::info;

/// Opens the configured store. For Postgres this connects and ensures the tables exist.
pub async fn open_store(backend: StoreBackend) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match backend {
        StoreBackend::Postgres => Arc::new(PostgresStore::connect(&config::database_url()).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    info!(?backend, "Connected to DB");
    Ok(store)
}

/// Empties the store and loads the sample listings. Returns how many were inserted.
pub async fn seed(store: &dyn DocumentStore) -> anyhow::Result<usize> {
    let inserted = store.replace_all(sample_listings()).await?;
    info!(inserted, "data was initialized");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seed_replaces_existing_listings() {
        let store = open_store(StoreBackend::Memory).await.unwrap();
        let first = seed(store.as_ref()).await.unwrap();
        let second = seed(store.as_ref()).await.unwrap();
        assert_eq!(first, sample_listings().len());
        assert_eq!(second, first);
        assert_eq!(store.list_listings().await.unwrap().len(), first);
    }
}
