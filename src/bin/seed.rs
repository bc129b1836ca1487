//! Resets the store to the sample listings.
//!
//! Usage: cargo run --bin seed   (honors DATABASE_URL / STORE_BACKEND)

use wanderlust::app::bootstrap;
use wanderlust::infra::{config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let store = bootstrap::open_store(config::store_backend()?).await?;
    let inserted = bootstrap::seed(store.as_ref()).await?;
    println!("> Seeded {} listings.", inserted);
    Ok(())
}
