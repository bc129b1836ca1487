pub mod error;
pub mod form;
pub mod router;
pub mod types;
pub mod views;
pub mod handlers {
    pub mod common;
    pub mod health;
    pub mod listings;
    pub mod reviews;
}

pub use error::AppError;
pub use router::{create_router, serve};
pub use types::AppState;
