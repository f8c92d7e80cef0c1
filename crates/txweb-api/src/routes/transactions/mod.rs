//! Transaction routes
//!
//! Structure:
//! - api.rs: JSON API endpoints (list, detail, create)
//! - page.rs: Home page rendering

pub mod api;
pub mod page;

use crate::AppState;
use axum::routing::get;
use axum::Router;

pub use api::{api_transaction_create, api_transaction_detail, api_transactions};
pub use page::page_home;

/// Routes mounted under the transactions API prefix
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_transactions).post(api_transaction_create))
        .route("/:id", get(api_transaction_detail))
}
