//! Transactions API endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: All transactions (JSON array)
//! - api_transaction_detail: Single transaction by id (JSON object, 404 when absent)
//! - api_transaction_create: Store a transaction, respond with the whole collection

use crate::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::Json;
use txweb_core::{NewTransaction, Transaction};

/// GET /api/Transactions
pub async fn api_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    log::info!("GET /api/Transactions");
    let transactions = state.controller.list().await?;
    Ok(Json(transactions))
}

/// GET /api/Transactions/:id
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    log::info!("GET /api/Transactions/{}", id);
    let transaction = state.controller.get_by_id(id).await?;
    Ok(Json(transaction))
}

/// POST /api/Transactions
///
/// The Id of the submitted record is ignored. A JSON `null` body stores
/// nothing and returns the current collection.
pub async fn api_transaction_create(
    State(state): State<AppState>,
    Json(payload): Json<Option<NewTransaction>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let transactions = match payload {
        Some(draft) => {
            log::info!(
                "POST /api/Transactions - description: {:?}, amount: {}",
                draft.description,
                draft.amount
            );
            state.controller.create(draft.into()).await?
        }
        None => {
            log::warn!("POST /api/Transactions with null body, nothing stored");
            state.controller.list().await?
        }
    };
    Ok(Json(transactions))
}
