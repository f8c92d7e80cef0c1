//! Core transaction model, storage and controller

pub mod controller;
pub mod error;
pub mod models;
pub mod repository;

pub use controller::{RepositoryRef, TransactionsController};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{seed_transactions, NewTransaction, Transaction};
pub use repository::{InMemoryTransactionsRepository, Latency, TransactionsRepository};
