//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration, exports and sub-router
//! - api.rs: JSON API endpoints
//! - page.rs: HTML page rendering

pub mod transactions;
