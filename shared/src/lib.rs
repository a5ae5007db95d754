//! Shared types for the Stockyard back-office
//!
//! Common types used across multiple crates including entity models,
//! error types, response structures, and list-query types.

pub mod error;
pub mod models;
pub mod query;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{ApiResponse, AppError, AppResult, ErrorCode, FieldError};

// Query re-exports
pub use query::{PaginatedResponse, QueryRequest};
