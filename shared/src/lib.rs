//! Shared types for the Little Lemon platform
//!
//! Domain models, the unified error system, money helpers and response
//! structures used by the server and by API clients.

pub mod error;
pub mod models;
pub mod money;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use response::{PaginatedResponse, Pagination};
