//! Utilities - error re-exports, logging, validation and request extractors
//!
//! - [`AppError`] / [`ApiResponse`] - from `shared::error`
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - field rules shared by handlers
//! - [`extract`] - JSON / query / path extractors answering with [`AppError`]
//! - [`listing`] - page / ordering parameters of list endpoints

pub mod extract;
pub mod listing;
pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
