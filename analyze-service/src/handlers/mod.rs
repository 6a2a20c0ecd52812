//! HTTP handlers for the analysis service.

pub mod analyze;
pub mod health;

use service_core::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
