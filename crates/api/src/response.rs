//! Shared response envelope types for API handlers.
//!
//! All success responses use a `{ "data": ... }` envelope; failures use the
//! `{ "error", "code" }` shape produced by [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
