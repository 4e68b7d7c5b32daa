//! Route definitions for the `/campaigns` resource.
//!
//! ```text
//! GET    /               list
//! POST   /               create (multipart upload)
//! GET    /{id}           get
//! DELETE /{id}           delete
//! POST   /{id}/generate  full generation pass
//! ```

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Upload forms carry up to 20 photos; the default 2 MB body cap is far
/// too small for that.
const UPLOAD_BODY_LIMIT_BYTES: usize = 100 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaign::list).post(campaign::create))
        .route("/{id}", get(campaign::get).delete(campaign::delete))
        .route("/{id}/generate", post(campaign::generate))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT_BYTES))
}
