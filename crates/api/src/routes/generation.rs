//! Route definitions for regeneration and promotional images.
//!
//! These live at the top of the v1 tree because they anchor on product and
//! generation ids rather than on a campaign nest.
//!
//! ```text
//! POST /products/{id}/regenerate         new variation
//! POST /generations/{id}/promo-image     promotional image
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/{id}/regenerate", post(generation::regenerate))
        .route(
            "/generations/{id}/promo-image",
            post(generation::promo_image),
        )
}
