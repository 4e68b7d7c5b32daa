//! Handlers for per-product regeneration and promotional images.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::types::DbId;
use vitrine_db::models::generation::Generation;

use crate::engine::promo::attach_promo_image;
use crate::engine::regenerate::regenerate_product;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /products/{id}/regenerate`. The body is optional; an
/// absent or empty hint yields the generic fresh-angle framing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub variation_hint: Option<String>,
}

/// Response for `POST /generations/{id}/promo-image`.
#[derive(Debug, Serialize)]
pub struct PromoImageResponse {
    pub promo_image_url: Option<String>,
    pub image_prompt: String,
}

/// POST /api/v1/products/{id}/regenerate
///
/// Produce one additional variation for the product, optionally steered by
/// `variationHint`. Prior generations are untouched.
pub async fn regenerate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<DbId>,
    body: Option<Json<RegenerateRequest>>,
) -> AppResult<Json<DataResponse<Generation>>> {
    let hint = body
        .as_ref()
        .and_then(|b| b.variation_hint.as_deref())
        .filter(|h| !h.is_empty());

    let generation = regenerate_product(&state, user.user_id, product_id, hint).await?;
    Ok(Json(DataResponse { data: generation }))
}

/// POST /api/v1/generations/{id}/promo-image
///
/// Generate and attach a promotional image to the generation. Re-invoking
/// replaces the previous image and prompt.
pub async fn promo_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(generation_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PromoImageResponse>>> {
    let promo = attach_promo_image(&state, user.user_id, generation_id).await?;
    Ok(Json(DataResponse {
        data: PromoImageResponse {
            promo_image_url: promo.generation.promo_image_url,
            image_prompt: promo.image_prompt,
        },
    }))
}
