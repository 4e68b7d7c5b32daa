//! Promotional image attachment for an existing generation.

use vitrine_core::error::CoreError;
use vitrine_core::prompt;
use vitrine_core::types::DbId;
use vitrine_db::models::generation::Generation;
use vitrine_db::repositories::{GenerationRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{owning_campaign, promo_folder, stored_tone};

/// Result of a successful promo-image attachment.
#[derive(Debug)]
pub struct PromoImage {
    pub generation: Generation,
    pub image_prompt: String,
}

/// Generate, store, and attach a promotional image to `generation_id`.
///
/// Unlike the hero-image step of the full pass there is no fallback image:
/// an upstream failure here is surfaced to the caller. Re-invocation
/// replaces the previous image URL and prompt on the same row.
pub async fn attach_promo_image(
    state: &AppState,
    user_id: DbId,
    generation_id: DbId,
) -> AppResult<PromoImage> {
    let generation = GenerationRepo::find_by_id(&state.pool, generation_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Generation",
            id: generation_id,
        }))?;
    let product = ProductRepo::find_by_id(&state.pool, generation.product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: generation.product_id,
        }))?;
    let campaign = owning_campaign(state, &product, user_id).await?;
    let tone = stored_tone(&campaign)?;

    let image_prompt = prompt::build_image_prompt(
        product.name.as_deref().unwrap_or("jewelry piece"),
        tone,
        generation.caption_instagram.as_deref().unwrap_or(""),
        product.description.as_deref().unwrap_or(""),
    );

    let ephemeral_url = state
        .image_gen
        .generate_image(&image_prompt, tone.prefers_vivid_rendering())
        .await
        .map_err(|e| AppError::Core(CoreError::Upstream(format!("Image generation failed: {e}"))))?;

    let stored = state
        .storage
        .upload_url(&ephemeral_url, &promo_folder(campaign.id))
        .await
        .map_err(|e| AppError::Core(CoreError::Upstream(format!("Image upload failed: {e}"))))?;

    let generation =
        GenerationRepo::set_promo_image(&state.pool, generation_id, &stored.secure_url, &image_prompt)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Generation",
                id: generation_id,
            }))?;

    Ok(PromoImage {
        generation,
        image_prompt,
    })
}
