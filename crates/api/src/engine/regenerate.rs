//! Single-product regeneration: one new variation, nothing else touched.

use vitrine_core::error::CoreError;
use vitrine_core::output;
use vitrine_core::prompt;
use vitrine_core::types::DbId;
use vitrine_db::models::generation::Generation;
use vitrine_db::repositories::{GenerationRepo, ProductRepo};
use vitrine_openai::ContentBlock;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{generation_content, owning_campaign, prompt_input, stored_tone, VARIATION_MAX_TOKENS};

/// Produce exactly one new generation for `product_id`.
///
/// The variation number is allocated atomically at insert time; the
/// count-derived number only steers the prompt text. Prior generations are
/// never modified.
pub async fn regenerate_product(
    state: &AppState,
    user_id: DbId,
    product_id: DbId,
    variation_hint: Option<&str>,
) -> AppResult<Generation> {
    let product = ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;
    let campaign = owning_campaign(state, &product, user_id).await?;
    let tone = stored_tone(&campaign)?;

    let existing = GenerationRepo::count_by_product(&state.pool, product_id).await?;
    let next_variation = (existing + 1) as i32;

    let mut text = prompt::build_generation_prompt(
        std::slice::from_ref(&prompt_input(&product)),
        tone,
        &campaign.theme,
    );
    text.push_str(&prompt::variation_instruction(variation_hint, next_variation));

    let blocks = vec![
        ContentBlock::Text(text),
        ContentBlock::ImageUrl(product.image_url.clone()),
    ];

    // Same recovery posture as the full pass: an unusable model response
    // degrades to fallback content, never to a failed request.
    let entry = match state
        .text_gen
        .generate_json(&blocks, VARIATION_MAX_TOKENS)
        .await
    {
        Ok(raw) => match output::parse_output(&raw) {
            Ok(parsed) => parsed
                .products
                .into_iter()
                .next()
                .unwrap_or_else(|| output::fallback_product(product.name.as_deref())),
            Err(err) => {
                tracing::warn!(product_id, error = %err, "Variation output invalid; using fallback");
                output::fallback_product(product.name.as_deref())
            }
        },
        Err(err) => {
            tracing::warn!(product_id, error = %err, "Variation generation failed; using fallback");
            output::fallback_product(product.name.as_deref())
        }
    };

    let generation =
        GenerationRepo::create_next_variation(&state.pool, product_id, &generation_content(entry))
            .await?;

    tracing::info!(
        product_id,
        variation = generation.variation_number,
        hinted = variation_hint.is_some(),
        "Created product variation"
    );

    Ok(generation)
}
