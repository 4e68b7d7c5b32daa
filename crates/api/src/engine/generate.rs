//! The full-campaign generation pass.
//!
//! One invocation turns a draft campaign's uploaded products into one
//! generation record per product plus the campaign-level master copy and
//! hero image, with fallback substitution whenever the model call or its
//! output is unusable.

use futures::future::try_join_all;
use serde::Serialize;
use vitrine_core::error::CoreError;
use vitrine_core::output::{self, GenerationOutput, ProductOutput};
use vitrine_core::prompt;
use vitrine_core::status;
use vitrine_core::tone::Tone;
use vitrine_core::types::DbId;
use vitrine_db::models::campaign::{Campaign, FinalizeCampaign};
use vitrine_db::models::generation::Generation;
use vitrine_db::models::product::Product;
use vitrine_db::repositories::{CampaignRepo, GenerationRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{content_blocks, generation_content, hero_folder, prompt_input, stored_tone, CAMPAIGN_MAX_TOKENS};

/// One product paired with its freshly created generation.
#[derive(Debug, Serialize)]
pub struct GeneratedAsset {
    pub product: Product,
    pub generation: Generation,
}

/// Run one full content-generation pass for `campaign_id`.
///
/// Preconditions: the requester owns the campaign, the campaign has at
/// least one product, and its status is still `draft` (the status CAS
/// doubles as a double-submit guard). Any failure after the campaign has
/// entered `generating` triggers a best-effort compensating transition to
/// `error` before the failure propagates.
pub async fn generate_campaign(
    state: &AppState,
    user_id: DbId,
    campaign_id: DbId,
) -> AppResult<Vec<GeneratedAsset>> {
    let campaign = CampaignRepo::find_owned(&state.pool, campaign_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    let tone = stored_tone(&campaign)?;

    let products = ProductRepo::list_by_campaign(&state.pool, campaign_id).await?;
    if products.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign has no products; upload at least one image first".into(),
        )));
    }

    // Friendly rejection for campaigns past `draft`; the CAS below still
    // guards against two requests racing through this check.
    if !status::is_valid_transition(&campaign.status, status::STATUS_GENERATING) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Campaign in status '{}' cannot start content generation",
            campaign.status
        ))));
    }
    if !CampaignRepo::mark_generating(&state.pool, campaign_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Content generation has already been started for this campaign".into(),
        )));
    }

    match run_pass(state, &campaign, tone, &products).await {
        Ok(assets) => Ok(assets),
        Err(err) => {
            // The campaign must not stay stuck in `generating`; flag it as
            // failed so the owner can see the pass did not complete.
            if let Err(mark_err) = CampaignRepo::mark_error(&state.pool, campaign_id).await {
                tracing::error!(
                    campaign_id,
                    error = %mark_err,
                    "Failed to mark campaign as errored after pipeline failure"
                );
            }
            Err(err)
        }
    }
}

/// Everything that happens between `generating` and `done`.
async fn run_pass(
    state: &AppState,
    campaign: &Campaign,
    tone: Tone,
    products: &[Product],
) -> AppResult<Vec<GeneratedAsset>> {
    let output = request_marketing_copy(state, campaign, tone, products).await;

    // Persist one generation per product. Unordered dispatch, join-all
    // barrier: one failed insert fails the whole pass.
    let assets = try_join_all(products.iter().enumerate().map(|(i, product)| {
        let entry = output
            .products
            .get(i)
            .cloned()
            .unwrap_or_else(|| output::fallback_product(product.name.as_deref()));
        persist_product_assets(state, product, entry)
    }))
    .await?;

    let (hero_image_url, hero_image_prompt) = attach_hero_image(state, campaign, tone).await;

    let master = output.master_copy;
    CampaignRepo::finalize(
        &state.pool,
        campaign.id,
        &FinalizeCampaign {
            hero_image_url,
            hero_image_prompt,
            master_caption_instagram: master.captions.instagram,
            master_caption_facebook: master.captions.facebook,
            master_caption_tiktok: master.captions.tiktok,
            master_caption_whatsapp: master.captions.whatsapp,
            master_hashtags: master.hashtags,
        },
    )
    .await?;

    Ok(assets)
}

/// Invoke text generation for the whole campaign and validate the result.
///
/// Every failure mode -- transport error, timeout, non-JSON output, schema
/// violation -- collapses into the same recovery: per-product fallback
/// content with an empty master copy. The caller never sees an error here.
async fn request_marketing_copy(
    state: &AppState,
    campaign: &Campaign,
    tone: Tone,
    products: &[Product],
) -> GenerationOutput {
    let inputs: Vec<_> = products.iter().map(prompt_input).collect();
    let text = prompt::build_generation_prompt(&inputs, tone, &campaign.theme);
    let blocks = content_blocks(text, products);

    let validated = match state.text_gen.generate_json(&blocks, CAMPAIGN_MAX_TOKENS).await {
        Ok(raw) => output::parse_output(&raw),
        Err(err) => Err(CoreError::Upstream(err.to_string())),
    };

    match validated {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(
                campaign_id = campaign.id,
                error = %err,
                "Text generation unusable; substituting fallback content"
            );
            output::fallback_output(products.iter().map(|p| p.name.as_deref()))
        }
    }
}

/// Insert the variation-1 generation for one product and back-fill blank
/// name/description from the inferred values.
async fn persist_product_assets(
    state: &AppState,
    product: &Product,
    entry: ProductOutput,
) -> AppResult<GeneratedAsset> {
    let inferred_name = entry.inferred_name.clone();
    let inferred_description = entry.inferred_description.clone();

    let generation =
        GenerationRepo::create_initial(&state.pool, product.id, &generation_content(entry)).await?;

    let product = ProductRepo::backfill_inferred(
        &state.pool,
        product.id,
        &inferred_name,
        &inferred_description,
    )
    .await?
    .unwrap_or_else(|| product.clone());

    Ok(GeneratedAsset {
        product,
        generation,
    })
}

/// Try to produce and store the campaign hero image.
///
/// Explicitly non-fatal: any failure is logged and the campaign finishes
/// without hero fields.
async fn attach_hero_image(
    state: &AppState,
    campaign: &Campaign,
    tone: Tone,
) -> (Option<String>, Option<String>) {
    let hero_prompt = prompt::build_campaign_hero_image_prompt(&campaign.theme, tone);

    let generated = state
        .image_gen
        .generate_image(&hero_prompt, tone.prefers_vivid_rendering())
        .await;

    let ephemeral_url = match generated {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(campaign_id = campaign.id, error = %err, "Hero image generation failed");
            return (None, None);
        }
    };

    match state
        .storage
        .upload_url(&ephemeral_url, &hero_folder(campaign.id))
        .await
    {
        Ok(stored) => (Some(stored.secure_url), Some(hero_prompt)),
        Err(err) => {
            tracing::warn!(campaign_id = campaign.id, error = %err, "Hero image upload failed");
            (None, None)
        }
    }
}
