//! The generation engine: everything between an authorized HTTP request and
//! the persisted marketing assets.
//!
//! Three entry points, one per exposed operation:
//! - [`generate::generate_campaign`] -- one full pass over a campaign.
//! - [`regenerate::regenerate_product`] -- one new variation for a product.
//! - [`promo::attach_promo_image`] -- promotional image for a generation.
//!
//! All external capabilities (text generation, image generation, storage)
//! come in through the trait objects on [`crate::state::AppState`].

pub mod generate;
pub mod promo;
pub mod regenerate;

use vitrine_core::error::CoreError;
use vitrine_core::tone::Tone;
use vitrine_core::types::DbId;
use vitrine_db::models::campaign::Campaign;
use vitrine_db::models::generation::NewGeneration;
use vitrine_db::models::product::Product;
use vitrine_db::repositories::CampaignRepo;
use vitrine_openai::ContentBlock;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// `max_tokens` for the whole-campaign text generation call.
const CAMPAIGN_MAX_TOKENS: u32 = 4000;
/// `max_tokens` for a single-product regeneration call.
const VARIATION_MAX_TOKENS: u32 = 1500;

/// Storage folder for campaign-level hero images.
fn hero_folder(campaign_id: DbId) -> String {
    format!("vitrine/campaigns/{campaign_id}")
}

/// Storage folder for per-generation promotional images.
fn promo_folder(campaign_id: DbId) -> String {
    format!("vitrine/promo/{campaign_id}")
}

/// Load the campaign that owns `product`, enforcing that `user_id` owns it.
///
/// Product-anchored operations treat a missing or foreign campaign the same
/// way: the caller has no business touching this product.
async fn owning_campaign(
    state: &AppState,
    product: &Product,
    user_id: DbId,
) -> AppResult<Campaign> {
    let campaign = CampaignRepo::find_by_id(&state.pool, product.campaign_id).await?;
    match campaign {
        Some(c) if c.user_id == user_id => Ok(c),
        _ => Err(AppError::Core(CoreError::Forbidden(
            "You do not own the campaign containing this product".into(),
        ))),
    }
}

/// Parse a stored tone string, treating corruption as an internal error.
///
/// Tones are validated on the way in, so an unparseable stored value means
/// the row predates the current preset list or was edited out-of-band.
fn stored_tone(campaign: &Campaign) -> AppResult<Tone> {
    Tone::parse(&campaign.tone).map_err(|_| {
        AppError::InternalError(format!(
            "Campaign {} has unknown tone '{}'",
            campaign.id, campaign.tone
        ))
    })
}

/// Assemble the multimodal request: instruction text first, then one image
/// block per product in campaign order.
fn content_blocks(prompt: String, products: &[Product]) -> Vec<ContentBlock> {
    let mut blocks = Vec::with_capacity(products.len() + 1);
    blocks.push(ContentBlock::Text(prompt));
    blocks.extend(
        products
            .iter()
            .map(|p| ContentBlock::ImageUrl(p.image_url.clone())),
    );
    blocks
}

/// Convert one validated (or fallback) product entry into the insertable
/// generation content.
fn generation_content(entry: vitrine_core::output::ProductOutput) -> NewGeneration {
    NewGeneration {
        caption_instagram: entry.captions.instagram,
        caption_facebook: entry.captions.facebook,
        caption_tiktok: entry.captions.tiktok,
        caption_whatsapp: entry.captions.whatsapp,
        hashtags: entry.hashtags,
        estimated_price: entry.estimated_price,
        price_confidence: entry.price_confidence.as_str().to_string(),
    }
}

/// Map a product row to the prompt builder's input shape.
fn prompt_input(product: &Product) -> vitrine_core::prompt::ProductPromptInput {
    vitrine_core::prompt::ProductPromptInput {
        name: product.name.clone(),
        price: product.price.clone(),
        description: product.description.clone(),
        image_url: product.image_url.clone(),
    }
}
