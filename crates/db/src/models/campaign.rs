//! Campaign entity model and DTOs.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub theme: String,
    /// One of the fixed tone presets; validated by `vitrine_core::tone`.
    pub tone: String,
    /// One of `vitrine_core::status::VALID_STATUSES`.
    pub status: String,
    pub hero_image_url: Option<String>,
    pub hero_image_prompt: Option<String>,
    pub master_caption_instagram: Option<String>,
    pub master_caption_facebook: Option<String>,
    pub master_caption_tiktok: Option<String>,
    pub master_caption_whatsapp: Option<String>,
    pub master_hashtags: Json<Vec<String>>,
    pub created_at: Timestamp,
}

/// DTO for creating a new campaign. Status always starts at `draft`.
#[derive(Debug, Clone)]
pub struct CreateCampaign {
    pub user_id: DbId,
    pub title: String,
    pub theme: String,
    pub tone: String,
}

/// Fields written when a generation pass finishes.
///
/// Hero fields stay `None` when the hero-image step failed; master copy is
/// whatever the validated (or fallback) output carried.
#[derive(Debug, Clone)]
pub struct FinalizeCampaign {
    pub hero_image_url: Option<String>,
    pub hero_image_prompt: Option<String>,
    pub master_caption_instagram: String,
    pub master_caption_facebook: String,
    pub master_caption_tiktok: String,
    pub master_caption_whatsapp: String,
    pub master_hashtags: Vec<String>,
}
