//! Generation entity model and DTOs.
//!
//! A generation is one versioned set of AI-produced marketing assets for a
//! single product. Rows are immutable after creation except for the
//! promotional-image fields, which the promo-image operation overwrites.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A generation row from the `generations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Generation {
    pub id: DbId,
    pub product_id: DbId,
    pub caption_instagram: Option<String>,
    pub caption_facebook: Option<String>,
    pub caption_tiktok: Option<String>,
    pub caption_whatsapp: Option<String>,
    pub hashtags: Json<Vec<String>>,
    pub estimated_price: Option<String>,
    /// `high` | `medium` | `low`.
    pub price_confidence: Option<String>,
    /// Unique and strictly increasing per product, starting at 1.
    pub variation_number: i32,
    pub promo_image_url: Option<String>,
    pub image_prompt: Option<String>,
    pub created_at: Timestamp,
}

/// Content fields for a new generation.
///
/// The variation number is not part of this DTO: the first full pass pins
/// it to 1, and regeneration allocates the next number atomically inside
/// the INSERT.
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub caption_instagram: String,
    pub caption_facebook: String,
    pub caption_tiktok: String,
    pub caption_whatsapp: String,
    pub hashtags: Vec<String>,
    pub estimated_price: String,
    pub price_confidence: String,
}
