//! Repository for the `campaigns` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vitrine_core::status::{STATUS_DONE, STATUS_DRAFT, STATUS_ERROR, STATUS_GENERATING};
use vitrine_core::types::DbId;

use crate::models::campaign::{Campaign, CreateCampaign, FinalizeCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, theme, tone, status, \
    hero_image_url, hero_image_prompt, \
    master_caption_instagram, master_caption_facebook, \
    master_caption_tiktok, master_caption_whatsapp, \
    master_hashtags, created_at";

/// Provides CRUD operations and status transitions for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign in `draft` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (user_id, title, theme, tone, status)
             VALUES ($1, $2, $3, $4, '{STATUS_DRAFT}')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.theme)
            .bind(&input.tone)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a campaign that belongs to `user_id`.
    ///
    /// A campaign owned by someone else is indistinguishable from a missing
    /// one: both return `None`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns for a user, most recent first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Move a campaign from `draft` to `generating`.
    ///
    /// Compare-and-set: only succeeds when the campaign is still in `draft`,
    /// so a double-submitted generate request loses here instead of running
    /// the pipeline twice. Returns `true` if the transition happened.
    pub async fn mark_generating(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!(
            "UPDATE campaigns SET status = '{STATUS_GENERATING}'
             WHERE id = $1 AND status = '{STATUS_DRAFT}'"
        ))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a campaign from `generating` to the terminal `error` status.
    ///
    /// Compensating transition taken when a pass fails mid-flight; returns
    /// `true` if the row was updated.
    pub async fn mark_error(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&format!(
            "UPDATE campaigns SET status = '{STATUS_ERROR}'
             WHERE id = $1 AND status = '{STATUS_GENERATING}'"
        ))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Finish a generation pass: status to `done`, master copy and hero
    /// fields written. Returns the updated row, or `None` if the campaign
    /// was not in `generating`.
    pub async fn finalize(
        pool: &PgPool,
        id: DbId,
        input: &FinalizeCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                status = '{STATUS_DONE}',
                hero_image_url = $2,
                hero_image_prompt = $3,
                master_caption_instagram = $4,
                master_caption_facebook = $5,
                master_caption_tiktok = $6,
                master_caption_whatsapp = $7,
                master_hashtags = $8
             WHERE id = $1 AND status = '{STATUS_GENERATING}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.hero_image_url)
            .bind(&input.hero_image_prompt)
            .bind(&input.master_caption_instagram)
            .bind(&input.master_caption_facebook)
            .bind(&input.master_caption_tiktok)
            .bind(&input.master_caption_whatsapp)
            .bind(Json(&input.master_hashtags))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a campaign. The FK cascade removes its products
    /// and their generations. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
