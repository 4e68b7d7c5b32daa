//! Repository for the `generations` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::generation::{Generation, NewGeneration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, product_id, caption_instagram, caption_facebook, \
    caption_tiktok, caption_whatsapp, hashtags, estimated_price, \
    price_confidence, variation_number, promo_image_url, image_prompt, created_at";

/// Provides CRUD operations for generations.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert the first-pass generation for a product (variation 1).
    pub async fn create_initial(
        pool: &PgPool,
        product_id: DbId,
        input: &NewGeneration,
    ) -> Result<Generation, sqlx::Error> {
        let query = format!(
            "INSERT INTO generations
                (product_id, caption_instagram, caption_facebook, caption_tiktok,
                 caption_whatsapp, hashtags, estimated_price, price_confidence,
                 variation_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
             RETURNING {COLUMNS}"
        );
        Self::bind_content(sqlx::query_as::<_, Generation>(&query), product_id, input)
            .fetch_one(pool)
            .await
    }

    /// Insert a new variation, allocating its number atomically.
    ///
    /// The number is `MAX(variation_number) + 1` computed inside the INSERT,
    /// so deleted rows never cause reuse. Two racing calls both compute the
    /// same number, but `uq_generations_product_variation` makes the loser
    /// fail instead of duplicating a variation.
    pub async fn create_next_variation(
        pool: &PgPool,
        product_id: DbId,
        input: &NewGeneration,
    ) -> Result<Generation, sqlx::Error> {
        let query = format!(
            "INSERT INTO generations
                (product_id, caption_instagram, caption_facebook, caption_tiktok,
                 caption_whatsapp, hashtags, estimated_price, price_confidence,
                 variation_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                 (SELECT COALESCE(MAX(variation_number), 0) + 1
                    FROM generations WHERE product_id = $1))
             RETURNING {COLUMNS}"
        );
        Self::bind_content(sqlx::query_as::<_, Generation>(&query), product_id, input)
            .fetch_one(pool)
            .await
    }

    /// Find a generation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1");
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all generations for a product, oldest variation first.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<Generation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generations
             WHERE product_id = $1
             ORDER BY variation_number ASC"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Count the generations that exist for a product.
    pub async fn count_by_product(pool: &PgPool, product_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM generations WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Attach (or replace) the promotional image on a generation.
    ///
    /// Re-invocation overwrites both fields; the row count never changes.
    /// Returns the updated row, or `None` if the generation is gone.
    pub async fn set_promo_image(
        pool: &PgPool,
        id: DbId,
        promo_image_url: &str,
        image_prompt: &str,
    ) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!(
            "UPDATE generations SET
                promo_image_url = $2,
                image_prompt = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .bind(promo_image_url)
            .bind(image_prompt)
            .fetch_optional(pool)
            .await
    }

    /// Bind the shared content columns for the two INSERT variants.
    fn bind_content<'q>(
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, Generation, sqlx::postgres::PgArguments>,
        product_id: DbId,
        input: &'q NewGeneration,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Generation, sqlx::postgres::PgArguments> {
        query
            .bind(product_id)
            .bind(&input.caption_instagram)
            .bind(&input.caption_facebook)
            .bind(&input.caption_tiktok)
            .bind(&input.caption_whatsapp)
            .bind(Json(&input.hashtags))
            .bind(&input.estimated_price)
            .bind(&input.price_confidence)
    }
}
