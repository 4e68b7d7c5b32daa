//! Repository for the `products` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::product::{CreateProduct, Product};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, name, price, description, image_url, \
    storage_public_id, sort_order, created_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (campaign_id, name, price, description, image_url, storage_public_id, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.campaign_id)
            .bind(&input.name)
            .bind(&input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.storage_public_id)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products for a campaign in stable upload order.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE campaign_id = $1
             ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Back-fill a product's name and description from inferred values.
    ///
    /// `COALESCE(column, $n)` keeps any user-supplied value: only columns
    /// that are currently NULL take the inferred text. Returns the updated
    /// row, or `None` if the product is gone.
    pub async fn backfill_inferred(
        pool: &PgPool,
        id: DbId,
        inferred_name: &str,
        inferred_description: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE(name, $2),
                description = COALESCE(description, $3)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(inferred_name)
            .bind(inferred_description)
            .fetch_optional(pool)
            .await
    }
}
