//! Product entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
///
/// `name`, `price`, and `description` are nullable: sellers may upload bare
/// photos and let the generation pass infer the rest.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub storage_public_id: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new product at upload time.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub campaign_id: DbId,
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_url: String,
    pub storage_public_id: Option<String>,
    pub sort_order: i32,
}
