//! Handlers for the `/campaigns` resource.
//!
//! Campaign creation is a multipart upload: form fields for the campaign
//! metadata plus 1-20 `images` parts with parallel-indexed optional
//! `names`/`prices`/`descriptions` fields, mirroring the upload form.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::future::try_join_all;
use serde::Serialize;
use vitrine_core::error::CoreError;
use vitrine_core::tone::Tone;
use vitrine_core::types::DbId;
use vitrine_db::models::campaign::{Campaign, CreateCampaign};
use vitrine_db::models::generation::Generation;
use vitrine_db::models::product::{CreateProduct, Product};
use vitrine_db::repositories::{CampaignRepo, GenerationRepo, ProductRepo};

use crate::engine::generate::{generate_campaign, GeneratedAsset};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on photos per campaign upload.
const MAX_UPLOAD_IMAGES: usize = 20;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `POST /campaigns`.
#[derive(Debug, Serialize)]
pub struct CreateCampaignResponse {
    pub campaign_id: DbId,
    pub products: Vec<Product>,
}

/// One row of the campaign list: the campaign plus display extras.
#[derive(Debug, Serialize)]
pub struct CampaignSummary {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub product_count: usize,
    pub cover_image: Option<String>,
}

/// A product together with all of its generations, oldest variation first.
#[derive(Debug, Serialize)]
pub struct ProductWithGenerations {
    #[serde(flatten)]
    pub product: Product,
    pub generations: Vec<Generation>,
}

/// Response for `GET /campaigns/{id}`.
#[derive(Debug, Serialize)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    pub products: Vec<ProductWithGenerations>,
}

// ---------------------------------------------------------------------------
// Multipart form model
// ---------------------------------------------------------------------------

/// Accumulated fields from the campaign upload form.
#[derive(Default)]
struct UploadForm {
    title: Option<String>,
    theme: Option<String>,
    tone: Option<String>,
    images: Vec<Vec<u8>>,
    names: Vec<String>,
    prices: Vec<String>,
    descriptions: Vec<String>,
}

impl UploadForm {
    /// Drain a [`Multipart`] stream into the form model.
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "theme" => form.theme = Some(read_text(field).await?),
                "tone" => form.tone = Some(read_text(field).await?),
                "images" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Unreadable image part: {e}")))?;
                    form.images.push(bytes.to_vec());
                }
                "names" => form.names.push(read_text(field).await?),
                "prices" => form.prices.push(read_text(field).await?),
                "descriptions" => form.descriptions.push(read_text(field).await?),
                // Unknown parts are ignored so form evolution stays painless.
                _ => {}
            }
        }
        Ok(form)
    }

    /// Optional per-product field: empty strings count as absent.
    fn optional_at(values: &[String], index: usize) -> Option<String> {
        values
            .get(index)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Unreadable form field: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/campaigns
///
/// Create a campaign in `draft` status from an upload form: store every
/// image durably, then create one product per image with a stable
/// `sort_order`.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CreateCampaignResponse>>)> {
    let form = UploadForm::read(multipart).await?;

    if form.images.is_empty() || form.images.len() > MAX_UPLOAD_IMAGES {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Upload between 1 and {MAX_UPLOAD_IMAGES} images"
        ))));
    }

    let tone = form.tone.as_deref().unwrap_or("Luxury");
    Tone::parse(tone).map_err(AppError::Core)?;

    let campaign = CampaignRepo::create(
        &state.pool,
        &CreateCampaign {
            user_id: user.user_id,
            title: form.title.clone().unwrap_or_else(|| "Untitled Campaign".into()),
            theme: form.theme.clone().unwrap_or_else(|| "jewelry".into()),
            tone: tone.to_string(),
        },
    )
    .await?;

    // Store all photos concurrently; indexes keep upload order stable.
    let folder = format!("vitrine/uploads/{}", campaign.id);
    let stored = try_join_all(form.images.iter().map(|bytes| {
        let storage = state.storage.clone();
        let folder = folder.clone();
        let bytes = bytes.clone();
        async move { storage.upload_bytes(bytes, &folder).await }
    }))
    .await
    .map_err(|e| AppError::Core(CoreError::Upstream(format!("Image upload failed: {e}"))))?;

    let products = try_join_all(stored.into_iter().enumerate().map(|(i, image)| {
        let pool = state.pool.clone();
        let input = CreateProduct {
            campaign_id: campaign.id,
            name: UploadForm::optional_at(&form.names, i),
            price: UploadForm::optional_at(&form.prices, i),
            description: UploadForm::optional_at(&form.descriptions, i),
            image_url: image.secure_url,
            storage_public_id: Some(image.public_id),
            sort_order: i as i32,
        };
        async move { ProductRepo::create(&pool, &input).await }
    }))
    .await?;

    tracing::info!(
        campaign_id = campaign.id,
        products = products.len(),
        "Created campaign from upload"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreateCampaignResponse {
                campaign_id: campaign.id,
                products,
            },
        }),
    ))
}

/// GET /api/v1/campaigns
///
/// The user's campaigns, most recent first, with product count and cover
/// image for the dashboard grid.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CampaignSummary>>>> {
    let campaigns = CampaignRepo::list_by_user(&state.pool, user.user_id).await?;

    let mut summaries = Vec::with_capacity(campaigns.len());
    for campaign in campaigns {
        let products = ProductRepo::list_by_campaign(&state.pool, campaign.id).await?;
        summaries.push(CampaignSummary {
            product_count: products.len(),
            cover_image: products.first().map(|p| p.image_url.clone()),
            campaign,
        });
    }

    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/campaigns/{id}
///
/// The campaign with its products, each carrying every generation in
/// variation order.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CampaignDetail>>> {
    let campaign = CampaignRepo::find_owned(&state.pool, campaign_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let products = ProductRepo::list_by_campaign(&state.pool, campaign_id).await?;
    let mut detailed = Vec::with_capacity(products.len());
    for product in products {
        let generations = GenerationRepo::list_by_product(&state.pool, product.id).await?;
        detailed.push(ProductWithGenerations {
            product,
            generations,
        });
    }

    Ok(Json(DataResponse {
        data: CampaignDetail {
            campaign,
            products: detailed,
        },
    }))
}

/// DELETE /api/v1/campaigns/{id}
///
/// Ownership-checked cascade delete: products and generations go with the
/// campaign.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<StatusCode> {
    CampaignRepo::find_owned(&state.pool, campaign_id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    CampaignRepo::delete(&state.pool, campaign_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/campaigns/{id}/generate
///
/// Run the full content-generation pass. Only a campaign still in `draft`
/// can start one; a repeat submission gets a 409.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GeneratedAsset>>>> {
    let assets = generate_campaign(&state, user.user_id, campaign_id).await?;
    Ok(Json(DataResponse { data: assets }))
}
