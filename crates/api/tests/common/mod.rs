//! Shared test fixtures: fake generation/storage capabilities and seed data.
//!
//! The fakes record every prompt/upload they see so tests can assert on
//! what the engine sent, not just on what came back.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use vitrine_api::config::ServerConfig;
use vitrine_api::state::AppState;
use vitrine_cloud::{CloudinaryConfig, MediaStorage, StorageError, StoredImage};
use vitrine_core::types::DbId;
use vitrine_db::models::campaign::CreateCampaign;
use vitrine_db::models::product::CreateProduct;
use vitrine_db::models::user::CreateUser;
use vitrine_db::repositories::{CampaignRepo, ProductRepo, UserRepo};
use vitrine_openai::{ContentBlock, ImageGenerator, OpenAiConfig, OpenAiError, TextGenerator};

// ---------------------------------------------------------------------------
// Fake capabilities
// ---------------------------------------------------------------------------

/// Text generator returning a canned response (or failing), recording the
/// instruction text of every call.
pub struct FakeTextGen {
    response: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeTextGen {
    /// Always answer with `raw`.
    pub fn answering(raw: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: Some(raw.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always fail with an API error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Instruction text of the `n`th call.
    pub fn prompt(&self, n: usize) -> String {
        self.prompts.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGen {
    async fn generate_json(
        &self,
        blocks: &[ContentBlock],
        _max_tokens: u32,
    ) -> Result<String, OpenAiError> {
        let text: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text(t) => Some(t.clone()),
                ContentBlock::ImageUrl(_) => None,
            })
            .collect();
        self.prompts.lock().unwrap().push(text.join("\n"));

        match &self.response {
            Some(raw) => Ok(raw.clone()),
            None => Err(OpenAiError::Api {
                status: 500,
                body: "fake text generator configured to fail".into(),
            }),
        }
    }
}

/// Image generator returning a fixed ephemeral URL (or failing), recording
/// every prompt.
pub struct FakeImageGen {
    url: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeImageGen {
    pub fn answering(url: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            url: Some(url.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            url: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ImageGenerator for FakeImageGen {
    async fn generate_image(&self, prompt: &str, _vivid: bool) -> Result<String, OpenAiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.url {
            Some(url) => Ok(url.clone()),
            None => Err(OpenAiError::Api {
                status: 500,
                body: "fake image generator configured to fail".into(),
            }),
        }
    }
}

/// Storage fake: derives a durable URL from the folder and remembers every
/// upload.
pub struct FakeStorage {
    pub uploads: Mutex<Vec<(String, String)>>,
}

impl FakeStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl MediaStorage for FakeStorage {
    async fn upload_url(
        &self,
        source_url: &str,
        folder: &str,
    ) -> Result<StoredImage, StorageError> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((source_url.to_string(), folder.to_string()));
        let n = uploads.len();
        Ok(StoredImage {
            secure_url: format!("https://cdn.test/{folder}/{n}.jpg"),
            public_id: format!("{folder}/{n}"),
        })
    }

    async fn upload_bytes(&self, _bytes: Vec<u8>, folder: &str) -> Result<StoredImage, StorageError> {
        self.upload_url("bytes://inline", folder).await
    }
}

// ---------------------------------------------------------------------------
// State and seed helpers
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig`; secrets are dummies, nothing dials out.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: vitrine_api::auth::jwt::JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 30,
            refresh_token_expiry_days: 30,
        },
        openai: OpenAiConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            api_key: "test".to_string(),
            timeout: Duration::from_secs(1),
        },
        cloudinary: CloudinaryConfig {
            cloud_name: "test".to_string(),
            api_key: "test".to_string(),
            api_secret: "test".to_string(),
        },
    }
}

/// Assemble an [`AppState`] around the given fakes.
pub fn test_state(
    pool: PgPool,
    text_gen: Arc<FakeTextGen>,
    image_gen: Arc<FakeImageGen>,
    storage: Arc<FakeStorage>,
) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        text_gen,
        image_gen,
        storage,
    }
}

/// Insert a user and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            name: None,
        },
    )
    .await
    .expect("seed user")
    .id
}

/// Insert a Luxury-toned campaign and return its id.
pub async fn seed_campaign(pool: &PgPool, user_id: DbId) -> DbId {
    CampaignRepo::create(
        pool,
        &CreateCampaign {
            user_id,
            title: "Test Campaign".to_string(),
            theme: "vintage gold".to_string(),
            tone: "Luxury".to_string(),
        },
    )
    .await
    .expect("seed campaign")
    .id
}

/// Insert one product; `name = None` leaves it for AI inference.
pub async fn seed_product(
    pool: &PgPool,
    campaign_id: DbId,
    sort_order: i32,
    name: Option<&str>,
) -> DbId {
    ProductRepo::create(
        pool,
        &CreateProduct {
            campaign_id,
            name: name.map(String::from),
            price: None,
            description: None,
            image_url: format!("https://img.test/{campaign_id}/{sort_order}.jpg"),
            storage_public_id: None,
            sort_order,
        },
    )
    .await
    .expect("seed product")
    .id
}

/// A schema-conformant model response covering `names.len()` products.
pub fn valid_payload(names: &[&str]) -> String {
    let products: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "inferredName": name,
                "inferredDescription": format!("Description of {name}."),
                "estimatedPrice": format!("${}", 50 + i * 10),
                "priceConfidence": "medium",
                "captions": {
                    "instagram": format!("ig caption {i}"),
                    "facebook": format!("fb caption {i}"),
                    "tiktok": format!("tt caption {i}"),
                    "whatsapp": format!("wa caption {i}"),
                },
                "hashtags": [format!("tag{i}"), "jewelry"],
            })
        })
        .collect();

    serde_json::json!({
        "products": products,
        "masterCopy": {
            "captions": {
                "instagram": "master ig",
                "facebook": "master fb",
                "tiktok": "master tt",
                "whatsapp": "master wa",
            },
            "hashtags": ["master", "collection"],
        },
    })
    .to_string()
}
