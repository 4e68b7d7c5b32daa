use std::sync::Arc;

use vitrine_cloud::MediaStorage;
use vitrine_openai::{ImageGenerator, TextGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (everything is behind `Arc` or already `Clone`). The
/// generation capabilities are trait objects so tests can drive the engine
/// with fakes instead of live services.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrine_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Structured-text generation capability.
    pub text_gen: Arc<dyn TextGenerator>,
    /// Image generation capability.
    pub image_gen: Arc<dyn ImageGenerator>,
    /// Durable image storage capability.
    pub storage: Arc<dyn MediaStorage>,
}
