pub mod auth;
pub mod campaign;
pub mod generation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout
///
/// /campaigns                          list, create (multipart upload)
/// /campaigns/{id}                     get, delete
/// /campaigns/{id}/generate            full generation pass (POST)
///
/// /products/{id}/regenerate           new variation (POST)
///
/// /generations/{id}/promo-image       promotional image (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/campaigns", campaign::router())
        .merge(generation::router())
}
