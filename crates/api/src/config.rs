use std::time::Duration;

use vitrine_cloud::CloudinaryConfig;
use vitrine_openai::OpenAiConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`; generation requests
    /// block on a chain of upstream calls and need headroom).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// OpenAI client configuration.
    pub openai: OpenAiConfig,
    /// Cloudinary storage configuration.
    pub cloudinary: CloudinaryConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Required | Default                   |
    /// |--------------------------|----------|---------------------------|
    /// | `HOST`                   | no       | `0.0.0.0`                 |
    /// | `PORT`                   | no       | `3000`                    |
    /// | `CORS_ORIGINS`           | no       | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`   | no       | `120`                     |
    /// | `JWT_SECRET`             | **yes**  | --                        |
    /// | `OPENAI_API_KEY`         | **yes**  | --                        |
    /// | `OPENAI_API_URL`         | no       | `https://api.openai.com`  |
    /// | `OPENAI_TIMEOUT_SECS`    | no       | `60`                      |
    /// | `CLOUDINARY_CLOUD_NAME`  | **yes**  | --                        |
    /// | `CLOUDINARY_API_KEY`     | **yes**  | --                        |
    /// | `CLOUDINARY_API_SECRET`  | **yes**  | --                        |
    ///
    /// # Panics
    ///
    /// Panics when a required variable is missing or a numeric variable
    /// fails to parse -- misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let openai_timeout_secs: u64 = std::env::var("OPENAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("OPENAI_TIMEOUT_SECS must be a valid u64");

        let openai = OpenAiConfig {
            api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com".into()),
            api_key: std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            timeout: Duration::from_secs(openai_timeout_secs),
        };

        let cloudinary = CloudinaryConfig {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                .expect("CLOUDINARY_CLOUD_NAME must be set"),
            api_key: std::env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY must be set"),
            api_secret: std::env::var("CLOUDINARY_API_SECRET")
                .expect("CLOUDINARY_API_SECRET must be set"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            openai,
            cloudinary,
        }
    }
}
