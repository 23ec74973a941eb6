use std::path::PathBuf;

/// Default taxonomy endpoint.
pub const DEFAULT_NINJA_API_URL: &str = "https://api.api-ninjas.com/v1/animals";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding stored pictures (default: `pictures`).
    pub pictures_dir: PathBuf,
    /// Taxonomy lookup endpoint.
    pub ninja_api_url: String,
    /// API key sent as `X-Api-Key` to the taxonomy endpoint.
    pub ninja_api_key: String,
    /// Timeout for each outbound call (lookup, picture download), in seconds.
    pub upstream_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                  |
    /// |-------------------------|------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                |
    /// | `PORT`                  | `5001`                                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                     |
    /// | `PICTURES_DIR`          | `pictures`                               |
    /// | `NINJA_API_URL`         | `https://api.api-ninjas.com/v1/animals`  |
    /// | `NINJA_API_KEY`         | (empty)                                  |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let pictures_dir = PathBuf::from(
            std::env::var("PICTURES_DIR").unwrap_or_else(|_| "pictures".into()),
        );

        let ninja_api_url =
            std::env::var("NINJA_API_URL").unwrap_or_else(|_| DEFAULT_NINJA_API_URL.into());
        let ninja_api_key = std::env::var("NINJA_API_KEY").unwrap_or_default();

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            pictures_dir,
            ninja_api_url,
            ninja_api_key,
            upstream_timeout_secs,
        }
    }
}
