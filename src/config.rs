//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)

use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 3003)
    pub port: u16,
}

/// Database configuration (SQLite only)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub path: PathBuf,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Allowed origins. Comma-separated when supplied via environment.
    ///
    /// When non-empty, responses carry credentials support for exactly
    /// these origins; when empty, CORS is fully permissive.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Authentication configuration (GitHub OAuth + sessions)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Session secret key (32+ bytes)
    pub session_secret: String,
    /// Session max age in seconds (default: 604800 = 7 days)
    pub session_max_age: i64,
    /// Where to send the browser after a successful login
    #[serde(default = "default_post_login_redirect")]
    pub post_login_redirect: String,
    pub github: GitHubOAuthConfig,
}

/// GitHub OAuth configuration
///
/// `client_secret` is optional on purpose: when it is absent the
/// authorization gate runs in an open development-mode bypass.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GitHubOAuthConfig {
    #[serde(default)]
    pub client_id: String,
    pub client_secret: Option<String>,
    /// OAuth callback URL registered with GitHub
    /// (e.g., "https://tarefas.example.com/auth/github/callback")
    #[serde(default)]
    pub callback_url: String,
}

fn default_post_login_redirect() -> String {
    "/usuario".to_string()
}

impl AuthConfig {
    /// Whether GitHub OAuth is configured at all
    ///
    /// Absence of a client secret switches the gate to its open fallback.
    pub fn oauth_configured(&self) -> bool {
        self.github
            .client_secret
            .as_deref()
            .is_some_and(|secret| !secret.trim().is_empty())
    }

    /// Whether session cookies should carry the Secure flag
    pub fn secure_cookies(&self) -> bool {
        self.github.callback_url.starts_with("https://")
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (TAREFAS_*)
    ///
    /// # Errors
    /// Returns error if configuration is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3003)?
            .set_default("database.path", "data/tarefas.db")?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("auth.session_max_age", 604800)?
            .set_default("auth.post_login_redirect", "/usuario")?
            .set_default("auth.github.client_id", "")?
            .set_default("auth.github.callback_url", "")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (TAREFAS_*)
            .add_source(
                Environment::with_prefix("TAREFAS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        const MIN_SESSION_SECRET_BYTES: usize = 32;

        if self.auth.session_secret.as_bytes().len() < MIN_SESSION_SECRET_BYTES {
            return Err(crate::error::AppError::Config(format!(
                "auth.session_secret must be at least {} bytes",
                MIN_SESSION_SECRET_BYTES
            )));
        }

        if self.auth.session_max_age <= 0 {
            return Err(crate::error::AppError::Config(
                "auth.session_max_age must be greater than 0".to_string(),
            ));
        }

        if self.auth.oauth_configured() && self.auth.github.callback_url.trim().is_empty() {
            return Err(crate::error::AppError::Config(
                "auth.github.callback_url is required when a client secret is set".to_string(),
            ));
        }

        if !self.auth.oauth_configured() {
            tracing::warn!(
                "GitHub OAuth is not configured; the API will accept unauthenticated requests"
            );
        }

        Ok(())
    }
}
