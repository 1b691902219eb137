//! Common test utilities for E2E tests

use tarefas::{AppState, config};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

pub const TEST_SESSION_SECRET: &str = "test-secret-key-32-bytes-long!!!";

fn test_config(db_path: std::path::PathBuf, client_secret: Option<String>) -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Let OS assign port
        },
        database: config::DatabaseConfig { path: db_path },
        cors: config::CorsConfig {
            allowed_origins: vec![],
        },
        auth: config::AuthConfig {
            session_secret: TEST_SESSION_SECRET.to_string(),
            session_max_age: 604_800,
            post_login_redirect: "/usuario".to_string(),
            github: config::GitHubOAuthConfig {
                client_id: "test-client-id".to_string(),
                client_secret,
                callback_url: "http://localhost:3003/auth/github/callback".to_string(),
            },
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}

impl TestServer {
    /// Create a new test server with OAuth configured
    pub async fn new() -> Self {
        Self::start(Some("test-client-secret".to_string())).await
    }

    /// Create a test server running the gate's open fallback
    pub async fn new_without_oauth() -> Self {
        Self::start(None).await
    }

    async fn start(client_secret: Option<String>) -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = test_config(db_path, client_secret);

        // Initialize app state
        let state = AppState::new(config).await.unwrap();

        // Create HTTP client (no redirect following, so tests can
        // assert on Location headers)
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = tarefas::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Create a valid signed session token
    pub fn session_token(&self) -> String {
        use tarefas::auth::{Session, create_session_token};

        let session = Session::new("Usuária de Teste".to_string(), 3600);
        create_session_token(&session, &self.state.config.auth.session_secret)
            .expect("failed to create test session token")
    }

    /// Create a valid session cookie header value
    pub fn session_cookie(&self) -> String {
        format!("session={}", self.session_token())
    }
}
