//! GitHub OAuth flow
//!
//! Implements the OAuth 2.0 authorization code flow with GitHub.

use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;

use super::session::{Session, create_session_token};
use crate::AppState;
use crate::error::AppError;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

/// Create authentication router
///
/// Routes:
/// - GET /auth/github - Redirect to GitHub consent screen
/// - GET /auth/github/callback - OAuth callback
/// - GET /logout - Destroy session
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/github", get(github_redirect))
        .route("/auth/github/callback", get(github_callback))
        .route("/logout", get(logout))
}

// =============================================================================
// GitHub OAuth
// =============================================================================

/// GET /auth/github
///
/// Redirects user to GitHub authorization page.
///
/// # Steps
/// 1. Generate CSRF state token
/// 2. Store state in cookie
/// 3. Redirect to GitHub with client_id, redirect_uri, scope, state
async fn github_redirect(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if !state.config.auth.oauth_configured() {
        tracing::warn!("Login solicitado sem OAuth configurado; redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }

    let csrf_state = generate_csrf_state();

    let mut authorize_url = url::Url::parse(GITHUB_AUTHORIZE_URL)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    authorize_url
        .query_pairs_mut()
        .append_pair("client_id", &state.config.auth.github.client_id)
        .append_pair("redirect_uri", &state.config.auth.github.callback_url)
        .append_pair("scope", "user:email")
        .append_pair("state", &csrf_state);

    let jar = jar.add(
        Cookie::build(("oauth_state", csrf_state))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.auth.secure_cookies()),
    );

    Ok((jar, Redirect::to(authorize_url.as_str())).into_response())
}

/// Query parameters from GitHub callback
#[derive(Debug, Deserialize)]
struct GitHubCallbackQuery {
    /// Authorization code (absent when the user denied access)
    code: Option<String>,
    /// CSRF state token
    state: Option<String>,
    /// Provider-side error code
    error: Option<String>,
}

/// GitHub token response
#[derive(Debug, Deserialize)]
struct GitHubTokenResponse {
    access_token: Option<String>,
}

/// GitHub user info
#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
    name: Option<String>,
}

/// GET /auth/github/callback
///
/// Handles OAuth callback from GitHub.
///
/// # Steps
/// 1. On provider failure, redirect to root
/// 2. Verify CSRF state against the cookie
/// 3. Exchange code for access token
/// 4. Fetch user info from GitHub
/// 5. Create session (display name only) and set cookie
/// 6. Redirect to the configured post-login path
async fn github_callback(
    State(state): State<AppState>,
    Query(query): Query<GitHubCallbackQuery>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if let Some(provider_error) = &query.error {
        tracing::warn!(error = %provider_error, "GitHub recusou a autorização");
        return Ok(Redirect::to("/").into_response());
    }

    let Some(code) = query.code.as_deref() else {
        tracing::warn!("Callback do GitHub sem código de autorização");
        return Ok(Redirect::to("/").into_response());
    };

    verify_csrf_state(query.state.as_deref(), &jar)?;

    let display_name = match exchange_code_for_profile(&state, code).await {
        Ok(name) => name,
        Err(error) => {
            tracing::error!(%error, "Falha na troca do código OAuth com o GitHub");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let session = Session::new(display_name, state.config.auth.session_max_age);
    let token = create_session_token(&session, &state.config.auth.session_secret)?;

    tracing::info!(name = %session.name, "Login via GitHub concluído");

    let jar = jar
        .remove(Cookie::build(("oauth_state", "")).path("/"))
        .add(
            Cookie::build(("session", token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.auth.secure_cookies()),
        );

    Ok((
        jar,
        Redirect::to(&state.config.auth.post_login_redirect),
    )
        .into_response())
}

/// Exchange an authorization code for the profile's display name
async fn exchange_code_for_profile(state: &AppState, code: &str) -> Result<String, AppError> {
    let token_response: GitHubTokenResponse = state
        .http_client
        .post(GITHUB_TOKEN_URL)
        .header("Accept", "application/json")
        .form(&[
            ("client_id", state.config.auth.github.client_id.as_str()),
            (
                "client_secret",
                state
                    .config
                    .auth
                    .github
                    .client_secret
                    .as_deref()
                    .unwrap_or_default(),
            ),
            ("code", code),
            (
                "redirect_uri",
                state.config.auth.github.callback_url.as_str(),
            ),
        ])
        .send()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .json()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let access_token = token_response
        .access_token
        .ok_or_else(|| AppError::Internal("GitHub não retornou access_token".to_string()))?;

    let user: GitHubUser = state
        .http_client
        .get(GITHUB_USER_URL)
        .header("Accept", "application/json")
        .bearer_auth(&access_token)
        .send()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .json()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(user.name.unwrap_or(user.login))
}

// =============================================================================
// Logout
// =============================================================================

/// GET /logout
///
/// Clears session cookies and redirects to root.
async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .remove(Cookie::build(("session", "")).path("/"))
        .remove(Cookie::build(("oauth_state", "")).path("/"));

    (jar, Redirect::to("/"))
}

// =============================================================================
// Helpers
// =============================================================================

/// Generate a random CSRF state token
fn generate_csrf_state() -> String {
    use base64::{Engine as _, engine::general_purpose};
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Verify CSRF state from cookie matches callback state
fn verify_csrf_state(callback_state: Option<&str>, jar: &CookieJar) -> Result<(), AppError> {
    let stored = jar.get("oauth_state").map(|cookie| cookie.value());

    match (callback_state, stored) {
        (Some(received), Some(expected)) if received == expected => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
