use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use phenix_core::auth::Session;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};
use crate::routes::paths;

pub const SESSION_COOKIE: &str = "phenix_session";
pub const MALFORMED_LOGIN: &str = "Identifiant et mot de passe requis";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}"
    )
}

fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty())
                .then(|| value.to_string())
        })
}

fn with_cookie(mut response: Response, cookie: &str) -> AppResult<Response> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|_| AppError::internal("invalid session cookie"))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "malformed login request");
        AppError::bad_request(MALFORMED_LOGIN)
    })?;
    let crypto = Arc::clone(&state.crypto);
    let admin = Arc::clone(&state.admin);
    let LoginRequest { username, password } = request;
    let attempted = username.clone();

    // Argon2 verification is CPU bound.
    let verified = tokio::task::spawn_blocking(move || {
        admin.verify(&crypto, &username, &password)
    })
    .await
    .map_err(|err| AppError::internal(err.to_string()))??;

    if !verified {
        warn!(username = %attempted, "admin login rejected");
        return Err(AppError::new(
            StatusCode::UNAUTHORIZED,
            "Identifiants invalides",
        ));
    }

    let issued = state.sessions.create(&attempted).await?;
    info!(username = %attempted, "admin logged in");

    let response = Json(json!({
        "success": true,
        "username": issued.session.username,
        "expiresAt": issued.session.expires_at,
    }))
    .into_response();
    with_cookie(
        response,
        &session_cookie(&issued.token, state.config.auth.session_ttl.as_secs()),
    )
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&token).await;
    }
    let response = Json(json!({ "success": true })).into_response();
    with_cookie(response, &cleared_session_cookie())
}

pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let session = match session_token(&headers) {
        Some(token) => state.sessions.validate(&token).await,
        None => None,
    };
    Json(json!({
        "authenticated": session.is_some(),
        "username": session.map(|s| s.username),
    }))
}

async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = session_token(headers)?;
    state.sessions.validate(&token).await
}

/// Guards the admin API; the session is available to handlers as an
/// `Extension<Session>`.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = current_session(&state, request.headers())
        .await
        .ok_or_else(AppError::unauthorized)?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Page variant of [`require_admin`]: visitors without a session are sent
/// to the login page.
pub async fn require_admin_page(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match current_session(&state, request.headers()).await {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => Redirect::to(paths::ADMIN_LOGIN_PAGE).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; phenix_session=abc123; lang=fr"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("phenix_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("tok", 86_400);
        assert!(cookie.starts_with("phenix_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
    }
}
