use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    routing::post,
    Router,
};
use axum_extra::extract::CookieJar;
use freight_store::Store;
use freight_types::{ApiResponse, AuthSession, ChangePasswordRequest, LoginRequest, User};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

pub const SESSION_COOKIE: &str = "session_token";

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// The authenticated account, placed in request extensions by `require_api_auth`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

pub fn auth_routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", post(handle_login))
        .route("/api/v1/auth/logout", post(handle_logout))
        .route("/api/v1/auth/change-password", post(handle_change_password))
}

/// `Set-Cookie` value for a fresh session.
pub fn session_cookie(token: &str, ttlMinutes: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={}",
        ttlMinutes * 60
    )
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0")
}

/// Bearer token if present, otherwise the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn with_cookie(mut response: Response, cookie: &str) -> Response {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        Err(e) => warn!("could not encode session cookie: {e}"),
    }
    response
}

async fn handle_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let session = state.store.login(&body).await?;
    let cookie = session_cookie(&session.token, state.store.settings().session_ttl_minutes);
    let response = Json(ApiResponse::<AuthSession>::ok("Login successful", session)).into_response();
    Ok(with_cookie(response, &cookie))
}

async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.store.logout(&token).await;
    }
    let response = Json(ApiResponse::ok("Logged out", ())).into_response();
    with_cookie(response, &expired_session_cookie())
}

async fn handle_change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.store.change_password(&body).await?;
    Ok(Json(ApiResponse::ok("Password changed, please sign in again", ())))
}

/// Middleware for API routes: resolves the Bearer token or session cookie
/// to an active user.
pub async fn require_api_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = token_from_headers(request.headers()) else {
        return ApiError::unauthorized().into_response();
    };

    match state.store.authenticate(&token).await {
        Ok(user) => {
            debug!("{} {} as {}", request.method(), request.uri().path(), user.username);
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Middleware for page routes: back-office pages need a live session cookie,
/// everything else is public.
pub async fn require_page_auth(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let isAdminPage = path == "/admin" || path.starts_with("/admin/");
    if !isAdminPage {
        return next.run(request).await;
    }

    let cookieToken = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string());

    let isAuthorized = match cookieToken {
        Some(token) => state.store.authenticate(&token).await.is_ok(),
        None => false,
    };

    if !isAuthorized {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

/// Rejects callers that are not administrators.
pub fn require_admin(user: &User) -> ApiResult<()> {
    if user.role == freight_types::UserRole::Admin {
        Ok(())
    } else {
        Err(ApiError::forbidden("Administrator access required"))
    }
}
