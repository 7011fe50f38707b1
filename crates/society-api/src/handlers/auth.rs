//! Authentication handlers
//!
//! Endpoints for admin login, logout and session lookup. The session token is
//! only ever sent in the `Set-Cookie` header, never in a response body.

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderName, HeaderValue},
    response::AppendHeaders,
    Json,
};
use society_service::dto::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};
use society_service::AuthService;

use crate::extractors::{SessionToken, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

type CookieHeader = AppendHeaders<[(HeaderName, HeaderValue); 1]>;

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieHeader, Json<LoginResponse>)> {
    let outcome = AuthService::new(state.service_context())
        .login(request)
        .await?;

    let cookie = session_cookie(
        state.cookie_name(),
        &outcome.token,
        state.config().session.ttl_seconds(),
        state.config().app.env.is_production(),
    )?;
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse::new(outcome.user)),
    ))
}

/// Logout; succeeds whether or not a session exists
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<(CookieHeader, Json<LogoutResponse>)> {
    AuthService::new(state.service_context())
        .logout(token.as_deref())
        .await?;

    let cleared = session_cookie(
        state.cookie_name(),
        "",
        0,
        state.config().app.env.is_production(),
    )?;
    Ok((AppendHeaders([(SET_COOKIE, cleared)]), Json(LogoutResponse::ok())))
}

/// Current session
///
/// GET /auth/session
pub async fn session(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<SessionResponse>> {
    let user = AuthService::new(state.service_context())
        .current_user(token.as_deref())
        .await?;
    Ok(Json(SessionResponse::from_user(user)))
}

/// `Set-Cookie` value for the session cookie; `max_age` 0 clears it
fn session_cookie(
    name: &str,
    value: &str,
    max_age: i64,
    secure: bool,
) -> ApiResult<HeaderValue> {
    let mut cookie = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).map_err(ApiError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("society_session", "abc-_123", 1800, false).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("society_session=abc-_123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=1800"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_cleared_cookie_in_production() {
        let cookie = session_cookie("society_session", "", 0, true).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("society_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.ends_with("; Secure"));
    }
}
