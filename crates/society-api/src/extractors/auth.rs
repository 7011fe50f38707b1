//! Session extractors
//!
//! The session token travels in an HttpOnly cookie. `Authenticated<R>`
//! resolves it to the signed-in admin and enforces the minimum role `R`.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use society_core::{AdminUser, Role};
use society_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw session token from the cookie, if any
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(app_state.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());
        Ok(SessionToken(token))
    }
}

/// Minimum role demanded by an [`Authenticated`] extractor
pub trait RoleRequirement: Send + Sync + 'static {
    const ROLE: Role;
}

#[derive(Debug, Clone, Copy)]
pub struct ViewerRole;

#[derive(Debug, Clone, Copy)]
pub struct EditorRole;

#[derive(Debug, Clone, Copy)]
pub struct AdminRole;

impl RoleRequirement for ViewerRole {
    const ROLE: Role = Role::Viewer;
}

impl RoleRequirement for EditorRole {
    const ROLE: Role = Role::Editor;
}

impl RoleRequirement for AdminRole {
    const ROLE: Role = Role::Admin;
}

/// Signed-in admin holding at least the role `R`
///
/// Rejects with 401 without a live session and 403 when the role is too low.
#[derive(Debug, Clone)]
pub struct Authenticated<R> {
    pub user: AdminUser,
    _role: PhantomData<R>,
}

/// Any signed-in admin (read access)
pub type Viewer = Authenticated<ViewerRole>;
/// Content editors and admins
pub type Editor = Authenticated<EditorRole>;
/// Admins only
pub type Admin = Authenticated<AdminRole>;

#[async_trait]
impl<S, R> FromRequestParts<S> for Authenticated<R>
where
    S: Send + Sync,
    AppState: FromRef<S>,
    R: RoleRequirement,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = SessionToken::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = AuthService::new(app_state.service_context())
            .authorize(token.as_deref(), R::ROLE)
            .await?;

        Ok(Self {
            user,
            _role: PhantomData,
        })
    }
}
