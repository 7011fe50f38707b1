//! Authentication service
//!
//! Handles admin login, logout, session lookup and role checks.

use society_common::is_well_formed_token;
use society_core::{AdminUser, AuditAction, AuditLogEntry, Role};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginOutcome, LoginRequest};

use super::audit::AuditService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginOutcome> {
        request.validate()?;

        let user = self
            .ctx
            .directory()
            .verify(&request.email, &request.password)
            .inspect_err(|_| warn!("Login failed"))?;

        let session = self.ctx.sessions().create(&user).await?;
        info!(user_id = %user.id, role = %user.role, "Admin logged in");

        AuditService::new(self.ctx)
            .record(AuditLogEntry::new(&user, AuditAction::AuthLogin, None))
            .await;

        Ok(LoginOutcome {
            token: session.id,
            user,
        })
    }

    /// Destroy the session behind `token`. Logging out twice is not an error.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: Option<&str>) -> ServiceResult<()> {
        let Some(token) = token.filter(|t| is_well_formed_token(t)) else {
            return Ok(());
        };

        // Resolve the user first so the audit entry has an actor
        let session = self.ctx.sessions().validate(token).await?;
        self.ctx.sessions().destroy(token).await?;

        if let Some(session) = session {
            info!(user_id = %session.user_id, "Admin logged out");
            AuditService::new(self.ctx)
                .record(AuditLogEntry::new(&session.user, AuditAction::AuthLogout, None))
                .await;
        }
        Ok(())
    }

    /// The signed-in user, if the token names a live session
    pub async fn current_user(&self, token: Option<&str>) -> ServiceResult<Option<AdminUser>> {
        let Some(token) = token.filter(|t| is_well_formed_token(t)) else {
            return Ok(None);
        };
        let session = self.ctx.sessions().validate(token).await?;
        Ok(session.map(|s| s.user))
    }

    /// Resolve the session and check its role
    ///
    /// # Errors
    /// `Unauthorized` without a live session, `Forbidden` when the role is too low
    pub async fn authorize(&self, token: Option<&str>, required: Role) -> ServiceResult<AdminUser> {
        let user = self
            .current_user(token)
            .await?
            .ok_or(ServiceError::Unauthorized)?;

        if !user.role.allows(required) {
            debug!(user_id = %user.id, role = %user.role, %required, "Role check failed");
            return Err(ServiceError::forbidden(required));
        }
        Ok(user)
    }
}
