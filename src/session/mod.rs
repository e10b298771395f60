//! Session provider module.
//!
//! Exposes the current bearer token and role to every collaborator that needs auth context.

use std::sync::RwLock;

use crate::errors::AppError;
use crate::models::UserRole;

/// Read-only view of the authenticated session.
pub trait SessionProvider: Send + Sync {
    fn current_token(&self) -> Option<String>;

    fn current_role(&self) -> Option<UserRole>;

    /// Attach `Authorization: Bearer <token>` when a token is present.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Fail with `Unauthorized` unless a token is present.
pub fn require_token(session: &dyn SessionProvider) -> Result<(), AppError> {
    match session.current_token() {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(AppError::Unauthorized("No active session".to_string())),
    }
}

/// Fail with `Forbidden` unless the session belongs to an administrator.
pub fn require_admin(session: &dyn SessionProvider) -> Result<(), AppError> {
    require_token(session)?;
    match session.current_role() {
        Some(UserRole::Admin) => Ok(()),
        _ => Err(AppError::Forbidden(
            "Administrator role required".to_string(),
        )),
    }
}

/// Session fixed at construction time (CLI flags, environment).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
    role: Option<UserRole>,
}

impl StaticSession {
    pub fn new(token: Option<String>, role: Option<UserRole>) -> Self {
        Self { token, role }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn current_role(&self) -> Option<UserRole> {
        self.role
    }
}

/// Session that can be replaced after login or cleared on logout.
#[derive(Debug, Default)]
pub struct SharedSession {
    inner: RwLock<StaticSession>,
}

impl SharedSession {
    pub fn new(initial: StaticSession) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub fn sign_in(&self, token: String, role: UserRole) {
        self.replace(StaticSession::new(Some(token), Some(role)));
    }

    pub fn sign_out(&self) {
        self.replace(StaticSession::anonymous());
    }

    fn replace(&self, session: StaticSession) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = session;
    }

    fn snapshot(&self) -> StaticSession {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SessionProvider for SharedSession {
    fn current_token(&self) -> Option<String> {
        self.snapshot().token
    }

    fn current_role(&self) -> Option<UserRole> {
        self.snapshot().role
    }
}
