//! In-memory session store.
//!
//! One store per process. It starts `Loading`, settles on the answer from
//! `GET /auth/me/`, and from then on changes only through `login` and
//! `logout`. Nothing here touches the disk.

use crate::auth::IdentityBackend;
use crate::models::User;
use crate::models::perfil::{DEFAULT_PERFIL_COLOR, DEFAULT_PERFIL_NOMBRE};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(User),
    Anonymous,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
    auth_error: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the backend who is logged in. Every failure, whether transport,
    /// status or decode, is logged and settles the store as anonymous.
    pub async fn initialize(&mut self, backend: &dyn IdentityBackend) {
        self.state = SessionState::Loading;
        self.state = match backend.current_user().await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = user.id, "session restored");
                SessionState::Authenticated(user)
            }
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "could not determine current user, continuing anonymously");
                SessionState::Anonymous
            }
        };
    }

    /// Adopt a user returned by a successful login call.
    pub fn login(&mut self, user: User) {
        self.auth_error = None;
        self.state = SessionState::Authenticated(user);
    }

    /// Best-effort server logout. The local session ends regardless.
    pub async fn logout(&mut self, backend: &dyn IdentityBackend) {
        if let Err(e) = backend.logout().await {
            tracing::warn!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.state = SessionState::Anonymous;
    }

    /// Keep the last login failure for the login view.
    pub fn record_auth_error(&mut self, message: impl Into<String>) {
        self.auth_error = Some(message.into());
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// True only when the user's profile map grants `key` explicitly.
    pub fn has_permission(&self, key: &str) -> bool {
        self.user()
            .and_then(|u| u.perfil_info.as_ref())
            .and_then(|p| p.permisos.as_ref())
            .and_then(|permisos| permisos.get(key))
            .copied()
            .unwrap_or(false)
    }

    pub fn perfil_color(&self) -> &str {
        self.user()
            .and_then(|u| u.perfil_info.as_ref())
            .and_then(|p| p.color.as_deref())
            .filter(|c| c.starts_with('#'))
            .unwrap_or(DEFAULT_PERFIL_COLOR)
    }

    pub fn perfil_nombre(&self) -> &str {
        self.user()
            .and_then(|u| u.perfil_info.as_ref())
            .map(|p| p.nombre.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PERFIL_NOMBRE)
    }
}
