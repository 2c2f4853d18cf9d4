//! Calls against the `/auth/` endpoints.
//!
//! `AuthApi` is the real implementation. The session store only sees it
//! through `IdentityBackend`, so tests can hand it a scripted double.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, RawResponse};
use crate::errors::{ApiError, ApiResult};
use crate::models::User;
use crate::validation::validate_password_reset;

pub const DEFAULT_LOGIN_ERROR: &str = "Invalid credentials";

/// The two calls the session store needs from the auth server.
/// Real implementation: `AuthApi`. Test double: `ScriptedBackend` in
/// `session`'s tests.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// `Ok(None)` when the server reports no active session.
    async fn current_user(&self) -> ApiResult<Option<User>>;

    async fn logout(&self) -> ApiResult<()>;
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
struct ResetPasswordRequest<'a> {
    uid: &'a str,
    token: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Clones share the client's connection pool and cookie jar.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `POST /auth/login/`. The returned user goes straight into
    /// `SessionStore::login`.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let raw = self
            .client
            .send_raw(Method::POST, "auth/login/", Some(request))
            .await?;
        let user = login_outcome(raw)?;
        tracing::info!(user_id = user.id, email = %user.email, "logged in");
        Ok(user)
    }

    /// `POST /auth/forgot-password/`. Returns the server's confirmation text.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        let body = serde_json::json!({ "email": email.trim() });
        let raw = self
            .client
            .send_raw(Method::POST, "auth/forgot-password/", Some(&body))
            .await?;
        message_outcome(raw, "If the email exists, a reset link has been sent")
    }

    /// `POST /auth/reset-password/`, after the local policy and
    /// confirmation checks pass. Nothing is sent when they fail.
    pub async fn reset_password(
        &self,
        uid: &str,
        token: &str,
        password: &str,
        confirmation: &str,
    ) -> ApiResult<String> {
        validate_password_reset(password, confirmation)?;
        let body = ResetPasswordRequest {
            uid,
            token,
            password,
        };
        let raw = self
            .client
            .send_raw(Method::POST, "auth/reset-password/", Some(&body))
            .await?;
        message_outcome(raw, "Password updated")
    }
}

#[async_trait]
impl IdentityBackend for AuthApi {
    async fn current_user(&self) -> ApiResult<Option<User>> {
        let value = self.client.get_value("auth/me/", &[]).await?;
        parse_current_user(value)
    }

    async fn logout(&self) -> ApiResult<()> {
        self.client.post_empty("auth/logout/").await?;
        tracing::info!("logged out");
        Ok(())
    }
}

/// `{authenticated: false}` means anonymous whatever else the body holds.
pub fn parse_current_user(value: serde_json::Value) -> ApiResult<Option<User>> {
    if value.get("authenticated").and_then(|v| v.as_bool()) == Some(false) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Interpret a login response of any status.
///
/// A 4xx body with a `message` is a credentials failure, not a transport
/// one, so the message is kept for the login form.
pub fn login_outcome(raw: RawResponse) -> ApiResult<User> {
    if raw.status.is_server_error() {
        return Err(ApiError::Status {
            status: raw.status.as_u16(),
            message: raw
                .server_message()
                .unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string()),
        });
    }
    let reply: LoginReply = serde_json::from_value(raw.body.clone()).unwrap_or(LoginReply {
        success: false,
        message: raw.server_message(),
        user: None,
    });
    match reply {
        LoginReply {
            success: true,
            user: Some(user),
            ..
        } if raw.status.is_success() => Ok(user),
        LoginReply { message, .. } => Err(ApiError::InvalidCredentials(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string()),
        )),
    }
}

fn message_outcome(raw: RawResponse, default: &str) -> ApiResult<String> {
    let message = raw.server_message();
    if raw.status.is_success() {
        return Ok(message.unwrap_or_else(|| default.to_string()));
    }
    if raw.status.is_client_error() {
        // DRF field errors come back as {"field": ["msg"]}.
        let message = message.or_else(|| first_field_error(&raw.body));
        return Err(ApiError::Rejected(
            message.unwrap_or_else(|| "Request rejected".to_string()),
        ));
    }
    Err(ApiError::Status {
        status: raw.status.as_u16(),
        message: message.unwrap_or_else(|| "request failed".to_string()),
    })
}

fn first_field_error(body: &serde_json::Value) -> Option<String> {
    body.as_object()?.values().find_map(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items.first()?.as_str().map(str::to_string),
        _ => None,
    })
}
