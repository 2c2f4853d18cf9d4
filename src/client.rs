//! The configured HTTP client every request goes through.
//!
//! One `reqwest::Client` with a fixed base URL and an in-memory cookie jar,
//! so the session cookie set by the login endpoint rides along on every
//! later request. An explicit bearer token can be attached instead of (or
//! as well as) the cookie. There is no retry layer: callers inspect the
//! error themselves.

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ArchivoConfig;
use crate::errors::{ApiError, ApiResult};
use crate::models::ListResponse;

const USER_AGENT: &str = concat!("archivo/", env!("CARGO_PKG_VERSION"));

/// Status and decoded body of a response, regardless of status class.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl RawResponse {
    /// `message`, then `detail`, from the body.
    pub fn server_message(&self) -> Option<String> {
        server_message(&self.body)
    }
}

fn server_message(body: &serde_json::Value) -> Option<String> {
    ["message", "detail"]
        .iter()
        .find_map(|key| body.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, connect_timeout: Option<Duration>) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT);
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
            token: None,
        })
    }

    pub fn from_config(config: &ArchivoConfig) -> ApiResult<Self> {
        let mut client = Self::with_timeout(&config.api_base, config.connect_timeout)?;
        client.set_auth_token(config.token.clone());
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Attach (`Some`) or clear (`None`) the `Authorization: Bearer` header.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn has_auth_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an API path such as `users/5/`.
    pub fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, path = url.path(), "api request");
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> ApiResult<RawResponse> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) if status.is_success() => return Err(ApiError::Decode(e)),
                // Error pages are often HTML; keep the text for the message.
                Err(_) => serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            }
        };
        tracing::debug!(status = status.as_u16(), "api response");
        Ok(RawResponse { status, body })
    }

    fn check(raw: RawResponse) -> ApiResult<serde_json::Value> {
        if raw.status.is_success() {
            return Ok(raw.body);
        }
        let message = raw.server_message().unwrap_or_else(|| {
            raw.status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        if raw.status == StatusCode::FORBIDDEN {
            return Err(ApiError::Forbidden(message));
        }
        Err(ApiError::Status {
            status: raw.status.as_u16(),
            message,
        })
    }

    /// Send without turning non-2xx into an error. Used where the body of a
    /// 4xx carries the message to show (login, password reset).
    pub async fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<RawResponse> {
        let mut builder = self.request(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await
    }

    pub async fn get_value(&self, path: &str, query: &[(&str, String)]) -> ApiResult<serde_json::Value> {
        let builder = self.request(Method::GET, path)?.query(query);
        Self::check(self.execute(builder).await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let value = self.get_value(path, &[]).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET a collection and normalize bare-array or paginated bodies.
    /// Items that do not decode fail the whole call with `Decode`.
    pub async fn list<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Vec<T>> {
        let value = self.get_value(path, query).await?;
        Ok(ListResponse::from_value(value)?.into_items())
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.send_raw(Method::POST, path, Some(body)).await?;
        Ok(serde_json::from_value(Self::check(raw)?)?)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.send_raw(Method::PATCH, path, Some(body)).await?;
        Ok(serde_json::from_value(Self::check(raw)?)?)
    }

    /// POST with an empty body, discarding whatever comes back.
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let raw = self.send_raw::<serde_json::Value>(Method::POST, path, None).await?;
        Self::check(raw).map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let raw = self.send_raw::<serde_json::Value>(Method::DELETE, path, None).await?;
        Self::check(raw).map(|_| ())
    }
}

/// Parse the base URL, forcing a trailing slash so `Url::join` appends
/// instead of replacing the last segment.
fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_paths_under_base() {
        let client = ApiClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.url("users/5/").unwrap().as_str(),
            "http://localhost:8000/api/users/5/"
        );
        assert_eq!(
            client.url("/auth/me/").unwrap().as_str(),
            "http://localhost:8000/api/auth/me/"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let client = ApiClient::new("http://localhost:8000/api///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/");
    }

    #[test]
    fn rejects_bad_base_urls() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new("ftp://archivo/api"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn token_set_and_cleared() {
        let mut client = ApiClient::new("http://localhost:8000/api").unwrap();
        assert!(!client.has_auth_token());
        client.set_auth_token(Some("abc".into()));
        assert!(client.has_auth_token());
        client.set_auth_token(Some(String::new()));
        assert!(!client.has_auth_token());
    }

    #[test]
    fn check_prefers_message_then_detail() {
        let err = ApiClient::check(RawResponse {
            status: StatusCode::BAD_REQUEST,
            body: json!({"detail": "Not found.", "message": "Credenciales inválidas"}),
        })
        .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Credenciales inválidas");
            }
            other => panic!("Expected Status, got {:?}", other),
        }

        let err = ApiClient::check(RawResponse {
            status: StatusCode::NOT_FOUND,
            body: json!({"detail": "Not found."}),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Not found."));
    }

    #[test]
    fn check_falls_back_to_reason_phrase() {
        let err = ApiClient::check(RawResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: serde_json::Value::String("<html>oops</html>".into()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Internal Server Error"));
    }
}
