//! Typed error hierarchy for the Archivo+ client.
//!
//! Two enums cover the library:
//! - `ApiError` — anything that can go wrong talking to the REST API
//! - `ValidationError` — client-side form checks that never reach the wire

use thiserror::Error;

/// One rule of the password policy enforced before a reset request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
}

impl PasswordRule {
    pub fn message(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "must be at least 8 characters long",
            PasswordRule::Uppercase => "must contain at least one uppercase letter",
            PasswordRule::Lowercase => "must contain at least one lowercase letter",
            PasswordRule::Digit => "must contain at least one digit",
        }
    }
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Client-side validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Password {}", join_rules(.0))]
    WeakPassword(Vec<PasswordRule>),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Field '{0}' is required")]
    Required(&'static str),

    #[error("Key must be exactly {expected} letters A-Z (got {actual} characters)")]
    KeyLength { expected: usize, actual: usize },

    #[error("User must have a profile assigned")]
    MissingProfile,

    #[error("The administrator account cannot be {0}")]
    ProtectedAccount(&'static str),

    #[error("Unknown capability '{0}'")]
    UnknownCapability(String),
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(|r| r.message())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from the HTTP client and the auth/resource layers built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_password_lists_every_rule() {
        let err = ValidationError::WeakPassword(vec![PasswordRule::Uppercase, PasswordRule::Digit]);
        let msg = err.to_string();
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
    }

    #[test]
    fn status_error_carries_code() {
        let err = ApiError::Status {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn validation_converts_into_api_error() {
        let err: ApiError = ValidationError::PasswordMismatch.into();
        match &err {
            ApiError::Validation(ValidationError::PasswordMismatch) => {}
            _ => panic!("Expected ApiError::Validation(PasswordMismatch)"),
        }
        assert_eq!(err.status(), None);
    }

    #[test]
    fn key_length_error_carries_sizes() {
        let err = ValidationError::KeyLength {
            expected: 3,
            actual: 5,
        };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ValidationError::MissingProfile);
        assert_std_error(&ApiError::Forbidden("x".into()));
    }
}
