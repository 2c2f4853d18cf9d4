//! Client-side form checks.
//!
//! Only the checks the forms perform before posting: required fields, the
//! password policy of the reset view, and the repository key shape. The
//! server remains the authority on everything else.

use crate::errors::{PasswordRule, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const REPO_KEY_LEN: usize = 4;

/// Every password rule `password` breaks, in policy order.
pub fn password_violations(password: &str) -> Vec<PasswordRule> {
    let mut broken = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        broken.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        broken.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        broken.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        broken.push(PasswordRule::Digit);
    }
    broken
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let broken = password_violations(password);
    if broken.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword(broken))
    }
}

/// The reset form: policy first, then the confirmation must match.
pub fn validate_password_reset(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    validate_password(password)?;
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Normalize a repository key: trimmed, uppercased, exactly four letters.
pub fn normalize_repo_key(clave: &str) -> Result<String, ValidationError> {
    let key = clave.trim().to_uppercase();
    require("clave", &key)?;
    let len = key.chars().count();
    if len != REPO_KEY_LEN || !key.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::KeyLength {
            expected: REPO_KEY_LEN,
            actual: len,
        });
    }
    Ok(key)
}
