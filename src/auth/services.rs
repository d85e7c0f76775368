use lazy_static::lazy_static;
use regex::Regex;

use super::dto::RegisterRequest;
use crate::errors::AppError;

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims and lowercases in place, then checks username, email and password length.
pub(crate) fn validate_registration(req: &mut RegisterRequest) -> Result<(), AppError> {
    req.username = req.username.trim().to_string();
    req.email = normalize_email(&req.email);

    if req.username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !is_valid_email(&req.email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }
    Ok(())
}
