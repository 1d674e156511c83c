//! Input validation helpers
//!
//! Centralized length limits and field rules. SQLite TEXT has no built-in
//! length enforcement, so every limit lives here.

use validator::ValidateEmail;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Names and titles: category title, menu item name, booking customer name
pub const MAX_NAME_LEN: usize = 255;

/// Category slugs
pub const MAX_SLUG_LEN: usize = 50;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 150;

/// First / last name on a profile
pub const MAX_PERSON_NAME_LEN: usize = 150;

/// Booking phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Cart quantities are a signed 16-bit column
pub const MAX_QUANTITY: i64 = i16::MAX as i64;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, "This field may not be blank."));
    }
    if value.chars().count() > max_len {
        return Err(AppError::field(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::field(
            field,
            format!("Ensure this field has no more than {max_len} characters."),
        ));
    }
    Ok(())
}

/// Slugs: letters, digits, `-` and `_`
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_required_text(slug, "slug", MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::field(
            "slug",
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
        ));
    }
    Ok(())
}

/// Email syntax and length
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    if email.len() > MAX_EMAIL_LEN || !email.validate_email() {
        return Err(AppError::field(field, "Enter a valid email address."));
    }
    Ok(())
}

/// Usernames: 1-150 chars of letters, digits and `@.+-_`
pub fn validate_username(username: &str) -> Result<(), AppError> {
    validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(AppError::field(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(())
}

/// Password strength: length, not purely numeric, not the username
pub fn validate_password(password: &str, username: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooWeak,
            format!("This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooWeak,
            format!("Password is too long (max {MAX_PASSWORD_LEN} characters)."),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooWeak,
            "This password is entirely numeric.",
        ));
    }
    if password.eq_ignore_ascii_case(username) {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooWeak,
            "The password is too similar to the username.",
        ));
    }
    Ok(())
}

/// Cart quantity: positive and fits the column
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::new(ErrorCode::CartInvalidQuantity)
            .with_detail("quantity", quantity));
    }
    Ok(())
}
