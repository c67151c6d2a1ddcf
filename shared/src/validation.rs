//! Form validation rules
//!
//! Pure functions shared by every form. Each returns the first failing rule;
//! callers must not touch the network unless they get `Ok`.

use crate::error::{ValidationError, ValidationResult};
use crate::models::{AppUpdateChoice, AppUpdateRequest};
use std::cmp::Ordering;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Whether a numeric input may hold `value`: digits only, empty allowed.
pub fn accepts_numeric_input(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Due-date policy in days, held as digit strings without leading zeros so
/// arbitrarily long values compare correctly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuePolicy {
    pub default_due_on: String,
    pub max_due_on: String,
}

/// Strip leading zeros; all-zero input becomes "0".
fn normalize_digits(value: &str) -> &str {
    match value.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    }
}

/// Numeric order of two normalized digit strings
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Check `default_due_on` / `max_due_on`.
///
/// Order: both present, both non-negative integers, then max strictly
/// greater than default.
pub fn validate_due_on(default_due_on: &str, max_due_on: &str) -> ValidationResult<DuePolicy> {
    let (default_due_on, max_due_on) = (default_due_on.trim(), max_due_on.trim());
    if default_due_on.is_empty() || max_due_on.is_empty() {
        return Err(ValidationError::DueOnRequired);
    }
    if !accepts_numeric_input(default_due_on) || !accepts_numeric_input(max_due_on) {
        return Err(ValidationError::DueOnNotNonNegative);
    }

    let default_due_on = normalize_digits(default_due_on);
    let max_due_on = normalize_digits(max_due_on);
    if cmp_digits(max_due_on, default_due_on) != Ordering::Greater {
        return Err(ValidationError::MaxDueOnNotGreater);
    }
    Ok(DuePolicy {
        default_due_on: default_due_on.to_string(),
        max_due_on: max_due_on.to_string(),
    })
}

/// Password strength: length, lowercase, uppercase, symbol, in that order.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::PasswordMissingSymbol);
    }
    Ok(())
}

/// Strength first, then confirmation match.
pub fn validate_password_change(new_password: &str, confirm_password: &str) -> ValidationResult<()> {
    validate_password(new_password)?;
    if new_password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Build the upsert payload for an app-update setting.
///
/// The link is trimmed and only kept when the update is enabled.
pub fn validate_app_update(
    client_id: &str,
    choice: AppUpdateChoice,
    download_link: &str,
) -> ValidationResult<AppUpdateRequest> {
    let download_link = match choice {
        AppUpdateChoice::Unset => return Err(ValidationError::AppUpdateRequired),
        AppUpdateChoice::Yes => {
            let link = download_link.trim();
            if link.is_empty() {
                return Err(ValidationError::DownloadLinkRequired);
            }
            link.to_string()
        }
        AppUpdateChoice::No => String::new(),
    };
    Ok(AppUpdateRequest {
        client_id: client_id.to_string(),
        app_update: choice,
        download_link,
    })
}
