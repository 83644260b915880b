//! Phone Number Normalization
//!
//! Canonicalizes user-supplied phone numbers into gateway recipient
//! addresses. Pure functions, no I/O.

use crate::error::ApiError;

/// Domain suffix the gateway expects on individual recipient addresses.
pub const RECIPIENT_SUFFIX: &str = "@s.whatsapp.net";

/// Normalize a raw phone number to digits with the country code applied.
///
/// Strips every non-digit character, replaces a leading trunk `0` with
/// `country_code`, and prepends `country_code` when absent. Numbers that
/// already carry the country code pass through unchanged, so the
/// operation is idempotent.
///
/// Fails when the result has fewer than 10 or more than 15 digits.
pub fn normalize(raw: &str, country_code: &str) -> Result<String, ApiError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let normalized = if digits.starts_with(country_code) {
        digits
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("{country_code}{rest}")
    } else {
        format!("{country_code}{digits}")
    };

    if normalized.len() < 10 || normalized.len() > 15 {
        return Err(ApiError::Validation(format!(
            "Invalid phone number format: {raw}"
        )));
    }

    Ok(normalized)
}

/// Normalize a raw phone number into a full gateway recipient address.
///
/// Inputs already carrying the domain suffix pass through untouched.
pub fn to_recipient(raw: &str, country_code: &str) -> Result<String, ApiError> {
    if raw.contains(RECIPIENT_SUFFIX) {
        return Ok(raw.to_string());
    }
    Ok(format!(
        "{}{RECIPIENT_SUFFIX}",
        normalize(raw, country_code)?
    ))
}
