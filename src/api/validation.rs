//! Request validation helpers
//!
//! Each submission endpoint validates a fixed list of required fields in
//! declaration order; the first missing field names the 400 response.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::middleware::ApiError;

/// Simple email shape check: local@domain.tld. Deliberately not
/// RFC-complete.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Check that every named field is present and non-empty.
///
/// Whitespace-only values count as missing. Fails on the first missing
/// field in the given order.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ApiError::validation(format!(
                "Missing required field: {}",
                name
            )));
        }
    }
    Ok(())
}

/// Validate the email shape
pub fn require_email(email: &str) -> Result<(), ApiError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email address"))
    }
}
