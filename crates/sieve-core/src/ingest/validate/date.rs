use super::Rejection;

/// Dates are passed through in whatever format the document used; only
/// values without a single digit are rejected.
pub fn validate_date(raw: &str) -> Result<String, Rejection> {
    let date = raw.trim();
    if date.is_empty() {
        return Err(Rejection::EmptyValue);
    }
    if !date.chars().any(|c| c.is_ascii_digit()) {
        return Err(Rejection::DateMissingDigit);
    }
    Ok(date.to_string())
}
