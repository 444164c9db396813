use super::Rejection;

fn malformed(reason: &str) -> Rejection {
    Rejection::EmailMalformed {
        reason: reason.to_string(),
    }
}

/// Structural check only: one `@`, a non-empty local part and a dotted
/// domain without empty labels.
pub fn validate_email(raw: &str) -> Result<String, Rejection> {
    let email = raw.trim();

    if email.is_empty() {
        return Err(Rejection::EmptyValue);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(malformed("contains whitespace"));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed("must contain exactly one '@'"));
    };

    if local.is_empty() {
        return Err(malformed("empty local part"));
    }
    if !domain.contains('.') {
        return Err(malformed("domain has no '.'"));
    }
    if domain.split('.').any(str::is_empty) {
        return Err(malformed("domain has an empty label"));
    }

    Ok(email.to_string())
}
