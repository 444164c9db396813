use super::Rejection;

/// Exact number of digits an accepted phone number has.
pub const PHONE_DIGITS: usize = 10;

#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Strips everything but digits and accepts exactly ten of them. No country
/// code or trunk prefix handling.
pub fn validate_phone(raw: &str) -> Result<String, Rejection> {
    let digits = digits_only(raw);
    if digits.len() == PHONE_DIGITS {
        Ok(digits)
    } else {
        Err(Rejection::PhoneLength {
            digits: digits.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_mobile() {
        assert_eq!(validate_phone("(049) 917-1023"), Ok("0499171023".into()));
        assert_eq!(validate_phone("0499 171 023"), Ok("0499171023".into()));
    }

    #[test]
    fn test_wrong_lengths() {
        assert_eq!(
            validate_phone("12345"),
            Err(Rejection::PhoneLength { digits: 5 })
        );
        assert_eq!(
            validate_phone("61 499 171 023"),
            Err(Rejection::PhoneLength { digits: 11 })
        );
        assert_eq!(validate_phone(""), Err(Rejection::PhoneLength { digits: 0 }));
    }

    #[test]
    fn test_accepted_values_are_ten_digits() {
        for raw in ["0499171023", "04-99-17-10-23", "ph: 0740561234", "499171023x0"] {
            if let Ok(value) = validate_phone(raw) {
                assert_eq!(value.len(), PHONE_DIGITS);
                assert!(value.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
