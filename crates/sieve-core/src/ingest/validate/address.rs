use super::Rejection;

/// Accepts addresses that are long enough and start with something that
/// looks like a street number.
#[derive(Debug, Clone, Copy)]
pub struct AddressValidator {
    min_length: usize,
    digit_window: usize,
}

impl AddressValidator {
    #[must_use]
    pub const fn new(min_length: usize, digit_window: usize) -> Self {
        Self {
            min_length,
            digit_window,
        }
    }

    pub fn validate(&self, raw: &str) -> Result<String, Rejection> {
        let address = raw.trim();
        let length = address.chars().count();

        if length < self.min_length {
            return Err(Rejection::AddressTooShort {
                length,
                minimum: self.min_length,
            });
        }

        if !address
            .chars()
            .take(self.digit_window)
            .any(|c| c.is_ascii_digit())
        {
            return Err(Rejection::AddressMissingStreetNumber {
                window: self.digit_window,
            });
        }

        Ok(address.to_string())
    }
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new(10, 5)
    }
}
