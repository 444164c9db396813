use serde::{Deserialize, Serialize};

/// One of the seven normalized contact attributes produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Name,
    Mobile,
    Landline,
    Address,
    Email,
    DateOfBirth,
    LastSeenDate,
}

impl CanonicalField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Mobile,
        Self::Landline,
        Self::Address,
        Self::Email,
        Self::DateOfBirth,
        Self::LastSeenDate,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mobile => "mobile",
            Self::Landline => "landline",
            Self::Address => "address",
            Self::Email => "email",
            Self::DateOfBirth => "date_of_birth",
            Self::LastSeenDate => "last_seen_date",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalField {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(Self::Name),
            "mobile" => Ok(Self::Mobile),
            "landline" => Ok(Self::Landline),
            "address" => Ok(Self::Address),
            "email" => Ok(Self::Email),
            "date_of_birth" | "dob" => Ok(Self::DateOfBirth),
            "last_seen_date" | "last_seen" => Ok(Self::LastSeenDate),
            _ => Err(crate::Error::InvalidFieldName(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trips_through_str() {
        for field in CanonicalField::ALL {
            assert_eq!(field.as_str().parse::<CanonicalField>().unwrap(), field);
        }
    }

    #[test]
    fn test_field_accepts_aliases() {
        assert_eq!("DOB".parse::<CanonicalField>().unwrap(), CanonicalField::DateOfBirth);
        assert_eq!(
            "last-seen".parse::<CanonicalField>().unwrap(),
            CanonicalField::LastSeenDate
        );
        assert!("fax".parse::<CanonicalField>().is_err());
    }
}
