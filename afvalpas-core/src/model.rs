//! Domain data structures for postal codes, districts, and resolved waste passes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::ValidationError;

/// Municipal districts of Amsterdam that issue waste passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    /// Centrum.
    Centrum,
    /// Nieuw-West.
    #[serde(rename = "Nieuw-West")]
    NieuwWest,
    /// Noord.
    Noord,
    /// Oost.
    Oost,
    /// West.
    West,
    /// Zuid.
    Zuid,
    /// Zuidoost.
    Zuidoost,
    /// Weesp.
    Weesp,
    /// Westpoort, the harbour area.
    Westpoort,
}

impl District {
    /// Every district, in the municipality's canonical order.
    pub const ALL: [District; 9] = [
        District::Centrum,
        District::NieuwWest,
        District::Noord,
        District::Oost,
        District::West,
        District::Zuid,
        District::Zuidoost,
        District::Weesp,
        District::Westpoort,
    ];

    /// Display name as used by the municipality.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            District::Centrum => "Centrum",
            District::NieuwWest => "Nieuw-West",
            District::Noord => "Noord",
            District::Oost => "Oost",
            District::West => "West",
            District::Zuid => "Zuid",
            District::Zuidoost => "Zuidoost",
            District::Weesp => "Weesp",
            District::Westpoort => "Westpoort",
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name())
    }
}

/// Returned when a string names no known district.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown district: {0}")]
pub struct UnknownDistrict(pub String);

impl FromStr for District {
    type Err = UnknownDistrict;

    /// Accepts the display name ("Nieuw-West") or the constant name ("NIEUW_WEST"),
    /// ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().replace('_', "-");
        District::ALL
            .into_iter()
            .find(|district| district.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownDistrict(raw.to_owned()))
    }
}

/// Normalized Dutch postal code: four digits followed by two uppercase letters.
///
/// The number part keeps its zero padding. Range tables compare it as a string,
/// so it must always be exactly four characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode {
    number: String,
    letters: String,
}

impl PostalCode {
    /// Validate and normalize a raw postal code.
    ///
    /// Whitespace anywhere in the input is ignored and the letters are uppercased,
    /// so `"1001 aa"` becomes `1001 AA`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first constraint that failed.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let compact: Vec<char> = raw.chars().filter(|ch| !ch.is_whitespace()).collect();

        if compact.is_empty() {
            return Err(ValidationError::PostalCodeRequired);
        }

        let [n1, n2, n3, n4, l1, l2] = compact.as_slice() else {
            return Err(ValidationError::PostalCodeLength);
        };
        let digits = [*n1, *n2, *n3, *n4];
        let letters = [*l1, *l2];

        if !digits.iter().all(char::is_ascii_digit) {
            return Err(ValidationError::PostalCodeNumber);
        }
        if !letters.iter().all(char::is_ascii_alphabetic) {
            return Err(ValidationError::PostalCodeLetters);
        }

        Ok(Self {
            number: digits.iter().collect(),
            letters: letters.iter().map(char::to_ascii_uppercase).collect(),
        })
    }

    /// Four-digit number part, e.g. `"1011"`.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Two-letter suffix in uppercase, e.g. `"AB"`.
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.letters
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.number, self.letters)
    }
}

impl FromStr for PostalCode {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// House number as supplied by the caller, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HouseNumber(String);

impl HouseNumber {
    /// Validate a raw house number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HouseNumber`] unless the input is a non-empty run
    /// of ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() || !raw.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::HouseNumber);
        }
        Ok(Self(raw.to_owned()))
    }

    /// The digits as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WastePassRequest {
    /// Normalized postal code.
    pub postal_code: PostalCode,
    /// Optional house number. Accepted but not consulted when resolving.
    pub house_number: Option<HouseNumber>,
}

impl WastePassRequest {
    /// Validate raw request parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a malformed postal code or house number.
    pub fn parse(postal_code: &str, house_number: Option<&str>) -> Result<Self, ValidationError> {
        let postal_code = PostalCode::parse(postal_code)?;
        let house_number = house_number.map(HouseNumber::parse).transpose()?;
        Ok(Self {
            postal_code,
            house_number,
        })
    }
}

/// Identifier of the physical waste pass issued for a district.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassNumber(pub String);

impl PassNumber {
    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Resolved waste pass for a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WastePass {
    /// District the postal code belongs to.
    pub district: District,
    /// Pass number configured for that district.
    pub pass_number: PassNumber,
    /// Whether an on-street container serves the address.
    pub has_container: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_postal_code() {
        let code = PostalCode::parse("1000AA").unwrap();
        assert_eq!(code.number(), "1000");
        assert_eq!(code.letters(), "AA");
    }

    #[test]
    fn test_parse_strips_whitespace_and_uppercases() {
        let code = PostalCode::parse(" 1001 aa ").unwrap();
        assert_eq!(code.number(), "1001");
        assert_eq!(code.letters(), "AA");
        assert_eq!(code.to_string(), "1001 AA");
    }

    #[test]
    fn test_parse_keeps_zero_padding() {
        let code = PostalCode::parse("0999\tzz").unwrap();
        assert_eq!(code.number(), "0999");
    }

    #[test]
    fn test_parse_mixed_case_letters() {
        let code: PostalCode = "1234aB".parse().unwrap();
        assert_eq!(code.letters(), "AB");
    }

    #[test]
    fn test_parse_wrong_length() {
        for raw in ["12345AB", "123", "1234ABC", "1234A"] {
            assert_eq!(
                PostalCode::parse(raw),
                Err(ValidationError::PostalCodeLength),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_parse_empty_is_required() {
        assert_eq!(PostalCode::parse("   "), Err(ValidationError::PostalCodeRequired));
    }

    #[test]
    fn test_parse_non_digit_number_part() {
        assert_eq!(PostalCode::parse("ABCDEF"), Err(ValidationError::PostalCodeNumber));
        assert_eq!(PostalCode::parse("123ABC"), Err(ValidationError::PostalCodeNumber));
    }

    #[test]
    fn test_parse_non_letter_suffix() {
        assert_eq!(PostalCode::parse("1234A1"), Err(ValidationError::PostalCodeLetters));
        // Six characters, so the fifth digit lands in the letter part
        assert_eq!(PostalCode::parse("12345A"), Err(ValidationError::PostalCodeLetters));
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        assert_eq!(PostalCode::parse("1234ÄB"), Err(ValidationError::PostalCodeLetters));
        assert_eq!(PostalCode::parse("١٢٣٤AB"), Err(ValidationError::PostalCodeNumber));
    }

    #[test]
    fn test_house_number() {
        assert_eq!(HouseNumber::parse("42").unwrap().as_str(), "42");
        for raw in ["42A", "ABC", "12.3", ""] {
            assert_eq!(HouseNumber::parse(raw), Err(ValidationError::HouseNumber), "{raw}");
        }
    }

    #[test]
    fn test_request_house_number_optional() {
        let request = WastePassRequest::parse("1000AA", None).unwrap();
        assert!(request.house_number.is_none());

        let request = WastePassRequest::parse("1000AA", Some("1")).unwrap();
        assert_eq!(request.house_number, Some(HouseNumber("1".to_owned())));
    }

    #[test]
    fn test_request_postal_code_checked_first() {
        assert_eq!(
            WastePassRequest::parse("123", Some("42A")),
            Err(ValidationError::PostalCodeLength)
        );
    }

    #[test]
    fn test_district_from_str() {
        assert_eq!("Nieuw-West".parse::<District>(), Ok(District::NieuwWest));
        assert_eq!("NIEUW_WEST".parse::<District>(), Ok(District::NieuwWest));
        assert_eq!("zuidoost".parse::<District>(), Ok(District::Zuidoost));
        assert_eq!(
            "Haarlem".parse::<District>(),
            Err(UnknownDistrict("Haarlem".to_owned()))
        );
    }

    #[test]
    fn test_district_names_round_trip() {
        for district in District::ALL {
            assert_eq!(district.name().parse::<District>(), Ok(district));
        }
    }
}
