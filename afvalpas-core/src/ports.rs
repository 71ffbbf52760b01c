//! Error types and the trait through which lookup tables are obtained.

use std::fmt;
use std::io::Error as IoError;

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{District, UnknownDistrict};
use crate::tables::WastePassTables;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Input did not match the postal code or house number format.
pub enum ValidationError {
    /// No postal code was supplied.
    #[error("Postal code is required")]
    PostalCodeRequired,
    /// Postal code is not six characters once whitespace is removed.
    #[error("Postal code must be 6 characters (4 numbers + 2 letters)")]
    PostalCodeLength,
    /// The first four characters are not all digits.
    #[error("First 4 characters must be numbers")]
    PostalCodeNumber,
    /// The last two characters are not both letters.
    #[error("Last 2 characters must be letters")]
    PostalCodeLetters,
    /// House number contains something other than digits.
    #[error("House number must be a number")]
    HouseNumber,
}

impl ValidationError {
    /// Name of the request field the error refers to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::HouseNumber => "house_number",
            ValidationError::PostalCodeRequired
            | ValidationError::PostalCodeLength
            | ValidationError::PostalCodeNumber
            | ValidationError::PostalCodeLetters => "postal_code",
        }
    }
}

/// Resolution step that produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No district range covers the postal code.
    District,
    /// The district has no pass number configured.
    PassNumber,
}

impl fmt::Display for Stage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::District => "District",
            Stage::PassNumber => "Pass number",
        };
        write!(formatter, "{label}")
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Outcome of a lookup that did not yield a waste pass.
pub enum ResolveError {
    /// The caller supplied malformed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The input was valid but no configuration matched it.
    #[error("{0} not found")]
    NotFound(Stage),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Malformed lookup tables, rejected before any request is served.
pub enum ConfigError {
    /// A range bound is not exactly four ASCII digits.
    #[error("Range bound {0:?} must be exactly 4 digits")]
    InvalidBound(String),
    /// A range starts after it ends.
    #[error("Range {start}..={end} starts after it ends")]
    InvertedRange {
        /// Lower bound as configured.
        start: String,
        /// Upper bound as configured.
        end: String,
    },
    /// A district is listed twice in the range table.
    #[error("District {0} has more than one range entry")]
    DuplicateDistrictRanges(District),
    /// A district is listed twice in the pass number table.
    #[error("District {0} has more than one pass number")]
    DuplicatePassNumber(District),
    /// A pass number is empty.
    #[error("District {0} has an empty pass number")]
    EmptyPassNumber(District),
    /// A pass number has leading or trailing whitespace.
    #[error("Pass number of district {0} has surrounding whitespace")]
    PassNumberWhitespace(District),
    /// A container exception lists something other than two letters.
    #[error("Container exception letters {0:?} must be exactly 2 letters")]
    InvalidLetters(String),
    /// A district name in a table document is not recognised.
    #[error(transparent)]
    UnknownDistrict(#[from] UnknownDistrict),
}

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading tables from a source.
pub enum SourceError {
    /// Reading a table file failed.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
    /// The table document is not valid JSON for the expected shape.
    #[error("Parse error: {0}")]
    Json(#[from] JsonError),
    /// Fetching a remote table document failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The tables parsed but are inconsistent.
    #[error("Invalid tables: {0}")]
    Config(#[from] ConfigError),
}

#[async_trait]
/// Trait for backends that provide the waste-pass lookup tables.
pub trait TableSource: Send + Sync {
    /// Short human-readable description, used in logs.
    fn name(&self) -> &str;

    /// Load and validate the tables.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the tables cannot be read or fail validation.
    async fn load(&self) -> Result<WastePassTables, SourceError>;
}
