//! Validated lookup tables and the range lookups performed on them.
//!
//! All three tables are ordered lists rather than maps: when ranges overlap, the
//! entry configured first wins. Tables are checked once when they are built and
//! are immutable afterwards, so they can be shared freely between threads.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::model::{District, PassNumber, PostalCode};
use crate::ports::{ConfigError, SourceError};

/// Inclusive range of four-digit postal code numbers.
///
/// Bounds are compared as strings, which matches numeric order only because
/// every bound and every [`PostalCode`] number is exactly four digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCodeRange {
    start: String,
    end: String,
}

impl PostalCodeRange {
    /// Build a range from its two bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBound`] for a bound that is not four ASCII
    /// digits and [`ConfigError::InvertedRange`] when `start > end`.
    pub fn new(start: &str, end: &str) -> Result<Self, ConfigError> {
        let start = four_digits(start)?;
        let end = four_digits(end)?;
        if start > end {
            return Err(ConfigError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Whether the postal code number falls within the range.
    #[must_use]
    pub fn contains(&self, postal_code: &PostalCode) -> bool {
        let number = postal_code.number();
        self.start.as_str() <= number && number <= self.end.as_str()
    }
}

impl fmt::Display for PostalCodeRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(formatter, "{}", self.start)
        } else {
            write!(formatter, "{}-{}", self.start, self.end)
        }
    }
}

fn four_digits(bound: &str) -> Result<String, ConfigError> {
    if bound.len() == 4 && bound.chars().all(|ch| ch.is_ascii_digit()) {
        Ok(bound.to_owned())
    } else {
        Err(ConfigError::InvalidBound(bound.to_owned()))
    }
}

/// Postal code ranges that belong to one district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictRanges {
    district: District,
    ranges: Vec<PostalCodeRange>,
}

impl DistrictRanges {
    /// District owning the ranges.
    #[must_use]
    pub fn district(&self) -> District {
        self.district
    }

    /// Ranges in configuration order.
    #[must_use]
    pub fn ranges(&self) -> &[PostalCodeRange] {
        &self.ranges
    }
}

/// Postal code range where containers are missing for some or all letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerException {
    range: PostalCodeRange,
    letters: Vec<String>,
}

impl ContainerException {
    /// Range the exception applies to.
    #[must_use]
    pub fn range(&self) -> &PostalCodeRange {
        &self.range
    }

    /// Letter suffixes without a container. Empty means the whole range has none.
    #[must_use]
    pub fn letters(&self) -> &[String] {
        &self.letters
    }

    /// Whether an address with these letters inside the range has a container.
    #[must_use]
    pub fn has_container(&self, letters: &str) -> bool {
        !self.letters.is_empty() && !self.letters.iter().any(|excluded| excluded == letters)
    }
}

/// The district, pass number, and container exception tables, validated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WastePassTables {
    districts: Vec<DistrictRanges>,
    pass_numbers: Vec<(District, PassNumber)>,
    container_exceptions: Vec<ContainerException>,
}

impl WastePassTables {
    /// Start collecting table entries.
    #[must_use]
    pub fn builder() -> TablesBuilder {
        TablesBuilder::default()
    }

    /// Parse and validate a JSON table document.
    ///
    /// ```json
    /// {
    ///   "districts": [{ "district": "Noord", "ranges": [["1020", "1039"]] }],
    ///   "pass_numbers": [{ "district": "Noord", "pass_number": "80706D8A3F8604" }],
    ///   "container_exceptions": [{ "range": ["1020", "1020"], "letters": ["AB"] }]
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] for malformed JSON and [`SourceError::Config`]
    /// when the tables are inconsistent.
    pub fn from_json(document: &str) -> Result<Self, SourceError> {
        let document: TablesDocument = serde_json::from_str(document)?;
        Ok(document.into_builder()?.build()?)
    }

    /// District entries in configuration order.
    #[must_use]
    pub fn districts(&self) -> &[DistrictRanges] {
        &self.districts
    }

    /// Pass number entries in configuration order.
    #[must_use]
    pub fn pass_numbers(&self) -> &[(District, PassNumber)] {
        &self.pass_numbers
    }

    /// Container exceptions in configuration order.
    #[must_use]
    pub fn container_exceptions(&self) -> &[ContainerException] {
        &self.container_exceptions
    }

    /// First district with a range containing the postal code number.
    #[must_use]
    pub fn district_for(&self, postal_code: &PostalCode) -> Option<District> {
        self.districts
            .iter()
            .find(|entry| entry.ranges.iter().any(|range| range.contains(postal_code)))
            .map(DistrictRanges::district)
    }

    /// Pass number configured for the district, if any.
    #[must_use]
    pub fn pass_number_for(&self, district: District) -> Option<&PassNumber> {
        self.pass_numbers
            .iter()
            .find(|(candidate, _)| *candidate == district)
            .map(|(_, pass_number)| pass_number)
    }

    /// Whether the address has an on-street container.
    ///
    /// Only the first exception range containing the number is consulted.
    /// Numbers outside every exception range have a container.
    #[must_use]
    pub fn has_container(&self, postal_code: &PostalCode) -> bool {
        self.container_exceptions
            .iter()
            .find(|exception| exception.range.contains(postal_code))
            .is_none_or(|exception| exception.has_container(postal_code.letters()))
    }
}

/// Collects raw table entries; [`TablesBuilder::build`] validates them.
#[derive(Debug, Clone, Default)]
pub struct TablesBuilder {
    districts: Vec<(District, Vec<(String, String)>)>,
    pass_numbers: Vec<(District, String)>,
    container_exceptions: Vec<((String, String), Vec<String>)>,
}

impl TablesBuilder {
    /// Add the postal code ranges of a district.
    #[must_use]
    pub fn district<I, S>(mut self, district: District, ranges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let ranges = ranges
            .into_iter()
            .map(|(start, end)| (start.into(), end.into()))
            .collect();
        self.districts.push((district, ranges));
        self
    }

    /// Set the pass number of a district.
    #[must_use]
    pub fn pass_number<S: Into<String>>(mut self, district: District, pass_number: S) -> Self {
        self.pass_numbers.push((district, pass_number.into()));
        self
    }

    /// Mark letter suffixes within a range as having no container.
    #[must_use]
    pub fn container_exception<S, I, L>(mut self, range: (S, S), letters: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let (start, end) = range;
        let letters = letters.into_iter().map(Into::into).collect();
        self.container_exceptions
            .push(((start.into(), end.into()), letters));
        self
    }

    /// Mark a whole range as having no containers at all.
    #[must_use]
    pub fn no_containers<S: Into<String>>(self, range: (S, S)) -> Self {
        self.container_exception(range, Vec::<String>::new())
    }

    /// Validate the collected entries.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed ranges, duplicate districts,
    /// or exception letters that are not two ASCII letters. Pass numbers are
    /// kept exactly as given: a blank one is [`ConfigError::EmptyPassNumber`]
    /// and one with leading or trailing whitespace is
    /// [`ConfigError::PassNumberWhitespace`].
    pub fn build(self) -> Result<WastePassTables, ConfigError> {
        let mut seen = HashSet::new();
        let mut districts = Vec::with_capacity(self.districts.len());
        for (district, raw_ranges) in self.districts {
            if !seen.insert(district) {
                return Err(ConfigError::DuplicateDistrictRanges(district));
            }
            let ranges = raw_ranges
                .iter()
                .map(|(start, end)| PostalCodeRange::new(start, end))
                .collect::<Result<_, _>>()?;
            districts.push(DistrictRanges { district, ranges });
        }

        seen.clear();
        let mut pass_numbers = Vec::with_capacity(self.pass_numbers.len());
        for (district, pass_number) in self.pass_numbers {
            if !seen.insert(district) {
                return Err(ConfigError::DuplicatePassNumber(district));
            }
            if pass_number.trim().is_empty() {
                return Err(ConfigError::EmptyPassNumber(district));
            }
            if pass_number.trim() != pass_number {
                return Err(ConfigError::PassNumberWhitespace(district));
            }
            pass_numbers.push((district, PassNumber(pass_number)));
        }

        let mut container_exceptions = Vec::with_capacity(self.container_exceptions.len());
        for ((start, end), raw_letters) in self.container_exceptions {
            let range = PostalCodeRange::new(&start, &end)?;
            let letters = raw_letters
                .iter()
                .map(|letters| two_letters(letters))
                .collect::<Result<_, _>>()?;
            container_exceptions.push(ContainerException { range, letters });
        }

        tracing::debug!(
            districts = districts.len(),
            pass_numbers = pass_numbers.len(),
            container_exceptions = container_exceptions.len(),
            "waste pass tables validated"
        );

        Ok(WastePassTables {
            districts,
            pass_numbers,
            container_exceptions,
        })
    }
}

fn two_letters(raw: &str) -> Result<String, ConfigError> {
    if raw.len() == 2 && raw.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Ok(raw.to_ascii_uppercase())
    } else {
        Err(ConfigError::InvalidLetters(raw.to_owned()))
    }
}

/// Serialized form of the tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TablesDocument {
    #[serde(default)]
    districts: Vec<DistrictEntry>,
    #[serde(default)]
    pass_numbers: Vec<PassNumberEntry>,
    #[serde(default)]
    container_exceptions: Vec<ContainerExceptionEntry>,
}

#[derive(Debug, Deserialize)]
struct DistrictEntry {
    district: String,
    ranges: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct PassNumberEntry {
    district: String,
    pass_number: String,
}

#[derive(Debug, Deserialize)]
struct ContainerExceptionEntry {
    range: (String, String),
    // omitted means no containers in the whole range
    #[serde(default)]
    letters: Vec<String>,
}

impl TablesDocument {
    fn into_builder(self) -> Result<TablesBuilder, ConfigError> {
        let mut builder = WastePassTables::builder();
        for entry in self.districts {
            builder = builder.district(entry.district.parse()?, entry.ranges);
        }
        for entry in self.pass_numbers {
            builder = builder.pass_number(entry.district.parse()?, entry.pass_number);
        }
        for entry in self.container_exceptions {
            builder = builder.container_exception(entry.range, entry.letters);
        }
        Ok(builder)
    }
}
