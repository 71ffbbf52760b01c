//! Built-in waste pass tables for the municipality of Amsterdam.

use async_trait::async_trait;

use afvalpas_core::{
    model::District,
    ports::{ConfigError, SourceError, TableSource},
    tables::WastePassTables,
};

/// Postal code number ranges per district.
const DISTRICT_RANGES: &[(District, &[(&str, &str)])] = &[
    (District::Centrum, &[("1011", "1018")]),
    (District::Noord, &[("1020", "1039")]),
    (District::Oost, &[("1019", "1019"), ("1086", "1099")]),
    (District::Westpoort, &[("1040", "1049")]),
    (District::West, &[("1050", "1059")]),
    (District::NieuwWest, &[("1060", "1069")]),
    (District::Zuid, &[("1070", "1083")]),
    (District::Zuidoost, &[("1100", "1108")]),
    (District::Weesp, &[("1380", "1384")]),
];

const PASS_NUMBERS: &[(District, &str)] = &[
    (District::Centrum, "80706D8A189404"),
    (District::NieuwWest, "80706D8A2E9504"),
    (District::Noord, "80706D8A3F8604"),
    (District::Oost, "80706D8A4B9304"),
    (District::West, "80706D8A72BD04"),
    (District::Zuid, "80706DAA58604"),
    (District::Zuidoost, "80706D8AAD9604"),
    (District::Weesp, "80706D8AD88404"),
    (District::Westpoort, "80706D8A897004"),
];

/// Ranges where containers are missing: for the listed letters, or for the whole
/// range when no letters are listed.
const CONTAINERS_NOT_PRESENT: &[((&str, &str), &[&str])] = &[
    (("1011", "1011"), &["AB"]),
    (("1020", "1020"), &["AB"]),
    (("1019", "1100"), &[]),
];

/// Build the Amsterdam tables.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the embedded tables are inconsistent.
pub fn tables() -> Result<WastePassTables, ConfigError> {
    let mut builder = WastePassTables::builder();
    for (district, ranges) in DISTRICT_RANGES {
        builder = builder.district(*district, ranges.iter().copied());
    }
    for (district, pass_number) in PASS_NUMBERS {
        builder = builder.pass_number(*district, *pass_number);
    }
    for (range, letters) in CONTAINERS_NOT_PRESENT {
        builder = builder.container_exception(*range, letters.iter().copied());
    }
    builder.build()
}

/// Table source serving the embedded Amsterdam tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmsterdamTables;

#[async_trait]
impl TableSource for AmsterdamTables {
    fn name(&self) -> &str {
        "embedded Amsterdam tables"
    }

    async fn load(&self) -> Result<WastePassTables, SourceError> {
        Ok(tables()?)
    }
}
