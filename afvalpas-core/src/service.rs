//! High-level service facade resolving waste passes against the current tables.

use std::sync::{Arc, PoisonError, RwLock};

use crate::model::{District, PassNumber, WastePass, WastePassRequest};
use crate::ports::{ResolveError, SourceError, Stage, TableSource};
use crate::tables::{PostalCodeRange, WastePassTables};

/// One row of the district overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictOverview {
    /// The district.
    pub district: District,
    /// Its postal code ranges in configuration order.
    pub ranges: Vec<PostalCodeRange>,
    /// Configured pass number, if any.
    pub pass_number: Option<PassNumber>,
}

/// Public entry point for resolving waste passes.
pub struct WastePassService {
    tables: RwLock<Arc<WastePassTables>>,
}

impl WastePassService {
    /// Create a new service bound to the provided tables.
    #[must_use]
    pub fn new(tables: WastePassTables) -> Self {
        Self {
            tables: RwLock::new(Arc::new(tables)),
        }
    }

    /// Load the tables from a source and create a service for them.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source cannot provide valid tables.
    pub async fn load(source: &dyn TableSource) -> Result<Self, SourceError> {
        let tables = source.load().await?;
        tracing::info!(
            source = source.name(),
            districts = tables.districts().len(),
            "loaded waste pass tables"
        );
        Ok(Self::new(tables))
    }

    /// Snapshot of the tables currently in use.
    #[must_use]
    pub fn tables(&self) -> Arc<WastePassTables> {
        Arc::clone(&self.tables.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in a new set of tables.
    ///
    /// Lookups already running finish against the tables they started with.
    pub fn replace_tables(&self, tables: WastePassTables) {
        let tables = Arc::new(tables);
        *self.tables.write().unwrap_or_else(PoisonError::into_inner) = tables;
        tracing::info!("replaced waste pass tables");
    }

    /// Resolve district, pass number, and container availability for a postal code.
    ///
    /// The house number is validated but does not influence the result.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Validation`] for malformed input and
    /// [`ResolveError::NotFound`] when no district or pass number is configured.
    pub fn resolve_waste_pass(
        &self,
        postal_code: &str,
        house_number: Option<&str>,
    ) -> Result<WastePass, ResolveError> {
        let request = WastePassRequest::parse(postal_code, house_number).inspect_err(|err| {
            tracing::debug!(field = err.field(), %err, "rejected waste pass request");
        })?;
        self.resolve(&request)
    }

    /// Resolve an already validated request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when no district or pass number is configured.
    pub fn resolve(&self, request: &WastePassRequest) -> Result<WastePass, ResolveError> {
        let tables = self.tables();
        let postal_code = &request.postal_code;

        let Some(district) = tables.district_for(postal_code) else {
            tracing::debug!(%postal_code, "no district for postal code");
            return Err(ResolveError::NotFound(Stage::District));
        };

        let Some(pass_number) = tables.pass_number_for(district) else {
            tracing::debug!(%postal_code, %district, "no pass number for district");
            return Err(ResolveError::NotFound(Stage::PassNumber));
        };

        let has_container = tables.has_container(postal_code);
        tracing::debug!(%postal_code, %district, %pass_number, has_container, "resolved waste pass");

        Ok(WastePass {
            district,
            pass_number: pass_number.clone(),
            has_container,
        })
    }

    /// Districts with their ranges and pass numbers, in configuration order.
    ///
    /// Districts that only appear in the pass number table are listed last, in
    /// pass number table order.
    #[must_use]
    pub fn districts(&self) -> Vec<DistrictOverview> {
        let tables = self.tables();
        let mut rows: Vec<DistrictOverview> = tables
            .districts()
            .iter()
            .map(|entry| DistrictOverview {
                district: entry.district(),
                ranges: entry.ranges().to_vec(),
                pass_number: tables.pass_number_for(entry.district()).cloned(),
            })
            .collect();

        for (district, pass_number) in tables.pass_numbers() {
            if rows.iter().all(|row| row.district != *district) {
                rows.push(DistrictOverview {
                    district: *district,
                    ranges: Vec::new(),
                    pass_number: Some(pass_number.clone()),
                });
            }
        }

        rows
    }
}
