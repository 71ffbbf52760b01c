//! Runtime configuration read from the environment (and `.env`, if present).
//!
//! - `AFVALPAS_TABLES`: unset uses the embedded Amsterdam tables, an
//!   `http://`/`https://` URL fetches a JSON table document, anything else is
//!   read as a path to a JSON file.
//! - `AFVALPAS_LOG_FILE`: file receiving tracing output. Without it logs are
//!   dropped, since the terminal belongs to the UI.
//! - `RUST_LOG`: log filter (default: `info`).
//! - `AFVALPAS_HISTORY`: number of lookups kept in the history (default: 20).

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

const DEFAULT_HISTORY: usize = 20;
const MAX_HISTORY: usize = 1_000;

/// Where the lookup tables come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TablesLocation {
    Embedded,
    File(PathBuf),
    Remote(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub tables: TablesLocation,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    pub history_limit: usize,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let tables = match non_empty("AFVALPAS_TABLES") {
            None => TablesLocation::Embedded,
            Some(location)
                if location.starts_with("http://") || location.starts_with("https://") =>
            {
                TablesLocation::Remote(location)
            }
            Some(location) => TablesLocation::File(PathBuf::from(location)),
        };

        let log_file = non_empty("AFVALPAS_LOG_FILE").map(PathBuf::from);
        let log_filter = non_empty("RUST_LOG").unwrap_or_else(|| "info".to_owned());

        let history_limit = match non_empty("AFVALPAS_HISTORY") {
            None => DEFAULT_HISTORY,
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("AFVALPAS_HISTORY must be a number, got '{raw}'"))?,
        };

        let config = Self {
            tables,
            log_file,
            log_filter,
            history_limit,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY {
            bail!(
                "AFVALPAS_HISTORY must be between 1 and {MAX_HISTORY}, got {}",
                self.history_limit
            );
        }
        Ok(())
    }
}
