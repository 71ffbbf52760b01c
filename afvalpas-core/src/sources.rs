//! Table sources reading the JSON table document from disk or over HTTP.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::{SourceError, TableSource};
use crate::tables::WastePassTables;

/// Reads the table document from a local JSON file.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    /// Create a source for the given file.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = format!("file {}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl TableSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<WastePassTables, SourceError> {
        let document = tokio::fs::read_to_string(&self.path).await?;
        WastePassTables::from_json(&document)
    }
}

/// Fetches the table document from a remote configuration endpoint.
pub struct HttpJsonSource {
    client: Client,
    url: String,
}

impl HttpJsonSource {
    /// Create a source bound to the given HTTP client and URL.
    #[must_use]
    pub fn new<U: Into<String>>(client: Client, url: U) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TableSource for HttpJsonSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn load(&self) -> Result<WastePassTables, SourceError> {
        let document = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        WastePassTables::from_json(&document)
    }
}
