//! FILENAME: app/src/data_source.rs
// PURPOSE: Fetches the catalog records the listing is built from.
// CONTEXT: The listing only needs "a sequence of records or a failure". The
// catalog API and a local JSON file both provide one through RecordSource.

use crate::settings::DataSourceSettings;
use crate::{log_debug, log_info};
use engine::Record;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce the full record sequence in one go.
pub trait RecordSource {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    fn fetch_records(&self) -> impl Future<Output = Result<Vec<Record>, DataSourceError>> + Send;
}

/// Decode a JSON array of records.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, DataSourceError> {
    let records: Vec<Record> = serde_json::from_slice(bytes)?;
    Ok(records)
}

// ============================================================================
// HTTP SOURCE
// ============================================================================

/// GET of the catalog endpoint.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRecordSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, DataSourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Use an already configured client.
    pub fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecordSource for HttpRecordSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_records(&self) -> Result<Vec<Record>, DataSourceError> {
        log_debug!("DATA", "GET {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        log_debug!("DATA", "received {} bytes", body.len());
        decode_records(&body)
    }
}

// ============================================================================
// FILE SOURCE
// ============================================================================

/// The same JSON document read from disk.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_records(&self) -> Result<Vec<Record>, DataSourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        decode_records(&bytes)
    }
}

// ============================================================================
// CONFIGURED SOURCE
// ============================================================================

/// The source selected by the settings: a local file wins over the URL.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpRecordSource),
    File(FileRecordSource),
}

impl ConfiguredSource {
    pub fn from_settings(settings: &DataSourceSettings) -> Result<Self, DataSourceError> {
        let source = match &settings.file {
            Some(path) => ConfiguredSource::File(FileRecordSource::new(path)),
            None => ConfiguredSource::Http(HttpRecordSource::new(
                &settings.url,
                Duration::from_secs(settings.timeout_secs),
            )?),
        };
        log_info!("DATA", "data source: {}", source.describe());
        Ok(source)
    }
}

impl RecordSource for ConfiguredSource {
    fn describe(&self) -> String {
        match self {
            ConfiguredSource::Http(s) => s.describe(),
            ConfiguredSource::File(s) => s.describe(),
        }
    }

    async fn fetch_records(&self) -> Result<Vec<Record>, DataSourceError> {
        match self {
            ConfiguredSource::Http(s) => s.fetch_records().await,
            ConfiguredSource::File(s) => s.fetch_records().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::RecordId;

    const CATALOG: &str = r#"[
        {"id": 1, "title": "Shirt", "price": 10, "category": "men",
         "description": "Cotton", "image": "https://img/1.png",
         "rating": {"rate": 4.5, "count": 3}},
        {"id": 2, "title": "Mug", "price": 5.5, "category": "home"}
    ]"#;

    #[test]
    fn test_decode_catalog() {
        let records = decode_records(CATALOG.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[0].price, 10.0);
        assert_eq!(records[0].rating.count, 3);
        assert_eq!(records[1].description, "");
        assert_eq!(records[1].rating.rate, 0.0);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_records(br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, DataSourceError::Decode(_)));
    }

    #[test]
    fn test_file_wins_over_url() {
        let settings = DataSourceSettings {
            file: Some(PathBuf::from("catalog.json")),
            ..DataSourceSettings::default()
        };
        let source = ConfiguredSource::from_settings(&settings).unwrap();
        assert!(matches!(source, ConfiguredSource::File(_)));
        assert_eq!(source.describe(), "catalog.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let records = FileRecordSource::new(&path).fetch_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].title, "Mug");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRecordSource::new(&dir.path().join("absent.json"))
            .fetch_records()
            .await
            .unwrap_err();
        assert!(matches!(err, DataSourceError::Io(_)));
    }
}
