use crate::error::DatasetError;
use crate::handle::Dataset;
use crate::reader::RowDecoder;
use configuration::DatasetSettings;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Where the movie table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Local(PathBuf),
    Remote(String),
}

impl DatasetSource {
    /// `http://` and `https://` locations are remote, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DatasetSource::Remote(location.to_string())
        } else {
            DatasetSource::Local(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Local(path) => write!(f, "{}", path.display()),
            DatasetSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Reads and decodes the dataset once, producing the shared immutable handle.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    source: DatasetSource,
    decoder: RowDecoder,
    timeout: Duration,
}

impl DatasetLoader {
    pub fn new(settings: &DatasetSettings) -> Self {
        Self {
            source: DatasetSource::parse(&settings.source),
            decoder: RowDecoder::new(settings.unknown_country_aliases.clone()),
            timeout: Duration::from_secs(settings.request_timeout_secs),
        }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Fetches the raw table and decodes every row.
    pub async fn load(&self) -> Result<Dataset, DatasetError> {
        tracing::info!(source = %self.source, "Loading movie dataset.");
        let bytes = match &self.source {
            DatasetSource::Local(path) => tokio::fs::read(path)
                .await
                .map_err(|source| DatasetError::Io {
                    path: path.display().to_string(),
                    source,
                })?,
            DatasetSource::Remote(url) => self.fetch(url).await?,
        };

        let decoder = self.decoder.clone();
        let records = tokio::task::spawn_blocking(move || decoder.read_records(bytes.as_slice()))
            .await
            .map_err(|e| DatasetError::Io {
                path: self.source.to_string(),
                source: std::io::Error::other(e),
            })??;

        tracing::info!(records = records.len(), "Movie dataset loaded.");
        Ok(Dataset::new(records, self.source.to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DatasetError> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        tracing::debug!(bytes = body.len(), "Remote dataset downloaded.");
        Ok(body.to_vec())
    }
}
