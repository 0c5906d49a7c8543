use crate::literal::LiteralError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse the CSV table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to fetch the remote dataset: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed cast data: {0}")]
    MalformedCastData(String),

    #[error("Malformed actor set: {0}")]
    MalformedActorSet(String),

    #[error("Invalid value {value:?} in column '{column}': {reason}")]
    InvalidField {
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Record {record} ('{title}') could not be decoded")]
    Record {
        record: usize,
        title: String,
        #[source]
        source: Box<DatasetError>,
    },
}

impl DatasetError {
    pub(crate) fn cast(err: LiteralError) -> Self {
        DatasetError::MalformedCastData(err.to_string())
    }

    pub(crate) fn actor_set(err: LiteralError) -> Self {
        DatasetError::MalformedActorSet(err.to_string())
    }

    /// Returns the innermost error, looking through record context.
    pub fn root(&self) -> &DatasetError {
        match self {
            DatasetError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}
