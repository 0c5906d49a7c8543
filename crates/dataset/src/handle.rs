use core_types::MovieRecord;
use std::sync::Arc;

/// The loaded movie table.
///
/// Built once at startup and passed to every page. Cloning shares the same
/// records; nothing can mutate them after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[MovieRecord]>,
    source: Arc<str>,
}

impl Dataset {
    pub fn new(records: Vec<MovieRecord>, source: impl Into<String>) -> Self {
        let source: String = source.into();
        Self {
            records: records.into(),
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// The location the records were read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
