pub mod export;
pub mod fetch;
pub mod format;
pub mod parser;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

pub use export::*;
pub use fetch::*;
pub use format::*;
pub use parser::*;

/// Field name of the synthetic entry produced when the status tool cannot be read.
pub const ERROR_FIELD: &str = "Error";

/// Flat, insertion-ordered mapping of status fields.
///
/// Overwriting a key keeps its original position, so fields keep the order in
/// which the tool first reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: Vec<(String, String)>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn extend(&mut self, other: StatusMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(ERROR_FIELD, message);
        map
    }
}

impl Serialize for StatusMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One tick's worth of status data.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub fields: StatusMap,
    pub taken_at: DateTime<Local>,
}

/// Fetches and parses the backup status, one tick at a time.
pub struct StatusMonitor {
    fetcher: StatusFetcher,
}

impl StatusMonitor {
    pub fn new(fetcher: StatusFetcher) -> Self {
        Self { fetcher }
    }

    /// Runs one fetch and parse. Fetch failures become a single `Error` field.
    pub async fn poll(&self) -> StatusSnapshot {
        let fields = match self.fetcher.fetch_status().await {
            Ok(raw) => parse_status(&raw),
            Err(err) => {
                tracing::warn!(error = %err, "status fetch failed");
                StatusMap::error(err.to_string())
            }
        };
        tracing::debug!(fields = fields.len(), "status polled");

        StatusSnapshot {
            fields,
            taken_at: Local::now(),
        }
    }
}
