use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A named entity eligible for matching (a brand, a color, a category label)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub popularity: f64,
}

impl CandidateRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            popularity: 0.0,
        }
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }
}

/// Supplier of the full candidate set for one domain
///
/// Implementations perform the blocking I/O; the index decides when to call.
pub trait CandidateSource: Send + Sync {
    /// Fetch every candidate. Transport or storage failures are reported as
    /// [`Error::SourceUnavailable`].
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>>;
}

/// In-memory source, mostly for fixed lists and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<CandidateRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self { records }
    }
}

impl CandidateSource for StaticSource {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>> {
        Ok(self.records.clone())
    }
}

/// Source backed by a JSON file holding an array of candidate records
///
/// The file is re-read on every fetch, so edits show up on the next rebuild.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CandidateSource for JsonFileSource {
    fn fetch_all(&self) -> Result<Vec<CandidateRecord>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::SourceUnavailable(format!("{}: malformed candidates: {}", self.path.display(), e))
        })
    }
}
