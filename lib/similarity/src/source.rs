use attrx_core::{EmbeddingVector, Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An item with its embedding and optional display payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedItem {
    pub id: String,
    pub vector: EmbeddingVector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl EmbeddedItem {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector: EmbeddingVector::new(vector),
            payload: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Where query embeddings and the candidate pool come from
///
/// Failures reaching the backing store are reported as
/// [`Error::SourceUnavailable`].
pub trait EmbeddingSource: Send + Sync {
    /// Embedding of one item, `None` if the item has none
    fn embedding(&self, id: &str) -> Result<Option<EmbeddingVector>>;

    /// Every candidate eligible for ranking
    fn pool(&self) -> Result<Vec<EmbeddedItem>>;
}

/// Embeddings held in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmbeddings {
    items: Vec<EmbeddedItem>,
    by_id: AHashMap<String, usize>,
}

impl InMemoryEmbeddings {
    pub fn from_items(items: Vec<EmbeddedItem>) -> Self {
        let mut by_id = AHashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            // first occurrence wins
            by_id.entry(item.id.clone()).or_insert(idx);
        }
        Self { items, by_id }
    }

    /// Load a JSON array of `{"id", "vector", "payload"?}` objects
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::SourceUnavailable(format!("{}: {}", path.display(), e)))?;
        let items: Vec<EmbeddedItem> = serde_json::from_str(&raw).map_err(|e| {
            Error::SourceUnavailable(format!("{}: malformed embeddings: {}", path.display(), e))
        })?;
        Ok(Self::from_items(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EmbeddedItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[EmbeddedItem] {
        &self.items
    }
}

impl EmbeddingSource for InMemoryEmbeddings {
    fn embedding(&self, id: &str) -> Result<Option<EmbeddingVector>> {
        Ok(self.get(id).map(|item| item.vector.clone()))
    }

    fn pool(&self) -> Result<Vec<EmbeddedItem>> {
        Ok(self.items.clone())
    }
}
