use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One question/answer record from the input document.
///
/// Records are open-ended: normalization recognizes a closed set of field
/// names (`text`/`question`/`prompt`, `answer`, `chapter`, `topic`,
/// `topics`, `year`, `marks`, `id`), everything else passes through to
/// metadata untouched. A record is constructed once by the loader and
/// never mutated; derived values are built fresh from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// The unit submitted to the vector index.
///
/// `id` is stable across reruns of unchanged input, so upserting the same
/// file twice overwrites rather than duplicates.
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Map<String, Value>,
}
