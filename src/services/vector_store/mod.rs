//! Vector index abstraction layer.
//!
//! A single trait seam over the destination store so the batch pipeline
//! can be driven against a mock in tests.

mod pinecone;

pub use pinecone::PineconeBackend;

use async_trait::async_trait;

use crate::error::VectorStoreError;
use crate::models::VectorRecord;

/// Abstract trait for vector index operations.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or replace vectors by id within the backend's namespace.
    /// Returns the store-acknowledged upsert count.
    async fn upsert(&self, vectors: Vec<VectorRecord>) -> Result<u64, VectorStoreError>;

    /// The namespace vectors are written under.
    fn namespace(&self) -> &str;
}
