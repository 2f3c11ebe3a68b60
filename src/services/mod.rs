mod batch;
mod embedding;
mod loader;
mod normalize;
mod vector_store;

pub use batch::{BatchOutcome, SeedStats, seed_records};
pub use embedding::{Embedder, OpenAiEmbedder};
pub use loader::{load_records, parse_records};
pub use normalize::{apply_metadata_defaults, embedding_text, sanitize_metadata, stable_id, vector_id};
pub use vector_store::{PineconeBackend, VectorIndex};
