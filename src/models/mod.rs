mod config;
mod record;

pub use config::{
    Config, Credentials, DEFAULT_BATCH_SIZE, DEFAULT_CLASS_LEVEL, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_NAMESPACE, DEFAULT_OPENAI_API_BASE, DEFAULT_SUBJECT, EmbeddingConfig,
    VectorStoreConfig,
};
pub use record::{Record, VectorRecord};
