//! Error types for the PYQ seeding CLI.

use thiserror::Error;

/// Errors related to loading the input document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid input shape: {0}")]
    InvalidShape(String),

    #[error("no records found in the input file")]
    NoRecords,
}

/// Errors related to the embedding provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("embedding provider error (status {status}): {body}")]
    ProviderError { status: u16, body: String },

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding provider returned no rows")]
    EmptyResponse,
}

/// Errors related to the destination vector index.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("upsert request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("upsert failed ({status}): {body}")]
    UpsertError { status: u16, body: String },
}

/// Errors related to configuration and credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Pinecone host is required (pass --host or set PINECONE_HOST)")]
    MissingHost,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Errors that abort a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("vector store error: {0}")]
    VectorStoreError(#[from] VectorStoreError),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
}
