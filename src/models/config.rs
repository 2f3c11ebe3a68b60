use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_NAMESPACE: &str = "class10-science";
pub const DEFAULT_BATCH_SIZE: u32 = 50;

/// Metadata defaults injected into every upserted vector when absent.
pub const DEFAULT_SUBJECT: &str = "Science";
pub const DEFAULT_CLASS_LEVEL: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub vector_store: VectorStoreConfig,
}

impl Config {
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("pyqseed").join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_OPENAI_API_BASE.to_string()
}

fn default_batch_size() -> u32 {
    DEFAULT_BATCH_SIZE
}

fn default_embedding_timeout() -> u64 {
    120
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            batch_size: default_batch_size(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Index host from the Pinecone console. Usually supplied via
    /// `--host`/`PINECONE_HOST` rather than the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_upsert_timeout")]
    pub timeout_secs: u64,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_upsert_timeout() -> u64 {
    90
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            host: None,
            namespace: default_namespace(),
            timeout_secs: default_upsert_timeout(),
        }
    }
}

/// Credentials and identifiers required from the environment.
///
/// `index_name` is not used on the data-plane wire (the host already
/// addresses one index); it is required for parity with the companion
/// app's environment.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub pinecone_api_key: String,
    pub index_name: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            pinecone_api_key: require_env("PINECONE_API_KEY")?,
            index_name: require_env("PINECONE_INDEX_NAME")?,
        })
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}
