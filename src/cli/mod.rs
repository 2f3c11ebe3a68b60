//! CLI module for the PYQ seeding tool.

pub mod seed;

use std::path::PathBuf;

use clap::Parser;

/// Seed a Pinecone index with question/answer JSON using OpenAI embeddings.
#[derive(Debug, Parser)]
#[command(name = "pyqseed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the question/answer JSON file
    #[arg()]
    pub json_path: PathBuf,

    /// Pinecone namespace to upsert into
    #[arg(long, env = "PINECONE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Records per embedding/upsert batch
    #[arg(long = "batch")]
    pub batch_size: Option<u32>,

    /// OpenAI embedding model
    #[arg(long, env = "OPENAI_EMBEDDING_MODEL")]
    pub embedding_model: Option<String>,

    /// Pinecone index host (from the Pinecone console)
    #[arg(long, env = "PINECONE_HOST")]
    pub host: Option<String>,

    /// Generate embeddings but do not upsert
    #[arg(long)]
    pub dry_run: bool,

    /// Only load and validate the input file, without embedding or upserting
    #[arg(long)]
    pub validate_only: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
