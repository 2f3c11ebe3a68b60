//! Seed command implementation.

use std::time::Instant;

use anyhow::Result;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::{Config, Credentials};
use crate::services::{
    BatchOutcome, OpenAiEmbedder, PineconeBackend, VectorIndex, load_records, seed_records,
};

/// Handle the seed command.
pub async fn handle_seed(args: Cli) -> Result<()> {
    let start_time = Instant::now();

    let mut config = Config::load()?;
    if let Some(model) = args.embedding_model {
        config.embedding.model = model;
    }
    if let Some(batch_size) = args.batch_size {
        config.embedding.batch_size = batch_size;
    }
    if let Some(namespace) = args.namespace {
        config.vector_store.namespace = namespace;
    }
    if let Some(host) = args.host {
        config.vector_store.host = Some(host);
    }

    if args.validate_only {
        let records = load_records(&args.json_path)?;
        println!(
            "Validation successful: {} records ready to seed from {}",
            records.len(),
            args.json_path.display()
        );
        return Ok(());
    }

    // Credentials are required before any record processing, dry run
    // included.
    let credentials = Credentials::from_env()?;
    let host = config
        .vector_store
        .host
        .clone()
        .filter(|host| !host.trim().is_empty())
        .ok_or(ConfigError::MissingHost)?;

    let records = load_records(&args.json_path)?;
    let total = records.len();

    println!("Loaded {} records from {}", total, args.json_path.display());
    println!("Namespace: {}", config.vector_store.namespace);
    println!("Embedding model: {}", config.embedding.model);
    println!("Pinecone host: {}", host);
    if args.verbose {
        println!("Pinecone index: {}", credentials.index_name);
        println!("Batch size: {}", config.embedding.batch_size.max(1));
    }

    let embedder = OpenAiEmbedder::new(&config.embedding, credentials.openai_api_key)?;
    let backend = if args.dry_run {
        None
    } else {
        Some(PineconeBackend::new(
            &config.vector_store,
            &host,
            credentials.pinecone_api_key,
        )?)
    };

    let stats = seed_records(
        &records,
        &embedder,
        backend.as_ref().map(|backend| backend as &dyn VectorIndex),
        config.embedding.batch_size as usize,
        |outcome, stats| match outcome {
            BatchOutcome::Upserted => println!("Upserted {}/{}", stats.processed, total),
            BatchOutcome::Embedded => {
                println!("Dry-run: generated embeddings for {}/{}", stats.processed, total);
            }
            BatchOutcome::Skipped => {
                println!("Skipped {}/{} (no embeddable text)", stats.processed, total);
            }
        },
    )
    .await?;

    let elapsed = start_time.elapsed().as_secs_f64();
    println!(
        "Done. {} embedded, {} upserted, {} skipped in {:.1}s",
        stats.embedded, stats.upserted, stats.skipped, elapsed
    );

    Ok(())
}
