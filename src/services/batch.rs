//! Batched embed-and-upsert pipeline.
//!
//! Partitions the record list into contiguous runs, drives each run
//! through normalization, one embedding call, and one upsert call, and
//! carries the progress counters. Runs are strictly sequential; a failed
//! run aborts the whole job and completed runs stay persisted.

use serde_json::{Map, Value};

use crate::error::SeedError;
use crate::models::{Record, VectorRecord};
use crate::services::normalize::{
    apply_metadata_defaults, embedding_text, sanitize_metadata, vector_id,
};
use crate::services::{Embedder, VectorIndex};

/// Counters carried through a seeding job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    /// Records consumed from the input, including skipped ones.
    pub processed: u64,
    /// Records an embedding was computed for.
    pub embedded: u64,
    /// Vectors acknowledged by the destination store.
    pub upserted: u64,
    /// Records dropped because they normalized to empty text.
    pub skipped: u64,
    /// Runs completed, including runs with no external call.
    pub batches: u64,
}

/// Outcome of a single run, reported alongside the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every record in the run normalized to empty text; no external call.
    Skipped,
    /// Embeddings computed but not persisted (dry run).
    Embedded,
    /// Embeddings computed and upserted.
    Upserted,
}

/// Drive the full record list through the pipeline.
///
/// `index` of `None` is a dry run: embedding calls still happen, no
/// upsert is ever issued. `report` fires after every run, whether or not
/// the run made an external call. The id, text, and metadata lists stay
/// positionally aligned through the embedding zip.
pub async fn seed_records(
    records: &[Record],
    embedder: &dyn Embedder,
    index: Option<&dyn VectorIndex>,
    batch_size: usize,
    mut report: impl FnMut(BatchOutcome, &SeedStats),
) -> Result<SeedStats, SeedError> {
    let batch_size = batch_size.max(1);
    let mut stats = SeedStats::default();

    for batch in records.chunks(batch_size) {
        let mut ids: Vec<String> = Vec::with_capacity(batch.len());
        let mut texts: Vec<String> = Vec::with_capacity(batch.len());
        let mut metas: Vec<Map<String, Value>> = Vec::with_capacity(batch.len());

        for record in batch {
            let text = embedding_text(record);
            if text.is_empty() {
                continue;
            }

            let mut metadata = sanitize_metadata(record);
            apply_metadata_defaults(&mut metadata, &text);

            ids.push(vector_id(record, &text));
            metas.push(metadata);
            texts.push(text);
        }

        stats.batches += 1;
        stats.skipped += (batch.len() - texts.len()) as u64;

        if texts.is_empty() {
            stats.processed += batch.len() as u64;
            report(BatchOutcome::Skipped, &stats);
            continue;
        }

        let embeddings = embedder.embed_batch(&texts).await?;
        stats.embedded += texts.len() as u64;

        let vectors: Vec<VectorRecord> = ids
            .into_iter()
            .zip(embeddings)
            .zip(metas)
            .map(|((id, values), metadata)| VectorRecord {
                id,
                values,
                metadata,
            })
            .collect();

        stats.processed += batch.len() as u64;

        match index {
            Some(index) => {
                stats.upserted += index.upsert(vectors).await?;
                report(BatchOutcome::Upserted, &stats);
            }
            None => {
                report(BatchOutcome::Embedded, &stats);
            }
        }
    }

    Ok(stats)
}
