use crate::error::LoadError;
use connectors::{
    file::csv::{infer::infer_chunk, source::ChunkSource},
    sql::base::store::TableStore,
};
use model::core::identifiers::TableRef;
use tracing::{debug, info};

/// Totals gathered while loading, compared against the table afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Rows read from the source.
    pub rows: usize,
    pub chunks: usize,
}

/// Reads the source chunk by chunk and appends every chunk to `table`.
///
/// The table is created from the first chunk's inferred columns if it does
/// not exist yet. Each chunk is committed on its own; a failure stops the
/// load and leaves earlier chunks in place.
pub async fn ingest<S, C>(
    store: &mut S,
    source: &mut C,
    table: &TableRef,
) -> Result<IngestSummary, LoadError>
where
    S: TableStore + ?Sized,
    C: ChunkSource + ?Sized,
{
    let mut summary = IngestSummary::default();

    while let Some(raw) = source.next_chunk().await? {
        let chunk = infer_chunk(raw);
        debug!(
            "Chunk {} columns: {:?} ({} bytes)",
            chunk.index,
            chunk.columns,
            chunk.size_bytes()
        );

        if summary.chunks == 0 {
            info!("Creating {} with columns {:?}", table, chunk.column_names());
            store.create_table(table, &chunk.columns).await?;
        }

        info!("Inserting {} rows", chunk.row_count());
        store.append_chunk(table, &chunk).await?;

        summary.rows += chunk.row_count();
        summary.chunks += 1;
        debug!("Rows loaded so far: {}", summary.rows);
    }

    if summary.chunks == 0 {
        info!("Source has no data rows, nothing to insert");
    }

    Ok(summary)
}
