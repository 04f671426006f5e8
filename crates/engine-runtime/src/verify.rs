use crate::ingest::IngestSummary;
use connectors::sql::base::{error::DbError, store::TableStore};
use model::core::identifiers::TableRef;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    /// Rows in the table after the load, including rows that were kept.
    pub table_rows: u64,
    /// Rows read from the source in this run.
    pub source_rows: u64,
    pub chunks: usize,
}

impl VerificationReport {
    pub fn is_match(&self) -> bool {
        self.table_rows == self.source_rows
    }
}

/// Counts the rows in `table` and reports them next to the source total.
/// A mismatch is logged, never returned as an error.
pub async fn verify<S>(
    store: &mut S,
    table: &TableRef,
    summary: &IngestSummary,
) -> Result<VerificationReport, DbError>
where
    S: TableStore + ?Sized,
{
    // Nothing was loaded, so the table may never have been created.
    let table_rows = if summary.chunks > 0 || store.table_exists(table).await? {
        store.count_rows(table).await?
    } else {
        0
    };

    let report = VerificationReport {
        table_rows,
        source_rows: summary.rows as u64,
        chunks: summary.chunks,
    };

    info!("DB Table row count: {}", report.table_rows);
    info!("CSV row count: {}", report.source_rows);

    if !report.is_match() {
        warn!(
            "Row count mismatch for {}: table has {} rows, source had {}",
            table, report.table_rows, report.source_rows
        );
    }

    Ok(report)
}
