use connectors::sql::base::{error::DbError, store::TableStore};
use engine_config::settings::disposition::{DeleteMode, LoadDisposition};
use model::core::identifiers::TableRef;
use tracing::info;

/// Brings the target table into the state requested by `disposition`
/// before any rows are loaded.
pub async fn apply_disposition<S>(
    store: &mut S,
    table: &TableRef,
    disposition: LoadDisposition,
) -> Result<(), DbError>
where
    S: TableStore + ?Sized,
{
    match disposition {
        LoadDisposition::DropTable => {
            info!("Dropping table {}", table);
            store.drop_table(table).await
        }
        LoadDisposition::DeleteRows(mode) => {
            if !store.table_exists(table).await? {
                info!("Table doesn't exist, skipping row deletion.");
                return Ok(());
            }

            info!("Deleting rows from {} using {}", table, mode);
            match mode {
                DeleteMode::Truncate => store.truncate_table(table).await,
                DeleteMode::Delete => store.delete_rows(table).await,
            }
        }
        LoadDisposition::NoOp => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::memory_store::{MemoryStore, Op};
    use tracing_test::traced_test;

    fn table() -> TableRef {
        TableRef::new("sales", "orders")
    }

    #[tokio::test]
    async fn test_drop_is_unconditional() {
        let mut store = MemoryStore::default();
        apply_disposition(&mut store, &table(), LoadDisposition::DropTable)
            .await
            .unwrap();
        assert_eq!(store.ops, vec![Op::Drop]);
    }

    #[tokio::test]
    async fn test_drop_and_delete_only_drops() {
        let mut store = MemoryStore::with_rows(10);
        let disposition = LoadDisposition::from_flags(true, true, DeleteMode::Delete);

        apply_disposition(&mut store, &table(), disposition)
            .await
            .unwrap();
        assert_eq!(store.ops, vec![Op::Drop]);
    }

    #[tokio::test]
    async fn test_truncate_existing_table() {
        let mut store = MemoryStore::with_rows(10);
        apply_disposition(
            &mut store,
            &table(),
            LoadDisposition::DeleteRows(DeleteMode::Truncate),
        )
        .await
        .unwrap();

        assert_eq!(store.ops, vec![Op::Exists, Op::Truncate]);
        assert_eq!(store.rows, 0);
    }

    #[tokio::test]
    async fn test_delete_existing_table() {
        let mut store = MemoryStore::with_rows(10);
        apply_disposition(
            &mut store,
            &table(),
            LoadDisposition::DeleteRows(DeleteMode::Delete),
        )
        .await
        .unwrap();

        assert_eq!(store.ops, vec![Op::Exists, Op::Delete]);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_delete_skipped_when_table_missing() {
        let mut store = MemoryStore::default();
        apply_disposition(
            &mut store,
            &table(),
            LoadDisposition::DeleteRows(DeleteMode::Truncate),
        )
        .await
        .unwrap();

        assert_eq!(store.ops, vec![Op::Exists]);
        assert!(logs_contain("Table doesn't exist, skipping row deletion."));
    }

    #[tokio::test]
    async fn test_noop_touches_nothing() {
        let mut store = MemoryStore::with_rows(3);
        apply_disposition(&mut store, &table(), LoadDisposition::NoOp)
            .await
            .unwrap();
        assert!(store.ops.is_empty());
        assert_eq!(store.rows, 3);
    }
}
