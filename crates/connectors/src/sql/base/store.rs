use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::{
    core::identifiers::TableRef,
    records::chunk::{Chunk, ColumnMetadata},
};

/// The operations the loader needs from the target database.
///
/// Methods take `&mut self` because a store wraps a single connection that
/// every step of a run goes through in order.
#[async_trait]
pub trait TableStore: Send {
    /// True if the metadata catalog has a row for the table.
    async fn table_exists(&mut self, table: &TableRef) -> Result<bool, DbError>;

    /// Drops the table; a missing table is not an error.
    async fn drop_table(&mut self, table: &TableRef) -> Result<(), DbError>;

    async fn truncate_table(&mut self, table: &TableRef) -> Result<(), DbError>;

    async fn delete_rows(&mut self, table: &TableRef) -> Result<(), DbError>;

    /// Creates the table with the given columns unless it already exists.
    async fn create_table(
        &mut self,
        table: &TableRef,
        columns: &[ColumnMetadata],
    ) -> Result<(), DbError>;

    /// Appends every row of the chunk and returns the number written.
    /// Either the whole chunk is committed or none of it is.
    async fn append_chunk(&mut self, table: &TableRef, chunk: &Chunk) -> Result<usize, DbError>;

    async fn count_rows(&mut self, table: &TableRef) -> Result<u64, DbError>;
}
