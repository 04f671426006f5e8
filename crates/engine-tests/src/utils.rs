use crate::{mysql_pool, test_params};
use connectors::{
    file::csv::source::CsvDataSource,
    sql::mysql::adapter::MySqlAdapter,
};
use engine_config::settings::disposition::LoadDisposition;
use engine_runtime::{
    execution::executor::load, table_state::apply_disposition, verify::VerificationReport,
};
use model::core::identifiers::TableRef;
use mysql_async::prelude::*;

pub fn table(name: &str) -> TableRef {
    TableRef::new("testdb", name)
}

/// Loads `data` into `table` the same way a run does, minus S3.
pub async fn load_csv(
    data: &str,
    table: &TableRef,
    disposition: LoadDisposition,
    chunk_size: usize,
) -> VerificationReport {
    let mut adapter = MySqlAdapter::connect(&test_params(), None)
        .await
        .expect("connect adapter");

    apply_disposition(&mut adapter, table, disposition)
        .await
        .expect("apply disposition");

    let mut source = CsvDataSource::open(data.as_bytes(), chunk_size)
        .await
        .expect("open csv");
    let report = load(&mut adapter, &mut source, table)
        .await
        .expect("load csv");

    adapter.disconnect().await.expect("disconnect");
    report
}

pub async fn execute(sql: &str) {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("get conn");
    conn.query_drop(sql).await.expect("execute sql");
    drop(conn);
    pool.disconnect().await.expect("disconnect pool");
}

pub async fn get_row_count(table: &TableRef) -> u64 {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("get conn");
    let sql = format!("SELECT COUNT(*) FROM {}", table.quoted());
    let count: Option<u64> = conn.query_first(sql.as_str()).await.expect("count rows");
    drop(conn);
    pool.disconnect().await.expect("disconnect pool");
    count.unwrap_or(0)
}

/// Column names and types as reported by the catalog, in ordinal order.
pub async fn get_columns(table: &TableRef) -> Vec<(String, String)> {
    let pool = mysql_pool();
    let mut conn = pool.get_conn().await.expect("get conn");
    let columns: Vec<(String, String)> = conn
        .exec(
            "SELECT COLUMN_NAME, DATA_TYPE FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION",
            (table.schema.as_str(), table.name.as_str()),
        )
        .await
        .expect("fetch columns");
    drop(conn);
    pool.disconnect().await.expect("disconnect pool");
    columns
}

pub async fn reset_table(table: &TableRef) {
    execute(&format!("DROP TABLE IF EXISTS {}", table.quoted())).await;
}
