use crate::sql::{
    base::{
        error::{ConnectorError, DbError},
        store::TableStore,
    },
    mysql::{
        params::MySqlParamStore,
        query::{QUERY_TABLE_EXISTS_SQL, QueryGenerator},
    },
};
use async_trait::async_trait;
use model::{
    core::{identifiers::TableRef, value::Value},
    execution::connection::ConnectionParams,
    records::chunk::{Chunk, ColumnMetadata},
};
use mysql_async::{Conn, DriverError, Opts, OptsBuilder, SslOpts, TxOpts, prelude::*};
use std::path::Path;
use tracing::{debug, info, warn};

/// A single MySQL connection used for every step of a load.
pub struct MySqlAdapter {
    conn: Conn,
}

impl MySqlAdapter {
    /// Connects with the given parameters. When `ca_bundle` is set the
    /// connection is made over TLS with that file as the trusted root,
    /// unless the server does not offer TLS at all, in which case the
    /// connection is retried in plain text.
    pub async fn connect(
        params: &ConnectionParams,
        ca_bundle: Option<&Path>,
    ) -> Result<Self, ConnectorError> {
        info!(
            "Connecting to MySQL at {}:{} (database '{}', user '{}', tls: {})",
            params.host,
            params
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "default".into()),
            params.database,
            params.user,
            ca_bundle.is_some()
        );

        let conn = match Conn::new(Self::opts(params, ca_bundle)).await {
            Ok(conn) => conn,
            Err(mysql_async::Error::Driver(DriverError::NoClientSslFlagFromServer))
                if ca_bundle.is_some() =>
            {
                warn!(
                    "MySQL server at {} does not support TLS, connecting without the CA bundle",
                    params.host
                );
                Conn::new(Self::opts(params, None)).await?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(MySqlAdapter { conn })
    }

    pub fn opts(params: &ConnectionParams, ca_bundle: Option<&Path>) -> Opts {
        let mut builder = OptsBuilder::default()
            .ip_or_hostname(params.host.clone())
            .user(Some(params.user.clone()))
            .pass(Some(params.password.clone()))
            .db_name(Some(params.database.clone()));

        if let Some(port) = params.port {
            builder = builder.tcp_port(port);
        }

        if let Some(ca) = ca_bundle {
            let ssl = SslOpts::default().with_root_certs(vec![ca.to_path_buf().into()]);
            builder = builder.ssl_opts(Some(ssl));
        }

        Opts::from(builder)
    }

    pub async fn disconnect(self) -> Result<(), DbError> {
        self.conn.disconnect().await?;
        Ok(())
    }

    async fn exec(&mut self, sql: &str) -> Result<(), DbError> {
        info!("{}", sql);
        self.conn.query_drop(sql).await?;
        Ok(())
    }
}

#[async_trait]
impl TableStore for MySqlAdapter {
    async fn table_exists(&mut self, table: &TableRef) -> Result<bool, DbError> {
        info!("Checking whether {} exists", table);
        let params = MySqlParamStore::from_values(&[
            Value::String(table.schema.clone()),
            Value::String(table.name.clone()),
        ]);
        let row: Option<i64> = self
            .conn
            .exec_first(QUERY_TABLE_EXISTS_SQL, params.params())
            .await?;
        Ok(row.is_some())
    }

    async fn drop_table(&mut self, table: &TableRef) -> Result<(), DbError> {
        self.exec(&QueryGenerator::drop_table(table)).await
    }

    async fn truncate_table(&mut self, table: &TableRef) -> Result<(), DbError> {
        self.exec(&QueryGenerator::truncate_table(table)).await
    }

    async fn delete_rows(&mut self, table: &TableRef) -> Result<(), DbError> {
        self.exec(&QueryGenerator::delete_rows(table)).await
    }

    async fn create_table(
        &mut self,
        table: &TableRef,
        columns: &[ColumnMetadata],
    ) -> Result<(), DbError> {
        self.exec(&QueryGenerator::create_table(table, columns))
            .await
    }

    async fn append_chunk(&mut self, table: &TableRef, chunk: &Chunk) -> Result<usize, DbError> {
        if chunk.is_empty() {
            return Ok(0);
        }

        let batch_rows = QueryGenerator::rows_per_insert(chunk.columns.len());
        let mut tx = self.conn.start_transaction(TxOpts::default()).await?;
        let mut written = 0;

        for rows in chunk.rows.chunks(batch_rows) {
            let (sql, values) = QueryGenerator::insert(table, &chunk.columns, rows);
            if sql.is_empty() {
                return Err(DbError::Write(format!(
                    "chunk {} has no columns to insert into {}",
                    chunk.index, table
                )));
            }
            tx.exec_drop(sql.as_str(), MySqlParamStore::from_values(&values).params())
                .await?;
            written += rows.len();
            debug!("Inserted {} of {} rows of chunk {}", written, chunk.row_count(), chunk.index);
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn count_rows(&mut self, table: &TableRef) -> Result<u64, DbError> {
        let sql = QueryGenerator::count_rows(table);
        let count: Option<u64> = self.conn.query_first(sql.as_str()).await?;
        Ok(count.unwrap_or(0))
    }
}
