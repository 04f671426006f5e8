use model::{
    core::{
        identifiers::{TableRef, quote_ident},
        value::Value,
    },
    records::chunk::ColumnMetadata,
};

/// MySQL caps a prepared statement at 65,535 placeholders.
pub const MAX_PLACEHOLDERS: usize = 65_535;

/// Upper bound on rows per `INSERT` statement.
pub const MAX_ROWS_PER_INSERT: usize = 1_000;

pub const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");

pub struct QueryGenerator;

impl QueryGenerator {
    pub fn drop_table(table: &TableRef) -> String {
        format!("DROP TABLE IF EXISTS {}", table.quoted())
    }

    pub fn truncate_table(table: &TableRef) -> String {
        format!("TRUNCATE TABLE {}", table.quoted())
    }

    pub fn delete_rows(table: &TableRef) -> String {
        format!("DELETE FROM {}", table.quoted())
    }

    pub fn count_rows(table: &TableRef) -> String {
        format!("SELECT COUNT(*) AS `count` FROM {}", table.quoted())
    }

    pub fn create_table(table: &TableRef, columns: &[ColumnMetadata]) -> String {
        let mut sorted: Vec<_> = columns.iter().collect();
        sorted.sort_by_key(|col| col.ordinal);

        let defs = sorted
            .iter()
            .map(|col| {
                let null = if col.is_nullable { "NULL" } else { "NOT NULL" };
                format!("{} {} {}", quote_ident(&col.name), col.data_type.mysql_name(), null)
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("CREATE TABLE IF NOT EXISTS {} ({defs})", table.quoted())
    }

    /// Builds one multi-row `INSERT` with a `?` placeholder per cell and
    /// returns it together with the values to bind, row by row.
    pub fn insert(
        table: &TableRef,
        columns: &[ColumnMetadata],
        rows: &[Vec<Value>],
    ) -> (String, Vec<Value>) {
        if rows.is_empty() || columns.is_empty() {
            return (String::new(), Vec::new());
        }

        let names = columns
            .iter()
            .map(|col| quote_ident(&col.name))
            .collect::<Vec<_>>()
            .join(", ");
        let tuple = format!("({})", vec!["?"; columns.len()].join(", "));
        let values = vec![tuple.as_str(); rows.len()].join(", ");

        let mut params = Vec::with_capacity(rows.len() * columns.len());
        for row in rows {
            for col in columns {
                params.push(row.get(col.ordinal).cloned().unwrap_or(Value::Null));
            }
        }

        let sql = format!("INSERT INTO {} ({names}) VALUES {values}", table.quoted());
        (sql, params)
    }

    /// How many rows fit in a single `INSERT` for a table this wide.
    pub fn rows_per_insert(column_count: usize) -> usize {
        (MAX_PLACEHOLDERS / column_count.max(1)).clamp(1, MAX_ROWS_PER_INSERT)
    }
}
