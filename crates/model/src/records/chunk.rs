use crate::core::{data_type::DataType, value::Value};
use serde::Serialize;

/// A slice of the source exactly as read: named columns and text cells,
/// with missing cells already normalized to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChunk {
    /// Zero-based position of the chunk in the source.
    pub index: usize,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawChunk {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates the cells of one column, top to bottom.
    pub fn column(&self, ordinal: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(ordinal).and_then(|cell| cell.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: DataType,
    pub is_nullable: bool,
    pub ordinal: usize,
}

/// A chunk after type inference; every row holds one value per column.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub index: usize,
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<Vec<Value>>,
}

impl Chunk {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn size_bytes(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .map(Value::size_bytes)
            .sum()
    }
}
