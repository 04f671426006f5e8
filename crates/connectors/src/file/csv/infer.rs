//! Per-chunk column type inference.
//!
//! Each chunk is inferred on its own, so the same column may come out as
//! `BIGINT` in one chunk and `TEXT` in a later one if its values change.

use model::{
    core::{
        data_type::{DataType, parse_bool, parse_double, parse_long},
        value::Value,
    },
    records::chunk::{Chunk, ColumnMetadata, RawChunk},
};

/// Picks the narrowest type every non-missing cell fits.
///
/// Order of preference is boolean, integer, floating point, text. Floats
/// whose values are all integral are narrowed to integers. A column with
/// no values at all is text.
pub fn infer_column_type<'a>(cells: impl IntoIterator<Item = Option<&'a str>>) -> DataType {
    let mut all_bool = true;
    let mut all_long = true;
    let mut all_double = true;
    let mut any_value = false;

    for cell in cells.into_iter().flatten() {
        any_value = true;
        all_bool = all_bool && parse_bool(cell).is_some();
        all_long = all_long && parse_long(cell).is_some();
        all_double = all_double && parse_double(cell).is_some();

        if !all_bool && !all_long && !all_double {
            return DataType::String;
        }
    }

    match (any_value, all_bool, all_long, all_double) {
        (false, ..) => DataType::String,
        (true, true, _, _) => DataType::Boolean,
        (true, false, true, _) => DataType::Long,
        (true, false, false, true) => DataType::Double,
        _ => DataType::String,
    }
}

/// Infers a type for every column of the chunk and converts its cells.
pub fn infer_chunk(raw: RawChunk) -> Chunk {
    let columns: Vec<ColumnMetadata> = raw
        .headers
        .iter()
        .enumerate()
        .map(|(ordinal, name)| ColumnMetadata {
            name: name.clone(),
            data_type: infer_column_type(raw.column(ordinal)),
            is_nullable: true,
            ordinal,
        })
        .collect();

    let rows = raw
        .rows
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| {
                    row.get(col.ordinal)
                        .and_then(|cell| cell.as_deref())
                        .and_then(|cell| col.data_type.parse_cell(cell))
                        .unwrap_or(Value::Null)
                })
                .collect()
        })
        .collect();

    Chunk {
        index: raw.index,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(cells: &[&str]) -> DataType {
        infer_column_type(cells.iter().map(|c| Some(*c)))
    }

    #[test]
    fn test_infer_integers() {
        assert_eq!(infer(&["1", "2", "-3"]), DataType::Long);
    }

    #[test]
    fn test_infer_doubles() {
        assert_eq!(infer(&["1.5", "2"]), DataType::Double);
    }

    #[test]
    fn test_integral_floats_become_integers() {
        assert_eq!(infer(&["1.0", "2.0"]), DataType::Long);
    }

    #[test]
    fn test_infer_booleans() {
        assert_eq!(infer(&["true", "False", "TRUE"]), DataType::Boolean);
    }

    #[test]
    fn test_mixed_values_fall_back_to_text() {
        assert_eq!(infer(&["1", "x"]), DataType::String);
        assert_eq!(infer(&["true", "1"]), DataType::String);
        assert_eq!(infer(&["inf"]), DataType::String);
    }

    #[test]
    fn test_missing_cells_are_ignored() {
        assert_eq!(
            infer_column_type([Some("1"), None, Some("2")]),
            DataType::Long
        );
        assert_eq!(infer_column_type([None, None]), DataType::String);
        assert_eq!(infer_column_type(Vec::<Option<&str>>::new()), DataType::String);
    }

    #[test]
    fn test_infer_chunk_converts_cells() {
        let raw = RawChunk {
            index: 3,
            headers: vec!["id".into(), "price".into(), "active".into(), "name".into()],
            rows: vec![
                vec![
                    Some("1".into()),
                    Some("9.5".into()),
                    Some("true".into()),
                    Some("apple".into()),
                ],
                vec![Some("2".into()), None, Some("false".into()), None],
            ],
        };

        let chunk = infer_chunk(raw);

        assert_eq!(chunk.index, 3);
        let types: Vec<_> = chunk.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                DataType::Long,
                DataType::Double,
                DataType::Boolean,
                DataType::String
            ]
        );
        assert!(chunk.columns.iter().all(|c| c.is_nullable));
        assert_eq!(
            chunk.rows[0],
            vec![
                Value::Int(1),
                Value::Float(9.5),
                Value::Boolean(true),
                Value::String("apple".into())
            ]
        );
        assert_eq!(
            chunk.rows[1],
            vec![Value::Int(2), Value::Null, Value::Boolean(false), Value::Null]
        );
    }

    #[test]
    fn test_chunks_are_inferred_independently() {
        let first = RawChunk {
            index: 0,
            headers: vec!["code".into()],
            rows: vec![vec![Some("10".into())]],
        };
        let second = RawChunk {
            index: 1,
            headers: vec!["code".into()],
            rows: vec![vec![Some("A7".into())]],
        };

        assert_eq!(infer_chunk(first).columns[0].data_type, DataType::Long);
        assert_eq!(infer_chunk(second).columns[0].data_type, DataType::String);
    }
}
