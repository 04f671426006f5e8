use crate::file::csv::{
    error::FileError,
    metadata::{normalize_cell, normalize_headers},
};
use async_trait::async_trait;
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use model::records::chunk::RawChunk;
use tokio::io::AsyncRead;
use tracing::debug;

/// A forward-only sequence of chunks. Once a chunk has been handed out it
/// cannot be read again; starting over means opening a new source.
#[async_trait]
pub trait ChunkSource: Send {
    /// Column names shared by every chunk.
    fn headers(&self) -> &[String];

    /// Reads the next chunk, or `None` once the source is exhausted.
    async fn next_chunk(&mut self) -> Result<Option<RawChunk>, FileError>;
}

pub struct CsvDataSource<R> {
    reader: AsyncReader<R>,
    headers: Vec<String>,
    chunk_size: usize,
    /// Tracks how many data rows have been consumed from the file.
    rows_read: usize,
    chunks_read: usize,
    exhausted: bool,
}

impl<R> CsvDataSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    /// Opens the source and consumes the header row.
    pub async fn open(input: R, chunk_size: usize) -> Result<Self, FileError> {
        let mut reader = AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .create_reader(input);

        let raw_headers = reader.headers().await?.clone();
        if raw_headers.is_empty() {
            return Err(FileError::MissingHeader);
        }
        let headers = normalize_headers(raw_headers.iter());
        debug!("CSV headers: {:?}", headers);

        Ok(CsvDataSource {
            reader,
            headers,
            chunk_size: chunk_size.max(1),
            rows_read: 0,
            chunks_read: 0,
            exhausted: false,
        })
    }

    fn to_row(&self, record: &StringRecord) -> Result<Vec<Option<String>>, FileError> {
        let expected = self.headers.len();
        if record.len() > expected {
            return Err(FileError::RaggedRow {
                row: self.rows_read,
                expected,
                found: record.len(),
            });
        }

        let mut row: Vec<Option<String>> = record.iter().map(normalize_cell).collect();
        row.resize(expected, None);
        Ok(row)
    }
}

#[async_trait]
impl<R> ChunkSource for CsvDataSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn headers(&self) -> &[String] {
        &self.headers
    }

    async fn next_chunk(&mut self) -> Result<Option<RawChunk>, FileError> {
        if self.exhausted {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(self.chunk_size);
        let mut record = StringRecord::new();

        while rows.len() < self.chunk_size {
            if !self.reader.read_record(&mut record).await? {
                self.exhausted = true;
                break;
            }
            self.rows_read += 1;
            rows.push(self.to_row(&record)?);
        }

        if rows.is_empty() {
            return Ok(None);
        }

        let chunk = RawChunk {
            index: self.chunks_read,
            headers: self.headers.clone(),
            rows,
        };
        self.chunks_read += 1;
        Ok(Some(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect_chunks(data: &'static str, chunk_size: usize) -> Vec<RawChunk> {
        let mut source = CsvDataSource::open(data.as_bytes(), chunk_size)
            .await
            .unwrap();
        let mut chunks = Vec::new();
        while let Some(chunk) = source.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        chunks
    }

    #[tokio::test]
    async fn test_chunks_partition_source_in_order() {
        let chunks = collect_chunks("id,name\n1,a\n2,b\n3,c\n4,d\n5,e\n", 2).await;

        let sizes: Vec<_> = chunks.iter().map(|c| c.row_count()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let ids: Vec<_> = chunks
            .iter()
            .flat_map(|c| c.rows.iter().map(|r| r[0].clone().unwrap()))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            chunks.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_empty_chunk() {
        let chunks = collect_chunks("id\n1\n2\n3\n4\n", 2).await;
        assert_eq!(chunks.len(), 2);
    }

    #[tokio::test]
    async fn test_header_only_source_yields_no_chunks() {
        let mut source = CsvDataSource::open("id,name\n".as_bytes(), 10).await.unwrap();
        assert_eq!(source.headers(), ["id", "name"]);
        assert!(source.next_chunk().await.unwrap().is_none());
        assert!(source.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_source_is_missing_header() {
        let result = CsvDataSource::open("".as_bytes(), 10).await;
        assert!(matches!(result, Err(FileError::MissingHeader)));
    }

    #[tokio::test]
    async fn test_na_cells_and_short_rows() {
        let chunks = collect_chunks("a,b,c\n1,NULL,x\n2\n", 10).await;
        let rows = &chunks[0].rows;
        assert_eq!(rows[0], vec![Some("1".into()), None, Some("x".into())]);
        assert_eq!(rows[1], vec![Some("2".into()), None, None]);
    }

    #[tokio::test]
    async fn test_long_row_is_an_error() {
        let mut source = CsvDataSource::open("a,b\n1,2,3\n".as_bytes(), 10)
            .await
            .unwrap();
        let result = source.next_chunk().await;
        assert!(matches!(
            result,
            Err(FileError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_quoted_fields() {
        let chunks = collect_chunks("id,note\n1,\"hello, world\"\n", 10).await;
        assert_eq!(chunks[0].rows[0][1].as_deref(), Some("hello, world"));
    }
}
