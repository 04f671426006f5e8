use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The location is not of the form `s3://bucket/key`.
    #[error("Invalid S3 location '{0}': expected s3://bucket-name/prefix/object.csv")]
    InvalidLocation(String),

    #[error("Failed to get {location}: {message}")]
    GetObject { location: String, message: String },
}
