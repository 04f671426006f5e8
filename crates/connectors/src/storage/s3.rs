use crate::storage::error::StorageError;
use aws_config::SdkConfig;
use aws_sdk_s3::{Client, error::DisplayErrorContext};
use std::{fmt, pin::Pin, str::FromStr};
use tokio::io::AsyncRead;
use tracing::{debug, info, instrument};

/// Body of a fetched object, readable incrementally.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// An `s3://bucket/key` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

impl FromStr for S3Location {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("s3://")
            .ok_or_else(|| StorageError::InvalidLocation(s.to_string()))?;

        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok(S3Location {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            _ => Err(StorageError::InvalidLocation(s.to_string())),
        }
    }
}

impl fmt::Display for S3Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Starts downloading the object and returns its body as a stream.
    /// Nothing beyond the response headers is buffered.
    #[instrument(skip(self))]
    pub async fn open(&self, location: &S3Location) -> Result<ObjectReader, StorageError> {
        debug!("Getting stream from {}", location);

        let response = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| StorageError::GetObject {
                location: location.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        info!(
            "Opened {} ({} bytes)",
            location,
            response.content_length().unwrap_or_default()
        );

        Ok(Box::pin(response.body.into_async_read()))
    }
}
