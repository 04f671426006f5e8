use crate::{
    error::ConfigError,
    settings::{
        connection::ConnectionOverrides,
        disposition::{DeleteMode, LoadDisposition},
    },
};
use connectors::{
    storage::s3::S3Location,
    tls::ca_bundle::{DEFAULT_CA_BUNDLE_PATH, DEFAULT_CA_BUNDLE_URL},
};
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Immutable, validated configuration for one load.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    /// Object the rows are read from
    pub source: S3Location,
    /// Target table, created in the resolved database
    pub table_name: String,
    /// Explicitly passed connection fields
    pub connection: ConnectionOverrides,
    /// Secret holding the remaining connection fields
    pub secret_id: Option<String>,
    /// What to do with the table before loading
    pub disposition: LoadDisposition,
    /// Maximum rows held in memory and written per transaction
    pub chunk_size: usize,
    pub ca_bundle_url: String,
    pub ca_bundle_path: PathBuf,
}

impl LoadSettings {
    pub fn builder() -> LoadSettingsBuilder {
        LoadSettingsBuilder::default()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn disposition(&self) -> LoadDisposition {
        self.disposition
    }
}

#[derive(Debug, Default)]
pub struct LoadSettingsBuilder {
    pub s3_object: Option<String>,
    pub table_name: Option<String>,
    pub connection: ConnectionOverrides,
    pub secret_id: Option<String>,
    pub drop_table: bool,
    pub delete_rows: bool,
    pub delete_mode: Option<String>,
    pub chunk_size: Option<usize>,
    pub ca_bundle_url: Option<String>,
    pub ca_bundle_path: Option<PathBuf>,
}

impl LoadSettingsBuilder {
    pub fn s3_object(mut self, s3_object: impl Into<String>) -> Self {
        self.s3_object = Some(s3_object.into());
        self
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn connection(mut self, connection: ConnectionOverrides) -> Self {
        self.connection = connection;
        self
    }

    pub fn secret_id(mut self, secret_id: Option<String>) -> Self {
        self.secret_id = secret_id;
        self
    }

    pub fn drop_table(mut self, drop_table: bool) -> Self {
        self.drop_table = drop_table;
        self
    }

    pub fn delete_rows(mut self, delete_rows: bool) -> Self {
        self.delete_rows = delete_rows;
        self
    }

    pub fn delete_mode(mut self, delete_mode: impl Into<String>) -> Self {
        self.delete_mode = Some(delete_mode.into());
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn ca_bundle_url(mut self, url: impl Into<String>) -> Self {
        self.ca_bundle_url = Some(url.into());
        self
    }

    pub fn ca_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle_path = Some(path.into());
        self
    }

    /// Validates everything that can be checked without touching the network.
    pub fn build(self) -> Result<LoadSettings, ConfigError> {
        let source: S3Location = self
            .s3_object
            .ok_or(ConfigError::MissingSetting("s3_object"))?
            .parse()?;
        let table_name = self
            .table_name
            .ok_or(ConfigError::MissingSetting("table_name"))?;

        // The mode is checked even when rows are not deleted, so a typo never
        // goes unnoticed.
        let mode = match self.delete_mode {
            Some(mode) => mode.parse()?,
            None => DeleteMode::default(),
        };

        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }

        let settings = LoadSettings {
            source,
            table_name,
            connection: self.connection,
            secret_id: self.secret_id,
            disposition: LoadDisposition::from_flags(self.drop_table, self.delete_rows, mode),
            chunk_size,
            ca_bundle_url: self
                .ca_bundle_url
                .unwrap_or_else(|| DEFAULT_CA_BUNDLE_URL.to_string()),
            ca_bundle_path: self
                .ca_bundle_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CA_BUNDLE_PATH)),
        };

        debug!("Validated settings: {:?}", settings);
        Ok(settings)
    }
}
