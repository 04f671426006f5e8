use connectors::{
    file::csv::error::FileError,
    secrets::error::SecretsError,
    sql::base::error::{ConnectorError, DbError},
    storage::error::StorageError,
};
use engine_config::error::ConfigError;
use thiserror::Error;

/// Top‐level errors for a load run. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The connection secret could not be retrieved or parsed.
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The source object could not be read as CSV.
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Connection error: {0}")]
    Connector(#[from] ConnectorError),

    /// Db error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
