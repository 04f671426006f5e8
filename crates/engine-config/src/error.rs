use connectors::storage::error::StorageError;
use thiserror::Error;

/// Errors raised while building or resolving the load configuration.
/// All of them are detected before any rows are written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A connection field was neither passed explicitly nor found in the secret.
    #[error(
        "Missing database {field}: pass --{flag} or provide '{secret_key}' in the secret bundle"
    )]
    MissingConnectionField {
        field: &'static str,
        flag: &'static str,
        secret_key: &'static str,
    },

    #[error("Invalid delete mode '{0}': expected TRUNCATE or DELETE")]
    InvalidDeleteMode(String),

    #[error("Invalid chunk size {0}: must be at least 1")]
    InvalidChunkSize(usize),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error(transparent)]
    InvalidLocation(#[from] StorageError),
}
