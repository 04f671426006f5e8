use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("Failed to fetch secret '{secret_id}': {message}")]
    Fetch { secret_id: String, message: String },

    /// Binary secrets are not supported; the bundle must be a JSON string.
    #[error("Secret '{0}' has no string value")]
    NotAString(String),

    #[error("Secret '{secret_id}' is not a valid credential bundle: {source}")]
    Malformed {
        secret_id: String,
        #[source]
        source: serde_json::Error,
    },
}
