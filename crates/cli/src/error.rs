use engine_config::error::ConfigError;
use engine_runtime::error::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load the CSV object: {0}")]
    Load(#[from] LoadError),
}
