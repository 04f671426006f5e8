use crate::{args::LoadArgs, error::CliError};
use clap::Parser;
use engine_runtime::execution::executor;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod error;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .init();

    let args = LoadArgs::parse();
    info!("{:?}", args);

    let settings = args.into_settings()?;
    executor::run(&settings).await?;

    Ok(())
}
