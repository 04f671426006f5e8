use aws_config::{BehaviorVersion, SdkConfig};
use tokio::sync::OnceCell;
use tracing::debug;

/// AWS configuration shared by every client of a load. It is resolved from
/// the environment, profile or instance role the first time a client asks
/// for it, and never before.
#[derive(Debug, Default)]
pub struct SharedAwsConfig {
    config: OnceCell<SdkConfig>,
}

impl SharedAwsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> &SdkConfig {
        self.config
            .get_or_init(|| async {
                debug!("Loading AWS configuration");
                aws_config::load_defaults(BehaviorVersion::latest()).await
            })
            .await
    }

    pub fn is_loaded(&self) -> bool {
        self.config.initialized()
    }
}
