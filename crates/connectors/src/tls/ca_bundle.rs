use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_CA_BUNDLE_URL: &str =
    "https://s3.amazonaws.com/rds-downloads/rds-combined-ca-bundle.pem";
pub const DEFAULT_CA_BUNDLE_PATH: &str = "./rds-combined-ca-bundle.pem";

/// Outcome of a CA bundle download. Never an error: a failed download only
/// means the connection falls back to a previously cached bundle, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaBundleStatus {
    Downloaded { path: PathBuf, bytes: usize },
    Failed { url: String, reason: String },
}

impl CaBundleStatus {
    pub fn log(&self) {
        match self {
            CaBundleStatus::Downloaded { path, bytes } => {
                info!("Saved CA bundle to {} ({} bytes)", path.display(), bytes)
            }
            CaBundleStatus::Failed { url, reason } => error!(
                "An unexpected error occurred when retrieving the SSL CA bundle from {}: {}",
                url, reason
            ),
        }
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self, CaBundleStatus::Downloaded { .. })
    }
}

/// Downloads the bundle at `url` into `dest`, overwriting any previous copy.
pub async fn fetch_ca_bundle(url: &str, dest: &Path) -> CaBundleStatus {
    info!("Getting CA Bundle from URL.");

    match download(url, dest).await {
        Ok(bytes) => CaBundleStatus::Downloaded {
            path: dest.to_path_buf(),
            bytes,
        },
        Err(reason) => CaBundleStatus::Failed {
            url: url.to_string(),
            reason,
        },
    }
}

async fn download(url: &str, dest: &Path) -> Result<usize, String> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    let body = response.bytes().await.map_err(|e| e.to_string())?;
    tokio::fs::write(dest, &body)
        .await
        .map_err(|e| format!("failed to write {}: {e}", dest.display()))?;
    Ok(body.len())
}

/// Returns the bundle path if a bundle is present on disk, whether it was
/// just downloaded or left over from an earlier run.
pub fn cached_bundle(path: &Path) -> Option<&Path> {
    path.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

    #[tokio::test]
    async fn test_download_writes_bundle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bundle.pem"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PEM))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ca.pem");
        let status = fetch_ca_bundle(&format!("{}/bundle.pem", server.uri()), &dest).await;

        assert_eq!(
            status,
            CaBundleStatus::Downloaded {
                path: dest.clone(),
                bytes: PEM.len()
            }
        );
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), PEM);
        assert_eq!(cached_bundle(&dest), Some(dest.as_path()));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_http_error_is_soft_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ca.pem");
        let status = fetch_ca_bundle(&format!("{}/missing.pem", server.uri()), &dest).await;

        assert!(!status.is_downloaded());
        assert!(!dest.exists());
        assert_eq!(cached_bundle(&dest), None);

        status.log();
        assert!(logs_contain("retrieving the SSL CA bundle"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_soft_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("ca.pem");
        let status = fetch_ca_bundle("http://127.0.0.1:1/bundle.pem", &dest).await;

        assert!(matches!(status, CaBundleStatus::Failed { .. }));
    }
}
