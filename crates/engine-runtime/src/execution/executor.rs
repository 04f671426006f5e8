use crate::{
    error::LoadError,
    ingest::ingest,
    table_state::apply_disposition,
    verify::{VerificationReport, verify},
};
use connectors::{
    aws::config::SharedAwsConfig,
    file::csv::source::{ChunkSource, CsvDataSource},
    secrets::provider::{AwsSecretsProvider, SecretsProvider},
    sql::{base::store::TableStore, mysql::adapter::MySqlAdapter},
    storage::s3::S3ObjectStore,
    tls::ca_bundle::{cached_bundle, fetch_ca_bundle},
};
use engine_config::settings::{connection::resolve, validated::LoadSettings};
use model::{core::identifiers::TableRef, execution::connection::ConnectionParams};
use tracing::info;

/// Runs one load end to end against AWS and MySQL. Connection parameters
/// are resolved first so an incomplete configuration fails before any
/// other network traffic.
pub async fn run(settings: &LoadSettings) -> Result<VerificationReport, LoadError> {
    let aws = SharedAwsConfig::new();
    let params = resolve_connection(settings, &AwsSecretsProvider::new(&aws)).await?;

    let ca_status = fetch_ca_bundle(&settings.ca_bundle_url, &settings.ca_bundle_path).await;
    ca_status.log();

    let mut adapter =
        MySqlAdapter::connect(&params, cached_bundle(&settings.ca_bundle_path)).await?;
    let table = TableRef::new(params.database.as_str(), settings.table_name.as_str());

    apply_disposition(&mut adapter, &table, settings.disposition()).await?;

    info!("Reading {}", settings.source);
    let objects = S3ObjectStore::new(aws.get().await);
    let body = objects.open(&settings.source).await?;
    let mut source = CsvDataSource::open(body, settings.chunk_size()).await?;

    let report = load(&mut adapter, &mut source, &table).await?;
    adapter.disconnect().await?;

    info!("Finished");
    Ok(report)
}

/// Fetches the secret bundle, if one is configured, and merges it with the
/// explicitly passed connection fields.
pub async fn resolve_connection<P>(
    settings: &LoadSettings,
    secrets: &P,
) -> Result<ConnectionParams, LoadError>
where
    P: SecretsProvider + ?Sized,
{
    let bundle = match &settings.secret_id {
        Some(secret_id) => Some(secrets.fetch(secret_id).await?),
        None => None,
    };

    let params = resolve(&settings.connection, bundle.as_ref())?;
    info!("Resolved connection: {:?}", params);
    Ok(params)
}

/// Streams every chunk of `source` into `table`, then checks the row count.
pub async fn load<S, C>(
    store: &mut S,
    source: &mut C,
    table: &TableRef,
) -> Result<VerificationReport, LoadError>
where
    S: TableStore + ?Sized,
    C: ChunkSource + ?Sized,
{
    info!("Loading columns {:?} into {}", source.headers(), table);
    let summary = ingest(store, source, table).await?;
    let report = verify(store, table, &summary).await?;
    Ok(report)
}
