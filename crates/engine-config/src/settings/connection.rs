use crate::error::ConfigError;
use model::execution::connection::{ConnectionParams, SecretBundle};

/// Connection fields passed explicitly by the operator. Each one, when set,
/// takes precedence over the matching key of the secret bundle.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for ConnectionOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOverrides")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Merges explicit fields with the secret bundle. An explicit value is never
/// replaced, even when it is an empty string.
pub fn resolve(
    overrides: &ConnectionOverrides,
    bundle: Option<&SecretBundle>,
) -> Result<ConnectionParams, ConfigError> {
    let empty = SecretBundle::default();
    let bundle = bundle.unwrap_or(&empty);

    let host = pick(&overrides.host, &bundle.host, "host", "db_host", "host")?;
    let user = pick(&overrides.user, &bundle.username, "user", "db_user", "username")?;
    let password = pick(
        &overrides.password,
        &bundle.password,
        "password",
        "db_password",
        "password",
    )?;
    let database = pick(&overrides.database, &bundle.dbname, "name", "db_name", "dbname")?;

    Ok(ConnectionParams {
        host,
        port: overrides.port.or(bundle.port),
        database,
        user,
        password,
    })
}

fn pick(
    explicit: &Option<String>,
    secret: &Option<String>,
    field: &'static str,
    flag: &'static str,
    secret_key: &'static str,
) -> Result<String, ConfigError> {
    explicit
        .as_ref()
        .or(secret.as_ref())
        .cloned()
        .ok_or(ConfigError::MissingConnectionField {
            field,
            flag,
            secret_key,
        })
}
