use clap::Parser;
use engine_config::{
    error::ConfigError,
    settings::{connection::ConnectionOverrides, validated::LoadSettings},
};
use std::fmt;

#[derive(Parser)]
#[command(
    name = "csv-loader",
    version = "0.1.0",
    about = "Reads a CSV file from S3 and loads records into a MySQL table",
    after_help = "If the table does not exist, its columns and column types are inferred from the CSV.\n\
                  A Secrets Manager secret must be JSON with the keys username, password, host, port and dbname."
)]
pub struct LoadArgs {
    #[arg(
        long = "s3_object",
        help = "S3 path of the CSV object, formatted s3://bucket-name/prefix/object.csv"
    )]
    pub s3_object: String,

    #[arg(long = "db_host", help = "Database hostname; read from the secret if not set")]
    pub db_host: Option<String>,

    #[arg(
        long = "db_port",
        help = "Database port; read from the secret or the MySQL default if not set"
    )]
    pub db_port: Option<u16>,

    #[arg(long = "db_name", help = "Database to load into; read from the secret if not set")]
    pub db_name: Option<String>,

    #[arg(long = "db_user", help = "Database user; prefer --db_secret_arn")]
    pub db_user: Option<String>,

    #[arg(long = "db_password", help = "Database password; prefer --db_secret_arn")]
    pub db_password: Option<String>,

    #[arg(
        long = "db_secret_arn",
        help = "ARN of a Secrets Manager secret holding the connection credentials"
    )]
    pub db_secret_arn: Option<String>,

    #[arg(long = "table_name", help = "Target table, created if it does not exist")]
    pub table_name: String,

    #[arg(long = "drop_table", help = "Drop the table if it exists and recreate it")]
    pub drop_table: bool,

    #[arg(long = "delete_rows", help = "Remove all existing rows before loading")]
    pub delete_rows: bool,

    #[arg(
        long = "delete_mode",
        default_value = "TRUNCATE",
        help = "TRUNCATE or DELETE, how rows are removed when --delete_rows is set"
    )]
    pub delete_mode: String,

    #[arg(
        long = "chunk_size",
        default_value_t = 10_000,
        help = "Rows read and inserted per iteration; more rows need more memory"
    )]
    pub chunk_size: usize,

    #[arg(
        long = "ssl_ca_url",
        default_value = "https://s3.amazonaws.com/rds-downloads/rds-combined-ca-bundle.pem",
        help = "URL of the SSL CA bundle used to connect to the database"
    )]
    pub ssl_ca_url: String,

    // Passed in by Glue, not used.
    #[arg(long = "extra-py-files", hide = true)]
    pub extra_py_files: Option<String>,
    #[arg(long = "scriptLocation", hide = true)]
    pub script_location: Option<String>,
    #[arg(long = "job-bookmark-option", hide = true)]
    pub job_bookmark_option: Option<String>,
    #[arg(long = "job-language", hide = true)]
    pub job_language: Option<String>,
    #[arg(long = "connection-names", hide = true)]
    pub connection_names: Option<String>,
}

impl LoadArgs {
    pub fn into_settings(self) -> Result<LoadSettings, ConfigError> {
        let connection = ConnectionOverrides {
            host: self.db_host,
            port: self.db_port,
            database: self.db_name,
            user: self.db_user,
            password: self.db_password,
        };

        LoadSettings::builder()
            .s3_object(self.s3_object)
            .table_name(self.table_name)
            .connection(connection)
            .secret_id(self.db_secret_arn)
            .drop_table(self.drop_table)
            .delete_rows(self.delete_rows)
            .delete_mode(self.delete_mode)
            .chunk_size(self.chunk_size)
            .ca_bundle_url(self.ssl_ca_url)
            .build()
    }
}

// Logged at startup, so the password is left out.
impl fmt::Debug for LoadArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadArgs")
            .field("s3_object", &self.s3_object)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_secret_arn", &self.db_secret_arn)
            .field("table_name", &self.table_name)
            .field("drop_table", &self.drop_table)
            .field("delete_rows", &self.delete_rows)
            .field("delete_mode", &self.delete_mode)
            .field("chunk_size", &self.chunk_size)
            .field("ssl_ca_url", &self.ssl_ca_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_config::settings::disposition::{DeleteMode, LoadDisposition};

    fn parse(extra: &[&str]) -> LoadArgs {
        let mut argv = vec![
            "csv-loader",
            "--s3_object",
            "s3://exports/orders.csv",
            "--table_name",
            "orders",
        ];
        argv.extend_from_slice(extra);
        LoadArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.delete_mode, "TRUNCATE");
        assert_eq!(args.chunk_size, 10_000);
        assert!(!args.drop_table);

        let settings = args.into_settings().unwrap();
        assert_eq!(settings.disposition(), LoadDisposition::NoOp);
        assert!(settings.secret_id.is_none());
    }

    #[test]
    fn test_connection_flags() {
        let settings = parse(&[
            "--db_host",
            "db.internal",
            "--db_port",
            "3307",
            "--db_user",
            "loader",
            "--db_secret_arn",
            "arn:aws:secretsmanager:eu-west-1:1:secret:db",
            "--delete_rows",
            "--delete_mode",
            "delete",
            "--chunk_size",
            "500",
        ])
        .into_settings()
        .unwrap();

        assert_eq!(settings.connection.host.as_deref(), Some("db.internal"));
        assert_eq!(settings.connection.port, Some(3307));
        assert_eq!(settings.connection.user.as_deref(), Some("loader"));
        assert!(settings.connection.password.is_none());
        assert_eq!(
            settings.disposition(),
            LoadDisposition::DeleteRows(DeleteMode::Delete)
        );
        assert_eq!(settings.chunk_size(), 500);
    }

    #[test]
    fn test_glue_arguments_are_accepted() {
        let args = parse(&[
            "--extra-py-files",
            "s3://bucket/libs.zip",
            "--scriptLocation",
            "s3://bucket/script.py",
            "--job-bookmark-option",
            "job-bookmark-disable",
            "--job-language",
            "python",
            "--connection-names",
            "rds",
        ]);
        assert!(args.into_settings().is_ok());
    }

    #[test]
    fn test_bogus_delete_mode() {
        let err = parse(&["--delete_mode", "bogus"]).into_settings().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDeleteMode(_)));
    }

    #[test]
    fn test_missing_required_flag() {
        assert!(LoadArgs::try_parse_from(["csv-loader", "--table_name", "orders"]).is_err());
    }

    #[test]
    fn test_debug_omits_password() {
        let args = parse(&["--db_password", "hunter2"]);
        let logged = format!("{args:?}");
        assert!(!logged.contains("hunter2"));
        assert!(logged.contains("orders"));
    }
}
