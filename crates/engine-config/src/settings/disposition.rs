use crate::error::ConfigError;
use std::{fmt, str::FromStr};

/// How existing rows are cleared when the table is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    #[default]
    Truncate,
    Delete,
}

impl FromStr for DeleteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRUNCATE" => Ok(DeleteMode::Truncate),
            "DELETE" => Ok(DeleteMode::Delete),
            _ => Err(ConfigError::InvalidDeleteMode(s.to_string())),
        }
    }
}

impl fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteMode::Truncate => write!(f, "TRUNCATE"),
            DeleteMode::Delete => write!(f, "DELETE"),
        }
    }
}

/// What happens to the target table before the first chunk is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadDisposition {
    DropTable,
    DeleteRows(DeleteMode),
    #[default]
    NoOp,
}

impl LoadDisposition {
    /// Dropping takes precedence over clearing rows when both are requested.
    pub fn from_flags(drop_table: bool, delete_rows: bool, mode: DeleteMode) -> Self {
        if drop_table {
            LoadDisposition::DropTable
        } else if delete_rows {
            LoadDisposition::DeleteRows(mode)
        } else {
            LoadDisposition::NoOp
        }
    }
}
