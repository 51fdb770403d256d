//! Per dialect catalog readers.
//!
//! Every dialect implements [`SchemaInspector`] against its own metadata
//! catalog. Supporting a new database means adding an implementer and a
//! [`DbBackend`] variant with its type table; nothing else matches on the
//! dialect.

mod def;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use def::*;
pub use mysql::MySqlInspector;
pub use postgres::PostgresInspector;
pub use sqlite::SqliteInspector;

use crate::{Error, SemanticType};
use async_trait::async_trait;
use std::{fmt, str::FromStr};

/// The database dialects a schema can be discovered from
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DbBackend {
    MySql,
    Postgres,
    Sqlite,
}

impl DbBackend {
    /// Pick the dialect from the scheme of a database URL
    pub fn from_url_scheme(scheme: &str) -> Result<Self, Error> {
        match scheme {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(Error::UnsupportedDialect(other.to_owned())),
        }
    }

    /// Map a native column type of this dialect to its semantic type.
    ///
    /// Total: anything the table does not know maps to [`SemanticType::Text`].
    pub fn map_type(&self, col_type: &str) -> SemanticType {
        match self {
            Self::MySql => mysql::map_type(col_type),
            Self::Postgres => postgres::map_type(col_type),
            Self::Sqlite => sqlite::map_type(col_type),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DbBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(Error::UnsupportedDialect(s.to_owned())),
        }
    }
}

impl fmt::Display for DbBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table include and exclude lists
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableFilter {
    /// Only these tables are generated; empty means every table
    pub tables: Vec<String>,
    /// These tables are never generated, even when listed in `tables`
    pub ignore_tables: Vec<String>,
}

impl TableFilter {
    pub fn new(tables: Vec<String>, ignore_tables: Vec<String>) -> Self {
        Self {
            tables,
            ignore_tables,
        }
    }

    pub fn accepts(&self, table_name: &str) -> bool {
        let included = self.tables.is_empty() || self.tables.iter().any(|t| t == table_name);
        let ignored = self.ignore_tables.iter().any(|t| t == table_name);
        included && !ignored
    }

    pub(crate) fn apply(&self, table_names: Vec<String>) -> Vec<TableInfo> {
        table_names
            .into_iter()
            .filter(|name| self.accepts(name))
            .map(|name| TableInfo { name })
            .collect()
    }
}

/// Read only access to the metadata catalog of one database schema
#[async_trait]
pub trait SchemaInspector: Send + Sync {
    fn backend(&self) -> DbBackend;

    /// Tables of the schema that pass `filter`
    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<TableInfo>, Error>;

    /// Columns of a table in ordinal order
    async fn list_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, Error>;

    async fn list_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, Error>;
}
