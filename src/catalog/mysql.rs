use super::{ColumnInfo, DbBackend, ForeignKeyInfo, SchemaInspector, TableFilter, TableInfo};
use crate::{util::base_type_name, Error, SemanticType};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

/// Reads `information_schema` of a MySQL or MariaDB database
#[derive(Clone, Debug)]
pub struct MySqlInspector {
    pool: MySqlPool,
    /// `None` inspects the database selected by the connection
    schema: Option<String>,
}

impl MySqlInspector {
    pub fn new(pool: MySqlPool, schema: Option<String>) -> Self {
        let schema = schema.filter(|s| !s.is_empty());
        Self { pool, schema }
    }
}

#[async_trait]
impl SchemaInspector for MySqlInspector {
    fn backend(&self) -> DbBackend {
        DbBackend::MySql
    }

    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<TableInfo>, Error> {
        let rows = sqlx::query(
            r#"SELECT CAST(table_name AS CHAR)
            FROM information_schema.tables
            WHERE table_schema = COALESCE(?, DATABASE())
                AND table_type = 'BASE TABLE'
            ORDER BY table_name"#,
        )
        .bind(self.schema.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query("list tables"))?;

        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::query("decode table names"))?;
        Ok(filter.apply(names))
    }

    async fn list_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, Error> {
        let context = format!("list columns of table `{table_name}`");
        let rows = sqlx::query(
            r#"SELECT
                CAST(column_name AS CHAR),
                CAST(column_type AS CHAR),
                CAST(is_nullable AS CHAR),
                CAST(column_key AS CHAR),
                CAST(column_comment AS CHAR)
            FROM information_schema.columns
            WHERE table_schema = COALESCE(?, DATABASE()) AND table_name = ?
            ORDER BY ordinal_position"#,
        )
        .bind(self.schema.as_deref())
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(context.as_str()))?;

        rows.iter()
            .map(|row| {
                let comment: Option<String> = row.try_get(4)?;
                Ok(ColumnInfo {
                    name: row.try_get(0)?,
                    col_type: row.try_get(1)?,
                    not_null: row.try_get::<String, _>(2)? == "NO",
                    primary_key: row.try_get::<String, _>(3)? == "PRI",
                    comment: comment.filter(|c| !c.is_empty()),
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Error::query(context))
    }

    async fn list_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, Error> {
        let context = format!("list foreign keys of table `{table_name}`");
        let rows = sqlx::query(
            r#"SELECT
                CAST(k.constraint_name AS CHAR),
                CAST(k.column_name AS CHAR),
                CAST(k.referenced_table_name AS CHAR),
                CAST(k.referenced_column_name AS CHAR),
                CAST(r.update_rule AS CHAR),
                CAST(r.delete_rule AS CHAR)
            FROM information_schema.key_column_usage k
            JOIN information_schema.referential_constraints r
                ON k.constraint_name = r.constraint_name
                AND k.table_schema = r.constraint_schema
                AND k.table_name = r.table_name
            WHERE k.referenced_table_name IS NOT NULL
                AND k.table_schema = COALESCE(?, DATABASE())
                AND k.table_name = ?
            ORDER BY k.constraint_name, k.ordinal_position"#,
        )
        .bind(self.schema.as_deref())
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(context.as_str()))?;

        rows.iter()
            .map(|row| {
                Ok(ForeignKeyInfo {
                    name: row.try_get(0)?,
                    column: row.try_get(1)?,
                    ref_table: row.try_get(2)?,
                    ref_column: row.try_get(3)?,
                    on_update: row.try_get(4)?,
                    on_delete: row.try_get(5)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Error::query(context))
    }
}

/// Type table for `information_schema.columns.column_type`
pub fn map_type(col_type: &str) -> SemanticType {
    // MySQL reports booleans as `tinyint(1)`
    if col_type.trim().eq_ignore_ascii_case("tinyint(1)") {
        return SemanticType::Boolean;
    }
    match base_type_name(col_type).as_str() {
        "int" | "integer" | "smallint" | "tinyint" | "mediumint" | "bigint" => {
            SemanticType::BigInteger
        }
        "float" | "double" | "decimal" | "numeric" => SemanticType::Double,
        "char" | "varchar" | "text" | "longtext" | "mediumtext" | "tinytext" => SemanticType::Text,
        "date" | "datetime" | "timestamp" => SemanticType::Timestamp,
        "blob" | "longblob" | "mediumblob" | "tinyblob" | "binary" | "varbinary" => {
            SemanticType::Binary
        }
        "boolean" | "bool" => SemanticType::Boolean,
        "json" => SemanticType::Json,
        _ => SemanticType::Text,
    }
}
