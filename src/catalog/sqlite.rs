use super::{ColumnInfo, DbBackend, ForeignKeyInfo, SchemaInspector, TableFilter, TableInfo};
use crate::{util::base_type_name, Error, SemanticType};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

/// Reads `sqlite_master` and the table pragmas of the main SQLite database
#[derive(Clone, Debug)]
pub struct SqliteInspector {
    pool: SqlitePool,
}

impl SqliteInspector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn primary_key_of(&self, table_name: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query(r#"SELECT name FROM pragma_table_info(?) WHERE pk > 0 ORDER BY pk LIMIT 1"#)
            .bind(table_name)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.try_get::<String, _>(0))
            .transpose()
    }
}

#[async_trait]
impl SchemaInspector for SqliteInspector {
    fn backend(&self) -> DbBackend {
        DbBackend::Sqlite
    }

    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<TableInfo>, Error> {
        let rows = sqlx::query(
            r#"SELECT name FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
            ORDER BY name"#,
        )
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
            r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?) ORDER BY cid"#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(context.as_str()))?;

        rows.iter()
            .map(|row| {
                let primary_key = row.try_get::<i64, _>(3)? > 0;
                Ok(ColumnInfo {
                    name: row.try_get(0)?,
                    col_type: row.try_get(1)?,
                    not_null: primary_key || row.try_get::<i64, _>(2)? != 0,
                    primary_key,
                    comment: None,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Error::query(context))
    }

    async fn list_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, Error> {
        let context = format!("list foreign keys of table `{table_name}`");
        let rows = sqlx::query(
            r#"SELECT id, "table", "from", "to", on_update, on_delete
            FROM pragma_foreign_key_list(?)
            ORDER BY id, seq"#,
        )
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(context.as_str()))?;

        let rows = rows
            .into_iter()
            .map(|row| {
                Ok((
                    row.try_get::<i64, _>(0)?,
                    row.try_get::<String, _>(1)?,
                    row.try_get::<String, _>(2)?,
                    row.try_get::<Option<String>, _>(3)?,
                    row.try_get::<String, _>(4)?,
                    row.try_get::<String, _>(5)?,
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Error::query(context.as_str()))?;

        let mut foreign_keys = Vec::with_capacity(rows.len());
        for (id, ref_table, column, ref_column, on_update, on_delete) in rows {
            // `REFERENCES parent` without a column list targets the primary key,
            // or the rowid of a table that declares none
            let ref_column = match ref_column {
                Some(ref_column) => ref_column,
                None => self
                    .primary_key_of(&ref_table)
                    .await
                    .map_err(Error::query(context.as_str()))?
                    .unwrap_or_else(|| "rowid".to_owned()),
            };
            foreign_keys.push(ForeignKeyInfo {
                name: format!("fk_{table_name}_{id}"),
                column,
                ref_table,
                ref_column,
                on_update,
                on_delete,
            });
        }
        Ok(foreign_keys)
    }
}

/// Type table for declared SQLite column types
pub fn map_type(col_type: &str) -> SemanticType {
    match base_type_name(col_type).as_str() {
        "integer" | "int" | "bigint" | "smallint" | "tinyint" | "mediumint" => {
            SemanticType::BigInteger
        }
        "real" | "double" | "double precision" | "float" | "numeric" | "decimal" => {
            SemanticType::Double
        }
        "text" | "varchar" | "character varying" | "char" | "character" | "clob" => {
            SemanticType::Text
        }
        "boolean" | "bool" => SemanticType::Boolean,
        "date" | "datetime" | "timestamp" => SemanticType::Timestamp,
        "blob" => SemanticType::Binary,
        "json" | "jsonb" => SemanticType::Json,
        _ => SemanticType::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> Result<SqliteInspector, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        for sql in [
            r#"CREATE TABLE companies (
                id INTEGER PRIMARY KEY,
                name TEXT
            )"#,
            r#"CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
                mentor_id INTEGER REFERENCES users,
                email VARCHAR(255)
            )"#,
        ] {
            sqlx::query(sql).execute(&pool).await?;
        }
        Ok(SqliteInspector::new(pool))
    }

    #[tokio::test]
    async fn test_list_tables() -> Result<(), Error> {
        let inspector = setup().await.map_err(Error::query("setup"))?;
        let tables = inspector.list_tables(&TableFilter::default()).await?;
        assert_eq!(
            tables,
            vec![
                TableInfo {
                    name: "companies".to_owned()
                },
                TableInfo {
                    name: "users".to_owned()
                },
            ]
        );

        let filter = TableFilter::new(vec![], vec!["companies".to_owned()]);
        let tables = inspector.list_tables(&filter).await?;
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
        Ok(())
    }

    #[tokio::test]
    async fn test_list_columns() -> Result<(), Error> {
        let inspector = setup().await.map_err(Error::query("setup"))?;
        let columns = inspector.list_columns("users").await?;
        assert_eq!(
            columns,
            vec![
                ColumnInfo::new("id", "INTEGER").primary_key(),
                ColumnInfo::new("company_id", "INTEGER").not_null(),
                ColumnInfo::new("mentor_id", "INTEGER"),
                ColumnInfo::new("email", "VARCHAR(255)"),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_list_foreign_keys() -> Result<(), Error> {
        let inspector = setup().await.map_err(Error::query("setup"))?;
        let mut foreign_keys = inspector.list_foreign_keys("users").await?;
        foreign_keys.sort_by(|a, b| a.column.cmp(&b.column));
        assert_eq!(foreign_keys.len(), 2);

        assert_eq!(foreign_keys[0].column, "company_id");
        assert_eq!(foreign_keys[0].ref_table, "companies");
        assert_eq!(foreign_keys[0].ref_column, "id");
        assert_eq!(foreign_keys[0].on_delete, "CASCADE");

        assert_eq!(foreign_keys[1].column, "mentor_id");
        assert_eq!(foreign_keys[1].ref_table, "users");
        assert_eq!(foreign_keys[1].ref_column, "id");

        assert!(inspector.list_foreign_keys("companies").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_tables_skips_internal_tables_only() -> Result<(), Error> {
        let inspector = setup().await.map_err(Error::query("setup"))?;
        for sql in [
            "CREATE TABLE sqlitex_data (id INTEGER PRIMARY KEY)",
            "CREATE TABLE counters (id INTEGER PRIMARY KEY AUTOINCREMENT)",
        ] {
            sqlx::query(sql)
                .execute(&inspector.pool)
                .await
                .map_err(Error::query("setup"))?;
        }
        // AUTOINCREMENT creates the internal `sqlite_sequence` table
        let names: Vec<String> = inspector
            .list_tables(&TableFilter::default())
            .await?
            .into_iter()
            .map(|table| table.name)
            .collect();
        assert_eq!(names, ["companies", "counters", "sqlitex_data", "users"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_key_to_rowid_table() -> Result<(), Error> {
        let inspector = setup().await.map_err(Error::query("setup"))?;
        for sql in [
            "CREATE TABLE tags (label TEXT)",
            "CREATE TABLE notes (id INTEGER PRIMARY KEY, tag_id INTEGER REFERENCES tags)",
        ] {
            sqlx::query(sql)
                .execute(&inspector.pool)
                .await
                .map_err(Error::query("setup"))?;
        }
        let foreign_keys = inspector.list_foreign_keys("notes").await?;
        assert_eq!(foreign_keys.len(), 1);
        assert_eq!(foreign_keys[0].ref_table, "tags");
        assert_eq!(foreign_keys[0].ref_column, "rowid");
        Ok(())
    }

    #[test]
    fn test_map_type() {
        assert_eq!(map_type("INTEGER"), SemanticType::BigInteger);
        assert_eq!(map_type("VARCHAR(255)"), SemanticType::Text);
        assert_eq!(map_type("REAL"), SemanticType::Double);
        assert_eq!(map_type("DATETIME"), SemanticType::Timestamp);
        assert_eq!(map_type("BLOB"), SemanticType::Binary);
        assert_eq!(map_type("JSON"), SemanticType::Json);
        assert_eq!(map_type("BOOLEAN"), SemanticType::Boolean);
        assert_eq!(map_type(""), SemanticType::Text);
        assert_eq!(map_type("MADE_UP_TYPE"), SemanticType::Text);
    }
}
