use super::{ColumnInfo, DbBackend, ForeignKeyInfo, SchemaInspector, TableFilter, TableInfo};
use crate::{Error, SemanticType};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashSet;

/// Reads `information_schema` of one PostgreSQL schema
#[derive(Clone, Debug)]
pub struct PostgresInspector {
    pool: PgPool,
    schema: String,
}

impl PostgresInspector {
    pub const DEFAULT_SCHEMA: &'static str = "public";

    pub fn new(pool: PgPool, schema: Option<String>) -> Self {
        let schema = schema
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_SCHEMA.to_owned());
        Self { pool, schema }
    }

    async fn list_primary_keys(&self, table_name: &str) -> Result<HashSet<String>, sqlx::Error> {
        let rows = sqlx::query(
            r#"SELECT kcu.column_name::text
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
                ON tc.constraint_name = kcu.constraint_name
                AND tc.table_schema = kcu.table_schema
                AND tc.table_name = kcu.table_name
            WHERE tc.constraint_type = 'PRIMARY KEY'
                AND tc.table_schema = $1
                AND tc.table_name = $2"#,
        )
        .bind(&self.schema)
        .bind(table_name)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| row.try_get::<String, _>(0)).collect()
    }
}

#[async_trait]
impl SchemaInspector for PostgresInspector {
    fn backend(&self) -> DbBackend {
        DbBackend::Postgres
    }

    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<TableInfo>, Error> {
        let rows = sqlx::query(
            r#"SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = $1 AND table_type = 'BASE TABLE'
            ORDER BY table_name"#,
        )
        .bind(&self.schema)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(format!("list tables of schema `{}`", self.schema)))?;

        let names = rows
            .iter()
            .map(|row| row.try_get::<String, _>(0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::query("decode table names"))?;
        Ok(filter.apply(names))
    }

    async fn list_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, Error> {
        let context = format!("list columns of table `{table_name}`");
        let primary_keys = self
            .list_primary_keys(table_name)
            .await
            .map_err(Error::query(format!("list primary keys of table `{table_name}`")))?;

        let rows = sqlx::query(
            r#"SELECT
                c.column_name::text,
                c.data_type::text,
                c.is_nullable::text,
                col_description(
                    format('%I.%I', c.table_schema, c.table_name)::regclass,
                    c.ordinal_position::int
                )
            FROM information_schema.columns c
            WHERE c.table_schema = $1 AND c.table_name = $2
            ORDER BY c.ordinal_position"#,
        )
        .bind(&self.schema)
        .bind(table_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::query(context.as_str()))?;

        rows.iter()
            .map(|row| {
                let name: String = row.try_get(0)?;
                Ok(ColumnInfo {
                    primary_key: primary_keys.contains(&name),
                    name,
                    col_type: row.try_get(1)?,
                    not_null: row.try_get::<String, _>(2)? == "NO",
                    comment: row.try_get(3)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Error::query(context))
    }

    async fn list_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, Error> {
        let context = format!("list foreign keys of table `{table_name}`");
        let rows = sqlx::query(
            // Constraint names are only unique per table, so the lookup goes
            // through the owning relation rather than the constraint name
            r#"SELECT
                con.conname::text,
                att.attname::text,
                ref_cls.relname::text,
                ref_att.attname::text,
                CASE con.confupdtype
                    WHEN 'r' THEN 'RESTRICT'
                    WHEN 'c' THEN 'CASCADE'
                    WHEN 'n' THEN 'SET NULL'
                    WHEN 'd' THEN 'SET DEFAULT'
                    ELSE 'NO ACTION'
                END,
                CASE con.confdeltype
                    WHEN 'r' THEN 'RESTRICT'
                    WHEN 'c' THEN 'CASCADE'
                    WHEN 'n' THEN 'SET NULL'
                    WHEN 'd' THEN 'SET DEFAULT'
                    ELSE 'NO ACTION'
                END
            FROM pg_catalog.pg_constraint con
            CROSS JOIN LATERAL unnest(con.conkey, con.confkey)
                WITH ORDINALITY AS k(attnum, ref_attnum, ord)
            JOIN pg_catalog.pg_attribute att
                ON att.attrelid = con.conrelid AND att.attnum = k.attnum
            JOIN pg_catalog.pg_attribute ref_att
                ON ref_att.attrelid = con.confrelid AND ref_att.attnum = k.ref_attnum
            JOIN pg_catalog.pg_class ref_cls
                ON ref_cls.oid = con.confrelid
            WHERE con.contype = 'f'
                AND con.conrelid = format('%I.%I', $1::text, $2::text)::regclass
            ORDER BY con.conname, k.ord"#,
        )
        .bind(&self.schema)
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

/// Type table for `information_schema.columns.data_type`
pub fn map_type(col_type: &str) -> SemanticType {
    match col_type.trim().to_lowercase().as_str() {
        "smallint" | "integer" | "bigint" => SemanticType::BigInteger,
        "boolean" => SemanticType::Boolean,
        "real" | "double precision" | "numeric" => SemanticType::Double,
        "character varying" | "text" | "character" | "uuid" => SemanticType::Text,
        "date" | "timestamp without time zone" | "timestamp with time zone" => {
            SemanticType::Timestamp
        }
        "bytea" => SemanticType::Binary,
        "json" | "jsonb" => SemanticType::Json,
        _ => SemanticType::Text,
    }
}
