use async_trait::async_trait;
use gorm_codegen::{
    ColumnInfo, DbBackend, Error, ForeignKeyInfo, SchemaInspector, TableDef, TableFilter,
    TableInfo,
};

/// Answers catalog queries from a fixed list of tables
pub struct MockInspector {
    backend: DbBackend,
    tables: Vec<TableDef>,
}

impl MockInspector {
    pub fn new(backend: DbBackend) -> Self {
        Self {
            backend,
            tables: Vec::new(),
        }
    }

    pub fn append_table(mut self, table: TableDef) -> Self {
        self.tables.push(table);
        self
    }

    fn find(&self, table_name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.info.name == table_name)
    }
}

#[async_trait]
impl SchemaInspector for MockInspector {
    fn backend(&self) -> DbBackend {
        self.backend
    }

    async fn list_tables(&self, filter: &TableFilter) -> Result<Vec<TableInfo>, Error> {
        Ok(self
            .tables
            .iter()
            .filter(|t| filter.accepts(&t.info.name))
            .map(|t| t.info.clone())
            .collect())
    }

    async fn list_columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, Error> {
        Ok(self
            .find(table_name)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn list_foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKeyInfo>, Error> {
        Ok(self
            .find(table_name)
            .map(|t| t.foreign_keys.clone())
            .unwrap_or_default())
    }
}

pub fn companies() -> TableDef {
    TableDef::new("companies")
        .column(ColumnInfo::new("id", "int").primary_key())
        .column(ColumnInfo::new("name", "text"))
}

pub fn users() -> TableDef {
    TableDef::new("users")
        .column(ColumnInfo::new("id", "int").primary_key())
        .column(ColumnInfo::new("company_id", "int").not_null())
        .column(ColumnInfo::new("email", "text"))
        .foreign_key(ForeignKeyInfo::new(
            "fk_users_company",
            "company_id",
            "companies",
            "id",
        ))
}

pub fn orders() -> TableDef {
    TableDef::new("orders")
        .column(ColumnInfo::new("id", "bigint unsigned").primary_key())
        .column(ColumnInfo::new("user_id", "int").not_null())
        .column(ColumnInfo::new("placed_at", "datetime").not_null())
        .column(ColumnInfo::new("meta", "json"))
        .foreign_key(ForeignKeyInfo::new(
            "fk_orders_user",
            "user_id",
            "users",
            "id",
        ))
}

/// A MySQL flavoured catalog holding `companies`, `users` and `orders`
pub fn shop() -> MockInspector {
    MockInspector::new(DbBackend::MySql)
        .append_table(companies())
        .append_table(users())
        .append_table(orders())
}
