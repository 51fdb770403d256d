//! Table definitions shared by the unit tests

use crate::{ColumnInfo, ForeignKeyInfo, TableDef};

pub fn companies() -> TableDef {
    TableDef::new("companies")
        .column(ColumnInfo::new("id", "integer").primary_key())
        .column(ColumnInfo::new("name", "text"))
}

pub fn users() -> TableDef {
    TableDef::new("users")
        .column(ColumnInfo::new("id", "integer").primary_key())
        .column(ColumnInfo::new("company_id", "integer").not_null())
        .column(ColumnInfo::new("email", "text"))
        .foreign_key(ForeignKeyInfo::new(
            "users_company_id_fkey",
            "company_id",
            "companies",
            "id",
        ))
}

pub fn orders() -> TableDef {
    TableDef::new("orders")
        .column(ColumnInfo::new("id", "bigint").primary_key())
        .column(ColumnInfo::new("user_id", "bigint").not_null())
        .column(ColumnInfo::new("company_id", "bigint").not_null())
        .column(ColumnInfo::new("total", "numeric"))
        .column(ColumnInfo::new("payload", "jsonb").comment("Raw checkout payload"))
        .column(ColumnInfo::new("created_at", "timestamp without time zone").not_null())
        .foreign_key(ForeignKeyInfo::new(
            "orders_user_id_fkey",
            "user_id",
            "users",
            "id",
        ))
        .foreign_key(ForeignKeyInfo::new(
            "orders_company_id_fkey",
            "company_id",
            "companies",
            "id",
        ))
}
