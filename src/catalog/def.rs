/// A table as listed by the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
}

/// A column as reported by the catalog, in ordinal order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// The native type descriptor, e.g. `varchar(255)` or `timestamp with time zone`
    pub col_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub comment: Option<String>,
}

/// A single column foreign key constraint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignKeyInfo {
    pub name: String,
    pub column: String,
    pub ref_table: String,
    pub ref_column: String,
    pub on_update: String,
    pub on_delete: String,
}

/// Everything discovered about one table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDef {
    pub info: TableInfo,
    pub columns: Vec<ColumnInfo>,
    pub foreign_keys: Vec<ForeignKeyInfo>,
}

/// The filtered set of tables of one schema, in discovery order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub backend: super::DbBackend,
    pub tables: Vec<TableDef>,
}

impl ColumnInfo {
    pub fn new<N, T>(name: N, col_type: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            col_type: col_type.into(),
            not_null: false,
            primary_key: false,
            comment: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub fn comment<C>(mut self, comment: C) -> Self
    where
        C: Into<String>,
    {
        self.comment = Some(comment.into());
        self
    }
}

impl ForeignKeyInfo {
    pub fn new<N, C, T, R>(name: N, column: C, ref_table: T, ref_column: R) -> Self
    where
        N: Into<String>,
        C: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        Self {
            name: name.into(),
            column: column.into(),
            ref_table: ref_table.into(),
            ref_column: ref_column.into(),
            on_update: "NO ACTION".to_owned(),
            on_delete: "NO ACTION".to_owned(),
        }
    }
}

impl TableDef {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            info: TableInfo { name: name.into() },
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnInfo) -> Self {
        self.columns.push(column);
        self
    }

    pub fn foreign_key(mut self, foreign_key: ForeignKeyInfo) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }
}
