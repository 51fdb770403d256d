use crate::{Column, ForeignKeyInfo, Relation, RelationType};

/// One table ready to be rendered as a Go struct
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub(crate) table_name: String,
    pub(crate) name: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) foreign_keys: Vec<ForeignKeyInfo>,
    pub(crate) relations: Vec<Relation>,
}

impl Entity {
    pub fn get_table_name(&self) -> &str {
        &self.table_name
    }

    /// The canonical identifier, used as the Go type name
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_foreign_keys(&self) -> &[ForeignKeyInfo] {
        &self.foreign_keys
    }

    pub fn get_relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn get_column(&self, column_name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == column_name)
    }

    pub fn get_field_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|col| col.field_name.as_str())
            .collect()
    }

    pub fn get_relation_names(&self) -> Vec<&str> {
        self.relations.iter().map(|rel| rel.name.as_str()).collect()
    }

    pub fn get_relations_of_type(&self, rel_type: RelationType) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|rel| rel.rel_type == rel_type)
            .collect()
    }

    /// Field name assigned to a raw column name during normalization
    pub(crate) fn field_name_of(&self, column_name: &str) -> Option<&str> {
        self.get_column(column_name)
            .map(|col| col.field_name.as_str())
    }
}
