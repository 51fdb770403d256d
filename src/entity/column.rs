use crate::{ColumnInfo, DbBackend, NameResolver, SemanticType};

/// A column enriched with its Go field name, type and struct tags
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) col_type: String,
    pub(crate) not_null: bool,
    pub(crate) primary_key: bool,
    pub(crate) comment: Option<String>,
    pub(crate) field_name: String,
    pub(crate) semantic_type: SemanticType,
    pub(crate) gorm_tag: String,
    pub(crate) json_tag: String,
}

impl Column {
    /// A column with its canonical field name but not yet typed
    pub(crate) fn from_info(info: ColumnInfo, name_resolver: &dyn NameResolver) -> Self {
        let field_name = name_resolver.resolve_field_name(&info.name);
        Self {
            name: info.name,
            col_type: info.col_type,
            not_null: info.not_null,
            primary_key: info.primary_key,
            comment: info.comment,
            field_name,
            semantic_type: SemanticType::Text,
            gorm_tag: String::new(),
            json_tag: String::new(),
        }
    }

    /// Fill in the semantic type and both struct tags
    pub(crate) fn map_type(&mut self, backend: DbBackend) {
        self.semantic_type = backend.map_type(&self.col_type);
        self.gorm_tag = self.gen_gorm_tag();
        self.json_tag = self.gen_json_tag();
    }

    /// `column:<name>[;primaryKey][;not null];type:<native type>`
    pub fn gen_gorm_tag(&self) -> String {
        let mut parts = vec![format!("column:{}", self.name)];
        if self.primary_key {
            parts.push("primaryKey".to_owned());
        }
        if self.not_null {
            parts.push("not null".to_owned());
        }
        parts.push(format!("type:{}", self.col_type));
        parts.join(";")
    }

    pub fn gen_json_tag(&self) -> String {
        self.name.clone()
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_col_type(&self) -> &str {
        &self.col_type
    }

    pub fn get_field_name(&self) -> &str {
        &self.field_name
    }

    pub fn get_semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    pub fn get_gorm_tag(&self) -> &str {
        &self.gorm_tag
    }

    pub fn get_json_tag(&self) -> &str {
        &self.json_tag
    }

    pub fn get_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// One line summary for the generation log
    pub fn get_info(&self) -> String {
        let mut info = format!(
            "Column `{}`: {} ({})",
            self.name,
            self.semantic_type.go_type(),
            self.col_type
        );
        if self.primary_key {
            info.push_str(", primary key");
        }
        if self.not_null {
            info.push_str(", not null");
        }
        info
    }
}
