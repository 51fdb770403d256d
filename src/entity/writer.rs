use crate::{Column, Entity, Relation, util::go_string_literal};
use std::collections::BTreeSet;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EntityWriter {
    pub(crate) entities: Vec<Entity>,
}

pub struct WriterOutput {
    pub files: Vec<OutputFile>,
}

pub struct OutputFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug)]
pub struct EntityWriterContext {
    pub(crate) package_name: String,
}

impl EntityWriterContext {
    pub fn new<P>(package_name: P) -> Self
    where
        P: Into<String>,
    {
        Self {
            package_name: package_name.into(),
        }
    }
}

impl Default for EntityWriterContext {
    fn default() -> Self {
        Self::new("model")
    }
}

impl EntityWriter {
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn generate(self, context: &EntityWriterContext) -> WriterOutput {
        WriterOutput {
            files: self.write_entities(context),
        }
    }

    pub fn write_entities(&self, context: &EntityWriterContext) -> Vec<OutputFile> {
        self.entities
            .iter()
            .map(|entity| {
                let file = Self::write_entity(entity, &context.package_name);
                info!("Generating {}", file.name);
                for column in entity.columns.iter() {
                    info!("    > {}", column.get_info());
                }
                for rel in entity.relations.iter() {
                    info!("    > Relation `{}`: {}", rel.name, rel.get_go_type());
                }
                file
            })
            .collect()
    }

    /// Render one table as a self contained Go source file
    pub fn write_entity(entity: &Entity, package_name: &str) -> OutputFile {
        let mut blocks = Vec::new();
        Self::write_doc_comment(&mut blocks);
        blocks.push(Self::gen_package(package_name));
        if let Some(imports) = Self::gen_imports(entity) {
            blocks.push(imports);
        }
        blocks.push(Self::gen_model_struct(entity));
        blocks.push(Self::gen_table_name_method(entity));

        let mut content = blocks.join("\n\n");
        content.push('\n');
        OutputFile {
            name: format!("{}.go", entity.table_name),
            content,
        }
    }

    pub fn write_doc_comment(blocks: &mut Vec<String>) {
        let ver = env!("CARGO_PKG_VERSION");
        blocks.push(format!(
            "// Code generated by gorm-codegen {ver}. DO NOT EDIT."
        ));
    }

    pub fn gen_package(package_name: &str) -> String {
        format!("package {package_name}")
    }

    /// `None` when no field needs a package outside the builtins
    pub fn gen_imports(entity: &Entity) -> Option<String> {
        let paths: BTreeSet<&str> = entity
            .columns
            .iter()
            .filter_map(|col| col.semantic_type.import_path())
            .collect();
        if paths.is_empty() {
            return None;
        }
        let lines: Vec<String> = paths.iter().map(|path| format!("\t\"{path}\"")).collect();
        Some(format!("import (\n{}\n)", lines.join("\n")))
    }

    pub fn gen_model_struct(entity: &Entity) -> String {
        let mut lines = vec![
            format!("// {} mapped from table {}", entity.name, entity.table_name),
            format!("type {} struct {{", entity.name),
        ];
        lines.extend(entity.columns.iter().map(Self::gen_field));
        if !entity.relations.is_empty() {
            lines.push(String::new());
            lines.push("\t// Relationships".to_owned());
            lines.extend(entity.relations.iter().map(Self::gen_relation_field));
        }
        lines.push("}".to_owned());
        lines.join("\n")
    }

    pub fn gen_field(column: &Column) -> String {
        let mut line = format!(
            "\t{} {} {}",
            column.field_name,
            column.semantic_type.go_type(),
            Self::gen_struct_tag(&column.gorm_tag, &column.json_tag)
        );
        if let Some(comment) = column.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            line.push_str(" // ");
            line.push_str(&comment.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        line
    }

    pub fn gen_relation_field(rel: &Relation) -> String {
        format!(
            "\t{} {} {}",
            rel.name,
            rel.get_go_type(),
            Self::gen_relation_tag(rel)
        )
    }

    pub fn gen_relation_tag(rel: &Relation) -> String {
        Self::gen_struct_tag(&rel.gen_gorm_tag(), &rel.gen_json_tag())
    }

    pub fn gen_struct_tag(gorm_tag: &str, json_tag: &str) -> String {
        format!("`gorm:\"{gorm_tag}\" json:\"{json_tag}\"`")
    }

    pub fn gen_table_name_method(entity: &Entity) -> String {
        format!(
            "// TableName returns the table name of {name}\nfunc ({name}) TableName() string {{\n\treturn {table}\n}}",
            name = entity.name,
            table = go_string_literal(&entity.table_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ColumnInfo, DbBackend, EntityTransformer, Schema, SemanticType, TableDef, tests_cfg::*,
    };
    use pretty_assertions::assert_eq;

    fn setup(tables: Vec<TableDef>) -> EntityWriter {
        EntityTransformer::transform(Schema {
            backend: DbBackend::Postgres,
            tables,
        })
        .unwrap()
    }

    fn header() -> String {
        format!(
            "// Code generated by gorm-codegen {}. DO NOT EDIT.",
            env!("CARGO_PKG_VERSION")
        )
    }

    #[test]
    fn test_write_entities() {
        let output = setup(vec![companies(), users()]).generate(&EntityWriterContext::default());
        let names: Vec<&str> = output.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["companies.go", "users.go"]);

        assert_eq!(
            output.files[0].content,
            [
                header().as_str(),
                "",
                "package model",
                "",
                "// Companies mapped from table companies",
                "type Companies struct {",
                "\tID int64 `gorm:\"column:id;primaryKey;not null;type:integer\" json:\"id\"`",
                "\tName string `gorm:\"column:name;type:text\" json:\"name\"`",
                "",
                "\t// Relationships",
                "\tUsers []Users `gorm:\"foreignKey:CompanyID;references:ID\" json:\"Users,omitempty\"`",
                "}",
                "",
                "// TableName returns the table name of Companies",
                "func (Companies) TableName() string {",
                "\treturn \"companies\"",
                "}",
                "",
            ]
            .join("\n")
        );

        assert_eq!(
            output.files[1].content,
            [
                header().as_str(),
                "",
                "package model",
                "",
                "// Users mapped from table users",
                "type Users struct {",
                "\tID int64 `gorm:\"column:id;primaryKey;not null;type:integer\" json:\"id\"`",
                "\tCompanyID int64 `gorm:\"column:company_id;not null;type:integer\" json:\"company_id\"`",
                "\tEmail string `gorm:\"column:email;type:text\" json:\"email\"`",
                "",
                "\t// Relationships",
                "\tCompany *Companies `gorm:\"foreignKey:CompanyID;references:ID\" json:\"Company,omitempty\"`",
                "}",
                "",
                "// TableName returns the table name of Users",
                "func (Users) TableName() string {",
                "\treturn \"users\"",
                "}",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_imports_and_comments() {
        let writer = setup(vec![orders()]);
        let file = EntityWriter::write_entity(&writer.entities[0], "shop");
        let lines: Vec<&str> = file.content.lines().collect();

        assert_eq!(file.name, "orders.go");
        assert_eq!(lines[2], "package shop");
        assert_eq!(
            &lines[4..8],
            &["import (", "\t\"gorm.io/datatypes\"", "\t\"time\"", ")"]
        );
        assert!(lines.contains(
            &"\tPayload datatypes.JSON `gorm:\"column:payload;type:jsonb\" json:\"payload\"` // Raw checkout payload"
        ));
        assert!(lines.contains(
            &"\tCreatedAt time.Time `gorm:\"column:created_at;not null;type:timestamp without time zone\" json:\"created_at\"`"
        ));
        // users and companies are not part of the set
        assert!(!file.content.contains("// Relationships"));
    }

    #[test]
    fn test_no_import_block() {
        let writer = setup(vec![companies()]);
        let imports = EntityWriter::gen_imports(&writer.entities[0]);
        assert_eq!(imports, None);
    }

    #[test]
    fn test_multiline_comment() {
        let mut writer = setup(vec![
            TableDef::new("notes").column(
                ColumnInfo::new("body", "bytea").comment("first line\nsecond\tline"),
            ),
        ]);
        let column = &mut writer.entities[0].columns[0];
        assert_eq!(column.get_semantic_type(), SemanticType::Binary);
        assert_eq!(
            EntityWriter::gen_field(column),
            "\tBody []byte `gorm:\"column:body;type:bytea\" json:\"body\"` // first line second line"
        );
        column.comment = Some("   ".to_owned());
        assert!(!EntityWriter::gen_field(column).contains("//"));
    }

    #[test]
    fn test_table_name_is_quoted() {
        let writer = setup(vec![TableDef::new(r#"odd"name"#)]);
        assert_eq!(
            EntityWriter::gen_table_name_method(&writer.entities[0]),
            "// TableName returns the table name of OddName\nfunc (OddName) TableName() string {\n\treturn \"odd\\\"name\"\n}"
        );
    }

    #[test]
    fn test_field_does_not_shadow_table_name_method() {
        let writer = setup(vec![
            TableDef::new("audit_entries")
                .column(ColumnInfo::new("id", "bigint").primary_key())
                .column(ColumnInfo::new("table_name", "text")),
        ]);
        let file = EntityWriter::write_entity(&writer.entities[0], "model");
        assert!(file.content.contains(
            "\tTableName2 string `gorm:\"column:table_name;type:text\" json:\"table_name\"`"
        ));
        assert!(!file.content.contains("\tTableName "));
        assert!(file.content.contains("func (AuditEntries) TableName() string {"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let render = || {
            setup(vec![companies(), users(), orders()])
                .generate(&EntityWriterContext::new("model"))
                .files
                .into_iter()
                .map(|f| (f.name, f.content))
                .collect::<Vec<_>>()
        };
        assert_eq!(render(), render());
    }
}
