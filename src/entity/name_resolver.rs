use heck::ToUpperCamelCase;
use std::fmt::Debug;

/// Turns raw catalog names into Go identifiers.
///
/// The default methods implement the naming rules used by the generator.
/// Override them to handle, for example, irregular plural table names.
pub trait NameResolver: Debug {
    /// `user_profiles` becomes `UserProfiles`
    fn resolve_entity_name(&self, table_name: &str) -> String {
        exported_ident(table_name.to_upper_camel_case(), "Table")
    }

    /// `email` becomes `Email`, `id` becomes `ID` and `company_id` becomes `CompanyID`
    fn resolve_field_name(&self, column_name: &str) -> String {
        if column_name == "id" {
            return "ID".to_owned();
        }
        let name = column_name.to_upper_camel_case();
        let name = match name.strip_suffix("Id") {
            Some(stem) => format!("{stem}ID"),
            None => name,
        };
        exported_ident(name, "Column")
    }

    /// Best effort singular form: a trailing `ies` becomes `y`, otherwise one
    /// trailing `s` is dropped. Irregular plurals are left as they are.
    fn resolve_singular(&self, name: &str) -> String {
        if let Some(stem) = name.strip_suffix("ies").filter(|stem| !stem.is_empty()) {
            format!("{stem}y")
        } else if let Some(stem) = name.strip_suffix('s').filter(|stem| !stem.is_empty()) {
            stem.to_owned()
        } else {
            name.to_owned()
        }
    }

    /// Best effort plural form: an `s` is appended unless already present
    fn resolve_plural(&self, name: &str) -> String {
        if name.ends_with('s') {
            name.to_owned()
        } else {
            format!("{name}s")
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DefaultNameResolver;

impl NameResolver for DefaultNameResolver {}

/// Go exports identifiers starting with an upper case letter; anything else gets a prefix
fn exported_ident(ident: String, prefix: &str) -> String {
    match ident.chars().next() {
        Some(c) if c.is_uppercase() => ident,
        _ => format!("{prefix}{ident}"),
    }
}
