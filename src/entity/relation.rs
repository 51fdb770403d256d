/// Kind of an inferred association
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelationType {
    /// Held by the table storing the foreign key column, points at one row
    BelongsTo,
    /// Held by the referenced table, collects the rows pointing back at it
    HasMany,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub(crate) name: String,
    pub(crate) rel_type: RelationType,
    /// Entity name of the other side
    pub(crate) ref_entity: String,
    /// Field name of the foreign key column on the owning side
    pub(crate) foreign_key: String,
    /// Field name of the referenced column
    pub(crate) references: String,
}

impl Relation {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_rel_type(&self) -> RelationType {
        self.rel_type
    }

    pub fn get_ref_entity(&self) -> &str {
        &self.ref_entity
    }

    pub fn get_foreign_key(&self) -> &str {
        &self.foreign_key
    }

    pub fn get_references(&self) -> &str {
        &self.references
    }

    /// `*Companies` for a belongs to, `[]Users` for a has many
    pub fn get_go_type(&self) -> String {
        match self.rel_type {
            RelationType::BelongsTo => format!("*{}", self.ref_entity),
            RelationType::HasMany => format!("[]{}", self.ref_entity),
        }
    }

    pub fn gen_gorm_tag(&self) -> String {
        format!(
            "foreignKey:{};references:{}",
            self.foreign_key, self.references
        )
    }

    pub fn gen_json_tag(&self) -> String {
        format!("{},omitempty", self.name)
    }
}
