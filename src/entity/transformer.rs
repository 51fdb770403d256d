use crate::{
    Column, DbBackend, DefaultNameResolver, Entity, EntityWriter, Error, NameResolver, Relation,
    RelationType, Schema, TableDef,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct EntityTransformer;

/// Both ends of one foreign key whose referenced table is part of the set
#[derive(Debug)]
struct RelationPair {
    owner: usize,
    target: usize,
    foreign_key: String,
    references: String,
    /// Set when the owner has several foreign keys to the same target
    qualifier: Option<String>,
}

impl EntityTransformer {
    pub fn transform(schema: Schema) -> Result<EntityWriter, Error> {
        Self::transform_with(schema, &DefaultNameResolver)
    }

    pub fn transform_with(
        schema: Schema,
        name_resolver: &dyn NameResolver,
    ) -> Result<EntityWriter, Error> {
        let mut entities = Self::normalize(schema.tables, name_resolver)?;
        Self::map_types(&mut entities, schema.backend);
        Self::infer_relations(&mut entities, name_resolver);
        Ok(EntityWriter { entities })
    }

    /// Assign canonical entity and field names
    pub fn normalize(
        tables: Vec<TableDef>,
        name_resolver: &dyn NameResolver,
    ) -> Result<Vec<Entity>, Error> {
        // Every model lands in the same Go package
        let mut entity_names = HashSet::new();
        tables
            .into_iter()
            .map(|table| {
                if table.info.name.is_empty() {
                    return Err(Error::TransformError(
                        "Table name should not be empty".into(),
                    ));
                }
                let mut taken = reserved_field_names();
                let columns = table
                    .columns
                    .into_iter()
                    .map(|info| {
                        let mut col = Column::from_info(info, name_resolver);
                        col.field_name = claim_numbered(&mut taken, col.field_name);
                        col
                    })
                    .collect();
                let name = name_resolver.resolve_entity_name(&table.info.name);
                Ok(Entity {
                    name: claim_numbered(&mut entity_names, name),
                    table_name: table.info.name,
                    columns,
                    foreign_keys: table.foreign_keys,
                    relations: Vec::new(),
                })
            })
            .collect()
    }

    pub fn map_types(entities: &mut [Entity], backend: DbBackend) {
        for entity in entities.iter_mut() {
            for col in entity.columns.iter_mut() {
                col.map_type(backend);
            }
        }
    }

    /// Derive a belongs to / has many pair from every foreign key whose
    /// referenced table is in `entities`.
    ///
    /// Must run after every entity is normalized: the target of a foreign key
    /// may come later in the list than its owner.
    pub fn infer_relations(entities: &mut [Entity], name_resolver: &dyn NameResolver) {
        let index: HashMap<String, usize> = entities
            .iter()
            .enumerate()
            .map(|(i, entity)| (entity.table_name.clone(), i))
            .collect();

        let mut pairs = Vec::new();
        for (owner, entity) in entities.iter().enumerate() {
            let mut targets_seen: HashMap<usize, usize> = HashMap::new();
            let resolved: Vec<_> = entity
                .foreign_keys
                .iter()
                .filter_map(|fk| match index.get(&fk.ref_table) {
                    Some(&target) => {
                        if entity.get_column(&fk.column).is_some()
                            && entities[target].get_column(&fk.ref_column).is_some()
                        {
                            *targets_seen.entry(target).or_default() += 1;
                        }
                        Some((fk, target))
                    }
                    None => {
                        debug!(
                            "Skipping foreign key `{}` of `{}`: table `{}` is not generated",
                            fk.name, entity.table_name, fk.ref_table
                        );
                        None
                    }
                })
                .collect();

            for (fk, target) in resolved {
                let foreign_key = entity.field_name_of(&fk.column).map(ToOwned::to_owned);
                let references = entities[target]
                    .field_name_of(&fk.ref_column)
                    .map(ToOwned::to_owned);
                let (Some(foreign_key), Some(references)) = (foreign_key, references) else {
                    debug!(
                        "Skipping foreign key `{}` of `{}`: `{}` -> `{}.{}` is not a pair of fields",
                        fk.name, entity.table_name, fk.column, fk.ref_table, fk.ref_column
                    );
                    continue;
                };
                let qualifier = (targets_seen[&target] > 1).then(|| qualifier_of(&foreign_key));
                pairs.push(RelationPair {
                    owner,
                    target,
                    foreign_key,
                    references,
                    qualifier,
                });
            }
        }

        let relations: Vec<Vec<Relation>> = (0..entities.len())
            .map(|k| {
                let entity = &entities[k];
                let mut taken = reserved_field_names();
                taken.extend(entity.columns.iter().map(|col| col.field_name.clone()));
                let belongs_to = pairs.iter().filter(|pair| pair.owner == k).map(|pair| {
                    let target = &entities[pair.target];
                    (pair, RelationType::BelongsTo, target, name_resolver.resolve_singular(&target.name))
                });
                let has_many = pairs.iter().filter(|pair| pair.target == k).map(|pair| {
                    let owner = &entities[pair.owner];
                    (pair, RelationType::HasMany, owner, name_resolver.resolve_plural(&owner.name))
                });
                belongs_to
                    .chain(has_many)
                    .map(|(pair, rel_type, other, base)| {
                        let base = match &pair.qualifier {
                            Some(qualifier) => format!("{base}{qualifier}"),
                            None => base,
                        };
                        Relation {
                            name: claim(&mut taken, base, &pair.foreign_key),
                            rel_type,
                            ref_entity: other.name.clone(),
                            foreign_key: pair.foreign_key.clone(),
                            references: pair.references.clone(),
                        }
                    })
                    .collect()
            })
            .collect();

        for (entity, relations) in entities.iter_mut().zip(relations) {
            entity.relations = relations;
        }
    }
}

/// Methods generated on every model, unusable as field names
const RESERVED_FIELD_NAMES: [&str; 1] = ["TableName"];

fn reserved_field_names() -> HashSet<String> {
    RESERVED_FIELD_NAMES.iter().map(|name| name.to_string()).collect()
}

/// `CreatedByID` qualifies as `CreatedBy`
fn qualifier_of(foreign_key: &str) -> String {
    match foreign_key.strip_suffix("ID") {
        Some(stem) if !stem.is_empty() => stem.to_owned(),
        _ => foreign_key.to_owned(),
    }
}

/// Take `name`, or `name` followed by the first free number starting at 2
fn claim_numbered(taken: &mut HashSet<String>, name: String) -> String {
    let mut candidate = name.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{name}{n}");
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

/// Take `name`, else `name` followed by the foreign key field, else a numbered variant
fn claim(taken: &mut HashSet<String>, name: String, foreign_key: &str) -> String {
    if taken.contains(&name) {
        claim_numbered(taken, format!("{name}{foreign_key}"))
    } else {
        claim_numbered(taken, name)
    }
}
