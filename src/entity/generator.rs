use crate::{
    EntityTransformer, EntityWriter, Error, Schema, SchemaInspector, TableDef, TableFilter,
};
use tracing::{debug, info, warn};

/// Collects tables, columns and foreign keys from a catalog
#[derive(Clone, Debug)]
pub struct EntityGenerator {
    schema: Schema,
}

impl EntityGenerator {
    /// Walk the catalog one table at a time: columns first, then foreign keys.
    ///
    /// Failing to list tables or columns aborts discovery. Failing to list the
    /// foreign keys of a table only costs that table its relations.
    pub async fn discover(
        inspector: &dyn SchemaInspector,
        filter: &TableFilter,
    ) -> Result<Self, Error> {
        let infos = inspector.list_tables(filter).await?;
        info!("Discovered {} table(s)", infos.len());

        let mut tables = Vec::with_capacity(infos.len());
        for info in infos {
            info!("Processing table {}", info.name);
            let columns = inspector.list_columns(&info.name).await?;
            debug!("    > {} column(s)", columns.len());
            let foreign_keys = match inspector.list_foreign_keys(&info.name).await {
                Ok(foreign_keys) => foreign_keys,
                Err(err) => {
                    warn!("{err}; table `{}` gets no relations", info.name);
                    Vec::new()
                }
            };
            debug!("    > {} foreign key(s)", foreign_keys.len());
            tables.push(TableDef {
                info,
                columns,
                foreign_keys,
            });
        }

        Ok(Self {
            schema: Schema {
                backend: inspector.backend(),
                tables,
            },
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    pub fn transform(self) -> Result<EntityWriter, Error> {
        EntityTransformer::transform(self.schema)
    }
}
