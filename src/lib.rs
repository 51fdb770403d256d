//! Discover a database schema and generate GORM models from it.
//!
//! The pipeline is split the same way the generated code is consumed:
//!
//! 1. a [`SchemaInspector`] reads tables, columns and foreign keys from the
//!    catalog of one database dialect;
//! 2. [`EntityGenerator::discover`] walks the catalog table by table and
//!    collects a [`Schema`];
//! 3. [`EntityTransformer::transform`] assigns canonical names, maps column
//!    types and infers relations across the whole table set;
//! 4. [`EntityWriter::generate`] renders one Go source file per table.

pub mod catalog;
mod entity;
mod error;
mod util;

pub use catalog::*;
pub use entity::*;
pub use error::*;

#[cfg(test)]
mod tests_cfg;
