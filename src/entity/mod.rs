mod base_entity;
mod column;
mod generator;
mod name_resolver;
mod relation;
mod semantic_type;
mod transformer;
mod writer;

pub use base_entity::*;
pub use column::*;
pub use generator::*;
pub use name_resolver::*;
pub use relation::*;
pub use semantic_type::*;
pub use transformer::*;
pub use writer::*;
