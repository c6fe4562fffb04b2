//! Core data model for swagflow: decoded schemas, the target type IR and
//! generation options.

pub mod ir;
pub mod options;
pub mod schema;
pub mod types;

pub use ir::{TypeDefinition, IR};
pub use options::GeneratorOptions;
pub use schema::{ObjectSchema, Primitive, Schema, SchemaKind, TypeName};
pub use types::{Field, Record, Type};
