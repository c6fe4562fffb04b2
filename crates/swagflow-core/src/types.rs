//! Target type representation - algebraic data types
//!
//! This is the intermediate form between a decoded [`Schema`](crate::schema::Schema)
//! and rendered declaration text. Nothing here knows the target syntax;
//! the codegen crate decides how each variant is spelled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    /// Primitive types
    String,
    Number,
    Integer,
    Bool,
    Null,
    /// Untyped object
    Object,
    /// Element of an array whose item type was never declared
    Unknown,
    /// Placeholder for anything that could not be resolved
    Any,

    /// A single enum value
    Literal(String),

    /// Reference to another declaration by its final name
    Reference {
        name: String,
    },

    /// Compound types
    Array(Box<Type>),
    Union(Vec<Type>),
    Intersection(Vec<Type>),
    Nullable(Box<Type>),

    /// Product type (object literal)
    Record(Record),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Fields keyed by their emitted name, in declaration order
    pub fields: IndexMap<String, Field>,
    /// Value type of an `additionalProperties` indexer
    pub indexer: Option<Box<Type>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub ty: Type,
    pub optional: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.indexer.is_none()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: Type, optional: bool) {
        self.fields.insert(name.into(), Field { ty, optional });
    }

    /// Append the fields of `other`; a field already present keeps its
    /// position and takes the later value.
    pub fn merge(&mut self, other: Record) {
        self.fields.extend(other.fields);
        if other.indexer.is_some() {
            self.indexer = other.indexer;
        }
    }
}

impl Type {
    pub fn reference(name: impl Into<String>) -> Self {
        Type::Reference { name: name.into() }
    }

    /// Union of `types`, collapsing the single-member case; an empty
    /// union is [`Type::Any`]
    pub fn union(mut types: Vec<Type>) -> Self {
        match types.len() {
            0 => Type::Any,
            1 => types.remove(0),
            _ => Type::Union(types),
        }
    }

    /// Intersection of `types`, collapsing the single-member case; an empty
    /// intersection is [`Type::Any`]
    pub fn intersection(mut types: Vec<Type>) -> Self {
        match types.len() {
            0 => Type::Any,
            1 => types.remove(0),
            _ => Type::Intersection(types),
        }
    }

    /// Names of every declaration this type refers to, in first-use order
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        match self {
            Type::Reference { name } => {
                if !refs.contains(&name.as_str()) {
                    refs.push(name);
                }
            }
            Type::Array(inner) | Type::Nullable(inner) => inner.collect_references(refs),
            Type::Union(types) | Type::Intersection(types) => {
                for t in types {
                    t.collect_references(refs);
                }
            }
            Type::Record(record) => {
                if let Some(indexer) = &record.indexer {
                    indexer.collect_references(refs);
                }
                for field in record.fields.values() {
                    field.ty.collect_references(refs);
                }
            }
            _ => {}
        }
    }
}
