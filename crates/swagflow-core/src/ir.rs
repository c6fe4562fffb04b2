//! Declarations produced from one document

use crate::types::Type;
use serde::{Deserialize, Serialize};

/// Ordered list of top-level declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IR {
    pub types: Vec<TypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Final declaration name, prefix and suffix included
    pub name: String,
    pub ty: Type,
}

impl IR {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: Type) {
        self.types.push(TypeDefinition {
            name: name.into(),
            ty,
        });
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|def| def.name == name)
    }
}
