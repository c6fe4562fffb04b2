//! OpenAPI/Swagger schema to type transformation

use crate::collector::SchemaCollector;
use crate::document::Document;
use crate::naming::{camelize, declaration_name, reference_name};
use crate::{Parser, ParserError};
use swagflow_core::{
    ir::IR,
    schema::{ObjectSchema, Primitive, Schema, SchemaKind, TypeName},
    types::{Record, Type},
    GeneratorOptions,
};
use tracing::{debug, warn};

pub struct OpenAPIParser {
    options: GeneratorOptions,
}

impl Parser for OpenAPIParser {
    type Input = Document;

    fn parse(&self, input: Self::Input) -> Result<IR, ParserError> {
        self.parse_document(&input)
    }
}

impl OpenAPIParser {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Collect the declarations of `document` and transform each one
    pub fn parse_document(&self, document: &Document) -> Result<IR, ParserError> {
        let collected = SchemaCollector::new()
            .with_responses(self.options.responses)
            .collect(document)?;

        let mut ir = IR::new();
        for (name, schema) in collected {
            let name = declaration_name(&name, &self.options);
            let ty = self.schema_to_type(schema);
            debug!(name = %name, references = ?ty.references(), "Transformed schema");
            ir.add_type(name, ty);
        }
        Ok(ir)
    }

    /// Type of a top-level declaration.
    ///
    /// `allOf` is checked first, then `$ref`, then non-object types; an
    /// object (or an untyped node) becomes a record.
    pub fn schema_to_type(&self, schema: &Schema) -> Type {
        match &schema.kind {
            SchemaKind::AllOf {
                members,
                alternatives,
            } => {
                let parts = members.iter().map(|m| self.schema_to_type(m)).collect();
                self.with_alternatives(compose_intersection(parts), alternatives)
            }
            SchemaKind::Reference(path) => self.resolve_reference(path),
            SchemaKind::Object(object) => Type::Record(self.record(object)),
            SchemaKind::Any => Type::Record(Record::new()),
            _ => self.type_for(schema),
        }
    }

    /// Type of a schema used as a property value, array item or
    /// composition member.
    pub fn type_for(&self, schema: &Schema) -> Type {
        match &schema.kind {
            SchemaKind::Array { items } => Type::Array(Box::new(match items {
                Some(items) => self.item_type(items),
                None => Type::Unknown,
            })),
            SchemaKind::Primitive {
                ty: Primitive::String,
                enumeration,
            } if !enumeration.is_empty() => {
                Type::union(enumeration.iter().map(enum_literal).collect())
            }
            SchemaKind::Primitive { ty, .. } => primitive_type(*ty),
            SchemaKind::TypeList(names) => {
                Type::union(
                    names
                        .iter()
                        .map(|name| name.map_or(Type::Any, mapped_type))
                        .collect(),
                )
            }
            SchemaKind::AllOf {
                members,
                alternatives,
            } => {
                let parts = members.iter().map(|m| self.type_for(m)).collect();
                self.with_alternatives(Type::intersection(parts), alternatives)
            }
            SchemaKind::OneOf(members) | SchemaKind::AnyOf(members) => {
                Type::union(members.iter().map(|m| self.type_for(m)).collect())
            }
            SchemaKind::Object(object) => Type::Record(self.record(object)),
            SchemaKind::Reference(path) => self.resolve_reference(path),
            SchemaKind::Unknown(name) => {
                debug!(ty = %name, "Unknown schema type");
                Type::Any
            }
            SchemaKind::Any => Type::Any,
        }
    }

    fn item_type(&self, items: &Schema) -> Type {
        match &items.kind {
            SchemaKind::OneOf(members) | SchemaKind::AnyOf(members) => {
                Type::union(members.iter().map(|m| self.type_for(m)).collect())
            }
            SchemaKind::Reference(path) => self.resolve_reference(path),
            SchemaKind::Object(object) => Type::Record(self.record(object)),
            // enums inside arrays keep the plain table type
            SchemaKind::Primitive { ty, .. } => primitive_type(*ty),
            _ => self.type_for(items),
        }
    }

    fn record(&self, object: &ObjectSchema) -> Record {
        let mut record = Record::new();

        if let Some(additional) = &object.additional {
            record.indexer = Some(Box::new(self.type_for(additional)));
        }

        for (name, property) in &object.properties {
            let key = if self.options.lower_camel_case {
                camelize(name)
            } else {
                name.clone()
            };

            let mut ty = self.type_for(property);
            if property.nullable && self.options.include_nullable {
                ty = Type::Nullable(Box::new(ty));
            }

            let optional = self.options.check_required && !object.is_required(name);
            record.insert(key, ty, optional);
        }

        record
    }

    fn with_alternatives(&self, ty: Type, alternatives: &[Schema]) -> Type {
        if alternatives.is_empty() {
            return ty;
        }
        let mut types = vec![ty];
        types.extend(alternatives.iter().map(|a| self.type_for(a)));
        Type::Union(types)
    }

    fn resolve_reference(&self, path: &str) -> Type {
        match reference_name(path, &self.options) {
            Ok(name) => Type::reference(name),
            Err(e) => {
                warn!("{}; using a placeholder type", e);
                Type::Any
            }
        }
    }
}

/// Intersection of declaration-level `allOf` members: records merge into
/// one, nested intersections flatten, and references go last.
fn compose_intersection(parts: Vec<Type>) -> Type {
    let mut merged: Option<Record> = None;
    let mut structural = Vec::new();
    let mut references = Vec::new();

    for part in parts.into_iter().flat_map(|part| match part {
        Type::Intersection(inner) => inner,
        other => vec![other],
    }) {
        match part {
            Type::Record(record) => match merged.as_mut() {
                Some(existing) => existing.merge(record),
                None => merged = Some(record),
            },
            Type::Reference { .. } => references.push(part),
            other => structural.push(other),
        }
    }

    let mut types = Vec::new();
    match merged {
        Some(record) if !record.is_empty() || (structural.is_empty() && references.is_empty()) => {
            types.push(Type::Record(record))
        }
        None if structural.is_empty() && references.is_empty() => {
            types.push(Type::Record(Record::new()))
        }
        _ => {}
    }
    types.extend(structural);
    types.extend(references);
    Type::intersection(types)
}

fn enum_literal(value: &serde_json::Value) -> Type {
    match value {
        serde_json::Value::String(s) => Type::Literal(s.clone()),
        other => Type::Literal(other.to_string()),
    }
}

fn primitive_type(primitive: Primitive) -> Type {
    match primitive {
        Primitive::String => Type::String,
        Primitive::Number => Type::Number,
        Primitive::Integer => Type::Integer,
        Primitive::Boolean => Type::Bool,
        Primitive::Null => Type::Null,
    }
}

/// The fixed primitive table
fn mapped_type(name: TypeName) -> Type {
    match name {
        TypeName::Array => Type::Array(Box::new(Type::Unknown)),
        TypeName::Boolean => Type::Bool,
        TypeName::Integer => Type::Integer,
        TypeName::Number => Type::Number,
        TypeName::Null => Type::Null,
        TypeName::Object => Type::Object,
        TypeName::String | TypeName::Enum => Type::String,
    }
}

impl Default for OpenAPIParser {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}
