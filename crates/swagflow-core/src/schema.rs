//! Schema nodes decoded once from a loosely typed OpenAPI/Swagger document
//!
//! The raw document may put several keywords on one node (`allOf` next to
//! `type`, `$ref` next to `properties`, ...). Decoding resolves that into a
//! single [`SchemaKind`] using a fixed precedence so later stages can match
//! exhaustively instead of probing keys.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// A schema node from the input document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    pub kind: SchemaKind,
    /// `nullable: true` (OpenAPI 3) or `x-nullable: true` (Swagger 2)
    pub nullable: bool,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `allOf`, with any `oneOf`/`anyOf` members of the same node kept as
    /// extra union alternatives
    AllOf {
        members: Vec<Schema>,
        alternatives: Vec<Schema>,
    },
    /// `$ref` path, unresolved
    Reference(String),
    /// `type: [string, null]` shorthand; names outside the table are `None`
    TypeList(Vec<Option<TypeName>>),
    Array {
        items: Option<Box<Schema>>,
    },
    Primitive {
        ty: Primitive,
        enumeration: Vec<Value>,
    },
    /// A `type` outside the primitive table, e.g. Swagger 2 `file`
    Unknown(String),
    OneOf(Vec<Schema>),
    AnyOf(Vec<Schema>),
    Object(ObjectSchema),
    /// Nothing recognisable
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

/// Keys of the fixed primitive mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Array,
    Boolean,
    Integer,
    Number,
    Null,
    Object,
    String,
    Enum,
}

impl TypeName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Self::Array),
            "boolean" => Some(Self::Boolean),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "null" => Some(Self::Null),
            "object" | "Object" => Some(Self::Object),
            "string" => Some(Self::String),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    fn primitive(self) -> Option<Primitive> {
        match self {
            Self::Boolean => Some(Primitive::Boolean),
            Self::Integer => Some(Primitive::Integer),
            Self::Number => Some(Primitive::Number),
            Self::Null => Some(Primitive::Null),
            Self::String | Self::Enum => Some(Primitive::String),
            Self::Array | Self::Object => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    /// Declared properties in document order
    pub properties: IndexMap<String, Schema>,
    pub required: Vec<String>,
    /// `additionalProperties`; `true` is kept as [`SchemaKind::Any`]
    pub additional: Option<Box<Schema>>,
}

impl ObjectSchema {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            nullable: false,
            title: None,
        }
    }

    pub fn reference(path: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference(path.into()))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SchemaKind::Object(_))
    }
}

/// Wire form of a schema node; only the keywords the transformer reads
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    ty: Option<OneOrMany>,
    #[serde(rename = "enum")]
    enumeration: Option<Vec<Value>>,
    items: Option<Box<Schema>>,
    properties: Option<IndexMap<String, Schema>>,
    required: Option<RequiredList>,
    #[serde(rename = "additionalProperties")]
    additional_properties: Option<Additional>,
    #[serde(rename = "allOf")]
    all_of: Option<Vec<Schema>>,
    #[serde(rename = "oneOf")]
    one_of: Option<Vec<Schema>>,
    #[serde(rename = "anyOf")]
    any_of: Option<Vec<Schema>>,
    nullable: Option<bool>,
    #[serde(rename = "x-nullable")]
    x_nullable: Option<bool>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequiredList {
    Names(Vec<String>),
    // `required: true` on a property is not valid schema, but it shows up
    Flag(#[allow(dead_code)] bool),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Additional {
    Allowed(bool),
    Schema(Box<Schema>),
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        let nullable = raw.nullable.or(raw.x_nullable).unwrap_or(false);
        let title = raw.title.clone();
        Self {
            kind: raw.into_kind(),
            nullable,
            title,
        }
    }
}

impl RawSchema {
    fn into_kind(self) -> SchemaKind {
        let RawSchema {
            reference,
            ty,
            enumeration,
            items,
            properties,
            required,
            additional_properties,
            all_of,
            one_of,
            any_of,
            ..
        } = self;

        if let Some(members) = all_of {
            let alternatives = one_of.or(any_of).unwrap_or_default();
            return SchemaKind::AllOf {
                members,
                alternatives,
            };
        }

        if let Some(path) = reference {
            return SchemaKind::Reference(path);
        }

        let is_object = match ty {
            Some(OneOrMany::Many(names)) => {
                return SchemaKind::TypeList(names.iter().map(|n| TypeName::parse(n)).collect());
            }
            Some(OneOrMany::One(name)) => match TypeName::parse(&name) {
                Some(TypeName::Object) => true,
                Some(TypeName::Array) => return SchemaKind::Array { items },
                Some(type_name) => match type_name.primitive() {
                    Some(primitive) => {
                        return SchemaKind::Primitive {
                            ty: primitive,
                            enumeration: enumeration.unwrap_or_default(),
                        }
                    }
                    None => true,
                },
                None => return SchemaKind::Unknown(name),
            },
            None => false,
        };

        if let Some(members) = one_of {
            return SchemaKind::OneOf(members);
        }
        if let Some(members) = any_of {
            return SchemaKind::AnyOf(members);
        }

        if !is_object {
            if let Some(values) = enumeration {
                return SchemaKind::Primitive {
                    ty: Primitive::String,
                    enumeration: values,
                };
            }
        }

        if is_object || properties.is_some() || additional_properties.is_some() {
            let required = match required {
                Some(RequiredList::Names(names)) => names,
                _ => Vec::new(),
            };
            let additional = match additional_properties {
                Some(Additional::Allowed(true)) => Some(Box::new(Schema::new(SchemaKind::Any))),
                Some(Additional::Schema(schema)) => Some(schema),
                Some(Additional::Allowed(false)) | None => None,
            };
            return SchemaKind::Object(ObjectSchema {
                properties: properties.unwrap_or_default(),
                required,
                additional,
            });
        }

        SchemaKind::Any
    }
}
