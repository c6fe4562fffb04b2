//! Flow type declaration generator

use crate::{Codegen, CodegenError};
use std::fmt::Write;
use swagflow_core::{
    types::{Record, Type},
    IR,
};
use tracing::debug;

/// Header line that opens every generated file
pub const HEADER: &str = "// @flow strict";

pub struct FlowCodegen {
    exact: bool,
}

impl FlowCodegen {
    pub fn new(exact: bool) -> Self {
        Self { exact }
    }

    /// Quote keys that are not plain identifiers (`x-dashes-id`, `200`)
    fn escape_field_name(&self, name: &str) -> String {
        if is_identifier(name) {
            name.to_string()
        } else {
            let mut quoted = String::with_capacity(name.len() + 2);
            quoted.push('"');
            for c in name.chars() {
                match c {
                    '"' => quoted.push_str("\\\""),
                    '\\' => quoted.push_str("\\\\"),
                    c => quoted.push(c),
                }
            }
            quoted.push('"');
            quoted
        }
    }

    pub fn type_to_flow(&self, ty: &Type) -> Result<String, CodegenError> {
        match ty {
            Type::String => Ok("string".to_string()),
            Type::Number | Type::Integer => Ok("number".to_string()),
            Type::Bool => Ok("boolean".to_string()),
            Type::Null => Ok("null".to_string()),
            Type::Object => Ok("Object".to_string()),
            Type::Unknown => Ok("*".to_string()),
            Type::Any => Ok("any".to_string()),

            Type::Literal(value) => Ok(format!("'{}'", escape_literal(value))),

            Type::Reference { name } => Ok(name.clone()),

            Type::Array(elem) => Ok(format!("Array<{}>", self.type_to_flow(elem)?)),

            Type::Nullable(inner) => {
                let inner_type = self.type_to_flow(inner)?;
                match inner.as_ref() {
                    Type::Union(_) | Type::Intersection(_) => Ok(format!("?({})", inner_type)),
                    _ => Ok(format!("?{}", inner_type)),
                }
            }

            Type::Union(types) | Type::Intersection(types) if types.is_empty() => {
                Ok("any".to_string())
            }

            Type::Union(types) => {
                let parts = types
                    .iter()
                    .map(|t| self.member_to_flow(t, false))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join(" | "))
            }

            Type::Intersection(types) => {
                let parts = types
                    .iter()
                    .map(|t| self.member_to_flow(t, true))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join(" & "))
            }

            Type::Record(record) => self.record_to_flow(record),
        }
    }

    /// A union or intersection member; parenthesised when the operators
    /// would otherwise regroup it.
    fn member_to_flow(&self, ty: &Type, in_intersection: bool) -> Result<String, CodegenError> {
        let rendered = self.type_to_flow(ty)?;
        let needs_parens = match ty {
            Type::Union(_) => in_intersection,
            Type::Nullable(_) => true,
            _ => false,
        };
        if needs_parens {
            Ok(format!("({})", rendered))
        } else {
            Ok(rendered)
        }
    }

    fn record_to_flow(&self, record: &Record) -> Result<String, CodegenError> {
        if record.is_empty() {
            return Ok("{}".to_string());
        }

        let mut entries = Vec::with_capacity(record.fields.len() + 1);
        if let Some(indexer) = &record.indexer {
            entries.push(format!("[string]: {}", self.type_to_flow(indexer)?));
        }
        for (name, field) in &record.fields {
            let mut entry = self.escape_field_name(name);
            if field.optional {
                entry.push('?');
            }
            write!(entry, ": {}", self.type_to_flow(&field.ty)?)?;
            entries.push(entry);
        }

        let (open, close) = if self.exact { ("{|", "|}") } else { ("{", "}") };
        Ok(format!("{} {} {}", open, entries.join(", "), close))
    }
}

impl Codegen for FlowCodegen {
    fn generate(&mut self, ir: &IR) -> Result<String, CodegenError> {
        let mut lines = Vec::with_capacity(ir.types.len() + 1);
        lines.push(HEADER.to_string());

        for type_def in &ir.types {
            let rendered = self.type_to_flow(&type_def.ty)?;
            debug!(name = %type_def.name, "Rendered declaration");
            lines.push(format!("export type {} = {};", type_def.name, rendered));
        }

        Ok(lines.join("\n"))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(fields: &[(&str, Type, bool)]) -> Record {
        let mut record = Record::new();
        for (name, ty, optional) in fields {
            record.insert(*name, ty.clone(), *optional);
        }
        record
    }

    #[test]
    fn test_simple_type_generation() {
        let codegen = FlowCodegen::new(false);
        let cases = [
            (Type::String, "string"),
            (Type::Number, "number"),
            (Type::Integer, "number"),
            (Type::Bool, "boolean"),
            (Type::Null, "null"),
            (Type::Object, "Object"),
            (Type::Unknown, "*"),
            (Type::Any, "any"),
            (Type::reference("Pet"), "Pet"),
        ];
        for (ty, expected) in cases {
            assert_eq!(codegen.type_to_flow(&ty).unwrap(), expected);
        }
    }

    #[test]
    fn test_array_and_enum() {
        let codegen = FlowCodegen::new(false);
        assert_eq!(
            codegen
                .type_to_flow(&Type::Array(Box::new(Type::reference("Pet"))))
                .unwrap(),
            "Array<Pet>"
        );
        assert_eq!(
            codegen
                .type_to_flow(&Type::Array(Box::new(Type::Unknown)))
                .unwrap(),
            "Array<*>"
        );
        let status = Type::Union(vec![
            Type::Literal("available".to_string()),
            Type::Literal("it's sold".to_string()),
        ]);
        assert_eq!(
            codegen.type_to_flow(&status).unwrap(),
            r"'available' | 'it\'s sold'"
        );
    }

    #[test]
    fn test_record_generation() {
        let codegen = FlowCodegen::new(false);
        let pet = record(&[
            ("id", Type::Integer, false),
            ("x-dashes-id", Type::String, true),
            ("tag", Type::Nullable(Box::new(Type::String)), true),
        ]);
        assert_eq!(
            codegen.type_to_flow(&Type::Record(pet)).unwrap(),
            r#"{ id: number, "x-dashes-id"?: string, tag?: ?string }"#
        );
    }

    #[test]
    fn test_exact_records_and_empty_record() {
        let codegen = FlowCodegen::new(true);
        let inner = record(&[("name", Type::String, false)]);
        let outer = record(&[
            ("owner", Type::Record(inner), false),
            ("category", Type::reference("Category"), false),
        ]);
        assert_eq!(
            codegen.type_to_flow(&Type::Record(outer)).unwrap(),
            "{| owner: {| name: string |}, category: Category |}"
        );
        assert_eq!(
            codegen.type_to_flow(&Type::Record(Record::new())).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_indexer_renders_first() {
        let codegen = FlowCodegen::new(false);
        let mut map = record(&[("name", Type::String, false)]);
        map.indexer = Some(Box::new(Type::reference("Message")));
        assert_eq!(
            codegen.type_to_flow(&Type::Record(map)).unwrap(),
            "{ [string]: Message, name: string }"
        );
    }

    #[test]
    fn test_grouping() {
        let codegen = FlowCodegen::new(false);
        let union = Type::Union(vec![Type::reference("A"), Type::reference("B")]);

        assert_eq!(
            codegen
                .type_to_flow(&Type::Intersection(vec![
                    Type::reference("Base"),
                    union.clone()
                ]))
                .unwrap(),
            "Base & (A | B)"
        );
        assert_eq!(
            codegen
                .type_to_flow(&Type::Nullable(Box::new(union.clone())))
                .unwrap(),
            "?(A | B)"
        );
        assert_eq!(
            codegen
                .type_to_flow(&Type::Union(vec![
                    Type::Intersection(vec![Type::reference("A"), Type::reference("B")]),
                    Type::reference("C"),
                ]))
                .unwrap(),
            "A & B | C"
        );
    }

    #[test]
    fn test_empty_compositions_render_any() {
        let codegen = FlowCodegen::new(false);
        assert_eq!(codegen.type_to_flow(&Type::Union(Vec::new())).unwrap(), "any");
        assert_eq!(
            codegen
                .type_to_flow(&Type::Intersection(Vec::new()))
                .unwrap(),
            "any"
        );
    }

    #[test]
    fn test_generate_declarations() {
        let mut ir = IR::new();
        let mut new_pet = Record::new();
        new_pet.insert("id", Type::Integer, false);
        ir.add_type(
            "Pet",
            Type::Intersection(vec![Type::Record(new_pet), Type::reference("NewPet")]),
        );
        ir.add_type(
            "Status",
            Type::Union(vec![
                Type::Literal("a".to_string()),
                Type::Literal("b".to_string()),
            ]),
        );

        let output = FlowCodegen::new(false).generate(&ir).unwrap();
        assert_eq!(
            output,
            "// @flow strict\n\
             export type Pet = { id: number } & NewPet;\n\
             export type Status = 'a' | 'b';"
        );
    }

    #[test]
    fn test_generate_empty_ir_is_header_only() {
        assert_eq!(FlowCodegen::new(true).generate(&IR::new()).unwrap(), HEADER);
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("camelCaseId"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$ref"));
        assert!(!is_identifier("x-dashes-id"));
        assert!(!is_identifier("200"));
        assert!(!is_identifier(""));
    }
}
