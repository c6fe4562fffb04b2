//! End-to-end generation from fixture documents

mod fixtures;

use fixtures::Fixtures;
use pretty_assertions::assert_eq;
use swagflow_core::GeneratorOptions;
use swagflow_parser::{collector::SchemaCollector, Document, OpenAPIParser, Parser, ParserError};

#[test]
fn test_swagger2_default_options() {
    let output = Fixtures::generate("petstore.json", GeneratorOptions::default());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Pet = { id: number } & NewPet;\n\
         export type NewPet = { name: string, tag: string, category: Category };\n\
         export type ErrorModel = { code: number, message: string };\n\
         export type IGenericCollectionPet = { items: Array<Pet> };\n\
         export type IGenericCollectionString = { items: Array<string> };"
    );
}

#[test]
fn test_swagger2_check_required() {
    let output = Fixtures::generate("petstore.json", Fixtures::check_required());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Pet = { id: number } & NewPet;\n\
         export type NewPet = { name: string, tag?: string, category?: Category };\n\
         export type ErrorModel = { code: number, message: string };\n\
         export type IGenericCollectionPet = { items?: Array<Pet> };\n\
         export type IGenericCollectionString = { items?: Array<string> };"
    );
}

#[test]
fn test_swagger2_exact() {
    let output = Fixtures::generate(
        "petstore.json",
        GeneratorOptions {
            exact: true,
            ..GeneratorOptions::default()
        },
    );
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Pet = {| id: number |} & NewPet;\n\
         export type NewPet = {| name: string, tag: string, category: Category |};\n\
         export type ErrorModel = {| code: number, message: string |};\n\
         export type IGenericCollectionPet = {| items: Array<Pet> |};\n\
         export type IGenericCollectionString = {| items: Array<string> |};"
    );
}

#[test]
fn test_swagger2_suffix_and_prefix() {
    let output = Fixtures::generate(
        "petstore.json",
        GeneratorOptions {
            check_required: true,
            prefix: "Api".to_string(),
            suffix: "Type".to_string(),
            ..GeneratorOptions::default()
        },
    );
    assert_eq!(
        output,
        "// @flow strict\n\
         export type ApiPetType = { id: number } & ApiNewPetType;\n\
         export type ApiNewPetType = { name: string, tag?: string, category?: ApiCategoryType };\n\
         export type ApiErrorModelType = { code: number, message: string };\n\
         export type ApiIGenericCollectionPetType = { items?: Array<ApiPetType> };\n\
         export type ApiIGenericCollectionStringType = { items?: Array<string> };"
    );
}

#[test]
fn test_openapi3_nullable_and_one_of() {
    let output = Fixtures::generate("petstore.openapi.yaml", Fixtures::check_required());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Pet = { id: ?number, name: string, tag?: string, \"x-dashes-id\": string, owner?: Person | Company };\n\
         export type Pets = Array<Pet>;\n\
         export type Error = { code: number, message: string };\n\
         export type Person = { name?: string };\n\
         export type Company = { \"tax-id\"?: number };"
    );
}

#[test]
fn test_openapi3_ignore_nullable_and_lower_camel_case() {
    let output = Fixtures::generate(
        "petstore.openapi.yaml",
        GeneratorOptions {
            check_required: true,
            lower_camel_case: true,
            include_nullable: false,
            ..GeneratorOptions::default()
        },
    );
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Pet = { id: number, name: string, tag?: string, xDashesId: string, owner?: Person | Company };\n\
         export type Pets = Array<Pet>;\n\
         export type Error = { code: number, message: string };\n\
         export type Person = { name?: string };\n\
         export type Company = { taxId?: number };"
    );
}

#[test]
fn test_object_in_array() {
    let output = Fixtures::generate("objectInArray.yaml", Fixtures::check_required());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type ObjectInArray = { array: Array<{ requiredProp: string, \"x-dashes-id\": string, optionalProp?: string, \"x-dashes-optional-id\"?: string }> };"
    );
}

#[test]
fn test_nested_object() {
    let output = Fixtures::generate("nestedObject.yaml", Fixtures::check_required());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type NestedObject = { nestedProperty: { base: Example, special: Example } };\n\
         export type Example = { value: number, name: string };"
    );
}

#[test]
fn test_additional_properties() {
    let output = Fixtures::generate("additionalProperties.yaml", Fixtures::check_required());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Simple = { [string]: string };\n\
         export type Complex = { [string]: { code?: number, text?: string }, name: string };\n\
         export type Messages = { [string]: Message };\n\
         export type Message = { code: number, text: string };"
    );
}

#[test]
fn test_responses_mode() {
    let without = Fixtures::generate("responses.yaml", GeneratorOptions::default());
    assert_eq!(
        without,
        "// @flow strict\n\
         export type Pet = { name: string, status: 'available' | 'sold' };\n\
         export type Mixed = { values: Array<string | number | Pet> };"
    );

    let with = Fixtures::generate(
        "responses.yaml",
        GeneratorOptions {
            responses: true,
            ..GeneratorOptions::default()
        },
    );
    assert_eq!(
        with,
        "// @flow strict\n\
         export type Pet = { name: string, status: 'available' | 'sold' };\n\
         export type Mixed = { values: Array<string | number | Pet> };\n\
         export type PetList = { items: Array<Pet>, total: number };"
    );
}

#[test]
fn test_ir_references_follow_declarations() {
    let ir = OpenAPIParser::new(Fixtures::check_required())
        .parse(Fixtures::document("petstore.json"))
        .unwrap();

    let pet = ir.get("Pet").unwrap();
    assert_eq!(pet.ty.references(), vec!["NewPet"]);
    let new_pet = ir.get("NewPet").unwrap();
    assert_eq!(new_pet.ty.references(), vec!["Category"]);
    assert!(ir.get("Category").is_none());
}

#[test]
fn test_no_definitions_error() {
    let doc = Document::from_yaml_str(
        r#"
openapi: 3.0.1
paths:
  /health:
    get:
      responses:
        '200':
          description: ok
"#,
    )
    .unwrap();

    let result = OpenAPIParser::new(GeneratorOptions {
        responses: true,
        ..GeneratorOptions::default()
    })
    .parse(doc);
    assert!(matches!(result, Err(ParserError::NoDefinitions)));
}

#[test]
fn test_collector_order_matches_output() {
    let doc = Fixtures::document("responses.yaml");
    let collected = SchemaCollector::new()
        .with_responses(true)
        .collect(&doc)
        .unwrap();
    let names: Vec<_> = collected.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Pet", "Mixed", "PetList"]);
}

#[test]
fn test_root_enum_and_merged_properties() {
    let output = Fixtures::generate("enumOnRoot.yaml", GeneratorOptions::default());
    assert_eq!(
        output,
        "// @flow strict\n\
         export type Status = 'a' | 'b';\n\
         export type Order = { id: number, status: Status };\n\
         export type OnlyUnknown = any;\n\
         export type EmptyOneOf = any;\n\
         export type Holder = { a: any, b: any };"
    );
}
