//! Test fixtures for parser tests
#![allow(dead_code)]

use std::path::PathBuf;
use swagflow_codegen::{flow::FlowCodegen, Codegen};
use swagflow_core::GeneratorOptions;
use swagflow_parser::{Document, OpenAPIParser, Parser};

pub struct Fixtures;

impl Fixtures {
    pub fn path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    pub fn document(name: &str) -> Document {
        Document::from_path(&Self::path(name)).expect("Failed to load fixture")
    }

    /// Collect, transform and render a fixture without formatting
    pub fn generate(name: &str, options: GeneratorOptions) -> String {
        let exact = options.exact;
        let ir = OpenAPIParser::new(options)
            .parse(Self::document(name))
            .expect("Failed to parse document");
        FlowCodegen::new(exact)
            .generate(&ir)
            .expect("Failed to generate Flow code")
    }

    pub fn check_required() -> GeneratorOptions {
        GeneratorOptions {
            check_required: true,
            ..GeneratorOptions::default()
        }
    }
}
