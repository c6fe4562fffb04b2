//! Document loading and schema transformation

pub mod collector;
pub mod document;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod openapi;

use swagflow_core::IR;

pub use document::Document;
pub use error::ParserError;
pub use openapi::OpenAPIParser;

/// Common trait for all parsers
pub trait Parser {
    type Input;

    fn parse(&self, input: Self::Input) -> Result<IR, ParserError>;
}
