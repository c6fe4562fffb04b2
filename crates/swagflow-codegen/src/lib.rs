//! Code generators for the swagflow IR

pub mod flow;
pub mod format;

use swagflow_core::IR;
use thiserror::Error;

pub use flow::FlowCodegen;
pub use format::{find_prettier_config, Formatter, Passthrough, Prettier};

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::fmt::Error> for CodegenError {
    fn from(e: std::fmt::Error) -> Self {
        CodegenError::Generation(e.to_string())
    }
}

/// Common trait for all code generators
pub trait Codegen {
    fn generate(&mut self, ir: &IR) -> Result<String, CodegenError>;
}
