//! swagflow - Flow type declarations from OpenAPI and Swagger documents
//!
//! The pipeline is: load the document (file or URL), collect its named
//! schemas, transform them into the type IR, render Flow declarations,
//! format, then write the destination atomically.

pub mod config;

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use swagflow_codegen::{
    find_prettier_config, Codegen, FlowCodegen, Formatter, Passthrough, Prettier,
};
use swagflow_core::GeneratorOptions;
use swagflow_parser::{
    fetch::{is_url, DocumentFetcher},
    Document, OpenAPIParser,
};
use tracing::{debug, info};

/// Output path used for documents fetched from a URL
pub const URL_DESTINATION: &str = "./flowtype.js";

/// One generation run
#[derive(Debug, Clone)]
pub struct Generation {
    /// File path or http(s) URL of the document
    pub input: String,
    /// Explicit output path; derived from `input` when unset
    pub destination: Option<PathBuf>,
    pub options: GeneratorOptions,
    /// Formatter executable; `None` writes the output unformatted
    pub prettier: Option<PathBuf>,
}

impl Generation {
    pub fn new(input: impl Into<String>, options: GeneratorOptions) -> Self {
        Self {
            input: input.into(),
            destination: None,
            options,
            prettier: Some(PathBuf::from("prettier")),
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| default_destination(&self.input))
    }

    /// Run the whole pipeline and return the written path
    pub async fn run(&self) -> Result<PathBuf> {
        let destination = self.destination();

        let document = get_document(&self.input).await?;
        let source = generate(&document, &self.options)?;
        let formatted = self.formatter(&destination).format(&source)?;

        write_atomic(&destination, &formatted)?;
        info!("Generated flow types to {}", destination.display());
        Ok(destination)
    }

    fn formatter(&self, destination: &Path) -> Box<dyn Formatter> {
        let Some(binary) = &self.prettier else {
            return Box::new(Passthrough);
        };

        let start = if is_url(&self.input) {
            PathBuf::from(".")
        } else {
            Path::new(&self.input)
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        };
        let start = fs::canonicalize(&start).unwrap_or(start);
        let config = find_prettier_config(&start);
        debug!(?config, "Prettier configuration");

        Box::new(
            Prettier::new(binary)
                .with_config(config)
                .with_stdin_filepath(destination),
        )
    }
}

/// Load a document from an http(s) URL or a local file
pub async fn get_document(input: &str) -> Result<Document> {
    if is_url(input) {
        info!("Fetching {}", input);
        let fetcher = DocumentFetcher::new()?;
        fetcher
            .fetch(input)
            .await
            .with_context(|| format!("Failed to fetch document from {}", input))
    } else {
        Document::from_path(Path::new(input))
            .with_context(|| format!("Failed to load document from {}", input))
    }
}

/// Unformatted Flow declarations for every collected schema
pub fn generate(document: &Document, options: &GeneratorOptions) -> Result<String> {
    let ir = OpenAPIParser::new(options.clone()).parse_document(document)?;
    debug!(declarations = ir.types.len(), "Transformed document");
    let output = FlowCodegen::new(options.exact).generate(&ir)?;
    Ok(output)
}

/// `./flowtype.js` for URLs, otherwise the input path with a `.js` extension
pub fn default_destination(input: &str) -> PathBuf {
    if is_url(input) {
        PathBuf::from(URL_DESTINATION)
    } else {
        Path::new(input).with_extension("js")
    }
}

/// Write through a temporary file in the destination directory so a failed
/// run never leaves a truncated file behind
pub fn write_atomic(destination: &Path, contents: &str) -> Result<()> {
    let dir = destination
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())?;
    file.persist(destination)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_destination() {
        assert_eq!(
            default_destination("https://petstore.swagger.io/v2/swagger.json"),
            PathBuf::from("./flowtype.js")
        );
        assert_eq!(
            default_destination("specs/petstore.yaml"),
            PathBuf::from("specs/petstore.js")
        );
        assert_eq!(default_destination("swagger"), PathBuf::from("swagger.js"));
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flowtype.js");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("flowtype.js");
        assert!(write_atomic(&path, "x").is_err());
        assert!(!path.exists());
    }
}
