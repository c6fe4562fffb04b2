//! Optional TOML configuration merged with command line flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use swagflow_core::GeneratorOptions;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = ".swagflow.toml";

/// Contents of a `.swagflow.toml`
///
/// ```toml
/// destination = "src/types/api.js"
/// exact = true
/// check-required = true
/// suffix = "Type"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Output path, relative to the working directory
    pub destination: Option<PathBuf>,

    /// Formatter executable, `prettier` from `PATH` when unset
    pub prettier: Option<PathBuf>,

    #[serde(flatten)]
    pub options: GeneratorOptions,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub destination: Option<PathBuf>,
    pub exact: bool,
    pub suffix: Option<String>,
    pub prefix: Option<String>,
    pub lower_camel_case: bool,
    pub check_required: bool,
    pub responses: bool,
    pub ignore_nullable: bool,
}

impl Config {
    /// Load config from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// `explicit` must exist; otherwise [`DEFAULT_CONFIG_FILE`] in `dir`
    /// is used when present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default = dir.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            debug!(path = %default.display(), "Using config file");
            Self::from_file(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Flags switch options on; they never switch off what the file enabled.
    /// Strings given as flags replace the file's.
    pub fn merge(self, overrides: Overrides) -> (GeneratorOptions, Option<PathBuf>) {
        let file = self.options;
        let options = GeneratorOptions {
            exact: file.exact || overrides.exact,
            lower_camel_case: file.lower_camel_case || overrides.lower_camel_case,
            check_required: file.check_required || overrides.check_required,
            include_nullable: file.include_nullable && !overrides.ignore_nullable,
            responses: file.responses || overrides.responses,
            prefix: overrides.prefix.unwrap_or(file.prefix),
            suffix: overrides.suffix.unwrap_or(file.suffix),
        };
        (options, overrides.destination.or(self.destination))
    }
}
