//! Formatting of generated source before it is written

use crate::CodegenError;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Prettier configuration files, in lookup order within a directory
const PRETTIER_CONFIGS: [&str; 7] = [
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yaml",
    ".prettierrc.yml",
    ".prettierrc.toml",
    ".prettierrc.js",
    "prettier.config.js",
];

pub trait Formatter {
    fn format(&self, source: &str) -> Result<String, CodegenError>;
}

/// Leaves the source as generated
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, CodegenError> {
        let mut output = source.to_string();
        if !output.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }
}

/// Pipes the source through the `prettier` executable
#[derive(Debug, Clone)]
pub struct Prettier {
    binary: PathBuf,
    config: Option<PathBuf>,
    stdin_filepath: Option<PathBuf>,
}

impl Default for Prettier {
    fn default() -> Self {
        Self::new("prettier")
    }
}

impl Prettier {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            config: None,
            stdin_filepath: None,
        }
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Path prettier uses to pick overrides from the config
    pub fn with_stdin_filepath(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin_filepath = Some(path.into());
        self
    }

    fn args(&self) -> Vec<String> {
        match &self.config {
            Some(config) => {
                let mut args = vec!["--config".to_string(), config.display().to_string()];
                if let Some(path) = &self.stdin_filepath {
                    args.push("--stdin-filepath".to_string());
                    args.push(path.display().to_string());
                }
                args
            }
            None => vec![
                "--no-config".to_string(),
                "--parser".to_string(),
                "babel".to_string(),
            ],
        }
    }
}

impl Formatter for Prettier {
    fn format(&self, source: &str) -> Result<String, CodegenError> {
        let args = self.args();
        debug!(binary = %self.binary.display(), ?args, "Running formatter");

        let mut child = match Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "{} not found, writing unformatted output",
                    self.binary.display()
                );
                return Passthrough.format(source);
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(mut stdin) = child.stdin.take() {
            // a formatter that exits early closes the pipe; its status says why
            if let Err(e) = stdin.write_all(source.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(CodegenError::Format(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| CodegenError::Format(e.to_string()))
    }
}

/// Nearest prettier config in `start` or any of its ancestors
pub fn find_prettier_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        PRETTIER_CONFIGS
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
