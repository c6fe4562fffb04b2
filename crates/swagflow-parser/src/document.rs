//! OpenAPI 3.x / Swagger 2.0 document model and loading
//!
//! Only the parts of the document the generator reads are modelled. Every
//! source format goes through `serde_json::Value` first so YAML and JSON
//! decode identically.

use crate::ParserError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use swagflow_core::Schema;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Swagger 2.0 named schemas
    #[serde(deserialize_with = "null_as_default")]
    pub definitions: IndexMap<String, Schema>,
    /// OpenAPI 3.x container for named schemas
    #[serde(deserialize_with = "null_as_default")]
    pub components: Components,
    #[serde(deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(deserialize_with = "null_as_default")]
    pub schemas: IndexMap<String, Schema>,
}

/// Path item keyed by HTTP method; entries that are not operations
/// (`parameters`, `summary`, `servers`, ...) are kept as [`PathEntry::Other`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PathItem {
    pub entries: IndexMap<String, PathEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathEntry {
    Operation(Operation),
    Other(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    /// OpenAPI 3.x bodies keyed by media type
    #[serde(deserialize_with = "null_as_default")]
    pub content: IndexMap<String, MediaType>,
    /// Swagger 2.0 body
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

impl PathItem {
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.entries.iter().filter_map(|(method, entry)| match entry {
            PathEntry::Operation(op) => Some((method.as_str(), op)),
            PathEntry::Other(_) => None,
        })
    }
}

impl Response {
    /// Every body schema of this response, OpenAPI 3 media types first
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.content
            .values()
            .filter_map(|media| media.schema.as_ref())
            .chain(self.schema.as_ref())
    }
}

impl Document {
    pub fn from_value(value: Value) -> Result<Self, ParserError> {
        if !value.is_object() {
            return Err(ParserError::Parse(
                "document root must be a mapping".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ParserError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ParserError> {
        let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
        value.apply_merge()?;
        Self::from_value(yaml_to_json(value))
    }

    /// Valid JSON is read as JSON, anything else as YAML
    pub fn from_str_sniffed(content: &str) -> Result<Self, ParserError> {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::from_yaml_str(content),
        }
    }

    /// Read a local file; `.yaml`/`.yml` is YAML, everything else JSON
    pub fn from_path(path: &Path) -> Result<Self, ParserError> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        debug!(path = %path.display(), yaml = is_yaml, "Loading document");
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }
}

/// An explicit `null` container (`definitions: ~`) reads as empty
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// YAML allows non-string mapping keys (`200:` under `responses`); JSON
/// does not, so keys are stringified on the way over.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        other => match yaml_to_json(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}
