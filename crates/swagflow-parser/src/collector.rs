//! Selection of the schemas that become top-level declarations

use crate::document::Document;
use crate::ParserError;
use indexmap::IndexMap;
use swagflow_core::Schema;
use tracing::debug;

/// Builds the ordered work list `source name -> schema`
#[derive(Debug, Clone, Default)]
pub struct SchemaCollector {
    include_responses: bool,
}

impl SchemaCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also collect response bodies that carry a `title`
    pub fn with_responses(mut self, include_responses: bool) -> Self {
        self.include_responses = include_responses;
        self
    }

    /// Named schemas come first (`definitions`, then `components.schemas`);
    /// a titled response body never replaces one of them. Titles repeated
    /// across responses keep their first position and the last schema seen.
    pub fn collect<'a>(
        &self,
        document: &'a Document,
    ) -> Result<IndexMap<String, &'a Schema>, ParserError> {
        let mut collected: IndexMap<String, &'a Schema> = IndexMap::new();

        for (name, schema) in document
            .definitions
            .iter()
            .chain(document.components.schemas.iter())
        {
            if !collected.contains_key(name) {
                collected.insert(name.clone(), schema);
            }
        }
        let named = collected.len();

        if self.include_responses {
            for (path, item) in &document.paths {
                for (method, operation) in item.operations() {
                    for (status, response) in &operation.responses {
                        for schema in response.schemas() {
                            let Some(title) = schema.title.as_deref() else {
                                continue;
                            };
                            if collected.get_index_of(title).is_some_and(|i| i < named) {
                                debug!(title, path, method, status, "Response title shadowed by a named schema");
                                continue;
                            }
                            collected.insert(title.to_string(), schema);
                        }
                    }
                }
            }
        }

        if collected.is_empty() {
            return Err(ParserError::NoDefinitions);
        }

        debug!(
            named,
            responses = collected.len() - named,
            "Collected schemas"
        );
        Ok(collected)
    }
}
