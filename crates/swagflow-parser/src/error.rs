use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("There is no definitions in file, is it really an OpenAPI or Swagger document?")]
    NoDefinitions,

    #[error("Unresolvable reference: {0}")]
    UnresolvableReference(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ParserError {
    fn from(e: serde_json::Error) -> Self {
        ParserError::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for ParserError {
    fn from(e: serde_yaml::Error) -> Self {
        ParserError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for ParserError {
    fn from(e: reqwest::Error) -> Self {
        ParserError::Network(e.to_string())
    }
}
