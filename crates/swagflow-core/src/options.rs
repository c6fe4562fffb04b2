//! Generation options threaded through the parser and codegen

use serde::Deserialize;

/// Everything that changes the generated declarations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorOptions {
    /// Render object literals as exact (`{| ... |}`)
    pub exact: bool,
    /// Rewrite property keys to lower camel case
    #[serde(alias = "lower_camel_case")]
    pub lower_camel_case: bool,
    /// Mark keys missing from `required` with a trailing `?`
    #[serde(alias = "check_required")]
    pub check_required: bool,
    /// Render `nullable` properties as maybe types (`?T`)
    #[serde(alias = "include_nullable")]
    pub include_nullable: bool,
    /// Also emit declarations for titled response bodies
    pub responses: bool,
    /// Prepended to every declaration name and reference
    pub prefix: String,
    /// Appended to every declaration name and reference
    pub suffix: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            exact: false,
            lower_camel_case: false,
            check_required: false,
            include_nullable: true,
            responses: false,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}
