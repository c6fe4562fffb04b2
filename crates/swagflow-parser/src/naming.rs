//! Declaration and property naming

use crate::ParserError;
use swagflow_core::GeneratorOptions;

const REFERENCE_PREFIXES: [&str; 2] = ["#/definitions/", "#/components/schemas/"];

/// Remove `[`, `]` and `'` from a schema key such as `Collection[Pet]`
pub fn strip_brackets(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '\''))
        .collect()
}

/// Final name of a declaration: prefix, stripped source name, suffix
pub fn declaration_name(name: &str, options: &GeneratorOptions) -> String {
    format!("{}{}{}", options.prefix, strip_brackets(name), options.suffix)
}

/// Resolve a local `$ref` path to the declaration name it points at
pub fn reference_name(path: &str, options: &GeneratorOptions) -> Result<String, ParserError> {
    REFERENCE_PREFIXES
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix))
        .filter(|name| !name.is_empty())
        .map(|name| declaration_name(name, options))
        .ok_or_else(|| ParserError::UnresolvableReference(path.to_string()))
}

/// Lower camel case for `snake_case`, `kebab-case` and dotted keys.
///
/// A `_`, `-` or `.` followed by a word character is replaced by that
/// character upper-cased; one at the end of the key is dropped. Anything
/// else is left alone, so `camelCaseId` stays as it is and `_private`
/// becomes `Private`.
pub fn camelize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '_' | '-' | '.') {
            match chars.peek() {
                None => continue,
                Some(&next) if next.is_ascii_alphanumeric() || next == '_' => {
                    result.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
                Some(_) => {}
            }
        }
        result.push(c);
    }
    result
}
