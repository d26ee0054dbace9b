//! Reading rule trees, contexts and baskets from JSON or YAML files.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading input documents.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Input document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` / `.yml` are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T, LoadError> {
        Ok(match self {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// Load any document as a JSON value.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    load_as(path)
}

/// Load and deserialize a document into `T`.
pub fn load_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    Format::from_path(path).parse(&content)
}

/// Load a rule tree, checking that its root is a single operator.
pub fn load_rule(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let rule = load_document(path)?;
    validate_rule(&rule)?;
    Ok(rule)
}

/// Load a context, which must be a mapping.
pub fn load_context(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let context = load_document(path)?;

    if !context.is_object() {
        return Err(LoadError::Validation(
            "Context must be a mapping".to_string(),
        ));
    }

    Ok(context)
}

/// Validate the root shape of a rule tree.
fn validate_rule(rule: &Value) -> Result<(), LoadError> {
    let map = rule
        .as_object()
        .ok_or_else(|| LoadError::Validation("Rule must be a mapping".to_string()))?;

    match map.len() {
        1 => Ok(()),
        0 => Err(LoadError::Validation("Rule has no operator".to_string())),
        _ => Err(LoadError::Validation(format!(
            "Rule has more than one operator: {}",
            map.keys().cloned().collect::<Vec<_>>().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn yaml_file() -> NamedTempFile {
        Builder::new().suffix(".yaml").tempfile().unwrap()
    }

    fn json_file() -> NamedTempFile {
        Builder::new().suffix(".json").tempfile().unwrap()
    }

    #[test]
    fn test_load_json_rule() {
        let mut file = json_file();
        writeln!(
            file,
            r#"{{"inrange": [1, 4, {{"sum": ["!partners.LOWE.products"]}}]}}"#
        )
        .unwrap();

        let rule = load_rule(file.path()).unwrap();

        assert_eq!(
            rule,
            json!({"inrange": [1, 4, {"sum": ["!partners.LOWE.products"]}]})
        );
    }

    #[test]
    fn test_load_yaml_context() {
        let mut file = yaml_file();
        writeln!(
            file,
            r#"
transactions: []
partners:
  LOWE:
    spend: 0
    products:
      "47676": 2
      "231046": 1
      "258560": 0
"#
        )
        .unwrap();

        let context = load_context(file.path()).unwrap();

        assert_eq!(context["partners"]["LOWE"]["products"]["47676"], json!(2));
        assert_eq!(context["transactions"], json!([]));
    }

    #[test]
    fn test_load_yaml_rule() {
        let mut file = yaml_file();
        writeln!(
            file,
            r#"
and:
  - gt: ["!score", 10]
  - lte: ["!score", 100]
"#
        )
        .unwrap();

        let rule = load_rule(file.path()).unwrap();
        assert_eq!(rule["and"][1], json!({"lte": ["!score", 100]}));
    }

    #[test]
    fn test_rule_validation_multiple_operators() {
        let mut file = json_file();
        writeln!(file, r#"{{"and": [true, true], "or": [true, false]}}"#).unwrap();

        let result = load_rule(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("more than one operator"));
    }

    #[test]
    fn test_rule_validation_not_mapping() {
        let mut file = json_file();
        writeln!(file, "[1, 2]").unwrap();

        let result = load_rule(file.path());
        assert!(matches!(result, Err(LoadError::Validation(_))));
    }

    #[test]
    fn test_context_validation() {
        let mut file = json_file();
        writeln!(file, "42").unwrap();

        let result = load_context(file.path());
        assert!(result.unwrap_err().to_string().contains("mapping"));
    }

    #[test]
    fn test_parse_error() {
        let mut file = json_file();
        writeln!(file, "{{not json").unwrap();

        let result = load_document(file.path());
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_document("/nonexistent/rule.json");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
