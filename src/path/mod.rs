//! Dot-path lookup into a nested context.

use serde_json::Value;

use crate::domain::{EvalError, Outcome};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Resolve `path` against `context`, returning a copy of the found value.
///
/// Each segment must name a key of the mapping reached so far. Sequences are
/// addressed by decimal index segments (`items.0`). A missing segment, a
/// scalar in the middle of the path, or a `null` at the end all fail with
/// `Invalid Substitution`.
pub fn resolve(path: &str, context: &Value) -> Outcome<Value> {
    lookup(path, context)
        .filter(|found| !found.is_null())
        .cloned()
        .ok_or_else(|| EvalError::InvalidSubstitution {
            path: path.to_string(),
        })
}

/// Borrowing lookup without the not-found error.
pub fn lookup<'a>(path: &str, context: &'a Value) -> Option<&'a Value> {
    path.split(PATH_SEPARATOR)
        .try_fold(context, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Value {
        json!({
            "transactions": [],
            "partners": {
                "LOWE": {
                    "spend": 0,
                    "products": {"47676": 2, "231046": 1, "258560": 0}
                }
            },
            "items": [{"sku": "blah"}, {"sku": "meow"}],
            "nothing": null
        })
    }

    #[test]
    fn test_resolve_nested_mapping() {
        let ctx = context();

        assert_eq!(
            resolve("partners.LOWE.products", &ctx),
            Ok(json!({"47676": 2, "231046": 1, "258560": 0}))
        );
        assert_eq!(resolve("partners.LOWE.products.47676", &ctx), Ok(json!(2)));
        assert_eq!(resolve("partners.LOWE.spend", &ctx), Ok(json!(0)));
    }

    #[test]
    fn test_resolve_index_segment() {
        let ctx = context();

        assert_eq!(resolve("items.1.sku", &ctx), Ok(json!("meow")));
        assert!(resolve("items.2.sku", &ctx).is_err());
        assert!(resolve("items.first", &ctx).is_err());
    }

    #[test]
    fn test_missing_segment() {
        let ctx = context();

        let err = resolve("partners.XYZ.products", &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Substitution");
        assert_eq!(
            err,
            EvalError::InvalidSubstitution {
                path: "partners.XYZ.products".to_string()
            }
        );

        // Walking through a scalar
        assert!(resolve("partners.LOWE.spend.total", &ctx).is_err());
    }

    #[test]
    fn test_null_is_not_found() {
        let ctx = context();

        assert!(lookup("nothing", &ctx).is_some());
        assert!(resolve("nothing", &ctx).is_err());
    }

    #[test]
    fn test_empty_path() {
        let ctx = context();
        assert!(resolve("", &ctx).is_err());
    }
}
