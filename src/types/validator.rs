use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::{display_value, EvalError, Outcome, OutcomeExt};

/// Predicate applied at one refinement level.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named scalar validator, optionally refining a parent.
///
/// Validation walks the chain from the root down and stops at the first
/// level whose predicate fails. The error always names the requested type;
/// when an ancestor rejected the value, that ancestor's label is kept in
/// `failed`. A value that passes every level is returned unchanged.
pub struct Validator {
    name: String,
    /// Human readable name used in failure messages
    label: String,
    parent: Option<Arc<Validator>>,
    predicate: Predicate,
}

impl Validator {
    /// Create a root validator.
    pub fn root(
        name: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Validator {
            name: name.into(),
            label: label.into(),
            parent: None,
            predicate: Arc::new(predicate),
        }
    }

    /// Create a validator that narrows `parent` with an extra predicate.
    ///
    /// The predicate only ever sees values the parent accepted.
    pub fn refine(
        parent: &Arc<Validator>,
        name: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Validator {
            name: name.into(),
            label: label.into(),
            parent: Some(Arc::clone(parent)),
            predicate: Arc::new(predicate),
        }
    }

    /// A root validator that accepts everything.
    pub fn any(name: impl Into<String>) -> Self {
        let name = name.into();
        Validator::root(name.clone(), name, |_| true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<&Arc<Validator>> {
        self.parent.as_ref()
    }

    /// Number of levels from this validator up to its root, inclusive.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }

    /// Validate a value against the whole refinement chain.
    pub fn validate(&self, value: Value) -> Outcome<Value> {
        let inherited = match &self.parent {
            Some(parent) => parent.validate(value).map_err(|e| self.relabel(e)),
            None => Ok(value),
        };

        inherited.chain(|v| {
            if (self.predicate)(&v) {
                Ok(v)
            } else {
                Err(self.reject(&v))
            }
        })
    }

    fn reject(&self, value: &Value) -> EvalError {
        EvalError::TypeValidation {
            type_name: self.name.clone(),
            label: self.label.clone(),
            value: display_value(value),
            failed: None,
        }
    }

    fn relabel(&self, err: EvalError) -> EvalError {
        match err {
            EvalError::TypeValidation {
                label,
                value,
                failed,
                ..
            } => EvalError::TypeValidation {
                type_name: self.name.clone(),
                label: self.label.clone(),
                value,
                failed: failed.or(Some(label)),
            },
            other => other,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Numeric view of a value, if it is a number.
#[inline]
pub fn as_real(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn real() -> Arc<Validator> {
        Arc::new(Validator::root("Real", "Real Number", |v| as_real(v).is_some()))
    }

    #[test]
    fn test_root_validator() {
        let real = real();

        assert_eq!(real.validate(json!(1.5)), Ok(json!(1.5)));
        let err = real.validate(json!("hi")).unwrap_err();
        assert_eq!(err.to_string(), "Not a valid Real Number: hi");
    }

    #[test]
    fn test_refinement_reports_failing_level() {
        let real = real();
        let positive = Arc::new(Validator::refine(&real, "PosReal", "Positive Real Number", |v| {
            as_real(v).is_some_and(|n| n >= 0.0)
        }));

        assert_eq!(positive.validate(json!(0)), Ok(json!(0)));

        // Parent failure keeps the parent's label as the cause
        let err = positive.validate(json!("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not a valid Positive Real Number: x (Not a valid Real Number: x)"
        );

        let err = positive.validate(json!(-2)).unwrap_err();
        assert_eq!(err.to_string(), "Not a valid Positive Real Number: -2");
        assert_eq!(positive.depth(), 2);
    }

    #[test]
    fn test_any_accepts_everything() {
        let any = Validator::any("Any");

        assert_eq!(any.validate(json!(null)), Ok(json!(null)));
        assert_eq!(any.validate(json!({"a": 1})), Ok(json!({"a": 1})));
        assert!(any.parent().is_none());
    }
}
