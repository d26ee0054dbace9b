use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;

use super::validator::{as_real, Validator};
use crate::domain::{EvalError, Outcome};

/// Names of the built-in validators.
pub mod names {
    pub const REAL: &str = "Real";
    pub const POS_REAL: &str = "PosReal";
    pub const NEG_REAL: &str = "NegReal";
    pub const INTEGER: &str = "Integer";
    pub const WHOLE: &str = "Whole";
    pub const NATURAL: &str = "Natural";
    pub const NEG_WHOLE: &str = "NegWhole";
    pub const NEG_NATURAL: &str = "NegNatural";
    pub const BOOLEAN: &str = "Boolean";
    pub const ANY: &str = "Any";
}

/// Named validators, looked up by operand type name.
///
/// Built once before evaluation and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    validators: AHashMap<String, Arc<Validator>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Create a registry holding the standard numeric hierarchy plus
    /// `Boolean` and `Any`.
    ///
    /// ```text
    /// Real ─┬─ PosReal
    ///       ├─ NegReal
    ///       └─ Integer ─┬─ Whole ──── Natural
    ///                   └─ NegWhole ─ NegNatural
    /// ```
    pub fn standard() -> Self {
        let mut registry = TypeRegistry::new();

        let real = registry.register(Validator::root(names::REAL, "Real Number", |v| {
            as_real(v).is_some()
        }));
        registry.register(Validator::refine(&real, names::POS_REAL, "Positive Real Number", |v| {
            as_real(v).is_some_and(|n| n >= 0.0)
        }));
        registry.register(Validator::refine(&real, names::NEG_REAL, "Negative Real Number", |v| {
            as_real(v).is_some_and(|n| n <= 0.0)
        }));

        let integer = registry.register(Validator::refine(&real, names::INTEGER, "Integer", |v| {
            as_real(v).is_some_and(|n| n.floor() == n)
        }));

        let whole = registry.register(Validator::refine(&integer, names::WHOLE, "Whole Number", |v| {
            as_real(v).is_some_and(|n| n >= 0.0)
        }));
        registry.register(Validator::refine(&whole, names::NATURAL, "Natural Number", |v| {
            as_real(v).is_some_and(|n| n > 0.0)
        }));

        let neg_whole = registry.register(Validator::refine(
            &integer,
            names::NEG_WHOLE,
            "Negative Whole Number",
            |v| as_real(v).is_some_and(|n| n <= 0.0),
        ));
        registry.register(Validator::refine(
            &neg_whole,
            names::NEG_NATURAL,
            "Negative Natural Number",
            |v| as_real(v).is_some_and(|n| n < 0.0),
        ));

        registry.register(Validator::root(names::BOOLEAN, "Boolean", Value::is_boolean));
        registry.register(Validator::any(names::ANY));

        registry
    }

    /// Register a validator under its own name, replacing any previous one.
    pub fn register(&mut self, validator: Validator) -> Arc<Validator> {
        let validator = Arc::new(validator);
        self.validators
            .insert(validator.name().to_string(), Arc::clone(&validator));
        validator
    }

    /// Register a refinement of an already registered type.
    pub fn refine(
        &mut self,
        parent: &str,
        name: impl Into<String>,
        label: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Outcome<Arc<Validator>> {
        let parent = self
            .get(parent)
            .ok_or_else(|| EvalError::UnknownType(parent.to_string()))?;

        Ok(self.register(Validator::refine(&parent, name, label, predicate)))
    }

    pub fn get(&self, name: &str) -> Option<Arc<Validator>> {
        self.validators.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate a value against the named type.
    pub fn validate(&self, name: &str, value: Value) -> Outcome<Value> {
        match self.validators.get(name) {
            Some(validator) => validator.validate(value),
            None => Err(EvalError::UnknownType(name.to_string())),
        }
    }
}
