use ahash::AHashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::builtins::register_builtins;
use super::operation::Operation;
use super::spec::{FunctionSpec, Operands};
use crate::domain::{EvalError, Outcome};
use crate::types::{TypeRegistry, Validator};

/// Name → function table consulted by the interpreter.
///
/// Populated before any evaluation; evaluation only reads it, so one
/// registry can be shared across threads.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    types: Arc<TypeRegistry>,
    functions: AHashMap<String, FunctionSpec>,
}

impl FunctionRegistry {
    /// Create an empty registry resolving parameter types against `types`.
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        FunctionRegistry {
            types,
            functions: AHashMap::new(),
        }
    }

    /// Create a registry holding the built-in operators.
    pub fn with_builtins(types: Arc<TypeRegistry>) -> Outcome<Self> {
        let mut registry = FunctionRegistry::new(types);
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Built-in operators over the standard type hierarchy.
    pub fn standard() -> Outcome<Self> {
        FunctionRegistry::with_builtins(Arc::new(TypeRegistry::standard()))
    }

    /// Register a function under `name` with one type name per parameter.
    ///
    /// Every type name must be registered and their count must match the
    /// operation's arity; otherwise registration fails with the arity error
    /// and nothing is stored.
    pub fn register(
        &mut self,
        name: &str,
        operation: Operation,
        type_names: &[&str],
    ) -> Outcome<String> {
        let params: Vec<Arc<Validator>> = type_names
            .iter()
            .filter_map(|type_name| {
                let validator = self.types.get(type_name);
                if validator.is_none() {
                    warn!(function = name, type_name = *type_name, "Unknown parameter type");
                }
                validator
            })
            .collect();

        if params.len() != type_names.len() {
            return Err(EvalError::RegistrationArity {
                name: name.to_string(),
                declared: type_names.len(),
                arity: operation.arity(),
            });
        }

        let spec = FunctionSpec::new(name, params, operation)?;
        let arity = spec.arity();
        self.functions.insert(name.to_string(), spec);

        debug!(function = name, arity, "Registered function");
        Ok(format!("Successfully added Function: {}", name))
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Swap the table used to resolve types of later registrations.
    pub(crate) fn set_types(&mut self, types: Arc<TypeRegistry>) {
        self.types = types;
    }

    /// Call a registered function with already resolved operands.
    pub fn invoke(&self, name: &str, operands: Operands) -> Outcome<Value> {
        match self.functions.get(name) {
            Some(spec) => spec.invoke(operands),
            None => Err(EvalError::UnknownOperator(name.to_string())),
        }
    }
}
