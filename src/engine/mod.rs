use serde_json::Value;
use std::sync::Arc;

use crate::domain::Outcome;
use crate::functions::{FunctionRegistry, Operation};
use crate::interpreter::{AuditSink, Interpreter, TracingAudit, DEFAULT_MAX_DEPTH};
use crate::types::{TypeRegistry, Validator};

/// Registries plus evaluation settings behind one handle.
///
/// Configure with `register_type` / `register_function`, then share the
/// engine read-only for evaluation.
#[derive(Debug, Clone)]
pub struct Engine {
    types: Arc<TypeRegistry>,
    functions: FunctionRegistry,
    max_depth: usize,
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl Engine {
    /// Engine with the standard types and built-in operators.
    pub fn standard() -> Outcome<Self> {
        let types = Arc::new(TypeRegistry::standard());
        let functions = FunctionRegistry::with_builtins(Arc::clone(&types))?;

        Ok(Engine {
            types,
            functions,
            max_depth: DEFAULT_MAX_DEPTH,
            sinks: vec![Arc::new(TracingAudit)],
        })
    }

    /// Engine over the given types with no functions registered.
    pub fn with_types(types: TypeRegistry) -> Self {
        let types = Arc::new(types);
        Engine {
            functions: FunctionRegistry::new(Arc::clone(&types)),
            types,
            max_depth: DEFAULT_MAX_DEPTH,
            sinks: vec![Arc::new(TracingAudit)],
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Register a type validator.
    ///
    /// Only functions registered afterwards can name the new type.
    pub fn register_type(&mut self, validator: Validator) -> Arc<Validator> {
        let registered = Arc::make_mut(&mut self.types).register(validator);
        self.rebind_types();
        registered
    }

    /// Register a function; see [`FunctionRegistry::register`].
    pub fn register_function(
        &mut self,
        name: &str,
        operation: Operation,
        type_names: &[&str],
    ) -> Outcome<String> {
        self.functions.register(name, operation, type_names)
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Interpreter borrowing this engine's registry and settings.
    pub fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(&self.functions)
            .with_max_depth(self.max_depth)
            .with_sinks(self.sinks.clone())
    }

    pub fn evaluate(&self, rule: &Value, context: &Value) -> Outcome<Value> {
        self.interpreter().evaluate(rule, context)
    }

    fn rebind_types(&mut self) {
        self.functions.set_types(Arc::clone(&self.types));
    }
}
