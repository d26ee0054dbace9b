//! Recursive evaluation of rule trees.
//!
//! A rule is a single-key mapping `{ operator: [operand, ...] }`. Operands
//! are nested rules (evaluated first), `!`-prefixed context references
//! (substituted from the context), or literals (passed through). Every
//! operand is resolved on its own so a failing operand keeps its own error;
//! the operator call then combines them left to right.

pub mod audit;

pub use audit::{AuditRecord, AuditSink, TracingAudit};

use serde_json::Value;
use std::sync::Arc;

use crate::domain::{EvalError, Node, OperatorNode, Outcome};
use crate::functions::{FunctionRegistry, Operands};
use crate::path;

/// Default bound on rule nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Evaluator over a borrowed function registry.
///
/// Holds no per-evaluation state, so evaluating the same rule and context
/// twice yields identical results.
#[derive(Debug, Clone)]
pub struct Interpreter<'r> {
    functions: &'r FunctionRegistry,
    max_depth: usize,
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl<'r> Interpreter<'r> {
    /// Create an interpreter that logs operator calls through `tracing`.
    pub fn new(functions: &'r FunctionRegistry) -> Self {
        Interpreter {
            functions,
            max_depth: DEFAULT_MAX_DEPTH,
            sinks: vec![Arc::new(TracingAudit)],
        }
    }

    /// Limit rule nesting; deeper operator nodes fail with `DepthExceeded`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Add an audit sink.
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Replace all audit sinks.
    pub fn with_sinks(mut self, sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        self.sinks = sinks;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate a rule against a read-only context.
    pub fn evaluate(&self, rule: &Value, context: &Value) -> Outcome<Value> {
        let result = self.evaluate_at(rule, context, 1);
        for sink in &self.sinks {
            sink.evaluated(&result);
        }
        result
    }

    /// Resolve a single operand: nested rules are evaluated, references
    /// substituted, literals cloned.
    pub fn resolve_operand(&self, node: &Value, context: &Value) -> Outcome<Value> {
        self.resolve_at(node, context, 1)
    }

    fn evaluate_at(&self, rule: &Value, context: &Value, depth: usize) -> Outcome<Value> {
        if depth > self.max_depth {
            return Err(EvalError::DepthExceeded(self.max_depth));
        }

        let map = rule.as_object().ok_or(EvalError::InvalidObject)?;
        let node = OperatorNode::from_map(map)?;

        let spec = self
            .functions
            .get(node.name)
            .ok_or_else(|| EvalError::UnknownOperator(node.name.to_string()))?;

        let operands: Operands = node
            .operands()?
            .iter()
            .map(|operand| self.resolve_at(operand, context, depth))
            .collect();

        if self.sinks.is_empty() {
            return spec.invoke(operands);
        }

        let audited = if self.sinks.iter().any(|sink| sink.wants_operands()) {
            operands.clone()
        } else {
            Operands::new()
        };
        let result = spec.invoke(operands);

        let record = AuditRecord {
            operator: node.name,
            operands: &audited,
            result: &result,
            depth,
        };
        for sink in &self.sinks {
            sink.record(&record);
        }

        result
    }

    /// `depth` is that of the operator node owning this operand.
    fn resolve_at(&self, node: &Value, context: &Value, depth: usize) -> Outcome<Value> {
        match Node::classify(node) {
            Node::Operator(_) => self.evaluate_at(node, context, depth + 1),
            Node::Template(reference) => path::resolve(reference, context),
            Node::Null => Err(EvalError::NullOperand),
            Node::Literal(value) => Ok(value.clone()),
        }
    }
}
