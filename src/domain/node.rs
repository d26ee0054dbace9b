use serde_json::{Map, Value};

use super::{EvalError, Outcome};

/// Prefix marking a string operand as a context reference.
pub const TEMPLATE_SENTINEL: char = '!';

/// Shape of a rule-tree node, borrowed from the external JSON form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// `{ name: [operand, ...] }`
    Operator(&'a Map<String, Value>),
    /// `"!a.b.c"`, holding the path after the sentinel
    Template(&'a str),
    /// `null`, rejected wherever it appears as an operand
    Null,
    /// Anything else, passed through unchanged
    Literal(&'a Value),
}

impl<'a> Node<'a> {
    /// Classify a raw operand.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Operator(map),
            Value::String(s) => match s.strip_prefix(TEMPLATE_SENTINEL) {
                Some(path) => Node::Template(path),
                None => Node::Literal(value),
            },
            Value::Null => Node::Null,
            _ => Node::Literal(value),
        }
    }
}

/// An operator mapping with exactly one `(name, operands)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorNode<'a> {
    pub name: &'a str,
    operands: &'a Value,
}

impl<'a> OperatorNode<'a> {
    /// Extract the single operator key.
    ///
    /// Empty mappings are `InvalidObject`; mappings with several keys are
    /// rejected rather than silently truncated.
    pub fn from_map(map: &'a Map<String, Value>) -> Outcome<Self> {
        let mut entries = map.iter();

        let (name, operands) = entries.next().ok_or(EvalError::InvalidObject)?;

        if entries.next().is_some() {
            return Err(EvalError::AmbiguousRule {
                keys: map.keys().cloned().collect(),
            });
        }

        Ok(OperatorNode {
            name: name.as_str(),
            operands,
        })
    }

    /// The ordered operand list.
    pub fn operands(&self) -> Outcome<&'a [Value]> {
        match self.operands {
            Value::Array(items) => Ok(items.as_slice()),
            Value::Null => Err(EvalError::InvalidRule),
            _ => Err(EvalError::InvalidParameters),
        }
    }
}
