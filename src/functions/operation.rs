use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::{EvalError, Outcome};

/// Implementation body, called with validated arguments in operand order.
pub type Body = Arc<dyn Fn(&[Value]) -> Outcome<Value> + Send + Sync>;

/// A callable with a declared, fixed arity.
///
/// The typed constructors (`unary`, `binary`, `ternary`) fix the arity from
/// the closure's shape, so the count of parameter types can be checked
/// against it at registration.
#[derive(Clone)]
pub struct Operation {
    arity: usize,
    body: Body,
}

impl Operation {
    /// Wrap a slice-taking body with an explicit arity.
    pub fn new(
        arity: usize,
        body: impl Fn(&[Value]) -> Outcome<Value> + Send + Sync + 'static,
    ) -> Self {
        Operation {
            arity,
            body: Arc::new(body),
        }
    }

    pub fn unary(f: impl Fn(&Value) -> Outcome<Value> + Send + Sync + 'static) -> Self {
        Operation::new(1, move |args| match args {
            [a] => f(a),
            _ => Err(shape_error(1, args.len())),
        })
    }

    pub fn binary(f: impl Fn(&Value, &Value) -> Outcome<Value> + Send + Sync + 'static) -> Self {
        Operation::new(2, move |args| match args {
            [a, b] => f(a, b),
            _ => Err(shape_error(2, args.len())),
        })
    }

    pub fn ternary(
        f: impl Fn(&Value, &Value, &Value) -> Outcome<Value> + Send + Sync + 'static,
    ) -> Self {
        Operation::new(3, move |args| match args {
            [a, b, c] => f(a, b, c),
            _ => Err(shape_error(3, args.len())),
        })
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Outcome<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

fn shape_error(expected: usize, got: usize) -> EvalError {
    EvalError::OperationFailure {
        name: "operation".to_string(),
        message: format!("expected {} arguments, got {}", expected, got),
    }
}
