use serde_json::Value;
use smallvec::SmallVec;
use std::sync::Arc;

use super::operation::Operation;
use crate::domain::{sequence, EvalError, Outcome, OutcomeExt};
use crate::types::Validator;

/// Operands as resolved by the interpreter, one outcome per position.
///
/// Inline capacity covers every built-in operator.
pub type Operands = SmallVec<[Outcome<Value>; 4]>;

/// A registered function: name, positional validators and implementation.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    name: String,
    params: Vec<Arc<Validator>>,
    operation: Operation,
}

impl FunctionSpec {
    /// Build a spec, rejecting a validator count that differs from the
    /// operation's arity.
    pub fn new(
        name: impl Into<String>,
        params: Vec<Arc<Validator>>,
        operation: Operation,
    ) -> Outcome<Self> {
        let name = name.into();

        if params.len() != operation.arity() {
            return Err(EvalError::RegistrationArity {
                name,
                declared: params.len(),
                arity: operation.arity(),
            });
        }

        Ok(FunctionSpec {
            name,
            params,
            operation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[Arc<Validator>] {
        &self.params
    }

    /// Validate each operand against its positional type, then call the
    /// implementation.
    ///
    /// Operands are combined left to right, so the earliest failing
    /// position decides the error. The implementation only runs when every
    /// operand validated.
    pub fn invoke(&self, operands: Operands) -> Outcome<Value> {
        if operands.len() != self.arity() {
            return Err(EvalError::CallArity {
                name: self.name.clone(),
                expected: self.arity(),
                got: operands.len(),
            });
        }

        let validated = self
            .params
            .iter()
            .zip(operands)
            .map(|(validator, operand)| operand.chain(|value| validator.validate(value)));

        sequence(validated).chain(|args| self.operation.call(&args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeRegistry;
    use serde_json::json;
    use smallvec::smallvec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn params(types: &TypeRegistry, names: &[&str]) -> Vec<Arc<Validator>> {
        names.iter().filter_map(|n| types.get(n)).collect()
    }

    #[test]
    fn test_registration_arity() {
        let types = TypeRegistry::standard();
        let op = Operation::ternary(|a, _, _| Ok(a.clone()));

        let err = FunctionSpec::new("f", params(&types, &["Real", "Real"]), op).unwrap_err();
        assert_eq!(err.to_string(), "Not enough arguments adding function: f");
    }

    #[test]
    fn test_call_arity() {
        let types = TypeRegistry::standard();
        let spec = FunctionSpec::new(
            "gt",
            params(&types, &["Real", "Real"]),
            Operation::binary(|a, _| Ok(a.clone())),
        )
        .unwrap();

        let err = spec.invoke(smallvec![Ok(json!(1))]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid Number of arguments calling function: gt");
    }

    #[test]
    fn test_first_failing_position_wins() {
        let types = TypeRegistry::standard();
        let spec = FunctionSpec::new(
            "lte",
            params(&types, &["Real", "Real"]),
            Operation::binary(|a, _| Ok(a.clone())),
        )
        .unwrap();

        let err = spec
            .invoke(smallvec![Ok(json!("a")), Ok(json!("b"))])
            .unwrap_err();
        assert_eq!(err.to_string(), "Not a valid Real Number: a");

        // An operand that already failed keeps its own error
        let err = spec
            .invoke(smallvec![
                Err(EvalError::InvalidSubstitution {
                    path: "x".to_string()
                }),
                Ok(json!("b"))
            ])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Substitution");
    }

    #[test]
    fn test_implementation_runs_only_when_all_valid() {
        let types = TypeRegistry::standard();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let spec = FunctionSpec::new(
            "and",
            params(&types, &["Boolean", "Boolean"]),
            Operation::binary(move |a, _| {
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(a.clone())
            }),
        )
        .unwrap();

        assert!(spec.invoke(smallvec![Ok(json!(true)), Ok(json!(1))]).is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 0);

        assert_eq!(
            spec.invoke(smallvec![Ok(json!(true)), Ok(json!(false))]),
            Ok(json!(true))
        );
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
