use serde_json::Value;
use tracing::debug;

use super::operation::Operation;
use super::registry::FunctionRegistry;
use crate::domain::{display_value, number_value, EvalError, Outcome};
use crate::types::{as_real, names};

/// Register `and`, `or`, `gt`, `lt`, `gte`, `lte`, `inrange` and `sum`.
pub fn register_builtins(registry: &mut FunctionRegistry) -> Outcome<()> {
    let builtins: [(&str, Operation, &[&str]); 8] = [
        ("and", logical("and", |a, b| a && b), &[names::BOOLEAN, names::BOOLEAN]),
        ("or", logical("or", |a, b| a || b), &[names::BOOLEAN, names::BOOLEAN]),
        ("gt", compare("gt", |a, b| a > b), &[names::REAL, names::REAL]),
        ("lt", compare("lt", |a, b| a < b), &[names::REAL, names::REAL]),
        ("gte", compare("gte", |a, b| a >= b), &[names::REAL, names::REAL]),
        ("lte", compare("lte", |a, b| a <= b), &[names::REAL, names::REAL]),
        ("inrange", inrange(), &[names::WHOLE, names::WHOLE, names::WHOLE]),
        ("sum", sum(), &[names::ANY]),
    ];

    for (name, operation, types) in builtins {
        let msg = registry.register(name, operation, types)?;
        debug!("{}", msg);
    }

    Ok(())
}

fn logical(name: &'static str, f: fn(bool, bool) -> bool) -> Operation {
    Operation::binary(move |a, b| Ok(Value::Bool(f(boolean(name, a)?, boolean(name, b)?))))
}

fn compare(name: &'static str, f: fn(f64, f64) -> bool) -> Operation {
    Operation::binary(move |a, b| Ok(Value::Bool(f(real(name, a)?, real(name, b)?))))
}

/// `low <= value <= high`
fn inrange() -> Operation {
    Operation::ternary(|low, high, value| {
        let (low, high, value) = (
            real("inrange", low)?,
            real("inrange", high)?,
            real("inrange", value)?,
        );
        Ok(Value::Bool(low <= value && value <= high))
    })
}

/// Sum of every value in a mapping (or element of a sequence).
fn sum() -> Operation {
    Operation::unary(|collection| {
        let total = match collection {
            Value::Object(map) => map
                .values()
                .try_fold(0.0, |acc, v| real("sum", v).map(|n| acc + n)),
            Value::Array(items) => items
                .iter()
                .try_fold(0.0, |acc, v| real("sum", v).map(|n| acc + n)),
            other => Err(failure(
                "sum",
                format!("Not a valid Mapping: {}", display_value(other)),
            )),
        }?;

        number_value(total).ok_or_else(|| failure("sum", "result is not a finite number"))
    })
}

fn real(name: &str, value: &Value) -> Outcome<f64> {
    as_real(value)
        .ok_or_else(|| failure(name, format!("Not a valid Real Number: {}", display_value(value))))
}

fn boolean(name: &str, value: &Value) -> Outcome<bool> {
    value
        .as_bool()
        .ok_or_else(|| failure(name, format!("Not a valid Boolean: {}", display_value(value))))
}

fn failure(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::OperationFailure {
        name: name.to_string(),
        message: message.into(),
    }
}
