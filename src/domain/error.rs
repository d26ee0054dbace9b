use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error produced anywhere in rule evaluation.
///
/// The `Display` text of each variant is the user-visible message surfaced
/// by `evaluate`, so it must stay stable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Rule mapping has no operator key
    #[error("Invalid Object")]
    InvalidObject,

    /// Rule mapping has more than one key
    #[error("Ambiguous Rule: {}", .keys.join(", "))]
    AmbiguousRule { keys: Vec<String> },

    /// Operator's operand list is null
    #[error("Invalid Rule")]
    InvalidRule,

    /// Operator's operand list is not a sequence
    #[error("Invalid Parameters")]
    InvalidParameters,

    /// Operand is null
    #[error("NULL Object")]
    NullOperand,

    #[error("Invalid Function: {0}")]
    UnknownOperator(String),

    #[error("Unknown Type: {0}")]
    UnknownType(String),

    /// Declared type count does not match the implementation arity
    #[error("Not enough arguments adding function: {name}")]
    RegistrationArity {
        name: String,
        declared: usize,
        arity: usize,
    },

    /// Operand count does not match the registered arity
    #[error("Invalid Number of arguments calling function: {name}")]
    CallArity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// `label` names the requested type; `failed` names the ancestor level
    /// that rejected the value, when it was not the requested one.
    ///
    /// The message leads with the requested type and appends the first
    /// failing level, so `Natural(-1)` reads "Not a valid Natural Number: -1
    /// (Not a valid Whole Number: -1)". The first failing level's text is
    /// kept verbatim inside the parentheses.
    #[error("Not a valid {label}: {value}{}", ancestor_suffix(.failed, .value))]
    TypeValidation {
        type_name: String,
        label: String,
        value: String,
        failed: Option<String>,
    },

    #[error("Invalid Substitution")]
    InvalidSubstitution { path: String },

    #[error("Maximum rule depth exceeded: {0}")]
    DepthExceeded(usize),

    /// Implementation rejected arguments that passed validation
    #[error("{name}: {message}")]
    OperationFailure { name: String, message: String },
}

fn ancestor_suffix(failed: &Option<String>, value: &str) -> String {
    match failed {
        Some(label) => format!(" (Not a valid {}: {})", label, value),
        None => String::new(),
    }
}

/// Coarse classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidRuleShape,
    NullOperand,
    UnknownOperator,
    UnknownType,
    ArityMismatch,
    TypeValidationFailure,
    PathResolutionFailure,
    DepthExceeded,
    OperationFailure,
}

impl ErrorKind {
    pub const COUNT: usize = 9;

    pub const ALL: [ErrorKind; Self::COUNT] = [
        ErrorKind::InvalidRuleShape,
        ErrorKind::NullOperand,
        ErrorKind::UnknownOperator,
        ErrorKind::UnknownType,
        ErrorKind::ArityMismatch,
        ErrorKind::TypeValidationFailure,
        ErrorKind::PathResolutionFailure,
        ErrorKind::DepthExceeded,
        ErrorKind::OperationFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRuleShape => "invalid_rule_shape",
            ErrorKind::NullOperand => "null_operand",
            ErrorKind::UnknownOperator => "unknown_operator",
            ErrorKind::UnknownType => "unknown_type",
            ErrorKind::ArityMismatch => "arity_mismatch",
            ErrorKind::TypeValidationFailure => "type_validation_failure",
            ErrorKind::PathResolutionFailure => "path_resolution_failure",
            ErrorKind::DepthExceeded => "depth_exceeded",
            ErrorKind::OperationFailure => "operation_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::InvalidObject
            | EvalError::AmbiguousRule { .. }
            | EvalError::InvalidRule
            | EvalError::InvalidParameters => ErrorKind::InvalidRuleShape,
            EvalError::NullOperand => ErrorKind::NullOperand,
            EvalError::UnknownOperator(_) => ErrorKind::UnknownOperator,
            EvalError::UnknownType(_) => ErrorKind::UnknownType,
            EvalError::RegistrationArity { .. } | EvalError::CallArity { .. } => {
                ErrorKind::ArityMismatch
            }
            EvalError::TypeValidation { .. } => ErrorKind::TypeValidationFailure,
            EvalError::InvalidSubstitution { .. } => ErrorKind::PathResolutionFailure,
            EvalError::DepthExceeded(_) => ErrorKind::DepthExceeded,
            EvalError::OperationFailure { .. } => ErrorKind::OperationFailure,
        }
    }
}
