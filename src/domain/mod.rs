pub mod error;
pub mod node;
pub mod outcome;
pub mod value;

pub use error::{ErrorKind, EvalError};
pub use node::{Node, OperatorNode, TEMPLATE_SENTINEL};
pub use outcome::{sequence, Outcome, OutcomeExt};
pub use value::{display_value, number_value};
