pub mod basket;
pub mod config;
pub mod domain;
pub mod engine;
pub mod functions;
pub mod interpreter;
pub mod loader;
pub mod observability;
pub mod path;
pub mod types;

pub use config::Config;
pub use domain::{ErrorKind, EvalError, Outcome, OutcomeExt};
pub use engine::Engine;
pub use functions::{FunctionRegistry, Operation};
pub use interpreter::Interpreter;
pub use types::{TypeRegistry, Validator};
