pub mod builtins;
pub mod operation;
pub mod registry;
pub mod spec;

pub use builtins::register_builtins;
pub use operation::{Body, Operation};
pub use registry::FunctionRegistry;
pub use spec::{FunctionSpec, Operands};
