pub mod registry;
pub mod validator;

#[cfg(test)]
mod proptest;

pub use registry::{names, TypeRegistry};
pub use validator::{as_real, Predicate, Validator};
