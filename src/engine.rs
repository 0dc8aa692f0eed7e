//! Constraint evaluation and record validation

pub mod evaluator;
pub mod validator;

pub use evaluator::evaluate;
pub use validator::{Validator, validate};
