#![forbid(unsafe_code)]

//! Rule grammar, parameter coercion and preset patterns

pub mod cache;
pub mod grammar;
pub mod param;
pub mod presets;

// Re-export core types
pub use cache::cached_rules;
pub use grammar::{Constraint, ConstraintKind, Format, Parameter, parse_rules};
pub use param::{Param, ParamKind, Target};
pub use presets::{PresetRegistry, registry};
