#![forbid(unsafe_code)]

//! Record descriptions, field classification and value extraction

pub mod category;
pub mod extract;
pub mod field;

pub use category::{Classify, classify};
pub use extract::{Extract, FieldValue, Value};
pub use field::{Field, Slot, Validate};
