//! Runtime record schemas and JSON binding

pub mod definition;
pub mod dynamic;

pub use definition::{FieldSchema, FieldType, RecordSchema};
pub use dynamic::{Document, DynamicRecord, parse_documents};
