//! Test utilities for fieldcheck integration tests

#![allow(dead_code)]

use fieldcheck::schema::{Document, parse_documents};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Owned (field, keyword) pairs, in the shape `ValidationReport::pairs` returns
pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(field, kind)| (field.to_string(), kind.to_string()))
        .collect()
}

/// Parse a JSON object or array of objects into documents, panicking on bad input
pub fn documents(text: &str) -> Vec<Document> {
    match parse_documents(text) {
        Ok(docs) => docs,
        Err(e) => panic!("test documents must parse: {e}"),
    }
}

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}
