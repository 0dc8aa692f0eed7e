#![forbid(unsafe_code)]

//! Static classification of field types
//!
//! Every type that can carry rules implements [`Classify`]. The
//! classification is an associated constant, so it is fixed per field type at
//! compile time and never inspected at runtime.

use crate::types::{Classification, ValueCategory};

/// Maps a declared field type to its value category
pub trait Classify {
    const CLASSIFICATION: Classification;
}

macro_rules! classify {
    ($category:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Classify for $ty {
                const CLASSIFICATION: Classification = Classification::required($category);
            }
        )+
    };
}

classify!(ValueCategory::String => String, &str);
classify!(ValueCategory::Signed => i8, i16, i32, i64, isize);
classify!(ValueCategory::Unsigned => u8, u16, u32, u64, usize);
classify!(ValueCategory::Float => f32, f64);
classify!(ValueCategory::StringList => Vec<String>, Vec<&str>);
classify!(ValueCategory::SignedList => Vec<i8>, Vec<i16>, Vec<i32>, Vec<i64>, Vec<isize>);
classify!(ValueCategory::UnsignedList => Vec<u8>, Vec<u16>, Vec<u32>, Vec<u64>, Vec<usize>);
classify!(ValueCategory::FloatList => Vec<f32>, Vec<f64>);

impl<T: Classify> Classify for Option<T> {
    const CLASSIFICATION: Classification = Classification::optional(T::CLASSIFICATION.category);
}

/// Classification of `T`, usable where only the type is known
pub const fn classify<T: Classify>() -> Classification {
    T::CLASSIFICATION
}
