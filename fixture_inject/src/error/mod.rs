//! Error types produced while matching and assigning injected values.

mod types;

pub use types::{AssignError, ConversionError, InjectError, InjectResult, ProviderError};
