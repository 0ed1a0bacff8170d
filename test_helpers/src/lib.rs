//! Test helpers shared across crates.
//!
//! This crate provides a `figment::Jail` wrapper and ready-made fixture
//! values: a temporary directory, generated identifiers, a repository object
//! exposed through a trait view, and providers that fail or count calls.

pub mod figment;
pub mod fixtures;
