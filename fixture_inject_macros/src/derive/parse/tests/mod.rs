//! Unit tests for `#[injectable(...)]` parsing.
