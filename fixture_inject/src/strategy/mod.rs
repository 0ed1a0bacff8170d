//! Matching strategies deciding which collected member receives a value.
//!
//! Every strategy starts from the structural rules of
//! [`crate::is_structurally_compatible`] and layers its own marker checks on
//! top. The injector walks candidates in collection order and the first
//! member a strategy accepts wins; there is no scoring.

mod config_property;
mod qualified;
mod resource;
mod type_match;

pub use config_property::ConfigPropertyMatch;
pub use qualified::AnnotatedInjectMatch;
pub use resource::ResourceMatch;
pub use type_match::TypeMatch;

use crate::collect::is_structurally_compatible;
use crate::error::ConversionError;
use crate::member::Member;
use crate::value::Value;

/// Decides whether a member receives the injected value.
pub trait MatchStrategy {
    /// Human-readable description used in diagnostics.
    fn describe(&self) -> String;

    /// Filter applied while collecting candidates.
    ///
    /// Defaults to structural compatibility.
    fn admits(&self, member: &Member, value: Option<&Value>) -> bool {
        is_structurally_compatible(member.slot_type(), value)
    }

    /// Whether `member` accepts `value` under this strategy.
    fn accepts(&self, member: &Member, value: Option<&Value>) -> bool;

    /// Resolves the value actually written to an accepted member.
    ///
    /// The default passes `value` through unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when a strategy converts text into the
    /// member's type and the text is malformed.
    fn resolve(
        &self,
        _member: &Member,
        value: Option<Value>,
    ) -> Result<Option<Value>, ConversionError> {
        Ok(value)
    }
}

/// Base acceptance shared by every strategy.
///
/// Structural compatibility, except that null only fills members that can
/// hold it.
#[must_use]
pub fn accepts_structurally(member: &Member, value: Option<&Value>) -> bool {
    match value {
        Some(present) => member.slot_type().accepts_runtime_type(present),
        None => member.is_nullable(),
    }
}
