//! Primary error enums for injection flows.

use thiserror::Error;

use crate::convert::PrimitiveKind;
use crate::slot::SlotType;
use crate::value::Value;

/// Error raised by a [`crate::ValueProvider`] while producing its value.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type InjectResult<T> = Result<T, InjectError>;

/// Errors that abort an injection call.
///
/// Every failure is fail-fast: the first error stops the call, including in
/// all-match mode where earlier assignments are left in place.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InjectError {
    /// No member of the target accepted the value under the active strategy.
    #[error("no member of `{target}` accepts {value} using {strategy}")]
    NoMatchFound {
        /// Type name of the object the value was injected into.
        target: &'static str,
        /// Description of the strategy that rejected every candidate.
        strategy: String,
        /// Description of the injected value.
        value: String,
    },

    /// Text could not be converted into the member's primitive kind.
    #[error("failed to convert the value for `{owner}.{member}`: {source}")]
    Conversion {
        /// Type that declares the member.
        owner: &'static str,
        /// Member name.
        member: &'static str,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// The resolved value could not be written to the member.
    #[error("failed to assign `{owner}.{member}`: {source}")]
    Assignment {
        /// Type that declares the member.
        owner: &'static str,
        /// Member name.
        member: &'static str,
        /// Underlying assignment failure.
        #[source]
        source: AssignError,
    },

    /// A value provider failed to produce its value.
    #[error("value provider failed: {source}")]
    Provider {
        /// Error reported by the provider.
        #[source]
        source: ProviderError,
    },

    /// A configuration property could not be read from the configured source.
    #[error("failed to read configuration property '{key}': {source}")]
    ConfigSource {
        /// Property key that was looked up.
        key: String,
        /// Error reported by the configuration layer.
        #[source]
        source: Box<figment::Error>,
    },
}

/// Failure converting text into a primitive or boxed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// A `char` was requested but the text holds no character.
    #[error("cannot convert an empty string to a char")]
    EmptyChar,

    /// The text is not a valid rendering of the requested kind.
    #[error("'{text}' is not a valid {kind}: {reason}")]
    Malformed {
        /// Text that failed to parse.
        text: String,
        /// Kind the text was parsed as.
        kind: PrimitiveKind,
        /// Parser message.
        reason: String,
    },

    /// The requested member type has no textual conversion.
    #[error("values of type {0} cannot be converted from text")]
    Unsupported(String),
}

/// Failure writing a resolved value into a member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AssignError {
    /// Null was assigned to a member that cannot hold it.
    #[error("null cannot be assigned to a member of type {0}")]
    NullNotAllowed(String),

    /// The value's type does not fit the member.
    #[error("a {found} value cannot be assigned to a member of type {expected}")]
    TypeMismatch {
        /// Declared member type.
        expected: String,
        /// Runtime type of the rejected value.
        found: String,
    },

    /// A setter was invoked on an object of a different type.
    #[error("setter for `{expected}` was applied to a different type")]
    TargetMismatch {
        /// Type the setter was generated for.
        expected: &'static str,
    },

    /// The ancestor declaring the member could not be reached.
    #[error("no ancestor exists at depth {depth}")]
    Detached {
        /// Distance from the most-derived type.
        depth: usize,
    },
}

impl AssignError {
    /// Builds a [`Self::TypeMismatch`] for `value` rejected by `expected`.
    #[must_use]
    pub fn mismatch(expected: &SlotType, value: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: value.type_name(),
        }
    }

    /// Builds a [`Self::NullNotAllowed`] for a member of type `expected`.
    #[must_use]
    pub fn null(expected: &SlotType) -> Self {
        Self::NullNotAllowed(expected.to_string())
    }
}
