//! The value being injected, with provider indirection resolved.

use crate::error::{InjectError, InjectResult};
use crate::value::Value;

/// A raw injection value together with the value actually injected.
///
/// When the raw value is a [`Value::Provided`] holder the effective value is
/// whatever the provider yields; otherwise both are the same.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSource {
    raw: Option<Value>,
    effective: Option<Value>,
}

impl ValueSource {
    /// Wraps `raw`, invoking its provider if it is one.
    ///
    /// Providers are unwrapped once; a provider yielding another provider is
    /// injected as that provider.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::Provider`] when the provider fails.
    pub fn of(raw: Option<Value>) -> InjectResult<Self> {
        let effective = match &raw {
            Some(Value::Provided(provider)) => provider
                .provide()
                .map_err(|source| InjectError::Provider { source })?,
            other => other.clone(),
        };
        Ok(Self { raw, effective })
    }

    /// The value as supplied by the caller.
    #[must_use]
    pub const fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// The value to inject.
    #[must_use]
    pub const fn effective(&self) -> Option<&Value> {
        self.effective.as_ref()
    }
}
