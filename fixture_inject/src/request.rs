//! Fluent entry points: `inject(value).into(&mut target)` and friends.

use std::borrow::Cow;

use figment::Figment;

use crate::config_source;
use crate::error::InjectResult;
use crate::injector::{inject_all, inject_one};
use crate::member::Injectable;
use crate::strategy::{AnnotatedInjectMatch, ConfigPropertyMatch, ResourceMatch, TypeMatch};
use crate::value::{IntoValue, Value};
use crate::value_source::ValueSource;

/// Starts an injection of `value`.
///
/// # Examples
///
/// ```
/// use fixture_inject::{Injectable, inject};
///
/// #[derive(Default, Injectable)]
/// struct Client {
///     endpoint: Option<String>,
///     retries: i32,
/// }
///
/// let mut client = Client::default();
/// inject("http://localhost:8080").into(&mut client)?;
/// assert_eq!(client.endpoint.as_deref(), Some("http://localhost:8080"));
/// assert_eq!(client.retries, 0);
/// # Ok::<(), fixture_inject::InjectError>(())
/// ```
pub fn inject(value: impl IntoValue) -> InjectionRequest {
    InjectionRequest {
        value: value.into_value(),
    }
}

/// A value waiting to be injected by plain type matching.
#[derive(Clone, Debug)]
#[must_use = "nothing is injected until `into` or `into_all` is called"]
pub struct InjectionRequest {
    value: Option<Value>,
}

impl InjectionRequest {
    /// Injects into the first structurally compatible member of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InjectError::NoMatchFound`] when no member fits, or
    /// the provider or assignment failure.
    pub fn into(self, target: &mut dyn Injectable) -> InjectResult<()> {
        inject_one(&ValueSource::of(self.value)?, target, &TypeMatch)
    }

    /// Injects into every structurally compatible member of `target`,
    /// returning how many were assigned.
    ///
    /// # Errors
    ///
    /// As for [`InjectionRequest::into`].
    pub fn into_all(self, target: &mut dyn Injectable) -> InjectResult<usize> {
        inject_all(&ValueSource::of(self.value)?, target, &TypeMatch)
    }

    /// Targets members marked `config_property(name = ...)`.
    pub fn as_config_property(self, name: impl Into<String>) -> ConfigPropertyRequest<'static> {
        ConfigPropertyRequest {
            value: self.value,
            strategy: ConfigPropertyMatch::new(name),
            source: None,
        }
    }

    /// Targets members marked `resource`.
    pub fn as_resource(self) -> ResourceRequest {
        ResourceRequest {
            value: self.value,
            strategy: ResourceMatch::new(),
        }
    }

    /// Targets inject-marked members qualified by exactly `qualifiers`.
    ///
    /// An empty list requests unqualified members.
    pub fn as_qualifying_instance<I, Q>(self, qualifiers: I) -> QualifiedRequest
    where
        I: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        QualifiedRequest {
            value: self.value,
            strategy: AnnotatedInjectMatch::new(qualifiers),
        }
    }
}

/// An injection into a named configuration property.
#[derive(Clone, Debug)]
#[must_use = "nothing is injected until `into` or `into_all` is called"]
pub struct ConfigPropertyRequest<'a> {
    value: Option<Value>,
    strategy: ConfigPropertyMatch,
    source: Option<&'a Figment>,
}

impl<'a> ConfigPropertyRequest<'a> {
    /// Consults `figment` for the property when the injected value is null.
    ///
    /// Precedence is the explicit value, then `figment`, then the marker's
    /// default.
    pub fn with_source<'b>(self, figment: &'b Figment) -> ConfigPropertyRequest<'b> {
        ConfigPropertyRequest {
            value: self.value,
            strategy: self.strategy,
            source: Some(figment),
        }
    }

    /// Injects into the first member marked with this property.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InjectError::NoMatchFound`] when no member carries
    /// the property, [`crate::InjectError::Conversion`] for malformed text,
    /// and [`crate::InjectError::ConfigSource`] when the configured source
    /// holds a non-scalar value.
    pub fn into(self, target: &mut dyn Injectable) -> InjectResult<()> {
        let source = self.value_source()?;
        inject_one(&source, target, &self.strategy)
    }

    /// Injects into every member marked with this property.
    ///
    /// # Errors
    ///
    /// As for [`ConfigPropertyRequest::into`].
    pub fn into_all(self, target: &mut dyn Injectable) -> InjectResult<usize> {
        let source = self.value_source()?;
        inject_all(&source, target, &self.strategy)
    }

    fn value_source(&self) -> InjectResult<ValueSource> {
        let supplied = ValueSource::of(self.value.clone())?;
        match self.source {
            Some(figment) if supplied.effective().is_none() => {
                ValueSource::of(config_source::lookup(figment, self.strategy.property())?)
            }
            _ => Ok(supplied),
        }
    }
}

/// An injection into resource-marked members.
#[derive(Clone, Debug)]
#[must_use = "nothing is injected until `into` or `into_all` is called"]
pub struct ResourceRequest {
    value: Option<Value>,
    strategy: ResourceMatch,
}

impl ResourceRequest {
    /// Also matches resources with this name.
    pub fn by_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.strategy = self.strategy.by_name(name);
        self
    }

    /// Also matches resources with this mapped name.
    pub fn by_mapped_name(mut self, mapped_name: impl Into<Cow<'static, str>>) -> Self {
        self.strategy = self.strategy.by_mapped_name(mapped_name);
        self
    }

    /// Also matches resources with this lookup name.
    pub fn by_lookup(mut self, lookup: impl Into<Cow<'static, str>>) -> Self {
        self.strategy = self.strategy.by_lookup(lookup);
        self
    }

    /// Injects into the first matching resource member.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InjectError::NoMatchFound`] when no resource member
    /// matches, or the provider or assignment failure.
    pub fn into(self, target: &mut dyn Injectable) -> InjectResult<()> {
        inject_one(&ValueSource::of(self.value)?, target, &self.strategy)
    }

    /// Injects into every matching resource member.
    ///
    /// # Errors
    ///
    /// As for [`ResourceRequest::into`].
    pub fn into_all(self, target: &mut dyn Injectable) -> InjectResult<usize> {
        inject_all(&ValueSource::of(self.value)?, target, &self.strategy)
    }
}

/// An injection into qualified inject-marked members.
#[derive(Clone, Debug)]
#[must_use = "nothing is injected until `into` or `into_all` is called"]
pub struct QualifiedRequest {
    value: Option<Value>,
    strategy: AnnotatedInjectMatch,
}

impl QualifiedRequest {
    /// Injects into the first member with a matching qualifier set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InjectError::NoMatchFound`] when no member matches,
    /// or the provider or assignment failure.
    pub fn into(self, target: &mut dyn Injectable) -> InjectResult<()> {
        inject_one(&ValueSource::of(self.value)?, target, &self.strategy)
    }

    /// Injects into every member with a matching qualifier set.
    ///
    /// # Errors
    ///
    /// As for [`QualifiedRequest::into`].
    pub fn into_all(self, target: &mut dyn Injectable) -> InjectResult<usize> {
        inject_all(&ValueSource::of(self.value)?, target, &self.strategy)
    }
}
