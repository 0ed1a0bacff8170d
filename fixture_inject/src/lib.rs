//! Member matching and value injection for test fixtures.
//!
//! `fixture_inject` writes a value into a member of an object under test
//! without going through a constructor. Types opt in with
//! `#[derive(Injectable)]`, which records each field's declared type and
//! markers in a per-type descriptor table. A request then picks the target
//! member using one of four strategies:
//!
//! - plain type matching ([`inject`] followed by `into`),
//! - qualified injection points ([`InjectionRequest::as_qualifying_instance`]),
//! - named resources ([`InjectionRequest::as_resource`]),
//! - configuration properties ([`InjectionRequest::as_config_property`]).
//!
//! Members are searched most-derived type first, then along the chain of
//! fields marked `#[injectable(parent)]`.
//!
//! ```
//! use fixture_inject::{Injectable, inject};
//!
//! #[derive(Default, Injectable)]
//! struct Greeter {
//!     #[injectable(config_property(name = "greeting", default = "hello"))]
//!     greeting: Option<String>,
//!     #[injectable(config_property(name = "repeat"))]
//!     repeat: i32,
//! }
//!
//! let mut greeter = Greeter::default();
//! inject(None::<String>)
//!     .as_config_property("greeting")
//!     .into(&mut greeter)?;
//! inject("3").as_config_property("repeat").into(&mut greeter)?;
//!
//! assert_eq!(greeter.greeting.as_deref(), Some("hello"));
//! assert_eq!(greeter.repeat, 3);
//! # Ok::<(), fixture_inject::InjectError>(())
//! ```

pub use fixture_inject_macros::Injectable;

mod collect;
mod config_source;
mod convert;
mod error;
mod injector;
mod member;
mod request;
mod slot;
pub mod strategy;
mod value;
mod value_source;

pub use collect::{Candidate, collect, collect_with, is_structurally_compatible};
pub use convert::{PrimitiveKind, convert};
pub use error::{AssignError, ConversionError, InjectError, InjectResult, ProviderError};
pub use injector::{inject_all, inject_one};
pub use member::{
    ConfigProperty, DEFAULT_QUALIFIER, Injectable, Markers, Member, ResourceIdentity, Setter,
    TypeDescriptor,
};
pub use request::{
    ConfigPropertyRequest, InjectionRequest, QualifiedRequest, ResourceRequest, inject,
};
pub use slot::{Slot, SlotType};
pub use strategy::{
    AnnotatedInjectMatch, ConfigPropertyMatch, MatchStrategy, ResourceMatch, TypeMatch,
};
pub use value::{IntoValue, Object, Provider, TypeKey, Value, ValueProvider};
pub use value_source::ValueSource;

#[doc(hidden)]
pub mod __private {
    //! Items referenced by `#[derive(Injectable)]` expansions.

    pub use crate::member::downcast_target;
}
