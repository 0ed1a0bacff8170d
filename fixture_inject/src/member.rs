//! Per-type descriptor tables.
//!
//! A [`TypeDescriptor`] lists the members a type declares itself, each with
//! its declared [`SlotType`], whether it can hold null, its [`Markers`], and
//! a type-erased setter.
//! `#[derive(Injectable)]` builds one table per type on first use; the
//! matching algorithm never looks at the type any other way.

use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::AssignError;
use crate::slot::SlotType;
use crate::value::Value;

/// Qualifier implied by members that declare none.
pub const DEFAULT_QUALIFIER: &str = "default";

/// Type-erased member setter generated for each field.
pub type Setter = fn(&mut dyn Any, Option<Value>) -> Result<(), AssignError>;

/// Identity of a named resource injection point.
///
/// Unset fields are empty strings, so two identities are equal only when all
/// three fields agree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    name: Cow<'static, str>,
    mapped_name: Cow<'static, str>,
    lookup: Cow<'static, str>,
}

impl ResourceIdentity {
    /// Identity with all three fields given.
    #[must_use]
    pub const fn new(name: &'static str, mapped_name: &'static str, lookup: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            mapped_name: Cow::Borrowed(mapped_name),
            lookup: Cow::Borrowed(lookup),
        }
    }

    /// Identity carrying only a name.
    #[must_use]
    pub fn by_name(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Identity carrying only a mapped name.
    #[must_use]
    pub fn by_mapped_name(mapped_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            mapped_name: mapped_name.into(),
            ..Self::default()
        }
    }

    /// Identity carrying only a lookup name.
    #[must_use]
    pub fn by_lookup(lookup: impl Into<Cow<'static, str>>) -> Self {
        Self {
            lookup: lookup.into(),
            ..Self::default()
        }
    }

    /// Resource name, empty when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mapped name, empty when unset.
    #[must_use]
    pub fn mapped_name(&self) -> &str {
        &self.mapped_name
    }

    /// Lookup name, empty when unset.
    #[must_use]
    pub fn lookup(&self) -> &str {
        &self.lookup
    }
}

/// A named configuration property injection point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigProperty {
    name: &'static str,
    default_value: &'static str,
}

impl ConfigProperty {
    /// Property `name` with `default_value`; an empty default means none.
    #[must_use]
    pub const fn new(name: &'static str, default_value: &'static str) -> Self {
        Self {
            name,
            default_value,
        }
    }

    /// Property name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Default text, or `None` when the marker declares no default.
    #[must_use]
    pub const fn default_value(&self) -> Option<&'static str> {
        if self.default_value.is_empty() {
            None
        } else {
            Some(self.default_value)
        }
    }
}

/// Metadata attached to a member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markers {
    inject: bool,
    qualifiers: &'static [&'static str],
    resource: Option<ResourceIdentity>,
    config_property: Option<ConfigProperty>,
}

impl Markers {
    /// Markers for an unannotated member.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inject: false,
            qualifiers: &[],
            resource: None,
            config_property: None,
        }
    }

    /// Adds the inject marker.
    #[must_use]
    pub fn with_inject(mut self) -> Self {
        self.inject = true;
        self
    }

    /// Sets the qualifier tags.
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: &'static [&'static str]) -> Self {
        self.qualifiers = qualifiers;
        self
    }

    /// Adds a resource marker.
    #[must_use]
    pub fn with_resource(mut self, identity: ResourceIdentity) -> Self {
        self.resource = Some(identity);
        self
    }

    /// Adds a configuration property marker.
    #[must_use]
    pub fn with_config_property(mut self, property: ConfigProperty) -> Self {
        self.config_property = Some(property);
        self
    }

    /// Whether the inject marker is present.
    #[must_use]
    pub const fn has_inject(&self) -> bool {
        self.inject
    }

    /// Qualifier tags as declared.
    #[must_use]
    pub const fn qualifiers(&self) -> &'static [&'static str] {
        self.qualifiers
    }

    /// Declared qualifiers as a set, or `{DEFAULT_QUALIFIER}` when none are
    /// declared.
    #[must_use]
    pub fn qualifier_set(&self) -> BTreeSet<&'static str> {
        if self.qualifiers.is_empty() {
            BTreeSet::from([DEFAULT_QUALIFIER])
        } else {
            self.qualifiers.iter().copied().collect()
        }
    }

    /// Resource marker, if any.
    #[must_use]
    pub const fn resource(&self) -> Option<&ResourceIdentity> {
        self.resource.as_ref()
    }

    /// Configuration property marker, if any.
    #[must_use]
    pub const fn config_property(&self) -> Option<&ConfigProperty> {
        self.config_property.as_ref()
    }
}

/// One member declared directly on a type.
pub struct Member {
    name: &'static str,
    slot_type: SlotType,
    nullable: bool,
    markers: Markers,
    setter: Setter,
}

impl Member {
    /// Describes a member; `nullable` records whether it can hold null.
    #[must_use]
    pub const fn new(
        name: &'static str,
        slot_type: SlotType,
        nullable: bool,
        markers: Markers,
        setter: Setter,
    ) -> Self {
        Self {
            name,
            slot_type,
            nullable,
            markers,
            setter,
        }
    }

    /// Member name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn slot_type(&self) -> &SlotType {
        &self.slot_type
    }

    /// Whether the member can hold null.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Attached markers.
    #[must_use]
    pub const fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Writes `value` into this member of `target`.
    ///
    /// `target` must be the type that declares the member.
    ///
    /// # Errors
    ///
    /// Propagates the setter's [`AssignError`].
    pub fn assign(&self, target: &mut dyn Any, value: Option<Value>) -> Result<(), AssignError> {
        (self.setter)(target, value)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("slot_type", &self.slot_type)
            .field("nullable", &self.nullable)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}

/// The members one type declares, in declaration order.
#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: &'static str,
    members: Vec<Member>,
}

impl TypeDescriptor {
    /// Builds the table for the type named `type_name`.
    #[must_use]
    pub const fn new(type_name: &'static str, members: Vec<Member>) -> Self {
        Self { type_name, members }
    }

    /// Name of the described type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }
}

/// Types whose members can receive injected values.
///
/// Implemented by `#[derive(Injectable)]`. The ancestor chain is formed by
/// [`Injectable::parent`]: a field marked `#[injectable(parent)]` plays the
/// role of a base type, and the chain ends at the first type without one.
///
/// ```
/// use fixture_inject::{Injectable, inject};
///
/// #[derive(Default, Injectable)]
/// struct Base {
///     label: Option<String>,
/// }
///
/// #[derive(Default, Injectable)]
/// struct Derived {
///     #[injectable(parent)]
///     base: Base,
///     port: i32,
/// }
///
/// let mut subject = Derived::default();
/// inject("main").into(&mut subject)?;
/// inject(8080).into(&mut subject)?;
/// assert_eq!(subject.base.label.as_deref(), Some("main"));
/// assert_eq!(subject.port, 8080);
/// # Ok::<(), fixture_inject::InjectError>(())
/// ```
pub trait Injectable: Any {
    /// Members declared directly on this type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// `self` as [`Any`], for the generated setters.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The embedded base value, if this type has one.
    fn parent(&self) -> Option<&dyn Injectable> {
        None
    }

    /// Mutable access to the embedded base value.
    fn parent_mut(&mut self) -> Option<&mut dyn Injectable> {
        None
    }
}

/// Downcasts a setter target to the type that declares the member.
///
/// # Errors
///
/// Returns [`AssignError::TargetMismatch`] when `target` is not a `T`.
#[doc(hidden)]
pub fn downcast_target<T: Any>(target: &mut dyn Any) -> Result<&mut T, AssignError> {
    target
        .downcast_mut::<T>()
        .ok_or(AssignError::TargetMismatch {
            expected: std::any::type_name::<T>(),
        })
}
