//! Matching of resource-marked members by identity.

use std::borrow::Cow;

use super::{MatchStrategy, accepts_structurally};
use crate::member::{Member, ResourceIdentity};
use crate::value::Value;

/// Accepts resource-marked members whose identity equals one of the
/// registered predicates.
///
/// Each predicate is a partial [`ResourceIdentity`] with a single field set,
/// compared against the member's marker as a whole record. Without any
/// predicate every resource-marked member is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceMatch {
    identities: Vec<ResourceIdentity>,
}

impl ResourceMatch {
    /// Strategy with no predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate matching the resource name.
    #[must_use]
    pub fn by_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.identities.push(ResourceIdentity::by_name(name));
        self
    }

    /// Adds a predicate matching the mapped name.
    #[must_use]
    pub fn by_mapped_name(mut self, mapped_name: impl Into<Cow<'static, str>>) -> Self {
        self.identities
            .push(ResourceIdentity::by_mapped_name(mapped_name));
        self
    }

    /// Adds a predicate matching the lookup name.
    #[must_use]
    pub fn by_lookup(mut self, lookup: impl Into<Cow<'static, str>>) -> Self {
        self.identities.push(ResourceIdentity::by_lookup(lookup));
        self
    }

    /// Registered predicates in registration order.
    #[must_use]
    pub fn identities(&self) -> &[ResourceIdentity] {
        &self.identities
    }
}

impl MatchStrategy for ResourceMatch {
    fn describe(&self) -> String {
        if self.identities.is_empty() {
            return "resource injection".to_owned();
        }
        let predicates: Vec<String> = self
            .identities
            .iter()
            .map(|identity| {
                format!(
                    "(name={:?}, mapped_name={:?}, lookup={:?})",
                    identity.name(),
                    identity.mapped_name(),
                    identity.lookup()
                )
            })
            .collect();
        format!("resource injection {}", predicates.join(" | "))
    }

    fn accepts(&self, member: &Member, value: Option<&Value>) -> bool {
        let Some(declared) = member.markers().resource() else {
            return false;
        };
        accepts_structurally(member, value)
            && (self.identities.is_empty() || self.identities.contains(declared))
    }
}
