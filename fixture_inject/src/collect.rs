//! Candidate collection across a target's ancestor chain.

use crate::member::{Injectable, Member};
use crate::slot::SlotType;
use crate::value::Value;

/// A member found on the target, with the type that declares it.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    depth: usize,
    owner: &'static str,
    member: &'static Member,
}

impl Candidate {
    /// Distance from the most-derived type; `0` is the target itself.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Name of the declaring type.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// The member descriptor.
    #[must_use]
    pub const fn member(&self) -> &'static Member {
        self.member
    }
}

/// Whether a member declared as `slot` may be collected for `value`.
///
/// Null is compatible with every member at this stage; whether the member
/// can actually hold it is left to the strategies.
#[must_use]
pub fn is_structurally_compatible(slot: &SlotType, value: Option<&Value>) -> bool {
    value.is_none_or(|present| slot.accepts_runtime_type(present))
}

/// Collects the members of `target` structurally compatible with `value`.
///
/// Members are listed in declaration order, most-derived type first, then
/// each ancestor in turn.
#[must_use]
pub fn collect(target: &dyn Injectable, value: Option<&Value>) -> Vec<Candidate> {
    collect_with(target, |member| {
        is_structurally_compatible(member.slot_type(), value)
    })
}

/// Collects the members of `target` admitted by `admit`, in the same order
/// as [`collect`].
pub fn collect_with<F>(target: &dyn Injectable, mut admit: F) -> Vec<Candidate>
where
    F: FnMut(&Member) -> bool,
{
    let mut candidates = Vec::new();
    let mut level = Some(target);
    let mut depth = 0;
    while let Some(node) = level {
        let descriptor = node.descriptor();
        candidates.extend(
            descriptor
                .members()
                .iter()
                .filter(|&member| admit(member))
                .map(|member| Candidate {
                    depth,
                    owner: descriptor.type_name(),
                    member,
                }),
        );
        level = node.parent();
        depth += 1;
    }
    candidates
}
