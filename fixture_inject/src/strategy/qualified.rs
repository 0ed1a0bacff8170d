//! Matching of inject-marked members by qualifier set.

use std::collections::BTreeSet;

use super::{MatchStrategy, accepts_structurally};
use crate::member::{DEFAULT_QUALIFIER, Member};
use crate::value::Value;

/// Accepts inject-marked members whose qualifiers equal the requested set.
///
/// Both sides fall back to `{DEFAULT_QUALIFIER}` when empty, so an
/// unqualified request only reaches unqualified members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedInjectMatch {
    qualifiers: BTreeSet<String>,
}

impl AnnotatedInjectMatch {
    /// Strategy requesting exactly `qualifiers`.
    pub fn new<I, Q>(qualifiers: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        let mut requested: BTreeSet<String> = qualifiers.into_iter().map(Into::into).collect();
        if requested.is_empty() {
            requested.insert(DEFAULT_QUALIFIER.to_owned());
        }
        Self {
            qualifiers: requested,
        }
    }

    /// The effective requested qualifier set.
    #[must_use]
    pub const fn qualifiers(&self) -> &BTreeSet<String> {
        &self.qualifiers
    }

    fn qualifiers_match(&self, member: &Member) -> bool {
        let declared = member.markers().qualifier_set();
        declared.len() == self.qualifiers.len()
            && self
                .qualifiers
                .iter()
                .all(|wanted| declared.contains(wanted.as_str()))
    }
}

impl MatchStrategy for AnnotatedInjectMatch {
    fn describe(&self) -> String {
        let tags: Vec<&str> = self.qualifiers.iter().map(String::as_str).collect();
        format!("qualified injection [{}]", tags.join(", "))
    }

    fn accepts(&self, member: &Member, value: Option<&Value>) -> bool {
        accepts_structurally(member, value)
            && member.markers().has_inject()
            && self.qualifiers_match(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Markers;
    use crate::slot::SlotType;
    use crate::strategy::test_support::member;
    use rstest::rstest;

    fn text() -> Option<Value> {
        Some(Value::from("svc"))
    }

    #[rstest]
    #[case::unqualified_request_unqualified_member(&[], &[], true)]
    #[case::qualified_request_unqualified_member(&["fast"], &[], false)]
    #[case::unqualified_request_qualified_member(&[], &["fast"], false)]
    #[case::equal_sets(&["fast", "local"], &["local", "fast"], true)]
    #[case::subset(&["fast"], &["fast", "local"], false)]
    #[case::explicit_default(&["default"], &[], true)]
    fn compares_qualifier_sets(
        #[case] requested: &[&str],
        #[case] declared: &'static [&'static str],
        #[case] expected: bool,
    ) {
        let candidate = member(
            "svc",
            SlotType::Text,
            Markers::new().with_inject().with_qualifiers(declared),
        );
        let strategy = AnnotatedInjectMatch::new(requested.iter().copied());
        assert_eq!(strategy.accepts(&candidate, text().as_ref()), expected);
    }

    #[rstest]
    fn requires_the_inject_marker() {
        let candidate = member("svc", SlotType::Text, Markers::new());
        let strategy = AnnotatedInjectMatch::new(Vec::<String>::new());
        assert!(!strategy.accepts(&candidate, text().as_ref()));
    }

    #[rstest]
    fn still_requires_structural_compatibility() {
        let candidate = member("svc", SlotType::Text, Markers::new().with_inject());
        let strategy = AnnotatedInjectMatch::new(Vec::<String>::new());
        assert!(!strategy.accepts(&candidate, Some(&Value::Int(1))));
    }
}
