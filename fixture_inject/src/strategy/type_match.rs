//! The default strategy: structural type compatibility only.

use super::{MatchStrategy, accepts_structurally};
use crate::member::Member;
use crate::value::Value;

/// Accepts the first member whose declared type can hold the value.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeMatch;

impl MatchStrategy for TypeMatch {
    fn describe(&self) -> String {
        "type match".to_owned()
    }

    fn accepts(&self, member: &Member, value: Option<&Value>) -> bool {
        accepts_structurally(member, value)
    }
}
