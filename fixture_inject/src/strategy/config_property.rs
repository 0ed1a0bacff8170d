//! Matching of configuration property members by name, with defaulting and
//! text conversion.

use super::{MatchStrategy, accepts_structurally};
use crate::collect::is_structurally_compatible;
use crate::convert::convert;
use crate::error::ConversionError;
use crate::member::Member;
use crate::value::Value;

/// Accepts members marked as configuration property `name`.
///
/// Text values reach primitive and boxed members even though their types
/// differ, and are converted on assignment. A null value is replaced by the
/// marker's default when one is declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPropertyMatch {
    name: String,
}

impl ConfigPropertyMatch {
    /// Strategy for property `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Property name this strategy matches.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.name
    }

    /// Null, or text bound for a member that converts it.
    fn convertible(member: &Member, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::Text(_)) => member.slot_type().is_primitive_or_boxed(),
            Some(_) => false,
        }
    }
}

impl MatchStrategy for ConfigPropertyMatch {
    fn describe(&self) -> String {
        format!("config property '{}'", self.name)
    }

    fn admits(&self, member: &Member, value: Option<&Value>) -> bool {
        is_structurally_compatible(member.slot_type(), value) || Self::convertible(member, value)
    }

    fn accepts(&self, member: &Member, value: Option<&Value>) -> bool {
        member
            .markers()
            .config_property()
            .is_some_and(|property| property.name() == self.name)
            && (accepts_structurally(member, value) || Self::convertible(member, value))
    }

    fn resolve(
        &self,
        member: &Member,
        value: Option<Value>,
    ) -> Result<Option<Value>, ConversionError> {
        let resolved = value.or_else(|| {
            member
                .markers()
                .config_property()
                .and_then(|property| property.default_value())
                .map(Value::from)
        });
        match resolved {
            Some(Value::Text(text)) if member.slot_type().is_primitive_or_boxed() => {
                convert(Some(&text), member.slot_type())
            }
            other => Ok(other),
        }
    }
}
