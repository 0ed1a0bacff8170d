//! Conversion of text into primitive and boxed values.
//!
//! Each of the eight [`PrimitiveKind`]s appears as a plain member type
//! ([`SlotType::Primitive`]) and as its nullable boxed counterpart
//! ([`SlotType::Boxed`]). The pairing is fixed at compile time and total in
//! both directions; see [`SlotType::boxed_counterpart`] and
//! [`SlotType::primitive_counterpart`].

use std::fmt;
use std::str::FromStr;

use crate::error::ConversionError;
use crate::slot::SlotType;
use crate::value::Value;

/// The primitive value kinds supported by conversion and boxing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `i8`
    Byte,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
}

impl PrimitiveKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Bool,
        Self::Char,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Name of the Rust type backing this kind.
    #[must_use]
    pub const fn rust_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
        }
    }

    /// The kind's default value (`false`, `'\0'`, or zero).
    #[must_use]
    pub const fn default_value(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Char => Value::Char('\0'),
            Self::Byte => Value::Byte(0),
            Self::Short => Value::Short(0),
            Self::Int => Value::Int(0),
            Self::Long => Value::Long(0),
            Self::Float => Value::Float(0.0),
            Self::Double => Value::Double(0.0),
        }
    }

    /// Parses `text` using the kind's standard textual representation.
    ///
    /// `char` takes the first character of `text` and ignores the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::EmptyChar`] when a `char` is requested from
    /// an empty string and [`ConversionError::Malformed`] when `text` does
    /// not parse as the kind.
    pub fn parse(self, text: &str) -> Result<Value, ConversionError> {
        match self {
            Self::Bool => parse_as(text, self, Value::Bool),
            Self::Char => text
                .chars()
                .next()
                .map(Value::Char)
                .ok_or(ConversionError::EmptyChar),
            Self::Byte => parse_as(text, self, Value::Byte),
            Self::Short => parse_as(text, self, Value::Short),
            Self::Int => parse_as(text, self, Value::Int),
            Self::Long => parse_as(text, self, Value::Long),
            Self::Float => parse_as(text, self, Value::Float),
            Self::Double => parse_as(text, self, Value::Double),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

fn parse_as<T>(
    text: &str,
    kind: PrimitiveKind,
    wrap: fn(T) -> Value,
) -> Result<Value, ConversionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse::<T>()
        .map(wrap)
        .map_err(|err| ConversionError::Malformed {
            text: text.to_owned(),
            kind,
            reason: err.to_string(),
        })
}

/// Converts `text` into a value for a member of type `target`.
///
/// Primitive and boxed members parse the text, [`SlotType::Text`] passes it
/// through, and absent text stays absent.
///
/// # Errors
///
/// Returns [`ConversionError::Unsupported`] for object and untyped members,
/// and any parse failure from [`PrimitiveKind::parse`].
///
/// # Examples
///
/// ```
/// use fixture_inject::{PrimitiveKind, SlotType, Value, convert};
///
/// let port = convert(Some("8080"), &SlotType::Primitive(PrimitiveKind::Int))?;
/// assert_eq!(port, Some(Value::Int(8080)));
/// assert_eq!(convert(None, &SlotType::Text)?, None);
/// # Ok::<(), fixture_inject::ConversionError>(())
/// ```
pub fn convert(text: Option<&str>, target: &SlotType) -> Result<Option<Value>, ConversionError> {
    let Some(text) = text else {
        return Ok(None);
    };
    match target {
        SlotType::Primitive(kind) | SlotType::Boxed(kind) => kind.parse(text).map(Some),
        SlotType::Text => Ok(Some(Value::Text(text.to_owned()))),
        SlotType::Object(_) | SlotType::Any => Err(ConversionError::Unsupported(target.to_string())),
    }
}
