//! Declared member types and the field types that can hold injected values.

use std::fmt;
use std::sync::Arc;

use crate::convert::PrimitiveKind;
use crate::error::AssignError;
use crate::value::{TypeKey, Value};

/// Declared type of an injectable member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotType {
    /// A plain primitive field such as `i32`; cannot hold null.
    Primitive(PrimitiveKind),
    /// A boxed primitive field such as `Option<i32>`.
    Boxed(PrimitiveKind),
    /// A `String` or `Option<String>` field.
    Text,
    /// An `Arc<T>` or `Option<Arc<T>>` field, keyed by `T`.
    Object(TypeKey),
    /// A [`Value`] or `Option<Value>` field; accepts anything.
    Any,
}

impl SlotType {
    /// Whether the member is a plain primitive.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Whether the member is a primitive or a boxed primitive.
    #[must_use]
    pub const fn is_primitive_or_boxed(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Boxed(_))
    }

    /// Boxed counterpart of a primitive member type.
    #[must_use]
    pub const fn boxed_counterpart(&self) -> Option<Self> {
        match self {
            Self::Primitive(kind) => Some(Self::Boxed(*kind)),
            _ => None,
        }
    }

    /// Primitive counterpart of a boxed member type.
    #[must_use]
    pub const fn primitive_counterpart(&self) -> Option<Self> {
        match self {
            Self::Boxed(kind) => Some(Self::Primitive(*kind)),
            _ => None,
        }
    }

    /// Whether a member of this type may hold `value`.
    ///
    /// A primitive member takes exactly the values its boxed counterpart
    /// takes. Objects are assignable through any of their registered views.
    #[must_use]
    pub fn accepts_runtime_type(&self, value: &Value) -> bool {
        match self {
            Self::Primitive(_) => self
                .boxed_counterpart()
                .is_some_and(|boxed| boxed.accepts_runtime_type(value)),
            Self::Boxed(kind) => value.primitive_kind() == Some(*kind),
            Self::Text => matches!(value, Value::Text(_)),
            Self::Object(key) => matches!(value, Value::Object(object) if object.is_assignable_to(key)),
            Self::Any => true,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Boxed(kind) => write!(f, "Option<{kind}>"),
            Self::Text => f.write_str("String"),
            Self::Object(key) => write!(f, "Arc<{key}>"),
            Self::Any => f.write_str("Value"),
        }
    }
}

/// A field type that can receive injected values.
///
/// `#[derive(Injectable)]` requires every field that is not marked
/// `#[injectable(skip)]` or `#[injectable(parent)]` to implement this trait.
pub trait Slot: Sized {
    /// Whether the field can hold null.
    ///
    /// `String` and `Option<String>` share a [`SlotType`], so null
    /// acceptance is recorded separately in the descriptor.
    const NULLABLE: bool;

    /// Declared type reported for members of this field type.
    fn slot_type() -> SlotType;

    /// Builds the field value from a resolved injection value.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::NullNotAllowed`] when `value` is `None` for a
    /// non-nullable field and [`AssignError::TypeMismatch`] when the value's
    /// type does not fit.
    fn from_value(value: Option<Value>) -> Result<Self, AssignError>;
}

macro_rules! primitive_slots {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Slot for $ty {
                const NULLABLE: bool = false;

                fn slot_type() -> SlotType {
                    SlotType::Primitive(PrimitiveKind::$kind)
                }

                fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
                    match value {
                        Some(Value::$kind(inner)) => Ok(inner),
                        Some(other) => Err(AssignError::mismatch(&Self::slot_type(), &other)),
                        None => Err(AssignError::null(&Self::slot_type())),
                    }
                }
            }

            impl Slot for Option<$ty> {
                const NULLABLE: bool = true;

                fn slot_type() -> SlotType {
                    SlotType::Boxed(PrimitiveKind::$kind)
                }

                fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
                    match value {
                        Some(Value::$kind(inner)) => Ok(Some(inner)),
                        Some(other) => Err(AssignError::mismatch(&Self::slot_type(), &other)),
                        None => Ok(None),
                    }
                }
            }
        )*
    };
}

primitive_slots!(
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
);

impl Slot for Option<String> {
    const NULLABLE: bool = true;

    fn slot_type() -> SlotType {
        SlotType::Text
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        match value {
            Some(Value::Text(text)) => Ok(Some(text)),
            Some(other) => Err(AssignError::mismatch(&SlotType::Text, &other)),
            None => Ok(None),
        }
    }
}

impl Slot for String {
    const NULLABLE: bool = false;

    fn slot_type() -> SlotType {
        SlotType::Text
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        Option::<Self>::from_value(value)?.ok_or_else(|| AssignError::null(&SlotType::Text))
    }
}

impl<T: ?Sized + 'static> Slot for Option<Arc<T>> {
    const NULLABLE: bool = true;

    fn slot_type() -> SlotType {
        SlotType::Object(TypeKey::of::<T>())
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        match value {
            None => Ok(None),
            Some(Value::Object(object)) => match object.view::<T>() {
                Some(shared) => Ok(Some(shared)),
                None => Err(AssignError::mismatch(
                    &Self::slot_type(),
                    &Value::Object(object),
                )),
            },
            Some(other) => Err(AssignError::mismatch(&Self::slot_type(), &other)),
        }
    }
}

impl<T: ?Sized + 'static> Slot for Arc<T> {
    const NULLABLE: bool = false;

    fn slot_type() -> SlotType {
        Option::<Self>::slot_type()
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        Option::<Self>::from_value(value)?.ok_or_else(|| AssignError::null(&Self::slot_type()))
    }
}

impl Slot for Option<Value> {
    const NULLABLE: bool = true;

    fn slot_type() -> SlotType {
        SlotType::Any
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        Ok(value)
    }
}

impl Slot for Value {
    const NULLABLE: bool = false;

    fn slot_type() -> SlotType {
        SlotType::Any
    }

    fn from_value(value: Option<Value>) -> Result<Self, AssignError> {
        value.ok_or_else(|| AssignError::null(&SlotType::Any))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for slot compatibility and field conversion.

    use super::*;
    use crate::value::Object;
    use rstest::rstest;

    #[rstest]
    fn primitive_and_boxed_counterparts_are_bijective() {
        for kind in PrimitiveKind::ALL {
            let primitive = SlotType::Primitive(kind);
            let boxed = primitive.boxed_counterpart();
            assert_eq!(boxed, Some(SlotType::Boxed(kind)));
            assert_eq!(boxed.and_then(|b| b.primitive_counterpart()), Some(primitive));
        }
        assert_eq!(SlotType::Text.boxed_counterpart(), None);
        assert_eq!(SlotType::Any.primitive_counterpart(), None);
    }

    #[rstest]
    #[case::primitive_int(SlotType::Primitive(PrimitiveKind::Int), Value::Int(1), true)]
    #[case::primitive_long(SlotType::Primitive(PrimitiveKind::Int), Value::Long(1), false)]
    #[case::boxed_int(SlotType::Boxed(PrimitiveKind::Int), Value::Int(1), true)]
    #[case::text(SlotType::Text, Value::from("a"), true)]
    #[case::text_vs_int(SlotType::Text, Value::Int(1), false)]
    #[case::any(SlotType::Any, Value::Double(1.0), true)]
    fn runtime_compatibility(
        #[case] slot: SlotType,
        #[case] value: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(slot.accepts_runtime_type(&value), expected);
    }

    #[rstest]
    fn primitive_fields_reject_null() {
        assert_eq!(
            i32::from_value(None),
            Err(AssignError::NullNotAllowed("i32".to_owned()))
        );
        assert_eq!(Option::<i32>::from_value(None), Ok(None));
    }

    #[rstest]
    fn nullability_follows_the_option_wrapper() {
        let flags = [
            String::NULLABLE,
            Option::<String>::NULLABLE,
            Arc::<u32>::NULLABLE,
            Option::<Arc<u32>>::NULLABLE,
            Value::NULLABLE,
            Option::<Value>::NULLABLE,
            i64::NULLABLE,
            Option::<i64>::NULLABLE,
        ];
        assert_eq!(flags, [false, true, false, true, false, true, false, true]);
        assert_eq!(String::slot_type(), Option::<String>::slot_type());
    }

    #[rstest]
    fn object_fields_use_views() {
        let shared = Arc::new(7_u16);
        let object = Object::new(Arc::clone(&shared));
        let field = Option::<Arc<u16>>::from_value(Some(Value::Object(object)));
        assert_eq!(field.ok().flatten().as_deref(), Some(&7));
    }

    #[rstest]
    fn mismatched_object_is_reported() {
        let object = Object::new(Arc::new(7_u16));
        let err = Arc::<u32>::from_value(Some(Value::Object(object)));
        assert!(matches!(err, Err(AssignError::TypeMismatch { .. })));
    }

    #[rstest]
    fn slot_types_render_like_rust_types() {
        assert_eq!(SlotType::Boxed(PrimitiveKind::Short).to_string(), "Option<i16>");
        assert_eq!(SlotType::Text.to_string(), "String");
    }
}
