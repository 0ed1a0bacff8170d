//! Runtime values handed to the injector.
//!
//! A [`Value`] is the type-erased form of whatever a fixture produced: one of
//! the eight primitive kinds, text, a shared object, or a provider that yields
//! the real value on demand. Null is modelled as `Option<Value>::None`
//! throughout the crate.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use crate::convert::PrimitiveKind;
use crate::error::ProviderError;

/// Identity of a Rust type, sized or not.
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully-qualified type name, for diagnostics only.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One type an [`Object`] can be assigned as.
///
/// `handle` always holds an `Arc<U>` where `key == TypeKey::of::<U>()`.
#[derive(Clone)]
struct View {
    key: TypeKey,
    handle: Rc<dyn Any>,
}

impl View {
    fn of<U: ?Sized + 'static>(shared: Arc<U>) -> Self {
        Self {
            key: TypeKey::of::<U>(),
            handle: Rc::new(shared),
        }
    }

    fn get<U: ?Sized + 'static>(&self) -> Option<Arc<U>> {
        self.handle.downcast_ref::<Arc<U>>().map(Arc::clone)
    }
}

/// A shared object together with the types it may be assigned as.
///
/// The concrete type is always assignable. Trait objects and other
/// supertypes are registered explicitly with [`Object::with_view`], which
/// stands in for interface compatibility.
///
/// ```
/// use std::sync::Arc;
/// use fixture_inject::Object;
///
/// trait Store {}
/// struct MemoryStore;
/// impl Store for MemoryStore {}
///
/// let store = Arc::new(MemoryStore);
/// let object = Object::new(Arc::clone(&store)).with_view(store as Arc<dyn Store>);
/// assert!(object.view::<dyn Store>().is_some());
/// assert!(object.view::<MemoryStore>().is_some());
/// ```
#[derive(Clone)]
pub struct Object {
    concrete: View,
    supertypes: Vec<View>,
}

impl Object {
    /// Wraps a shared value whose only assignable type is `T` itself.
    #[must_use]
    pub fn new<T: Any>(value: Arc<T>) -> Self {
        Self {
            concrete: View::of(value),
            supertypes: Vec::new(),
        }
    }

    /// Registers `view` as an additional type this object is assignable as.
    ///
    /// The view should point at the same allocation as the concrete value,
    /// typically obtained by coercing a clone of the original `Arc`.
    #[must_use]
    pub fn with_view<U: ?Sized + 'static>(mut self, view: Arc<U>) -> Self {
        self.supertypes.push(View::of(view));
        self
    }

    /// Runtime type of the wrapped value.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.concrete.key
    }

    /// Whether the object may be assigned to a member holding `key`.
    #[must_use]
    pub fn is_assignable_to(&self, key: &TypeKey) -> bool {
        self.views().any(|view| view.key == *key)
    }

    /// Returns the object as an `Arc<U>` if `U` is one of its types.
    #[must_use]
    pub fn view<U: ?Sized + 'static>(&self) -> Option<Arc<U>> {
        let wanted = TypeKey::of::<U>();
        self.views()
            .find(|view| view.key == wanted)
            .and_then(|view| view.get::<U>())
    }

    fn views(&self) -> impl Iterator<Item = &View> {
        std::iter::once(&self.concrete).chain(&self.supertypes)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.concrete.handle, &other.concrete.handle)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type", &self.concrete.key.name())
            .field(
                "supertypes",
                &self
                    .supertypes
                    .iter()
                    .map(|view| view.key.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Capability of holders that produce the value to inject on demand.
///
/// Fixture components implement this so callers can pass the fixture itself
/// instead of extracting its value first. The provider is invoked once per
/// injection call.
pub trait ValueProvider {
    /// Produces the value to inject, or `None` for null.
    ///
    /// # Errors
    ///
    /// Returns the provider's own failure; it is surfaced unchanged as
    /// [`crate::InjectError::Provider`].
    fn provide(&self) -> Result<Option<Value>, ProviderError>;
}

/// Shared handle to a [`ValueProvider`].
#[derive(Clone)]
pub struct Provider(Rc<dyn ValueProvider>);

impl Provider {
    /// Wraps `provider` in a shared handle.
    pub fn new(provider: impl ValueProvider + 'static) -> Self {
        Self(Rc::new(provider))
    }

    /// Invokes the wrapped provider.
    ///
    /// # Errors
    ///
    /// Propagates the provider's failure.
    pub fn provide(&self) -> Result<Option<Value>, ProviderError> {
        self.0.provide()
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Provider(..)")
    }
}

impl PartialEq for Provider {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A type-erased, non-null value.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// Boxed `bool`.
    Bool(bool),
    /// Boxed `char`.
    Char(char),
    /// Boxed `i8`.
    Byte(i8),
    /// Boxed `i16`.
    Short(i16),
    /// Boxed `i32`.
    Int(i32),
    /// Boxed `i64`.
    Long(i64),
    /// Boxed `f32`.
    Float(f32),
    /// Boxed `f64`.
    Double(f64),
    /// Owned text.
    Text(String),
    /// A shared object.
    Object(Object),
    /// A holder that yields the value to inject when asked.
    Provided(Provider),
}

impl Value {
    /// Wraps a shared value as [`Value::Object`].
    #[must_use]
    pub fn object<T: Any>(value: Arc<T>) -> Self {
        Self::Object(Object::new(value))
    }

    /// Wraps a value provider as [`Value::Provided`].
    pub fn provided(provider: impl ValueProvider + 'static) -> Self {
        Self::Provided(Provider::new(provider))
    }

    /// Primitive kind of a boxed value, or `None` for any other value.
    #[must_use]
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Bool(_) => Some(PrimitiveKind::Bool),
            Self::Char(_) => Some(PrimitiveKind::Char),
            Self::Byte(_) => Some(PrimitiveKind::Byte),
            Self::Short(_) => Some(PrimitiveKind::Short),
            Self::Int(_) => Some(PrimitiveKind::Int),
            Self::Long(_) => Some(PrimitiveKind::Long),
            Self::Float(_) => Some(PrimitiveKind::Float),
            Self::Double(_) => Some(PrimitiveKind::Double),
            Self::Text(_) | Self::Object(_) | Self::Provided(_) => None,
        }
    }

    /// Borrows the text of a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Name of the value's runtime type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Text(_) => "String".to_owned(),
            Self::Object(object) => object.type_key().name().to_owned(),
            Self::Provided(_) => "provider".to_owned(),
            other => other
                .primitive_kind()
                .map_or_else(|| "value".to_owned(), |kind| kind.to_string()),
        }
    }

    /// Short description used in error messages, e.g. `i32 value 5`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Object(_) | Self::Provided(_) => format!("{} value", self.type_name()),
            Self::Text(text) => format!("String value {text:?}"),
            _ => format!("{} value {self}", self.type_name()),
        }
    }
}

/// Renders boxed values in the textual form [`PrimitiveKind::parse`] reads.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(inner) => inner.fmt(f),
            Self::Char(inner) => inner.fmt(f),
            Self::Byte(inner) => inner.fmt(f),
            Self::Short(inner) => inner.fmt(f),
            Self::Int(inner) => inner.fmt(f),
            Self::Long(inner) => inner.fmt(f),
            Self::Float(inner) => inner.fmt(f),
            Self::Double(inner) => inner.fmt(f),
            Self::Text(text) => f.write_str(text),
            Self::Object(object) => write!(f, "<{}>", object.type_key()),
            Self::Provided(_) => f.write_str("<provider>"),
        }
    }
}

/// Conversion of caller-supplied values into an optional [`Value`].
///
/// `None` results are injected as null.
pub trait IntoValue {
    /// Performs the conversion.
    fn into_value(self) -> Option<Value>;
}

macro_rules! primitive_values {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Option<Value> {
                    Some(Value::$variant(self))
                }
            }

            impl IntoValue for Option<$ty> {
                fn into_value(self) -> Option<Value> {
                    self.map(Value::$variant)
                }
            }
        )*
    };
}

primitive_values!(
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
);

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoValue for Option<Value> {
    fn into_value(self) -> Option<Value> {
        self
    }
}

impl IntoValue for String {
    fn into_value(self) -> Option<Value> {
        Some(Value::Text(self))
    }
}

impl IntoValue for Option<String> {
    fn into_value(self) -> Option<Value> {
        self.map(Value::Text)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl IntoValue for Object {
    fn into_value(self) -> Option<Value> {
        Some(Value::Object(self))
    }
}

impl<T: Any> IntoValue for Arc<T> {
    fn into_value(self) -> Option<Value> {
        Some(Value::object(self))
    }
}

impl<T: Any> IntoValue for Option<Arc<T>> {
    fn into_value(self) -> Option<Value> {
        self.map(Value::object)
    }
}
