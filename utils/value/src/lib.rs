//! # Value Module
//!
//! Dynamic values passed to components as props.
//!
//! Components receive their inputs as a [`Props`] mapping of [`Value`]s. Values mirror the
//! primitive kinds a host document understands (strings, numbers, booleans, `null`), plus
//! shared lists, nested mappings and event handler functions. Compound values are reference
//! counted so that cloning a mapping is a shallow copy: the clone shares its nested lists,
//! mappings and functions with the original.
//!
//! The crate also hosts the pure helpers used throughout the framework:
//!
//! - [`lookup`] resolves a dotted key path such as `foo.bar.baz`.
//! - [`interpolate`] expands `{{ key.path }}` placeholders inside a template string.
//! - [`is_type`] checks a value against a primitive type name such as `"string"`.

extern crate alloc;

mod handler;
mod lookup;
mod props;
#[cfg(feature = "serde")]
mod de;

pub use handler::{Event, EventHandler};
pub use lookup::{interpolate, lookup, lookup_value};
pub use props::Props;

use alloc::rc::Rc;
use core::{fmt, str::FromStr};

/// A dynamically typed prop value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The `null` value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// A string.
    String(String),
    /// A shared, ordered list of values.
    List(Rc<[Value]>),
    /// A shared nested mapping.
    Map(Rc<Props>),
    /// An event handler.
    Function(EventHandler),
}

impl Value {
    /// Creates a list value from any iterator of values.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a nested mapping value.
    #[must_use]
    pub fn map(props: Props) -> Self {
        Self::Map(Rc::new(props))
    }

    /// Creates a function value from an event callback.
    pub fn function(callback: impl Fn(&Event) + 'static) -> Self {
        Self::Function(EventHandler::new(callback))
    }

    /// Returns the primitive type tag of this value.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Null | Self::List(_) | Self::Map(_) => TypeTag::Object,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Function(_) => TypeTag::Function,
        }
    }

    /// Strict equality.
    ///
    /// Primitives compare by value, with `NaN` unequal to itself. Lists, mappings and
    /// functions compare by identity: two separately built but structurally equal
    /// mappings are *not* strictly equal, while a clone shares identity with its source.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Returns the string slice if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested mapping if this is a map value.
    #[must_use]
    pub fn as_map(&self) -> Option<&Props> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items if this is a list value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the handler if this is a function value.
    #[must_use]
    pub const fn as_function(&self) -> Option<&EventHandler> {
        match self {
            Self::Function(handler) => Some(handler),
            _ => None,
        }
    }

    /// Returns `true` for `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    // null entries print as empty strings inside a joined list
                    if !item.is_null() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Map(_) => f.write_str("[object Object]"),
            Self::Function(_) => f.write_str("function"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // shortest digits in exponent form, with an explicit `+` on positive exponents
        let exponent = format!("{n:e}");
        match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exponent),
        }
    } else {
        // `Display` for f64 already omits a trailing `.0` for integral values
        write!(f, "{n}")
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Props> for Value {
    fn from(value: Props) -> Self {
        Self::map(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value.into())
    }
}

impl From<EventHandler> for Value {
    fn from(value: EventHandler) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Primitive type tags, named after the host's `typeof` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `"string"`
    String,
    /// `"number"`
    Number,
    /// `"boolean"`
    Boolean,
    /// `"object"`, which also covers `null` and lists.
    Object,
    /// `"function"`
    Function,
    /// `"undefined"`, the tag of an absent value.
    Undefined,
}

impl TypeTag {
    /// Returns the tag for a possibly absent value.
    #[must_use]
    pub const fn of(value: Option<&Value>) -> Self {
        match value {
            Some(value) => value.type_tag(),
            None => Self::Undefined,
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Function => "function",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown type tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeTag(pub String);

impl fmt::Display for UnknownTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type tag `{}`", self.0)
    }
}

impl std::error::Error for UnknownTypeTag {}

impl FromStr for TypeTag {
    type Err = UnknownTypeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "function" => Ok(Self::Function),
            "undefined" => Ok(Self::Undefined),
            other => Err(UnknownTypeTag(other.to_owned())),
        }
    }
}

/// Checks whether `value` carries the primitive type named by `tag`.
///
/// Unknown tag names never match.
///
/// ```
/// use waypoint_value::{Value, is_type};
///
/// assert!(is_type(&Value::from("Hello"), "string"));
/// assert!(is_type(&Value::from(42), "number"));
/// assert!(!is_type(&Value::from("Hello"), "number"));
/// ```
#[must_use]
pub fn is_type(value: &Value, tag: &str) -> bool {
    value.type_tag().as_str() == tag
}

/// Builds a [`Props`] mapping from `key => value` pairs.
///
/// ```
/// use waypoint_value::props;
///
/// let props = props! { "title" => "Home", "count" => 3 };
/// assert_eq!(props.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut props = $crate::Props::new();
            $(
                props.insert($key, $value);
            )+
            props
        }
    };
}
