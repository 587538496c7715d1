//! Dynamic argument values
//!
//! A call descriptor carries its argument values as [`Value`]s so the codec
//! can render any of them into a filename token.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Flattened name -> value mapping used to build a cache key.
///
/// Ordering is irrelevant for the rendered key (names are sorted there);
/// a `BTreeMap` keeps iteration deterministic everywhere else.
pub type ArgumentMap = BTreeMap<String, Value>;

/// An argument value as seen by the codec
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A function or other callable, identified by its name
    Callable(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Map(ArgumentMap),
    /// Any other value, carried as its generic string rendering
    Opaque(String),
}

impl Value {
    /// Create a callable value from its name
    pub fn callable(name: impl Into<String>) -> Self {
        Value::Callable(name.into())
    }

    /// Create an opaque value from anything displayable
    pub fn opaque(value: impl fmt::Display) -> Self {
        Value::Opaque(value.to_string())
    }

    /// Number of elements for container values
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Shortest float rendering that always shows a decimal part (`3.0`, `2.5`).
pub(crate) fn float_repr(x: f64) -> String {
    if !x.is_finite() {
        return if x.is_nan() {
            "nan".to_string()
        } else if x > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let s = format!("{}", x);
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value], open: &str, close: &str) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item.fmt_nested(f)?;
    }
    if open == "(" && items.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, "{}", close)
}

impl Value {
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "'{}'", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", float_repr(*x)),
            Value::Str(s) | Value::Callable(s) | Value::Opaque(s) => write!(f, "{}", s),
            Value::List(items) => write_seq(f, items, "[", "]"),
            Value::Tuple(items) => write_seq(f, items, "(", ")"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': ", k)?;
                    v.fmt_nested(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<ArgumentMap> for Value {
    fn from(map: ArgumentMap) -> Self {
        Value::Map(map)
    }
}
