//! Filter argument values.

use std::fmt;
use std::sync::Arc;

use crate::clip::ClipRef;

/// Kind tag of an [`ArgValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Int,
    Float,
    Bool,
    String,
    Clip,
    Array,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Int => "int",
            ArgKind::Float => "float",
            ArgKind::Bool => "bool",
            ArgKind::String => "string",
            ArgKind::Clip => "clip",
            ArgKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// A positional argument passed to a filter constructor.
#[derive(Clone)]
pub enum ArgValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(Arc<str>),
    Clip(ClipRef),
    Array(Vec<ArgValue>),
}

impl ArgValue {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        ArgValue::String(s.into())
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::String(_) => ArgKind::String,
            ArgValue::Clip(_) => ArgKind::Clip,
            ArgValue::Array(_) => ArgKind::Array,
        }
    }

    /// Int or float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ArgValue::Int(_) | ArgValue::Float(_))
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            ArgValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Float value; ints are widened.
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ArgValue::Float(v) => Some(v),
            ArgValue::Int(v) => Some(v as f32),
            _ => None,
        }
    }

    pub fn as_clip(&self) -> Option<&ClipRef> {
        match self {
            ArgValue::Clip(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "Int({v})"),
            ArgValue::Float(v) => write!(f, "Float({v})"),
            ArgValue::Bool(v) => write!(f, "Bool({v})"),
            ArgValue::String(s) => write!(f, "String({s:?})"),
            ArgValue::Clip(c) => {
                let desc = c.stream();
                write!(f, "Clip({}x{}, {} frames)", desc.width, desc.height, desc.num_frames)
            }
            ArgValue::Array(a) => f.debug_list().entries(a).finish(),
        }
    }
}

/// Clips compare by identity.
impl PartialEq for ArgValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArgValue::Int(a), ArgValue::Int(b)) => a == b,
            (ArgValue::Float(a), ArgValue::Float(b)) => a == b,
            (ArgValue::Bool(a), ArgValue::Bool(b)) => a == b,
            (ArgValue::String(a), ArgValue::String(b)) => a == b,
            (ArgValue::Clip(a), ArgValue::Clip(b)) => Arc::ptr_eq(a, b),
            (ArgValue::Array(a), ArgValue::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v)
    }
}

impl From<f32> for ArgValue {
    fn from(v: f32) -> Self {
        ArgValue::Float(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::String(v.into())
    }
}

impl From<ClipRef> for ArgValue {
    fn from(v: ClipRef) -> Self {
        ArgValue::Clip(v)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(v: Vec<ArgValue>) -> Self {
        ArgValue::Array(v)
    }
}
