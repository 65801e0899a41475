//! Function table: named filter constructors with typed signatures.
//!
//! A name may be registered several times with different signatures; calls
//! try the overloads in registration order and use the first one whose
//! signature binds. Variadic parameters always bind to an
//! [`ArgValue::Array`], even when they collect a single value.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::env::Environment;
use crate::error::{GraphError, Result};
use crate::value::ArgValue;

/// Accepted argument kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Clip,
    Int,
    /// Accepts ints, converting them.
    Float,
    Bool,
    String,
    Any,
}

impl ParamKind {
    fn accepts(self, value: &ArgValue) -> bool {
        match self {
            ParamKind::Clip => matches!(value, ArgValue::Clip(_)),
            ParamKind::Int => matches!(value, ArgValue::Int(_)),
            ParamKind::Float => value.is_numeric(),
            ParamKind::Bool => matches!(value, ArgValue::Bool(_)),
            ParamKind::String => matches!(value, ArgValue::String(_)),
            ParamKind::Any => true,
        }
    }

    fn coerce(self, value: &ArgValue) -> ArgValue {
        match (self, value) {
            (ParamKind::Float, ArgValue::Int(v)) => ArgValue::Float(*v as f32),
            _ => value.clone(),
        }
    }

    fn code(self) -> char {
        match self {
            ParamKind::Clip => 'c',
            ParamKind::Int => 'i',
            ParamKind::Float => 'f',
            ParamKind::Bool => 'b',
            ParamKind::String => 's',
            ParamKind::Any => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    OneOrMore,
    ZeroOrMore,
}

/// One positional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub kind: ParamKind,
    pub arity: Arity,
}

impl Param {
    pub const fn one(kind: ParamKind) -> Self {
        Self {
            kind,
            arity: Arity::One,
        }
    }

    pub const fn one_or_more(kind: ParamKind) -> Self {
        Self {
            kind,
            arity: Arity::OneOrMore,
        }
    }

    pub const fn zero_or_more(kind: ParamKind) -> Self {
        Self {
            kind,
            arity: Arity::ZeroOrMore,
        }
    }
}

/// Ordered parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub Vec<Param>);

impl Signature {
    pub fn new(params: impl Into<Vec<Param>>) -> Self {
        Self(params.into())
    }

    /// Bind positional `args`, or `None` if they don't fit.
    pub fn bind(&self, args: &[ArgValue]) -> Option<Vec<ArgValue>> {
        let mut bound = Vec::with_capacity(self.0.len());
        let mut i = 0;
        for param in &self.0 {
            match param.arity {
                Arity::One => {
                    let arg = args.get(i)?;
                    if !param.kind.accepts(arg) {
                        return None;
                    }
                    bound.push(param.kind.coerce(arg));
                    i += 1;
                }
                Arity::OneOrMore | Arity::ZeroOrMore => {
                    let mut rest = Vec::new();
                    while let Some(arg) = args.get(i).filter(|a| param.kind.accepts(a)) {
                        rest.push(param.kind.coerce(arg));
                        i += 1;
                    }
                    if param.arity == Arity::OneOrMore && rest.is_empty() {
                        return None;
                    }
                    bound.push(ArgValue::Array(rest));
                }
            }
        }
        (i == args.len()).then_some(bound)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for param in &self.0 {
            let suffix = match param.arity {
                Arity::One => "",
                Arity::OneOrMore => "+",
                Arity::ZeroOrMore => "*",
            };
            write!(f, "{}{}", param.kind.code(), suffix)?;
        }
        Ok(())
    }
}

/// Constructor called with bound arguments.
pub type CreateFn = Arc<dyn Fn(&[ArgValue], &dyn Environment) -> Result<ArgValue> + Send + Sync>;

/// A registered function overload.
#[derive(Clone)]
pub struct FunctionEntry {
    pub name: String,
    pub signature: Signature,
    create: CreateFn,
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

/// Registry of function overloads.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    entries: Vec<FunctionEntry>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload.
    pub fn add<F>(&mut self, name: impl Into<String>, signature: Signature, create: F)
    where
        F: Fn(&[ArgValue], &dyn Environment) -> Result<ArgValue> + Send + Sync + 'static,
    {
        self.entries.push(FunctionEntry {
            name: name.into(),
            signature,
            create: Arc::new(create),
        });
    }

    /// All overloads registered under `name` (case-insensitive).
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FunctionEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.overloads(name).next().is_some()
    }

    /// Number of registered overloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bind `args` to the first fitting overload of `name` and call it.
    pub fn call(&self, name: &str, args: &[ArgValue], env: &dyn Environment) -> Result<ArgValue> {
        let mut found = false;
        for entry in self.overloads(name) {
            found = true;
            if let Some(bound) = entry.signature.bind(args) {
                trace!(function = %entry.name, signature = %entry.signature, "bound overload");
                return (entry.create)(&bound, env);
            }
        }
        if !found {
            return Err(GraphError::UnknownFunction(name.to_string()));
        }
        let kinds: Vec<String> = args.iter().map(|a| a.kind().to_string()).collect();
        Err(GraphError::invalid_arguments(
            name,
            format!("no overload accepts ({})", kinds.join(", ")),
        ))
    }
}
