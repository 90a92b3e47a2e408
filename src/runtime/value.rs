use std::fmt;

use crate::syntax::id_table::IdKind;

/// Reserved words that evaluate to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    True,
    False,
    Undefined,
}

impl Reserved {
    /// Source spelling of the keyword.
    ///
    /// `TRUE` is upper case and `false` lower case; stored games compare
    /// against these exact words, so the casing must not be normalized.
    pub fn keyword(self) -> &'static str {
        match self {
            Reserved::True => "TRUE",
            Reserved::False => "false",
            Reserved::Undefined => "UNDEFINED",
        }
    }
}

/// Reference to an identifier's meaning: its role plus the resolved integer
/// (object or type index, or the identifier's own index for attributes and
/// enumerated words).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentRef {
    pub kind: IdKind,
    pub index: usize,
}

impl IdentRef {
    pub fn object(index: usize) -> Self {
        Self {
            kind: IdKind::Object,
            index,
        }
    }

    pub fn type_def(index: usize) -> Self {
        Self {
            kind: IdKind::Type,
            index,
        }
    }
}

/// An assignable slot: attribute binding `slot` on object `object`.
///
/// Kept as a pair of indices rather than a reference so it stays valid
/// while the store grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttrLocation {
    pub object: usize,
    pub slot: usize,
}

/// Runtime value produced by expression evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(i32),
    /// String built at run time and owned by the value.
    Str(String),
    /// Index into the literal pool of a text literal.
    Text(usize),
    /// Index into the literal pool of a quote literal.
    Quote(usize),
    /// Index into the vocabulary.
    Message(usize),
    Ident(IdentRef),
    Reserved(Reserved),
    /// Assignment target; only produced by lvalue evaluation and never
    /// stored in an attribute.
    AttrLocation(AttrLocation),
}

/// Targets accepted by value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertTarget {
    Numeric,
    Str,
    Message,
}

/// Whether an evaluation wants a readable value or an assignable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desired {
    Rvalue,
    Lvalue,
}

impl Value {
    pub const UNDEFINED: Value = Value::Reserved(Reserved::Undefined);

    pub fn from_bool(b: bool) -> Self {
        Value::Reserved(if b { Reserved::True } else { Reserved::False })
    }

    pub fn object(index: usize) -> Self {
        Value::Ident(IdentRef::object(index))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Reserved(Reserved::Undefined))
    }

    /// Conditions fail only on `false` and `UNDEFINED`.
    pub fn is_truthy(&self) -> bool {
        !matches!(
            self,
            Value::Reserved(Reserved::False) | Value::Reserved(Reserved::Undefined)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Numeric(_) => "numeric",
            Value::Str(_) => "string",
            Value::Text(_) => "text literal",
            Value::Quote(_) => "quote literal",
            Value::Message(_) => "message",
            Value::Ident(_) => "identifier",
            Value::Reserved(_) => "reserved word",
            Value::AttrLocation(_) => "attribute location",
        }
    }

    /// Same tagged variant, ignoring the payload.
    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Value {
    /// Debug-oriented rendering; pool-backed variants show their index.
    /// Use `Interpreter::display` for text meant for the player.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Text(i) => write!(f, "<text {}>", i),
            Value::Quote(i) => write!(f, "<quote {}>", i),
            Value::Message(i) => write!(f, "<message {}>", i),
            Value::Ident(id) => write!(f, "<{} {}>", id.kind, id.index),
            Value::Reserved(r) => f.write_str(r.keyword()),
            Value::AttrLocation(loc) => write!(f, "<slot {} of object {}>", loc.slot, loc.object),
        }
    }
}
