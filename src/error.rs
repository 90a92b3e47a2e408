//! Error types for the Archetype runtime.
//!
//! Dispatch misses and coercion failures are not errors: they surface as
//! `Option`/`bool` outcomes. What remains here are the conditions a caller
//! may want to report: classification conflicts, refused store operations,
//! and save-state integrity failures.

use thiserror::Error;

use crate::syntax::id_table::IdKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchetypeError {
    #[error("identifier type conflict: \"{name}\" already declared as {existing}, not {requested}")]
    ClassificationConflict {
        name: String,
        existing: IdKind,
        requested: IdKind,
    },

    #[error("attempt to classify unregistered identifier {0}")]
    UnknownIdentifier(usize),

    #[error("no type with index {0}")]
    UnknownType(usize),

    #[error("no object with index {0}")]
    UnknownObject(usize),

    #[error("cannot destroy static object {0}")]
    StaticObject(usize),

    #[error("cannot destroy object {index}: only the most recent object ({tail}) may be destroyed")]
    NotTail { index: usize, tail: usize },

    #[error("cannot destroy object {0} while it is handling a message")]
    InFlight(usize),

    #[error("attempt to assign to a non-attribute target")]
    NotAnLvalue,

    #[error("no object named \"main\"")]
    NoMainObject,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("save-state timestamp {found:#010x} does not match program timestamp {expected:#010x}")]
    TimestampMismatch { expected: u32, found: u32 },

    #[error("save-state stream ended unexpectedly")]
    Truncated,

    #[error("save-state string length prefixes disagree ({first} vs {second})")]
    LengthMismatch { first: u8, second: u8 },

    #[error("unexpected marker byte {0:#04x} in save-state stream")]
    BadMarker(u8),

    #[error("unknown {what} tag {tag} in save-state stream")]
    BadTag { what: &'static str, tag: u8 },

    #[error("save-state holds {found} static objects, program has {expected}")]
    StaticCount { expected: usize, found: usize },

    #[error("save-state object refers to unknown type {0}")]
    UnknownParent(usize),

    #[error("object {0} is handling a message and would not survive the load")]
    InFlight(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ArchetypeResult<T> = Result<T, ArchetypeError>;
