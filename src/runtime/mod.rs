//! Runtime core types and the interpreter.
//!
//! # Sharing
//! Attribute expressions and method bodies sit behind `Rc` so a handler can
//! keep running while the store it came from is mutated. Trees only point
//! downwards, and objects refer to each other by index, never by `Rc`, so
//! no reference cycle can form.
pub mod console;
pub mod interpreter;
pub mod pools;
pub mod store;
pub mod value;
