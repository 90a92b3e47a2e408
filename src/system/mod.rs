//! Data structures behind the system object (object 0) and its service
//! selector. The interpreter side lives in
//! `runtime::interpreter::system_object`.

pub mod heap;
pub mod normalize;
pub mod parser;
pub mod service;
pub mod word_list;

use heap::StringHeap;
use parser::SentenceParser;
use service::Service;

/// Everything the system object keeps between calls.
///
/// The heap and word lists belong to whichever service is armed; nothing
/// else touches them while a session is open.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub service: Service,
    pub heap: StringHeap,
    pub parser: SentenceParser,
    pub abbreviate: usize,
}

impl SystemState {
    pub fn new(abbreviate: usize) -> Self {
        Self {
            abbreviate,
            ..Self::default()
        }
    }
}
