use std::{cmp::Reverse, collections::BinaryHeap};

/// Binary min-heap of strings backing the system object's sorter.
///
/// Strings order byte-wise, so equal-looking strings that differ only in
/// case still have one fixed order ("Lamp" before "lamp").
#[derive(Debug, Clone, Default)]
pub struct StringHeap {
    entries: BinaryHeap<Reverse<String>>,
}

impl StringHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(Reverse(text.into()));
    }

    /// Removes and returns the smallest string.
    pub fn pop(&mut self) -> Option<String> {
        self.entries.pop().map(|Reverse(text)| text)
    }

    pub fn peek(&self) -> Option<&str> {
        self.entries.peek().map(|Reverse(text)| text.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
