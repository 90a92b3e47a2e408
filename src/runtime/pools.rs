//! Interned pools referenced from runtime values by 1-based index.

/// Text and quote literals. Every occurrence in the source gets its own
/// slot; nothing is deduplicated.
#[derive(Debug, Clone, Default)]
pub struct LiteralPool {
    entries: Vec<String>,
}

impl LiteralPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) -> usize {
        self.entries.push(text.to_string());
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Message names, deduplicated by exact match.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: &str) -> usize {
        match self.find(message) {
            Some(index) => index,
            None => {
                self.entries.push(message.to_string());
                self.entries.len()
            }
        }
    }

    pub fn find(&self, message: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry == message)
            .map(|i| i + 1)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
