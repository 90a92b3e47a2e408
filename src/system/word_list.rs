/// A vocabulary word and the object that registered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub object: usize,
}

/// Word list kept in descending order of word length, so that a scan
/// meets longer phrases ("brass lamp") before their parts ("lamp").
///
/// Words of equal length keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    entries: Vec<WordEntry>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, object: usize) {
        let word = word.into();
        let len = word.chars().count();
        let pos = self
            .entries
            .iter()
            .position(|entry| entry.word.chars().count() < len)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, WordEntry { word, object });
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Objects that registered exactly `word`, in list order.
    pub fn objects_for<'a>(&'a self, word: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.word == word)
            .map(|entry| entry.object)
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
