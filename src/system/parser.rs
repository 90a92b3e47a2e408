use std::collections::VecDeque;

use super::word_list::{WordEntry, WordList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListKind {
    Verbs,
    Nouns,
}

/// Matches a normalized player command against the registered verb and
/// noun phrases.
///
/// Phrases are tried longest first, each hit is blanked out so shorter
/// phrases cannot match inside it, and the matched objects are handed out
/// in sentence order.
#[derive(Debug, Clone, Default)]
pub struct SentenceParser {
    verbs: WordList,
    nouns: WordList,
    present: Vec<usize>,
    command: String,
    matches: VecDeque<usize>,
}

impl SentenceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_lists(&mut self) {
        self.verbs.clear();
        self.nouns.clear();
    }

    pub fn add_word(&mut self, kind: WordListKind, word: &str, object: usize) {
        if word.is_empty() {
            return;
        }
        match kind {
            WordListKind::Verbs => self.verbs.insert(word, object),
            WordListKind::Nouns => self.nouns.insert(word, object),
        }
    }

    pub fn list(&self, kind: WordListKind) -> &WordList {
        match kind {
            WordListKind::Verbs => &self.verbs,
            WordListKind::Nouns => &self.nouns,
        }
    }

    /// Starts a new proximity check.
    pub fn roll_call(&mut self) {
        self.present.clear();
    }

    pub fn mark_present(&mut self, object: usize) {
        if !self.present.contains(&object) {
            self.present.push(object);
        }
    }

    fn is_present(&self, object: usize) -> bool {
        self.present.is_empty() || self.present.contains(&object)
    }

    pub fn set_command(&mut self, command: String) {
        self.command = command;
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Parses the stored command. Returns whether anything matched.
    pub fn parse(&mut self) -> bool {
        let mut work = format!(" {} ", self.command);
        let mut found = Vec::new();

        scan(self.verbs.iter(), &mut work, &mut found);
        // present objects get first claim on a shared noun
        scan(
            self.nouns.iter().filter(|entry| self.is_present(entry.object)),
            &mut work,
            &mut found,
        );
        scan(self.nouns.iter(), &mut work, &mut found);

        found.sort_by_key(|&(pos, _)| pos);
        self.matches = found.into_iter().map(|(_, object)| object).collect();
        log::debug!("parsed \"{}\" into objects {:?}", self.command, self.matches);
        !self.matches.is_empty()
    }

    pub fn next_object(&mut self) -> Option<usize> {
        self.matches.pop_front()
    }

    /// Object owning the noun phrase, preferring present objects.
    pub fn which_object(&self, phrase: &str) -> Option<usize> {
        let mut candidates = self.nouns.objects_for(phrase).peekable();
        let first = *candidates.peek()?;
        Some(
            candidates
                .find(|&object| self.is_present(object))
                .unwrap_or(first),
        )
    }
}

fn scan<'a>(
    entries: impl Iterator<Item = &'a WordEntry>,
    work: &mut String,
    found: &mut Vec<(usize, usize)>,
) {
    for entry in entries {
        let needle = format!(" {} ", entry.word);
        while let Some(pos) = work.find(&needle) {
            found.push((pos, entry.object));
            let start = pos + 1;
            let end = start + entry.word.len();
            work.replace_range(start..end, &"#".repeat(end - start));
        }
    }
}
