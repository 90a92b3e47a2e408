use std::{cmp::Ordering, fmt};

/// Semantic role of an identifier.
///
/// Every identifier starts out `Undefined`; the first successful
/// classification fixes its role for the rest of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdKind {
    #[default]
    Undefined,
    Type,
    Object,
    Attribute,
    Enumerate,
}

impl IdKind {
    pub fn label(self) -> &'static str {
        match self {
            IdKind::Undefined => "undefined",
            IdKind::Type => "type",
            IdKind::Object => "object",
            IdKind::Attribute => "attribute",
            IdKind::Enumerate => "keyword",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRecord {
    pub name: String,
    /// Stable 1-based index handed out by [`IdTable::register`].
    pub index: usize,
    pub kind: IdKind,
    /// Dense index into the role's collection, cached on classification.
    pub integer: usize,
}

const LETTER_BUCKETS: usize = 26;
const CATCH_ALL_BUCKET: usize = LETTER_BUCKETS;

/// Registry mapping source names to stable integer ids.
///
/// Names are bucketed by their uppercased first letter, with one catch-all
/// bucket for names that do not start with an ASCII letter. Each bucket is
/// kept in ascending name order by ordered linear insertion, so a lookup
/// can stop at the first name that sorts after the probe.
#[derive(Debug, Clone)]
pub struct IdTable {
    records: Vec<IdRecord>,
    buckets: Vec<Vec<usize>>,
}

impl Default for IdTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IdTable {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            buckets: vec![Vec::new(); LETTER_BUCKETS + 1],
        }
    }

    fn bucket_of(name: &str) -> usize {
        match name.bytes().next() {
            Some(b) if b.is_ascii_alphabetic() => (b.to_ascii_uppercase() - b'A') as usize,
            _ => CATCH_ALL_BUCKET,
        }
    }

    /// Scans a bucket for `name`, returning either the existing id or the
    /// insertion point that keeps the bucket sorted.
    fn probe(&self, bucket: usize, name: &str) -> Result<usize, usize> {
        for (pos, &id) in self.buckets[bucket].iter().enumerate() {
            match self.records[id - 1].name.as_str().cmp(name) {
                Ordering::Less => continue,
                Ordering::Equal => return Ok(id),
                Ordering::Greater => return Err(pos),
            }
        }
        Err(self.buckets[bucket].len())
    }

    /// Returns the id for `name`, creating a new undefined record on first
    /// sight. Ids start at 1.
    pub fn register(&mut self, name: &str) -> usize {
        let bucket = Self::bucket_of(name);
        match self.probe(bucket, name) {
            Ok(id) => id,
            Err(pos) => {
                let id = self.records.len() + 1;
                self.records.push(IdRecord {
                    name: name.to_string(),
                    index: id,
                    kind: IdKind::Undefined,
                    integer: 0,
                });
                self.buckets[bucket].insert(pos, id);
                id
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.probe(Self::bucket_of(name), name).ok()
    }

    pub fn get(&self, id: usize) -> Option<&IdRecord> {
        id.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut IdRecord> {
        id.checked_sub(1).and_then(|i| self.records.get_mut(i))
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.get(id).map(|record| record.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdRecord> {
        self.records.iter()
    }

    /// Names in one bucket, in stored order. Bucket 26 holds non-letters.
    pub fn bucket_names(&self, bucket: usize) -> Vec<&str> {
        self.buckets
            .get(bucket)
            .map(|ids| ids.iter().map(|&id| self.records[id - 1].name.as_str()).collect())
            .unwrap_or_default()
    }
}
