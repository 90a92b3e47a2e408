use std::{
    collections::HashMap,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// Where named save states are kept.
pub trait SaveStorage {
    fn write_slot(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()>;

    /// Bytes saved under `slot`, or `None` if nothing was saved there.
    fn read_slot(&mut self, slot: &str) -> io::Result<Option<Vec<u8>>>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: &str) -> Option<&[u8]> {
        self.slots.get(slot).map(Vec::as_slice)
    }
}

impl SaveStorage for MemoryStorage {
    fn write_slot(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()> {
        self.slots.insert(slot.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read_slot(&mut self, slot: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(slot).cloned())
    }
}

/// One `<slot>.sav` file per slot under a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// File backing `slot`. Characters other than letters, digits, `-` and
    /// `_` are replaced so a slot name cannot leave the directory.
    pub fn path_for(&self, slot: &str) -> PathBuf {
        let mut name: String = slot
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() {
            name.push_str("default");
        }
        self.root.join(format!("{}.sav", name))
    }
}

impl SaveStorage for DirectoryStorage {
    fn write_slot(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_for(slot), bytes)
    }

    fn read_slot(&mut self, slot: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
