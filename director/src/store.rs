//! Named save slots for [`GameStateSnapshot`]s.

use crate::error::{DirectorError, DirectorResult};
use crate::history::GameStateSnapshot;
use collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SLOT_EXTENSION: &str = "sav";

/// Backing storage behind [`crate::history::GameStateManager`]'s slot cache.
pub trait SlotStore {
    fn save(&mut self, slot: &str, snapshot: &GameStateSnapshot) -> DirectorResult<()>;

    /// `Ok(None)` when the slot does not exist.
    fn load(&self, slot: &str) -> DirectorResult<Option<GameStateSnapshot>>;

    /// Returns whether anything was deleted.
    fn delete(&mut self, slot: &str) -> DirectorResult<bool>;

    fn exists(&self, slot: &str) -> bool;
}

/// Slot names double as file names: non-empty ASCII letters, digits, `-`
/// and `_`.
pub fn validate_slot_name(slot: &str) -> DirectorResult<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DirectorError::InvalidSlotName(slot.to_string()));
    }
    Ok(())
}

/// Keeps bincode-encoded snapshots in memory.
#[derive(Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn save(&mut self, slot: &str, snapshot: &GameStateSnapshot) -> DirectorResult<()> {
        validate_slot_name(slot)?;
        let bytes = bincode::serialize(snapshot)?;
        self.slots.insert(slot.to_string(), bytes);
        Ok(())
    }

    fn load(&self, slot: &str) -> DirectorResult<Option<GameStateSnapshot>> {
        validate_slot_name(slot)?;
        match self.slots.get(slot) {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    fn delete(&mut self, slot: &str) -> DirectorResult<bool> {
        validate_slot_name(slot)?;
        Ok(self.slots.remove(slot).is_some())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }
}

/// One `<slot>.sav` file per slot under a directory.
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Creates `dir` if it does not exist.
    pub fn new<P: AsRef<Path>>(dir: P) -> DirectorResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slot, SLOT_EXTENSION))
    }
}

impl SlotStore for FileSlotStore {
    fn save(&mut self, slot: &str, snapshot: &GameStateSnapshot) -> DirectorResult<()> {
        validate_slot_name(slot)?;
        let bytes = bincode::serialize(snapshot)?;
        fs::write(self.slot_path(slot), bytes)?;
        Ok(())
    }

    fn load(&self, slot: &str) -> DirectorResult<Option<GameStateSnapshot>> {
        validate_slot_name(slot)?;
        let path = self.slot_path(slot);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(bincode::deserialize(&bytes)?))
    }

    fn delete(&mut self, slot: &str) -> DirectorResult<bool> {
        validate_slot_name(slot)?;
        let path = self.slot_path(slot);
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot_name(slot).is_ok() && self.slot_path(slot).is_file()
    }
}
