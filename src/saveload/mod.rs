//! Save and restore of the mutable game state.
//!
//! A save state records the attribute lists of every static object and the
//! complete definition (parent, attributes, methods) of every dynamic
//! object. Type definitions and the pools are part of the program and are
//! not saved.
//!
//! Loading is all-or-nothing: the stream is parsed and checked into a
//! staging area and only then committed, so a rejected stream leaves the
//! store untouched.

use std::io::{Read, Write};

use crate::{
    crypt::Cipher,
    error::SaveError,
    runtime::{
        interpreter::Interpreter,
        store::{Attribute, ObjectDef},
        value::Value,
    },
};

pub mod codec;
pub mod storage;

use codec::{CONTINUE, END, StateReader, StateWriter};

/// Result of a save or load request made through the system object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Success,
    Failure,
    /// Nothing was saved under the requested slot.
    NoData,
}

impl From<SaveOutcome> for Value {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Success => Value::from_bool(true),
            SaveOutcome::Failure => Value::from_bool(false),
            SaveOutcome::NoData => Value::UNDEFINED,
        }
    }
}

/// A parsed stream waiting to be committed.
struct Staged {
    statics: Vec<Vec<Attribute>>,
    dynamics: Vec<ObjectDef>,
}

impl Interpreter {
    /// Writes the current state to `out`.
    pub fn save_state<W: Write>(&self, mut out: W) -> Result<(), SaveError> {
        let timestamp = self.program.timestamp;
        out.write_all(&timestamp.to_le_bytes())?;

        let cipher = Cipher::new(self.cipher_mode.writing(), timestamp);
        let mut writer = StateWriter::new(out, cipher);
        let store = &self.program.store;

        for object in store.static_objects() {
            writer.write_u8(CONTINUE)?;
            writer.write_attributes(&object.attributes)?;
        }
        for object in store.dynamic_objects() {
            writer.write_u8(CONTINUE)?;
            writer.write_u32(object.parent as u32)?;
            writer.write_attributes(&object.attributes)?;
            writer.write_methods(&object.methods)?;
        }
        writer.write_u8(END)?;
        writer.into_inner().flush()?;

        log::debug!(
            "saved {} static and {} dynamic objects",
            store.static_count(),
            store.dynamic_objects().len()
        );
        Ok(())
    }

    /// Restores a state written by [`Interpreter::save_state`].
    ///
    /// The session cipher is switched to its reading form for the duration
    /// of the load and back to its writing form afterwards. A load that
    /// would remove an object still handling a message is refused.
    pub fn load_state<R: Read>(&mut self, input: R) -> Result<(), SaveError> {
        self.cipher_mode = self.cipher_mode.reading();
        let staged = self.read_state(input);
        self.cipher_mode = self.cipher_mode.writing();

        let staged = staged?;
        let restored = staged.dynamics.len();
        // every object still handling a message must exist after the load
        let limit = self.program.store.dynamic() + restored;
        if let Some(&busy) = self.in_flight.iter().find(|&&index| index >= limit) {
            return Err(SaveError::InFlight(busy));
        }
        let store = &mut self.program.store;
        for (index, attributes) in staged.statics.into_iter().enumerate() {
            if let Some(object) = store.object_mut(index + 1) {
                object.attributes = attributes;
            }
        }
        store.replace_dynamic(staged.dynamics);
        log::debug!("restored state with {} dynamic objects", restored);
        Ok(())
    }

    fn read_state<R: Read>(&self, mut input: R) -> Result<Staged, SaveError> {
        let mut stamp = [0u8; 4];
        input.read_exact(&mut stamp).map_err(|_| SaveError::Truncated)?;
        let found = u32::from_le_bytes(stamp);
        let expected = self.program.timestamp;
        if found != expected {
            return Err(SaveError::TimestampMismatch { expected, found });
        }

        let mut reader = StateReader::new(input, Cipher::new(self.cipher_mode, found));
        let store = &self.program.store;

        let count = store.static_count();
        let mut statics = Vec::with_capacity(count);
        for index in 0..count {
            if !reader.read_marker()? {
                return Err(SaveError::StaticCount {
                    expected: count,
                    found: index,
                });
            }
            statics.push(reader.read_attributes()?);
        }

        let mut dynamics = Vec::new();
        while reader.read_marker()? {
            let parent = reader.read_u32()? as usize;
            if store.type_def(parent).is_none() {
                return Err(SaveError::UnknownParent(parent));
            }
            dynamics.push(ObjectDef {
                parent,
                attributes: reader.read_attributes()?,
                methods: reader.read_methods()?,
                others: None,
            });
        }
        Ok(Staged { statics, dynamics })
    }

    /// Saves into the configured storage under `slot`.
    pub fn save_to_slot(&mut self, slot: &str) -> SaveOutcome {
        let mut bytes = Vec::new();
        if let Err(err) = self.save_state(&mut bytes) {
            log::error!("could not save state: {}", err);
            return SaveOutcome::Failure;
        }
        match self.storage.write_slot(slot, &bytes) {
            Ok(()) => SaveOutcome::Success,
            Err(err) => {
                log::error!("could not write save slot \"{}\": {}", slot, err);
                SaveOutcome::Failure
            }
        }
    }

    /// Loads the state saved under `slot` in the configured storage.
    pub fn load_from_slot(&mut self, slot: &str) -> SaveOutcome {
        let bytes = match self.storage.read_slot(slot) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return SaveOutcome::NoData,
            Err(err) => {
                log::error!("could not read save slot \"{}\": {}", slot, err);
                return SaveOutcome::Failure;
            }
        };
        match self.load_state(bytes.as_slice()) {
            Ok(()) => SaveOutcome::Success,
            Err(err) => {
                log::warn!("rejected save slot \"{}\": {}", slot, err);
                SaveOutcome::Failure
            }
        }
    }
}
