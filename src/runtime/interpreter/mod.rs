use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    config::RuntimeConfig,
    crypt::{CipherMode, RandomGenerator},
    error::{ArchetypeError, ArchetypeResult},
    runtime::{
        console::{Console, StdConsole},
        store::Owner,
        value::Value,
    },
    saveload::storage::{MemoryStorage, SaveStorage},
    syntax::{expression::Transport, id_table::IdKind, program::Program},
    system::SystemState,
};

mod compare;
mod convert;
mod dispatch;
mod eval;
mod exec;
mod system_object;

/// Name of the object that receives `'START'` from [`Interpreter::run`].
pub const MAIN_OBJECT: &str = "main";
pub const START_MESSAGE: &str = "START";

/// Bindings visible to the code currently running. Object index 0 stands
/// for the system object, or for "no object" where that makes sense
/// (`each` outside a `for`, `message` outside a handler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    pub self_obj: usize,
    pub each: usize,
    pub sender: usize,
    /// Vocabulary index of the message being handled.
    pub message: usize,
}

impl Context {
    pub fn with_self(self_obj: usize) -> Self {
        Self {
            self_obj,
            ..Self::default()
        }
    }
}

/// How a statement finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `break`: leave the innermost loop, or the handler when there is none.
    Break,
    /// `stop`: halt the interpreter.
    Stop,
}

/// The one mutable context of a running game.
///
/// Owns the program tables, the system object's state, the generator
/// behind `?`, the session cipher mode and the I/O handles.
pub struct Interpreter {
    pub(crate) program: Program,
    pub(crate) system: SystemState,
    pub(crate) random: RandomGenerator,
    pub(crate) cipher_mode: CipherMode,
    pub(crate) config: RuntimeConfig,
    pub(crate) console: Box<dyn Console>,
    pub(crate) storage: Box<dyn SaveStorage>,
    pub(crate) depth: usize,
    /// Recipients of the dispatches currently on the call chain.
    pub(crate) in_flight: Vec<usize>,
    /// Value of the last statement executed, returned by handlers.
    pub(crate) last: Value,
    pub(crate) stopped: bool,
}

impl Interpreter {
    /// Takes over a fully declared program. Every object present now
    /// becomes static.
    pub fn new(mut program: Program) -> Self {
        program.store.seal();
        let config = RuntimeConfig::default();
        Self {
            program,
            system: SystemState::new(config.abbreviate),
            random: RandomGenerator::new(clock_seed()),
            cipher_mode: config.cipher,
            config,
            console: Box::new(StdConsole),
            storage: Box::new(MemoryStorage::new()),
            depth: 0,
            in_flight: Vec::new(),
            last: Value::UNDEFINED,
            stopped: false,
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        if let Some(seed) = config.random_seed {
            self.random = RandomGenerator::new(seed);
        }
        self.system.abbreviate = config.abbreviate;
        self.cipher_mode = config.cipher;
        self.config = config;
        self
    }

    pub fn with_console(mut self, console: impl Console + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn with_storage(mut self, storage: impl SaveStorage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn system(&self) -> &SystemState {
        &self.system
    }

    pub fn cipher_mode(&self) -> CipherMode {
        self.cipher_mode
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Sends `'START'` to `main`.
    pub fn run(&mut self) -> ArchetypeResult<Value> {
        let main = self
            .program
            .ids
            .lookup(MAIN_OBJECT)
            .and_then(|id| self.program.ids.get(id))
            .filter(|record| record.kind == IdKind::Object)
            .map(|record| record.integer)
            .ok_or(ArchetypeError::NoMainObject)?;

        log::debug!("starting game at object {}", main);
        self.stopped = false;
        Ok(self.send(START_MESSAGE, main).unwrap_or(Value::UNDEFINED))
    }

    /// Sends a message by name from outside any handler.
    ///
    /// Returns `None` when no handler ran, including when no handler could
    /// exist because the message is not in the vocabulary.
    pub fn send(&mut self, message: &str, recipient: usize) -> Option<Value> {
        let context = Context::default();
        if recipient == 0 {
            return Some(self.send_to_system(message, 0));
        }
        let Some(index) = self.program.vocabulary.find(message) else {
            log::debug!("message '{}' is not in the vocabulary", message);
            return None;
        };
        self.send_message(Transport::Send, index, Owner::Object(recipient), &context)
    }

    /// Destroys a dynamic object. Refused while the object is handling a
    /// message, or when it is not the most recently created one.
    pub fn destroy_object(&mut self, index: usize) -> ArchetypeResult<()> {
        if self.in_flight.contains(&index) {
            return Err(ArchetypeError::InFlight(index));
        }
        self.program.store.destroy(index)?;
        if self.config.debug.memory {
            log::debug!("destroyed object {}", index);
        }
        Ok(())
    }

    pub(crate) fn report(&mut self, error: ArchetypeError) {
        self.program.report(error);
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as u32)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod compare_test;
#[cfg(test)]
mod dispatch_test;
#[cfg(test)]
mod system_object_test;
