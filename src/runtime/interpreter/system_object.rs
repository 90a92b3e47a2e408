use crate::{
    runtime::value::Value,
    system::{
        normalize::normalize,
        service::{Action, DebugChannel, transition},
    },
};

use super::Interpreter;

impl Interpreter {
    /// Handles a string sent to object 0 by `sender`.
    pub(crate) fn send_to_system(&mut self, request: &str, sender: usize) -> Value {
        let step = transition(self.system.service, request);
        if self.config.debug.messages {
            log::debug!(
                "system: \"{}\" from object {} ({:?} -> {:?})",
                request,
                sender,
                self.system.service,
                step.next
            );
        }
        self.system.service = step.next;
        self.apply(step.action, request, sender)
    }

    fn apply(&mut self, action: Action, request: &str, sender: usize) -> Value {
        let abbreviate = self.system.abbreviate;
        match action {
            Action::None => Value::UNDEFINED,
            Action::Unknown => {
                log::warn!("system object does not understand \"{}\"", request.trim());
                Value::UNDEFINED
            }
            Action::OpenSorter => {
                self.system.heap.clear();
                Value::UNDEFINED
            }
            Action::PushSorted => {
                self.system.heap.push(request);
                Value::UNDEFINED
            }
            Action::NextSorted => self
                .system
                .heap
                .pop()
                .map(Value::Str)
                .unwrap_or(Value::UNDEFINED),
            Action::OpenParser => {
                self.system.parser.clear_lists();
                Value::UNDEFINED
            }
            Action::AddWord(kind) => {
                let word = normalize(request, abbreviate);
                self.system.parser.add_word(kind, &word, sender);
                Value::UNDEFINED
            }
            Action::SetAbbreviate => match request.trim().parse::<usize>() {
                Ok(length) => {
                    self.system.abbreviate = length;
                    Value::Numeric(length as i32)
                }
                Err(_) => {
                    log::warn!("bad abbreviation length \"{}\"", request.trim());
                    Value::UNDEFINED
                }
            },
            Action::Normalize => Value::Str(normalize(request, abbreviate)),
            Action::PlayerCommand => {
                self.system.parser.set_command(normalize(request, abbreviate));
                Value::UNDEFINED
            }
            Action::WhichObject => self
                .system
                .parser
                .which_object(&normalize(request, abbreviate))
                .map(Value::object)
                .unwrap_or(Value::UNDEFINED),
            Action::RollCall => {
                self.system.parser.roll_call();
                Value::UNDEFINED
            }
            Action::Present => {
                self.system.parser.mark_present(sender);
                Value::UNDEFINED
            }
            Action::Parse => Value::from_bool(self.system.parser.parse()),
            Action::NextObject => self
                .system
                .parser
                .next_object()
                .map(Value::object)
                .unwrap_or(Value::UNDEFINED),
            Action::Save => self.save_to_slot(request.trim()).into(),
            Action::Load => self.load_from_slot(request.trim()).into(),
            Action::ToggleDebug(channel) => {
                let debug = &mut self.config.debug;
                let flag = match channel {
                    DebugChannel::Messages => &mut debug.messages,
                    DebugChannel::Expressions => &mut debug.expressions,
                    DebugChannel::Statements => &mut debug.statements,
                    DebugChannel::Memory => &mut debug.memory,
                };
                *flag = !*flag;
                Value::from_bool(*flag)
            }
        }
    }
}
