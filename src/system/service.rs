//! Service selector of the system object.
//!
//! The system object receives plain strings. While idle, a string names a
//! service; some services act at once, others arm the selector so that the
//! following call(s) are taken as data. [`transition`] is the whole state
//! machine: it maps the current service and an incoming string to the next
//! service and the action to carry out.

use super::parser::WordListKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Service {
    #[default]
    Idle,
    /// Next call is the abbreviation length.
    Abbreviate,
    /// Next call is text to return normalized.
    Normalize,
    /// Next call is the player's command line.
    PlayerCommand,
    /// Next call is a noun phrase to resolve.
    WhichObject,
    /// Next call names the save slot.
    SaveState,
    /// Next call names the slot to restore.
    LoadState,
    /// Every call is pushed on the heap until `CLOSE SORTER`.
    Sorter,
    /// Every call is a word for the sender until `CLOSE PARSER`.
    Parser(WordListKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugChannel {
    Messages,
    Expressions,
    Statements,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Selector change only.
    None,
    /// Idle request that names no service.
    Unknown,
    OpenSorter,
    PushSorted,
    NextSorted,
    OpenParser,
    AddWord(WordListKind),
    SetAbbreviate,
    Normalize,
    PlayerCommand,
    WhichObject,
    RollCall,
    Present,
    Parse,
    NextObject,
    Save,
    Load,
    ToggleDebug(DebugChannel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Service,
    pub action: Action,
}

const fn to(next: Service, action: Action) -> Transition {
    Transition { next, action }
}

fn idle_request(key: &str) -> Transition {
    match key {
        "OPEN SORTER" => to(Service::Sorter, Action::OpenSorter),
        "NEXT SORTED" => to(Service::Idle, Action::NextSorted),
        "OPEN PARSER" => to(Service::Parser(WordListKind::Verbs), Action::OpenParser),
        "ABBR" => to(Service::Abbreviate, Action::None),
        "NORMALIZE" => to(Service::Normalize, Action::None),
        "PLAYER CMD" => to(Service::PlayerCommand, Action::None),
        "WHICH OBJECT" => to(Service::WhichObject, Action::None),
        "SAVE STATE" => to(Service::SaveState, Action::None),
        "LOAD STATE" => to(Service::LoadState, Action::None),
        "ROLL CALL" => to(Service::Idle, Action::RollCall),
        "PRESENT" => to(Service::Idle, Action::Present),
        "PARSE" => to(Service::Idle, Action::Parse),
        "NEXT OBJECT" => to(Service::Idle, Action::NextObject),
        "DEBUG MESSAGES" => to(Service::Idle, Action::ToggleDebug(DebugChannel::Messages)),
        "DEBUG EXPRESSIONS" => to(Service::Idle, Action::ToggleDebug(DebugChannel::Expressions)),
        "DEBUG STATEMENTS" => to(Service::Idle, Action::ToggleDebug(DebugChannel::Statements)),
        "DEBUG MEMORY" => to(Service::Idle, Action::ToggleDebug(DebugChannel::Memory)),
        _ => to(Service::Idle, Action::Unknown),
    }
}

pub fn transition(current: Service, request: &str) -> Transition {
    let key = request.trim().to_ascii_uppercase();
    match current {
        Service::Idle => idle_request(&key),
        Service::Abbreviate => to(Service::Idle, Action::SetAbbreviate),
        Service::Normalize => to(Service::Idle, Action::Normalize),
        Service::PlayerCommand => to(Service::Idle, Action::PlayerCommand),
        Service::WhichObject => to(Service::Idle, Action::WhichObject),
        Service::SaveState => to(Service::Idle, Action::Save),
        Service::LoadState => to(Service::Idle, Action::Load),
        Service::Sorter => match key.as_str() {
            "CLOSE SORTER" => to(Service::Idle, Action::None),
            _ => to(Service::Sorter, Action::PushSorted),
        },
        Service::Parser(kind) => match key.as_str() {
            "VERB LIST" => to(Service::Parser(WordListKind::Verbs), Action::None),
            "NOUN LIST" => to(Service::Parser(WordListKind::Nouns), Action::None),
            "CLOSE PARSER" => to(Service::Idle, Action::None),
            _ => to(Service::Parser(kind), Action::AddWord(kind)),
        },
    }
}
