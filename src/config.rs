//! Runtime configuration.
//!
//! Settings are limits and defaults only; the interpreter enforces them.
//! Every field has a default, so a partial JSON document is accepted.

use serde::{Deserialize, Serialize};

use crate::crypt::CipherMode;

const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Tracing switches, also toggled at run time through the system object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugFlags {
    pub messages: bool,
    pub expressions: bool,
    pub statements: bool,
    pub memory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Cipher applied to strings in save states.
    pub cipher: CipherMode,
    /// Words longer than this are truncated by the sentence normalizer.
    /// Zero keeps words whole.
    pub abbreviate: usize,
    /// Deepest allowed nesting of message sends and attribute evaluation.
    pub max_call_depth: usize,
    /// Seed for the `?` operator; taken from the clock when absent.
    pub random_seed: Option<u32>,
    pub debug: DebugFlags,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cipher: CipherMode::default(),
            abbreviate: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            random_seed: None,
            debug: DebugFlags::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(RuntimeConfig::from_json("{}").unwrap(), RuntimeConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = RuntimeConfig::from_json(
            r#"{ "cipher": "complex", "abbreviate": 6, "debug": { "messages": true } }"#,
        )
        .unwrap();
        assert_eq!(config.cipher, CipherMode::Complex);
        assert_eq!(config.abbreviate, 6);
        assert!(config.debug.messages);
        assert!(!config.debug.statements);
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn unknown_cipher_is_rejected() {
        assert!(RuntimeConfig::from_json(r#"{ "cipher": "rot13" }"#).is_err());
    }

    #[test]
    fn json_round_trip() {
        let config = RuntimeConfig {
            random_seed: Some(99),
            ..RuntimeConfig::default()
        };
        let text = config.to_json().unwrap();
        assert_eq!(RuntimeConfig::from_json(&text).unwrap(), config);
    }
}
