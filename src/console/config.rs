//! Console configuration and size limits.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Longest command line kept by the line editor. Further bytes are dropped.
pub const MAX_LINE_LEN: usize = 99;

/// Longest parameter the command table accepts.
pub const MAX_PARAM_LEN: usize = 32;

/// Bytes stored per parameter. One more than [`MAX_PARAM_LEN`], matching
/// the size check's `max_param_len + 1` bound that admits the tokenizer's
/// end-of-line +1. A longer token is split at this capacity, so its first
/// piece passes the size check.
pub const PARAM_CAPACITY: usize = MAX_PARAM_LEN + 1;

/// Maximum number of parameters per line, command name included.
pub const MAX_PARAMS: usize = 4;

// ASCII control character constants for input processing
/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;
/// ASCII space character (0x20).
pub const ASCII_SPACE: u8 = 0x20;

/// Runtime console behaviour.
///
/// Loadable from JSON, for example from a settings partition:
///
/// ```rust
/// use uartcon::console::config::ConsoleConfig;
///
/// let config = ConsoleConfig::from_json(r#"{"echo": false}"#).unwrap();
/// assert!(!config.echo);
/// assert_eq!(config.terminator, b'\r');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Echo every consumed byte back to the terminal.
    pub echo: bool,
    /// Byte that completes a command line.
    pub terminator: u8,
    /// Echo a line feed after the terminator.
    pub newline_after_terminator: bool,
}

impl ConsoleConfig {
    /// Defaults: echo on, CR terminates, LF echoed after CR.
    pub const fn new() -> Self {
        Self {
            echo: true,
            terminator: ASCII_CR,
            newline_after_terminator: true,
        }
    }

    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let (config, _): (Self, usize) =
            serde_json_core::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize into `buf`, returning the written length.
    pub fn to_json(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        serde_json_core::to_slice(self, buf).map_err(|_| ConfigError::BufferTooSmall)
    }

    /// Reject a terminator that is also an editing key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.terminator {
            ASCII_BACKSPACE | ASCII_DEL => Err(ConfigError::InvalidTerminator),
            _ => Ok(()),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}
