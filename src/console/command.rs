//! Command table and the validate-then-dispatch policy.
//!
//! | command | params | length bounds      | hex parity |
//! |---------|--------|--------------------|------------|
//! | `type`  | 2      | 1..=MAX_PARAM_LEN  | no         |
//! | `size`  | 2      | 1..=MAX_PARAM_LEN  | no         |
//! | `hex`   | 2      | 2..=MAX_PARAM_LEN  | yes        |
//! | `fmul`  | 3      | 8..=8              | yes        |
//! | `fadd`  | 3      | 8..=8              | yes        |
//! | `fenc`  | 3      | 8..=8              | yes        |
//!
//! The parameter count includes the command name.

use super::config::MAX_PARAM_LEN;
use super::error::ErrorCode;
use super::handlers::{
    CommandHandler, FloatHandler, FloatOp, HexHandler, Services, SizeHandler, TypeHandler,
    hex_value,
};
use super::tokenizer::{Parameter, count_params};

/// The recognized commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Print a file.
    Type,
    /// Print a file's size.
    Size,
    /// Print the bytes spelled by hex digits.
    Hex,
    /// Float multiply.
    Fmul,
    /// Float add.
    Fadd,
    /// Encode integer and fraction as a float.
    Fenc,
}

impl CommandKind {
    /// Every kind, in table order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Type,
        CommandKind::Size,
        CommandKind::Hex,
        CommandKind::Fmul,
        CommandKind::Fadd,
        CommandKind::Fenc,
    ];

    /// Table entry for this kind.
    pub fn descriptor(self) -> &'static CommandDescriptor {
        let index = match self {
            CommandKind::Type => 0,
            CommandKind::Size => 1,
            CommandKind::Hex => 2,
            CommandKind::Fmul => 3,
            CommandKind::Fadd => 4,
            CommandKind::Fenc => 5,
        };
        &COMMAND_TABLE[index]
    }

    /// Name typed at the console.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

/// Static metadata for one command.
pub struct CommandDescriptor {
    /// Which command this is.
    pub kind: CommandKind,
    /// Exact, case-sensitive name.
    pub name: &'static str,
    /// Executes the command once validated.
    pub handler: &'static dyn CommandHandler,
    /// Parameters required, command name included.
    pub required_params: usize,
    /// Longest allowed parameter.
    pub max_param_len: usize,
    /// Shortest allowed parameter.
    pub min_param_len: usize,
    /// Parameters must start with a non-empty, even-length run of hex digits.
    pub hex_parity: bool,
}

impl core::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("required_params", &self.required_params)
            .field("max_param_len", &self.max_param_len)
            .field("min_param_len", &self.min_param_len)
            .field("hex_parity", &self.hex_parity)
            .finish()
    }
}

/// All commands, scanned in order.
pub static COMMAND_TABLE: [CommandDescriptor; 6] = [
    CommandDescriptor {
        kind: CommandKind::Type,
        name: "type",
        handler: &TypeHandler,
        required_params: 2,
        max_param_len: MAX_PARAM_LEN,
        min_param_len: 1,
        hex_parity: false,
    },
    CommandDescriptor {
        kind: CommandKind::Size,
        name: "size",
        handler: &SizeHandler,
        required_params: 2,
        max_param_len: MAX_PARAM_LEN,
        min_param_len: 1,
        hex_parity: false,
    },
    CommandDescriptor {
        kind: CommandKind::Hex,
        name: "hex",
        handler: &HexHandler,
        required_params: 2,
        max_param_len: MAX_PARAM_LEN,
        min_param_len: 2,
        hex_parity: true,
    },
    CommandDescriptor {
        kind: CommandKind::Fmul,
        name: "fmul",
        handler: &FloatHandler(FloatOp::Multiply),
        required_params: 3,
        max_param_len: 8,
        min_param_len: 8,
        hex_parity: true,
    },
    CommandDescriptor {
        kind: CommandKind::Fadd,
        name: "fadd",
        handler: &FloatHandler(FloatOp::Add),
        required_params: 3,
        max_param_len: 8,
        min_param_len: 8,
        hex_parity: true,
    },
    CommandDescriptor {
        kind: CommandKind::Fenc,
        name: "fenc",
        handler: &FloatHandler(FloatOp::Encode),
        required_params: 3,
        max_param_len: 8,
        min_param_len: 8,
        hex_parity: true,
    },
];

/// Count of hex digits in `text`.
///
/// Any non-hex byte makes the whole count 0, not just the part after it.
pub fn verify_hex(text: &[u8]) -> usize {
    if text.iter().all(|&b| hex_value(b).is_some()) {
        text.len()
    } else {
        0
    }
}

/// Look up the command named by `params[0]`.
pub fn find_command(name: &[u8]) -> Option<&'static CommandDescriptor> {
    COMMAND_TABLE.iter().find(|c| c.name.as_bytes() == name)
}

/// Apply the table's rules to a tokenized line without running anything.
///
/// Returns `Ok(None)` for a blank line and `Ok(Some(descriptor))` when the
/// line may be dispatched.
pub fn validate(params: &[Parameter]) -> Result<Option<&'static CommandDescriptor>, ErrorCode> {
    let Some(name) = params.first() else {
        return Ok(None);
    };
    if name.is_empty() {
        return Ok(None);
    }

    let command = find_command(name.as_bytes()).ok_or(ErrorCode::UnknownCommand)?;

    if count_params(params) < command.required_params {
        return Err(ErrorCode::TooFewArgs);
    }

    for param in params.iter().take(command.required_params).skip(1) {
        // An empty parameter skips the size check; the count check above
        // is what rejects it.
        let len = param.len();
        if (len > command.max_param_len + 1 || len < command.min_param_len) && !param.is_empty() {
            return Err(ErrorCode::InvalidArgSize);
        } else if command.hex_parity {
            let digits = verify_hex(param.as_bytes());
            if digits == 0 || digits % 2 != 0 {
                return Err(ErrorCode::InvalidHex);
            }
        }
    }

    Ok(Some(command))
}

/// Validate a tokenized line and run its handler.
///
/// The handler's result is returned unmodified.
pub fn validate_and_dispatch(params: &[Parameter], services: &mut Services<'_>) -> ErrorCode {
    match validate(params) {
        Ok(Some(command)) => {
            debug!("dispatch {}", command.name);
            command.handler.handle(params, services)
        }
        Ok(None) => ErrorCode::Ok,
        Err(code) => code,
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandKind {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name())
    }
}
