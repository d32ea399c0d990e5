//! Result codes reported by the console.

/// Outcome of validating and dispatching one command line.
///
/// Every variant except [`ErrorCode::Unexpected`] carries the numeric code
/// used on the wire by earlier firmware revisions, see [`ErrorCode::code`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorCode {
    /// Command ran, or the line was blank.
    Ok,
    /// Fewer non-empty parameters than the command requires.
    TooFewArgs,
    /// A parameter fell outside the command's length bounds.
    InvalidArgSize,
    /// A parameter failed the hex parity rule, or decoded to nothing.
    InvalidHex,
    /// File lookup failed. Reserved for file-backed handlers.
    NotFound,
    /// No table entry matched the first parameter.
    UnknownCommand,
    /// Any code the console does not recognize.
    Unexpected,
}

impl ErrorCode {
    /// Numeric code of this result.
    ///
    /// `Unexpected` has no code of its own and reports `u32::MAX`.
    pub const fn code(self) -> u32 {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::TooFewArgs => 1,
            ErrorCode::InvalidArgSize => 2,
            ErrorCode::InvalidHex => 3,
            ErrorCode::NotFound => 5,
            ErrorCode::UnknownCommand => 10,
            ErrorCode::Unexpected => u32::MAX,
        }
    }

    /// Map a raw numeric code back to a result, unknown codes becoming
    /// [`ErrorCode::Unexpected`].
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => ErrorCode::Ok,
            1 => ErrorCode::TooFewArgs,
            2 => ErrorCode::InvalidArgSize,
            3 => ErrorCode::InvalidHex,
            5 => ErrorCode::NotFound,
            10 => ErrorCode::UnknownCommand,
            _ => ErrorCode::Unexpected,
        }
    }

    /// Text shown to the user for this result, `None` for success.
    pub const fn message(self) -> Option<&'static str> {
        match self {
            ErrorCode::Ok => None,
            ErrorCode::TooFewArgs => Some("Too Few Arguments."),
            ErrorCode::InvalidArgSize => Some("Invalid Argument Size."),
            ErrorCode::InvalidHex => Some("Invalid Hex Argument"),
            ErrorCode::NotFound => Some("File not found"),
            ErrorCode::UnknownCommand => Some("Syntax Error"),
            ErrorCode::Unexpected => Some("Unexpected behavior!"),
        }
    }
}

/// Errors raised while loading a [`ConsoleConfig`](super::config::ConsoleConfig).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse,
    /// The output buffer was too small to serialize into.
    BufferTooSmall,
    /// The terminator collides with an editing key.
    InvalidTerminator,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ErrorCode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ErrorCode::Ok => defmt::write!(f, "Ok"),
            ErrorCode::TooFewArgs => defmt::write!(f, "TooFewArgs"),
            ErrorCode::InvalidArgSize => defmt::write!(f, "InvalidArgSize"),
            ErrorCode::InvalidHex => defmt::write!(f, "InvalidHex"),
            ErrorCode::NotFound => defmt::write!(f, "NotFound"),
            ErrorCode::UnknownCommand => defmt::write!(f, "UnknownCommand"),
            ErrorCode::Unexpected => defmt::write!(f, "Unexpected"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::Parse => defmt::write!(f, "Parse"),
            ConfigError::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
            ConfigError::InvalidTerminator => defmt::write!(f, "InvalidTerminator"),
        }
    }
}
