//! Splits a completed command line into space-delimited parameters.
//!
//! Only the space character separates parameters. Each parameter keeps at
//! most [`PARAM_CAPACITY`] bytes; the remainder of a longer token is picked
//! up as the next parameter.
//!
//! The reported [`Parameter::len`] is not always the byte count. A token that
//! runs into the end of the line, with no space after it, reports one more
//! than the bytes it holds:
//!
//! ```text
//! "hex 313233"    -> {"hex", 3}  {"313233", 7}
//! "hex 313233 "   -> {"hex", 3}  {"313233", 6}
//! ```
//!
//! The command table's upper length bound is one larger than the nominal
//! maximum to absorb this.

use heapless::Vec;

use super::config::{ASCII_SPACE, MAX_PARAMS, PARAM_CAPACITY};

/// A single token from a command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
    text: Vec<u8, PARAM_CAPACITY>,
    len: usize,
}

/// Ordered parameters of one line; entry 0 is the command name.
pub type Parameters = Vec<Parameter, MAX_PARAMS>;

impl Parameter {
    /// An empty parameter with length 0.
    pub const fn empty() -> Self {
        Self {
            text: Vec::new(),
            len: 0,
        }
    }

    /// Bytes copied from the line.
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// Text as UTF-8, or `""` if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or("")
    }

    /// Reported length, see the module documentation.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no byte was copied.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Parse the next parameter from `input`.
///
/// Leading spaces are skipped, then non-space bytes are copied until the
/// next space, the end of input, or [`PARAM_CAPACITY`] bytes. Returns the
/// parameter and the unparsed rest, or `None` when input is exhausted.
pub fn parse_single_item(input: &[u8]) -> (Parameter, Option<&[u8]>) {
    let mut param = Parameter::empty();
    let mut pos = input
        .iter()
        .position(|&b| b != ASCII_SPACE)
        .unwrap_or(input.len());

    while pos < input.len() && input[pos] != ASCII_SPACE {
        if param.text.push(input[pos]).is_err() {
            break;
        }
        pos += 1;
    }

    let copied = param.text.len();
    if copied > 0 && pos < input.len() {
        param.len = copied;
        (param, Some(&input[pos..]))
    } else {
        param.len = if copied == 0 { 0 } else { copied + 1 };
        (param, None)
    }
}

/// Split a whole line into at most [`MAX_PARAMS`] parameters.
///
/// An empty line gives no parameters. A line of only spaces gives a single
/// empty parameter. Trailing spaces after a parameter add nothing.
pub fn tokenize_line(line: &[u8]) -> Parameters {
    let mut params = Parameters::new();
    let mut rest = line;

    while !rest.is_empty() {
        let (param, next) = parse_single_item(rest);
        if param.is_empty() && !params.is_empty() {
            break;
        }
        if params.push(param).is_err() {
            break;
        }
        match next {
            Some(next) => rest = next,
            None => break,
        }
    }

    params
}

/// Number of leading non-empty parameters.
pub fn count_params(params: &[Parameter]) -> usize {
    params.iter().take_while(|p| !p.is_empty()).count()
}
