//! Command handlers and the collaborators they delegate to.
//!
//! Handlers are thin. Each one pulls its operands out of the validated
//! parameters and hands them to an external service:
//!
//! - [`FileLookup`] backs `type` and `size`
//! - [`HexDecoder`] turns hex text into a 32-bit word
//! - [`FloatKernel`] implements IEEE-754 single precision `encode`, `add`
//!   and `multiply` on raw bit patterns
//!
//! Targets bring their own implementations. [`NibbleDecoder`],
//! [`NativeKernel`] and [`NoFileSystem`] are provided for hosts and tests.

use super::error::ErrorCode;
use super::io::SerialOutput;
use super::tokenizer::Parameter;

/// Line ending written after handler output and console messages.
pub const LINE_END: &str = "\n\r";

/// Hex text to binary conversion.
pub trait HexDecoder {
    /// Decode up to eight leading hex digits of `digits` into a word, the
    /// first digit landing in the most significant nibble.
    fn decode_word(&self, digits: &[u8]) -> u32;
}

/// IEEE-754 single precision arithmetic on raw bit patterns.
pub trait FloatKernel {
    /// Encode a signed integer part and a binary fraction (`fraction / 2^32`)
    /// as a float.
    fn encode(&mut self, integer: u32, fraction: u32) -> u32;
    /// `a + b`.
    fn add(&mut self, a: u32, b: u32) -> u32;
    /// `a * b`.
    fn multiply(&mut self, a: u32, b: u32) -> u32;
}

/// File storage backing the `type` and `size` commands.
pub trait FileLookup {
    /// Print the start and end of file `name`.
    fn type_file(&mut self, name: &str, out: &mut dyn SerialOutput) -> ErrorCode;
    /// Print the size of file `name`.
    fn size_file(&mut self, name: &str, out: &mut dyn SerialOutput) -> ErrorCode;
}

/// External services a handler may use, threaded through each dispatch.
pub struct Services<'a> {
    /// Console output.
    pub output: &'a mut dyn SerialOutput,
    /// Hex text decoder.
    pub hex: &'a dyn HexDecoder,
    /// Float arithmetic kernel.
    pub kernel: &'a mut dyn FloatKernel,
    /// File storage.
    pub files: &'a mut dyn FileLookup,
}

impl core::fmt::Debug for Services<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Executes one validated command.
pub trait CommandHandler: Sync {
    /// Run the command. `params[0]` is the command name and every required
    /// parameter has passed validation.
    fn handle(&self, params: &[Parameter], services: &mut Services<'_>) -> ErrorCode;
}

fn operand(params: &[Parameter], index: usize) -> &[u8] {
    params.get(index).map(Parameter::as_bytes).unwrap_or(&[])
}

/// `type <file>`
#[derive(Debug, Clone, Copy)]
pub struct TypeHandler;

impl CommandHandler for TypeHandler {
    fn handle(&self, params: &[Parameter], services: &mut Services<'_>) -> ErrorCode {
        let name = params.get(1).map(Parameter::as_str).unwrap_or("");
        services.files.type_file(name, &mut *services.output)
    }
}

/// `size <file>`
#[derive(Debug, Clone, Copy)]
pub struct SizeHandler;

impl CommandHandler for SizeHandler {
    fn handle(&self, params: &[Parameter], services: &mut Services<'_>) -> ErrorCode {
        let name = params.get(1).map(Parameter::as_str).unwrap_or("");
        services.files.size_file(name, &mut *services.output)
    }
}

/// `hex <digits>`: print the bytes the digits spell.
///
/// Zero bytes are skipped, so `hex 00` prints an empty string. Only an
/// operand with no leading hex digit is rejected.
#[derive(Debug, Clone, Copy)]
pub struct HexHandler;

impl CommandHandler for HexHandler {
    fn handle(&self, params: &[Parameter], services: &mut Services<'_>) -> ErrorCode {
        let digits = operand(params, 1);
        if digits.first().and_then(|&b| hex_value(b)).is_none() {
            return ErrorCode::InvalidHex;
        }
        let word = services.hex.decode_word(digits);

        let out = &mut *services.output;
        out.put_str("The string: ");
        for byte in word.to_be_bytes() {
            if byte != 0 {
                out.put_byte(byte);
            }
        }
        out.put_str(LINE_END);
        ErrorCode::Ok
    }
}

/// Which kernel operation a float command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatOp {
    /// `fenc <integer> <fraction>`
    Encode,
    /// `fadd <a> <b>`
    Add,
    /// `fmul <a> <b>`
    Multiply,
}

/// `fenc`, `fadd` and `fmul`: decode two words, run the kernel, print the
/// result as hex.
#[derive(Debug, Clone, Copy)]
pub struct FloatHandler(pub FloatOp);

impl CommandHandler for FloatHandler {
    fn handle(&self, params: &[Parameter], services: &mut Services<'_>) -> ErrorCode {
        let a = services.hex.decode_word(operand(params, 1));
        let b = services.hex.decode_word(operand(params, 2));

        let result = match self.0 {
            FloatOp::Encode => services.kernel.encode(a, b),
            FloatOp::Add => services.kernel.add(a, b),
            FloatOp::Multiply => services.kernel.multiply(a, b),
        };

        services.output.put_hex_word(result);
        services.output.put_str(LINE_END);
        ErrorCode::Ok
    }
}

/// Value of a hex digit, `None` for anything else.
pub const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Straight nibble-by-nibble decoder.
///
/// Stops at the first non-hex byte or after eight digits; the decoded
/// nibbles are left-aligned, so `"12"` is `0x1200_0000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NibbleDecoder;

impl HexDecoder for NibbleDecoder {
    fn decode_word(&self, digits: &[u8]) -> u32 {
        let mut word = 0u32;
        for (i, &byte) in digits.iter().take(8).enumerate() {
            match hex_value(byte) {
                Some(nibble) => word |= u32::from(nibble) << (28 - 4 * i),
                None => break,
            }
        }
        word
    }
}

/// Host reference kernel built on the target's native `f32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKernel;

impl FloatKernel for NativeKernel {
    fn encode(&mut self, integer: u32, fraction: u32) -> u32 {
        let signed = integer as i32;
        let magnitude = f64::from(signed.unsigned_abs()) + f64::from(fraction) / 4_294_967_296.0;
        let value = if signed < 0 { -magnitude } else { magnitude };
        (value as f32).to_bits()
    }

    fn add(&mut self, a: u32, b: u32) -> u32 {
        (f32::from_bits(a) + f32::from_bits(b)).to_bits()
    }

    fn multiply(&mut self, a: u32, b: u32) -> u32 {
        (f32::from_bits(a) * f32::from_bits(b)).to_bits()
    }
}

/// File storage stand-in: every lookup succeeds without output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFileSystem;

impl FileLookup for NoFileSystem {
    fn type_file(&mut self, _name: &str, _out: &mut dyn SerialOutput) -> ErrorCode {
        ErrorCode::Ok
    }

    fn size_file(&mut self, _name: &str, _out: &mut dyn SerialOutput) -> ErrorCode {
        ErrorCode::Ok
    }
}
