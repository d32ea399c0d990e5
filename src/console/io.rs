//! Transport-facing traits.
//!
//! The console never touches UART registers. Receiving goes through
//! [`RxSource`], called from the interrupt context, and everything the
//! console prints goes through [`SerialOutput`].

/// Raw receive side of a serial transport.
pub trait RxSource {
    /// Return the next byte held by the receiver, or `None` once no more
    /// receive events are pending.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Byte sink for echo, messages and command output.
///
/// Only [`put_byte`](SerialOutput::put_byte) is required.
pub trait SerialOutput {
    /// Send one byte.
    fn put_byte(&mut self, byte: u8);

    /// Send every byte of `text`, no line ending added.
    fn put_str(&mut self, text: &str) {
        self.put_bytes(text.as_bytes());
    }

    /// Send a raw byte slice.
    fn put_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_byte(byte);
        }
    }

    /// Send `value` as eight uppercase hex digits followed by a space.
    fn put_hex_word(&mut self, value: u32) {
        for shift in (0..8).rev() {
            let nibble = ((value >> (shift * 4)) & 0xF) as u8;
            self.put_byte(hex_digit(nibble));
        }
        self.put_byte(b' ');
    }

    /// Send `value` in decimal without leading zeros.
    fn put_decimal(&mut self, value: u32) {
        let mut digits = [0u8; 10];
        let mut start = digits.len();
        let mut rest = value;
        loop {
            start -= 1;
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        self.put_bytes(&digits[start..]);
    }
}

const fn hex_digit(nibble: u8) -> u8 {
    if nibble > 9 {
        nibble - 10 + b'A'
    } else {
        nibble + b'0'
    }
}

/// Captures output in a fixed buffer. Bytes past capacity are dropped.
impl<const N: usize> SerialOutput for heapless::Vec<u8, N> {
    fn put_byte(&mut self, byte: u8) {
        let _ = self.push(byte);
    }
}

/// Function signature for text output callbacks.
///
/// # Examples
///
/// ```rust
/// use uartcon::console::io::OutputFn;
///
/// let uart_output: OutputFn = |text| {
///     // Send text to the UART
///     print!("{}", text);
/// };
/// ```
pub type OutputFn = fn(&str);

/// Adapts an [`OutputFn`] callback to [`SerialOutput`].
///
/// Non-UTF-8 bytes are replaced with `?` since the callback takes text.
#[derive(Debug, Clone, Copy)]
pub struct FnOutput(pub OutputFn);

impl SerialOutput for FnOutput {
    fn put_byte(&mut self, byte: u8) {
        let ch = [if byte.is_ascii() { byte } else { b'?' }];
        if let Ok(s) = core::str::from_utf8(&ch) {
            (self.0)(s);
        }
    }

    fn put_str(&mut self, text: &str) {
        (self.0)(text);
    }
}
