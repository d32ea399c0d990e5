//! Interrupt-fed serial command console.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  UART interrupt │───▶│ ReceiveChannel  │───▶│   LineEditor    │
//! │   (Producer)    │    │  (lock-free)    │    │  (Consumer side)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │ terminator
//!                                                        ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │◀───│   Validator     │◀───│   Tokenizer     │
//! │  (Services)     │    │ (COMMAND_TABLE) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Only the interrupt side touches [`Producer`]. Everything else runs on the
//! foreground loop inside [`Console`].
//!
//! # Usage
//!
//! ```rust
//! use uartcon::console::{Console, ConsoleConfig, ErrorCode, ReceiveChannel};
//! use uartcon::console::handlers::{NativeKernel, NibbleDecoder, NoFileSystem, Services};
//!
//! let mut channel: ReceiveChannel<64> = ReceiveChannel::new();
//! channel.reset();
//! let (mut producer, consumer) = channel.split();
//!
//! // Normally done by the receive interrupt.
//! for &byte in b"fmul 41520000 41520000\r" {
//!     producer.push(byte);
//! }
//!
//! let mut out: heapless::Vec<u8, 128> = heapless::Vec::new();
//! let mut kernel = NativeKernel;
//! let mut files = NoFileSystem;
//! let mut services = Services {
//!     output: &mut out,
//!     hex: &NibbleDecoder,
//!     kernel: &mut kernel,
//!     files: &mut files,
//! };
//!
//! let mut console = Console::new(consumer, ConsoleConfig::default());
//! assert_eq!(console.drain(&mut services), 1);
//! assert!(out.ends_with(b"432C4400 \n\r"));
//! ```

pub mod channel;
pub mod command;
pub mod config;
pub mod error;
pub mod handlers;
pub mod io;
pub mod line;
pub mod tokenizer;

pub use channel::{Consumer, Producer, RX_CAPACITY, ReceiveChannel};
pub use command::{COMMAND_TABLE, CommandDescriptor, CommandKind, validate, validate_and_dispatch};
pub use config::ConsoleConfig;
pub use error::{ConfigError, ErrorCode};
pub use handlers::{CommandHandler, Services};
pub use io::{RxSource, SerialOutput};
pub use line::LineEditor;
pub use tokenizer::{Parameter, Parameters, tokenize_line};

use config::ASCII_LF;
use handlers::LINE_END;

/// Foreground console session.
///
/// Owns the consumer half of the receive channel and the line being edited.
/// Collaborators are passed in per call through [`Services`].
#[derive(Debug)]
pub struct Console<'a, const N: usize = RX_CAPACITY> {
    rx: Consumer<'a, N>,
    editor: LineEditor,
    config: ConsoleConfig,
}

impl<'a, const N: usize> Console<'a, N> {
    /// Create a session reading from `rx`.
    pub fn new(rx: Consumer<'a, N>, config: ConsoleConfig) -> Self {
        Self {
            rx,
            editor: LineEditor::with_terminator(config.terminator),
            config,
        }
    }

    /// Consume at most one byte.
    ///
    /// Returns the dispatch result when that byte completed a line.
    pub fn poll(&mut self, services: &mut Services<'_>) -> Option<ErrorCode> {
        let byte = self.rx.pop()?;
        self.process_byte(byte, services)
    }

    /// Consume until the channel is empty.
    ///
    /// Returns the number of lines dispatched.
    pub fn drain(&mut self, services: &mut Services<'_>) -> usize {
        let mut lines = 0;
        while !self.rx.is_empty() {
            if self.poll(services).is_some() {
                lines += 1;
            }
        }
        lines
    }

    /// Busy-poll forever.
    pub fn run(&mut self, services: &mut Services<'_>) -> ! {
        loop {
            self.poll(services);
        }
    }

    /// Echo and edit one byte, dispatching the line on the terminator.
    pub fn process_byte(&mut self, byte: u8, services: &mut Services<'_>) -> Option<ErrorCode> {
        if self.config.echo {
            services.output.put_byte(byte);
        }

        let line = self.editor.append(byte)?;
        if self.config.echo && self.config.newline_after_terminator {
            services.output.put_byte(ASCII_LF);
        }

        trace!("line complete, {} bytes", line.len());
        let params = tokenize_line(line);
        let result = validate_and_dispatch(&params, services);
        if result == ErrorCode::UnknownCommand {
            debug!("unknown command");
        }
        trace!("dispatch result {}", result);

        report(result, &mut *services.output);
        Some(result)
    }
}

/// Print the user-facing message for `code`, followed by a line ending.
///
/// `Ok` prints nothing. `Unexpected` prints its banner and then takes the
/// `Ok` path, which adds nothing further.
pub fn report(code: ErrorCode, out: &mut dyn SerialOutput) {
    if let Some(message) = code.message() {
        out.put_str(message);
        out.put_str(LINE_END);
    }
}
