//! # uartcon - serial command console for bare-metal targets
//!
//! A small command console that sits between a UART receive interrupt and a
//! cooperative foreground loop. Bytes arrive asynchronously, are gathered
//! into an editable line, and each completed line is tokenized, checked
//! against a fixed command table, and dispatched to a handler.
//!
//! ## Features
//!
//! ### Receive Path
//! - **Lock-free SPSC channel**: fixed-capacity byte ring, one writer per cursor
//! - **No backpressure**: an overrunning producer overwrites the oldest bytes
//!
//! ### Line Handling
//! - **Line editor**: backspace/delete, length clamp, terminator detection
//! - **Tokenizer**: space-delimited parameters with bounded length and count
//!
//! ### Commands
//! - `type`, `size`: file lookup through a [`FileLookup`](console::handlers::FileLookup) service
//! - `hex`: print the bytes spelled by a hex string
//! - `fmul`, `fadd`, `fenc`: IEEE-754 single precision through a
//!   [`FloatKernel`](console::handlers::FloatKernel) service
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! uartcon = "0.1.0"
//! ```
//!
//! ### Wiring the interrupt and the loop
//!
//! ```rust,no_run
//! use uartcon::console::{Console, ConsoleConfig, ReceiveChannel, RxSource};
//! use uartcon::console::handlers::{NativeKernel, NibbleDecoder, NoFileSystem, Services};
//! use uartcon::console::io::FnOutput;
//!
//! struct Uart;
//! impl RxSource for Uart {
//!     fn read_byte(&mut self) -> Option<u8> { None }
//! }
//!
//! let mut channel: ReceiveChannel = ReceiveChannel::new();
//! channel.reset();
//! let (mut producer, consumer) = channel.split();
//!
//! // In the receive interrupt:
//! producer.service(&mut Uart);
//!
//! // In the foreground loop:
//! let mut output = FnOutput(|text| print!("{}", text));
//! let mut kernel = NativeKernel;
//! let mut files = NoFileSystem;
//! let mut services = Services {
//!     output: &mut output,
//!     hex: &NibbleDecoder,
//!     kernel: &mut kernel,
//!     files: &mut files,
//! };
//! let mut console = Console::new(consumer, ConsoleConfig::default());
//! console.run(&mut services);
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Hosted targets for testing
//! - Any platform supporting Rust's `core` library with atomic load/store
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod log;

/// Serial command console.
///
/// Receive channel, line editor, tokenizer, command table, validator and
/// handlers, plus the [`Console`](console::Console) session tying them to a
/// foreground loop.
pub mod console;
