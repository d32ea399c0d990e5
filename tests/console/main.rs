//! Integration tests for the serial console.

mod channel;
mod session;
