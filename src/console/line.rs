//! Line editor for console input

use super::config::{ASCII_BACKSPACE, ASCII_CR, ASCII_DEL, MAX_LINE_LEN};

/// Accumulates received bytes into one editable command line.
#[derive(Debug, Clone)]
pub struct LineEditor {
    buf: [u8; MAX_LINE_LEN],
    cursor: usize,
    terminator: u8,
}

impl LineEditor {
    /// Create an empty editor that completes lines on CR.
    pub const fn new() -> Self {
        Self::with_terminator(ASCII_CR)
    }

    /// Create an empty editor that completes lines on `terminator`.
    pub const fn with_terminator(terminator: u8) -> Self {
        Self {
            buf: [0; MAX_LINE_LEN],
            cursor: 0,
            terminator,
        }
    }

    /// Feed one byte.
    ///
    /// Returns the completed line, terminator excluded, when `byte` is the
    /// terminator; the editor is already empty again at that point.
    /// Backspace and delete remove the last byte. Anything else is stored,
    /// except that bytes past [`MAX_LINE_LEN`] are dropped.
    pub fn append(&mut self, byte: u8) -> Option<&[u8]> {
        if byte == self.terminator {
            let len = self.cursor;
            self.cursor = 0;
            return Some(&self.buf[..len]);
        }

        match byte {
            ASCII_BACKSPACE | ASCII_DEL => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            _ => {
                if self.cursor < MAX_LINE_LEN {
                    self.buf[self.cursor] = byte;
                    self.cursor += 1;
                }
            }
        }
        None
    }

    /// Current length of the line being edited.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes entered so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// True when nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
