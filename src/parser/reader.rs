//! Buffered source reader with a fixed lookahead window
//!
//! [`InputBuffer`] pulls bytes from any [`Read`] source into a sliding window of
//! `k` slots and tracks the [`Position`] of the current character. The lexer
//! only ever needs the current character and one character of lookahead.

use std::collections::VecDeque;
use std::fmt;
use std::io::{Bytes, Read};

use thiserror::Error;
use tracing::warn;

use crate::config::MIN_WINDOW_SIZE;

/// Line and column of a character in the source, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    #[error("lookahead window of {0} is too small, at least {min} is required", min = MIN_WINDOW_SIZE)]
    WindowTooSmall(usize),

    #[error("invalid peek index {index} for a window of {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("no character at peek index {0}, input has ended")]
    EndOfInput(usize),
}

/// Sliding lookahead window over a byte source.
pub struct InputBuffer<R> {
    source: Bytes<R>,
    exhausted: bool,
    window: VecDeque<Option<u8>>,
    size: usize,
    position: Position,
}

impl<'a> InputBuffer<&'a [u8]> {
    /// Buffer an in-memory program text.
    pub fn from_text(text: &'a str, size: usize) -> Result<Self, ReaderError> {
        InputBuffer::new(text.as_bytes(), size)
    }
}

impl<R: Read> InputBuffer<R> {
    /// Wrap `source` in a window of `size` characters and fill it.
    pub fn new(source: R, size: usize) -> Result<Self, ReaderError> {
        if size < MIN_WINDOW_SIZE {
            return Err(ReaderError::WindowTooSmall(size));
        }

        let mut buffer = InputBuffer {
            source: source.bytes(),
            exhausted: false,
            window: VecDeque::with_capacity(size),
            size,
            position: Position::default(),
        };
        for _ in 0..size {
            let byte = buffer.pull();
            buffer.window.push_back(byte);
        }
        Ok(buffer)
    }

    /// True if the current slot holds a character.
    pub fn has_current(&self) -> bool {
        matches!(self.window.front(), Some(Some(_)))
    }

    /// True if the first lookahead slot holds a character.
    pub fn has_next(&self) -> bool {
        matches!(self.window.get(1), Some(Some(_)))
    }

    /// Shift the window by one character and update the position.
    ///
    /// Returns whether a current character exists after the shift.
    pub fn advance(&mut self) -> bool {
        let previous = self.window.pop_front().flatten();
        let byte = self.pull();
        self.window.push_back(byte);

        self.position.column += 1;
        if previous == Some(b'\n') {
            self.position.line += 1;
            self.position.column = 1;
        }

        self.has_current()
    }

    /// Character at `index` in the window, 0 being the current one.
    pub fn peek(&self, index: usize) -> Result<char, ReaderError> {
        let slot = self.window.get(index).ok_or(ReaderError::OutOfRange {
            index,
            size: self.size,
        })?;
        slot.map(char::from).ok_or(ReaderError::EndOfInput(index))
    }

    /// Position of the current character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Window size this buffer was created with.
    pub fn window_size(&self) -> usize {
        self.size
    }

    fn pull(&mut self) -> Option<u8> {
        if self.exhausted {
            return None;
        }
        match self.source.next() {
            Some(Ok(byte)) => Some(byte),
            Some(Err(err)) => {
                warn!(error = %err, "source read failed, treating as end of input");
                self.exhausted = true;
                None
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}
