//! Injected input/output capability
//!
//! Every stage of the pipeline writes its output and diagnostics through an
//! [`Io`] implementation instead of touching stdout directly. [`ConsoleIo`] is
//! used by the binary; [`StringIo`] captures output in memory for tests and for
//! rendering assertion conditions.

use std::fmt;
use std::io::{Read, Write};

use tracing::warn;

/// Text output plus character-at-a-time input.
pub trait Io {
    /// Write text without a line terminator.
    fn write(&mut self, text: &str);

    /// Write text followed by a line terminator.
    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Formatted write, so `write!(io, ...)` and `writeln!(io, ...)` work on
    /// any `Io`.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(text) => self.write(text),
            None => self.write(&args.to_string()),
        }
    }

    /// Read one character, or `None` once input is exhausted.
    fn read_char(&mut self) -> Option<char>;
}

/// Console input and output.
#[derive(Debug, Default)]
pub struct ConsoleIo;

impl ConsoleIo {
    pub fn new() -> Self {
        ConsoleIo
    }
}

impl Io for ConsoleIo {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            warn!(error = %err, "failed to write to stdout");
        }
    }

    fn read_char(&mut self) -> Option<char> {
        read_utf8_char(&mut std::io::stdin().lock())
    }
}

/// Decode one UTF-8 character from `source`, reading only the bytes it needs.
///
/// Invalid or truncated sequences decode to U+FFFD.
fn read_utf8_char<R: Read>(source: &mut R) -> Option<char> {
    let mut bytes = [0u8; 4];
    if !read_byte(source, &mut bytes[0])? {
        return None;
    }

    let width = match bytes[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        lead => {
            warn!(byte = lead, "invalid UTF-8 lead byte on stdin");
            return Some(char::REPLACEMENT_CHARACTER);
        }
    };

    for byte in &mut bytes[1..width] {
        if !read_byte(source, byte)? {
            warn!("stdin ended inside a UTF-8 sequence");
            return Some(char::REPLACEMENT_CHARACTER);
        }
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(text) => text.chars().next(),
        Err(err) => {
            warn!(error = %err, "invalid UTF-8 sequence on stdin");
            Some(char::REPLACEMENT_CHARACTER)
        }
    }
}

/// Read a single byte into `byte`. `Some(false)` at end of input, `None` on
/// a read error.
fn read_byte<R: Read>(source: &mut R, byte: &mut u8) -> Option<bool> {
    let mut buf = [0u8; 1];
    match source.read(&mut buf) {
        Ok(0) => Some(false),
        Ok(_) => {
            *byte = buf[0];
            Some(true)
        }
        Err(err) => {
            warn!(error = %err, "failed to read from stdin");
            None
        }
    }
}

/// In-memory input and output.
///
/// Characters consumed through [`Io::read_char`] are echoed into the output,
/// so a captured transcript shows user input where it was typed.
#[derive(Debug, Clone, Default)]
pub struct StringIo {
    input: Vec<char>,
    position: usize,
    output: String,
}

impl StringIo {
    pub fn new(input: &str) -> Self {
        StringIo {
            input: input.chars().collect(),
            position: 0,
            output: String::new(),
        }
    }

    /// Everything written so far, including echoed input.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the buffer and return its output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Input characters not yet read.
    pub fn remaining_input(&self) -> String {
        self.input[self.position..].iter().collect()
    }
}

impl Io for StringIo {
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;
        self.output.push(ch);
        Some(ch)
    }
}
