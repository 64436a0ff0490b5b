//! Lexer (tokenizer) for Mini-PL source code
//!
//! Pulls characters from an [`InputBuffer`] and produces [`Lexeme`]s on demand
//! into a pending queue. Comments are recognized and dropped. A lexical error
//! is reported through the injected [`Io`], the rest of the offending line is
//! discarded and lexing resumes on the next line, so one bad token never stops
//! the whole file from being tokenized.

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use thiserror::Error;
use tracing::trace;

use super::reader::{InputBuffer, Position};
use crate::io::Io;

/// Words that lex as [`TokenKind::Keyword`] instead of identifiers.
pub const KEYWORDS: [&str; 11] = [
    "var", "for", "end", "in", "do", "read", "print", "int", "string", "bool", "assert",
];

/// Classification of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Separator,
    Operator,
    Number,
    String,
    Boolean,
    Comment,
    BlockComment,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Comment => "COMMENT",
            TokenKind::BlockComment => "BLOCKCOMMENT",
        };
        f.write_str(name)
    }
}

/// A classified, positioned fragment of source text.
///
/// String lexemes hold the unescaped literal, not the quoted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    kind: TokenKind,
    text: String,
    position: Position,
}

impl Lexeme {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Lexeme {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True if this lexeme is `text` classified as `kind`.
    pub fn is(&self, text: &str, kind: TokenKind) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} \"{}\"}}", self.kind, self.text)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

impl LexError {
    fn new(message: impl Into<String>, position: Position) -> Self {
        LexError {
            message: message.into(),
            position,
        }
    }
}

/// Lexer for Mini-PL source code
pub struct Lexer<'io, R> {
    input: InputBuffer<R>,
    io: &'io mut dyn Io,
    pending: VecDeque<Lexeme>,
    errored: bool,
}

impl<'io, R: Read> Lexer<'io, R> {
    pub fn new(input: InputBuffer<R>, io: &'io mut dyn Io) -> Self {
        Self {
            input,
            io,
            pending: VecDeque::new(),
            errored: false,
        }
    }

    /// True once any lexical error has been reported.
    pub fn errored(&self) -> bool {
        self.errored
    }

    /// The output sink diagnostics are written to.
    pub(crate) fn io(&mut self) -> &mut dyn Io {
        &mut *self.io
    }

    /// Tokenize one more lexeme into the pending queue.
    ///
    /// Returns `false` once the input is exhausted.
    pub fn lex_next(&mut self) -> bool {
        while self.input.has_current() {
            match self.scan() {
                Ok(Some(lexeme)) => {
                    trace!(lexeme = %lexeme, position = %lexeme.position(), "lexed");
                    self.pending.push_back(lexeme);
                    return true;
                }
                Ok(None) => {}
                Err(err) => {
                    self.report(&err);
                    self.skip_to_next_line();
                }
            }
        }
        false
    }

    /// Tokenize the whole input so every lexical error is reported up front.
    pub fn lex_all(&mut self) {
        while self.lex_next() {}
    }

    /// Pop the next lexeme, tokenizing lazily when the queue is empty.
    pub fn next_lexeme(&mut self) -> Option<Lexeme> {
        if self.pending.is_empty() && !self.lex_next() {
            return None;
        }
        self.pending.pop_front()
    }

    /// Recognize one token at the current position.
    ///
    /// Returns `Ok(None)` for input that produces no lexeme (whitespace and
    /// comments).
    fn scan(&mut self) -> Result<Option<Lexeme>, LexError> {
        let position = self.input.position();
        let Some(current) = self.current() else {
            return Ok(None);
        };
        // Whitespace stands in for the lookahead at end of input
        let next = self.lookahead().unwrap_or(' ');

        let lexeme = match (current, next) {
            ('/', '/') => {
                self.line_comment();
                return Ok(None);
            }
            ('/', '*') => {
                self.block_comment()?;
                return Ok(None);
            }
            (c, _) if c.is_alphabetic() => self.identifier_or_keyword(),
            (':', '=') | ('.', '.') => {
                self.input.advance();
                self.input.advance();
                Lexeme::new(TokenKind::Separator, format!("{}{}", current, next), position)
            }
            ('(' | ')' | ':' | ';', _) => {
                self.input.advance();
                Lexeme::new(TokenKind::Separator, current.to_string(), position)
            }
            ('<' | '=' | '!' | '&' | '+' | '-' | '/' | '*', _) => {
                self.input.advance();
                Lexeme::new(TokenKind::Operator, current.to_string(), position)
            }
            (c, _) if c.is_ascii_digit() => self.number()?,
            ('"', _) => self.string()?,
            (c, _) if c.is_whitespace() => {
                self.input.advance();
                return Ok(None);
            }
            _ => {
                self.input.advance();
                return Err(LexError::new(
                    format!(
                        "unrecognized token beginning with {} followed by {}",
                        current, next
                    ),
                    position,
                ));
            }
        };
        Ok(Some(lexeme))
    }

    /// `//` comment up to, but excluding, the end of the line.
    fn line_comment(&mut self) -> Lexeme {
        let position = self.input.position();
        self.input.advance();
        self.input.advance();

        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.input.advance();
        }
        Lexeme::new(TokenKind::Comment, text, position)
    }

    /// `/* ... */` comment; nested openers must each be closed.
    fn block_comment(&mut self) -> Result<Lexeme, LexError> {
        let position = self.input.position();
        self.input.advance();
        self.input.advance();

        let mut text = String::new();
        let mut depth = 0usize;
        while let Some(ch) = self.current() {
            match (ch, self.lookahead()) {
                ('/', Some('*')) => {
                    text.push_str("/*");
                    depth += 1;
                    self.input.advance();
                    self.input.advance();
                }
                ('*', Some('/')) if depth == 0 => {
                    self.input.advance();
                    self.input.advance();
                    return Ok(Lexeme::new(TokenKind::BlockComment, text, position));
                }
                ('*', Some('/')) => {
                    text.push_str("*/");
                    depth -= 1;
                    self.input.advance();
                    self.input.advance();
                }
                _ => {
                    text.push(ch);
                    self.input.advance();
                }
            }
        }

        Err(LexError::new(
            format!("unexpected end of blockcomment starting at {}", position),
            self.input.position(),
        ))
    }

    /// Letter followed by letters, digits or underscores.
    fn identifier_or_keyword(&mut self) -> Lexeme {
        let position = self.input.position();
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            text.push(ch);
            self.input.advance();
        }

        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Lexeme::new(kind, text, position)
    }

    /// Maximal run of digits that fits the integer type.
    fn number(&mut self) -> Result<Lexeme, LexError> {
        let position = self.input.position();
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.input.advance();
        }

        if text.parse::<i32>().is_err() {
            return Err(LexError::new("too high constant value", position));
        }
        Ok(Lexeme::new(TokenKind::Number, text, position))
    }

    /// Double-quoted literal on a single line with `\n`, `\t` and `\"` escapes.
    fn string(&mut self) -> Result<Lexeme, LexError> {
        let position = self.input.position();
        self.input.advance();

        let mut text = String::new();
        while let Some(ch) = self.current() {
            match ch {
                '\n' => break,
                '\\' => {
                    if !self.input.advance() {
                        break;
                    }
                    let escaped = match self.current() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        other => {
                            return Err(LexError::new(
                                format!(
                                    "unrecognized escape character {}",
                                    other.unwrap_or(' ')
                                ),
                                self.input.position(),
                            ));
                        }
                    };
                    text.push(escaped);
                    self.input.advance();
                }
                '"' => {
                    self.input.advance();
                    return Ok(Lexeme::new(TokenKind::String, text, position));
                }
                _ => {
                    text.push(ch);
                    self.input.advance();
                }
            }
        }

        Err(LexError::new(
            format!("unexpected end of string starting at {}", position),
            self.input.position(),
        ))
    }

    /// Record and print a lexical error.
    fn report(&mut self, err: &LexError) {
        self.errored = true;
        trace!(position = %err.position, message = %err.message, "lexical error");
        writeln!(self.io, "Lexical error at {}: {}", err.position, err.message);
    }

    /// Discard input up to the next newline.
    fn skip_to_next_line(&mut self) {
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            self.input.advance();
        }
    }

    fn current(&self) -> Option<char> {
        self.input.peek(0).ok()
    }

    fn lookahead(&self) -> Option<char> {
        self.input.peek(1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StringIo;
    use pretty_assertions::assert_eq;

    fn first_lexeme(source: &str) -> (Option<Lexeme>, bool, String) {
        let mut io = StringIo::default();
        let (lexeme, errored) = {
            let input = InputBuffer::from_text(source, 2).unwrap();
            let mut lexer = Lexer::new(input, &mut io);
            let lexeme = lexer.next_lexeme();
            (lexeme, lexer.errored())
        };
        (lexeme, errored, io.into_output())
    }

    fn lex_all(source: &str) -> (Vec<Lexeme>, bool) {
        let mut io = StringIo::default();
        let input = InputBuffer::from_text(source, 2).unwrap();
        let mut lexer = Lexer::new(input, &mut io);
        lexer.lex_all();
        let errored = lexer.errored();
        let mut lexemes = Vec::new();
        while let Some(lexeme) = lexer.next_lexeme() {
            lexemes.push(lexeme);
        }
        (lexemes, errored)
    }

    #[test]
    fn test_error_flag_false_initially() {
        let mut io = StringIo::default();
        let lexer = Lexer::new(InputBuffer::from_text("", 2).unwrap(), &mut io);
        assert!(!lexer.errored());
    }

    #[test]
    fn test_number() {
        let (lexeme, errored, output) = first_lexeme("123456");
        let lexeme = lexeme.unwrap();
        assert!(!errored);
        assert_eq!(output, "");
        assert_eq!(lexeme.kind(), TokenKind::Number);
        assert_eq!(lexeme.text(), "123456");
        assert_eq!(lexeme.position().to_string(), "1:1");
    }

    #[test]
    fn test_comment_skipped() {
        let (lexeme, _, output) = first_lexeme("// test\n123");
        let lexeme = lexeme.unwrap();
        assert_eq!(output, "");
        assert_eq!(lexeme.kind(), TokenKind::Number);
        assert_eq!(lexeme.position().to_string(), "2:1");
    }

    #[test]
    fn test_block_comment_skipped() {
        let (lexeme, _, output) = first_lexeme("/**/\n123");
        let lexeme = lexeme.unwrap();
        assert_eq!(output, "");
        assert_eq!(lexeme.text(), "123");
        assert_eq!(lexeme.position().to_string(), "2:1");
    }

    #[test]
    fn test_comment_text() {
        let mut io = StringIo::default();
        let mut lexer = Lexer::new(InputBuffer::from_text("// test", 2).unwrap(), &mut io);
        let comment = lexer.line_comment();
        assert_eq!(comment.kind(), TokenKind::Comment);
        assert_eq!(comment.text(), " test");
    }

    #[test]
    fn test_nested_block_comment_text() {
        let mut io = StringIo::default();
        let source = "/*test/*test*/test*/";
        let mut lexer = Lexer::new(InputBuffer::from_text(source, 2).unwrap(), &mut io);
        let comment = lexer.block_comment().unwrap();
        assert_eq!(comment.kind(), TokenKind::BlockComment);
        assert_eq!(comment.text(), "test/*test*/test");
        assert!(!lexer.input.has_current());
    }

    #[test]
    fn test_nested_block_comment_hides_code() {
        let (lexemes, errored) = lex_all("/* a /* b */ print 1; */ print 2;");
        assert!(!errored);
        let texts: Vec<&str> = lexemes.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["print", "2", ";"]);
    }

    #[test]
    fn test_whitespace_positions() {
        let (lexemes, _) = lex_all("  123 \n\n 456 ");
        assert_eq!(lexemes[0].position().to_string(), "1:3");
        assert_eq!(lexemes[1].position().to_string(), "3:2");
    }

    #[test]
    fn test_identifier_and_keyword() {
        let (lexeme, _, _) = first_lexeme("id_1");
        let lexeme = lexeme.unwrap();
        assert_eq!(lexeme.kind(), TokenKind::Identifier);
        assert_eq!(lexeme.text(), "id_1");

        let (lexeme, _, _) = first_lexeme("print");
        assert_eq!(lexeme.unwrap().kind(), TokenKind::Keyword);
    }

    #[test]
    fn test_string_escapes() {
        let (lexeme, errored, _) = first_lexeme(r#""a\tb\n\"c\"""#);
        let lexeme = lexeme.unwrap();
        assert!(!errored);
        assert_eq!(lexeme.kind(), TokenKind::String);
        assert_eq!(lexeme.text(), "a\tb\n\"c\"");
    }

    #[test]
    fn test_separators_and_operators() {
        let (lexemes, errored) = lex_all("x := 1..2; ( ) : < = ! & + - / *");
        assert!(!errored);
        let kinds: Vec<(TokenKind, &str)> =
            lexemes.iter().map(|l| (l.kind(), l.text())).collect();
        assert_eq!(
            kinds,
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Separator, ":="),
                (TokenKind::Number, "1"),
                (TokenKind::Separator, ".."),
                (TokenKind::Number, "2"),
                (TokenKind::Separator, ";"),
                (TokenKind::Separator, "("),
                (TokenKind::Separator, ")"),
                (TokenKind::Separator, ":"),
                (TokenKind::Operator, "<"),
                (TokenKind::Operator, "="),
                (TokenKind::Operator, "!"),
                (TokenKind::Operator, "&"),
                (TokenKind::Operator, "+"),
                (TokenKind::Operator, "-"),
                (TokenKind::Operator, "/"),
                (TokenKind::Operator, "*"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_recovers() {
        let (lexeme, errored, output) = first_lexeme("\"broken string\n123");
        let lexeme = lexeme.unwrap();
        assert!(errored);
        assert!(output.starts_with("Lexical error at 1:15: unexpected end of string"));
        assert_eq!(lexeme.kind(), TokenKind::Number);
        assert_eq!(lexeme.text(), "123");
    }

    #[test]
    fn test_lone_quote_errors() {
        let (lexeme, errored, _) = first_lexeme("\"");
        assert!(errored);
        assert!(lexeme.is_none());
    }

    #[test]
    fn test_lexical_errors() {
        for source in [
            "unrecognized token #;",
            "print 99999999999999999999999;",
            "print \"test \\x\";",
            "\"endless string literal",
            "/* endless block comment",
        ] {
            let (_, errored) = lex_all(source);
            assert!(errored, "expected a lexical error in {:?}", source);
        }
    }

    #[test]
    fn test_error_is_sticky_and_rest_of_line_skipped() {
        let (lexemes, errored) = lex_all("print # 1;\nprint 2;");
        assert!(errored);
        let texts: Vec<&str> = lexemes.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["print", "print", "2", ";"]);
    }

    #[test]
    fn test_lexeme_display() {
        let lexeme = Lexeme::new(TokenKind::Number, "123", Position::default());
        assert_eq!(lexeme.to_string(), "{NUMBER \"123\"}");
    }
}
