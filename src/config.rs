// Configuration for a single interpreter run

/// Lookahead window used when none is requested.
///
/// Two characters are enough for every two-character token in the language
/// (`:=`, `..`, `//`, `/*`).
pub const DEFAULT_WINDOW_SIZE: usize = 2;

/// Smallest lookahead window the lexer can work with.
pub const MIN_WINDOW_SIZE: usize = 2;

/// Options controlling how a program is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size of the buffered reader's lookahead window.
    pub window_size: usize,
    /// Whether to type-check the program before executing it.
    pub semantic_analysis: bool,
}

impl Config {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn without_analysis(mut self) -> Self {
        self.semantic_analysis = false;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_size: DEFAULT_WINDOW_SIZE,
            semantic_analysis: true,
        }
    }
}
