use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Malformed record: stray characters, wrong token count, non-numeric token
    Syntax { line: usize, reason: &'static str },
    /// Well-formed record whose color or x is outside the configured bounds
    Range { line: usize, reason: &'static str },
    /// The underlying reader failed
    Io { line: usize, message: String },
}

impl InputError {
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Syntax { .. } => "syntax_error",
            InputError::Range { .. } => "range_error",
            InputError::Io { .. } => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            InputError::Syntax { reason, .. } | InputError::Range { reason, .. } => reason,
            InputError::Io { message, .. } => message,
        }
    }

    /// 1-based line number the error was detected on
    pub fn line(&self) -> usize {
        match self {
            InputError::Syntax { line, .. }
            | InputError::Range { line, .. }
            | InputError::Io { line, .. } => *line,
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {}: {}",
            self.line(),
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for InputError {}
