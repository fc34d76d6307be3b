//! Error types for document indexing.

/// Raised when a document cannot be parsed into statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Malformed statement. Line and column are 1-based.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Create a syntax error
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    /// 1-based line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } => *line,
        }
    }
}
