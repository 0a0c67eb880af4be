//! Error types for parsing and rendering confl sources.

use thiserror::Error;

/// Faults raised while evaluating a single value expression.
///
/// These carry no position; the parser wraps them in [`ConflError::Value`]
/// together with the line the expression came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A postfix token that is neither a number, a declared constant, nor an operator.
    /// Undeclared constant references land here as well.
    #[error("Unknown token in expression: {0}")]
    UnknownToken(String),

    /// The postfix stack did not finish with exactly one value, or an operator
    /// ran out of operands.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// The expression is not a postfix block, an integer, or a quoted string.
    #[error("Invalid constant value: {0}")]
    InvalidValue(String),

    /// A text value reached an arithmetic operator.
    #[error("type mismatch in expression: '{operator}' needs integer operands")]
    TypeMismatch { operator: String },

    #[error("division by zero in expression: {0}")]
    DivisionByZero(String),

    /// Integer literal out of range, or an operator result that does not fit in `i64`.
    #[error("integer overflow in expression: {0}")]
    Overflow(String),
}

/// The two failure kinds a parse can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grammar/shape failure: bad declaration, bad header, unclosed struct, bad field line.
    Syntax,
    /// Expression/value failure.
    Value,
}

/// Errors that can occur while parsing or rendering a confl document.
#[derive(Error, Debug)]
pub enum ConflError {
    /// The source does not follow the line grammar.
    /// `line` is the 1-based physical line where the error was detected.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A value expression could not be evaluated.
    #[error("Value error at line {line}: {source}")]
    Value {
        line: usize,
        #[source]
        source: EvalError,
    },

    /// JSON rendering failed.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConflError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        ConflError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn value(line: usize, source: EvalError) -> Self {
        ConflError::Value { line, source }
    }

    /// Which of the two parse failure kinds this is. Rendering errors count as
    /// value failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConflError::Syntax { .. } => ErrorKind::Syntax,
            ConflError::Value { .. } | ConflError::Json(_) => ErrorKind::Value,
        }
    }

    /// 1-based line of the offending source line, if the error came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConflError::Syntax { line, .. } | ConflError::Value { line, .. } => Some(*line),
            ConflError::Json(_) => None,
        }
    }
}

/// Convenience alias used throughout confl-core.
pub type Result<T> = std::result::Result<T, ConflError>;
