// Scene errors: malformed scene text and file access failures

use thiserror::Error;

/// A scene file that could not be parsed. Every variant records the byte
/// offset and the 1-based line where the problem was found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, offset: usize, line: usize },
    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: unknown record '{name}'")]
    UnknownIdentifier {
        name: String,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: '{name}' is not an attribute of {record}")]
    UnknownAttribute {
        name: String,
        record: &'static str,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: missing '{separator}'")]
    MissingSeparator {
        separator: char,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: unterminated {what}")]
    Unterminated {
        what: &'static str,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: '{name}' given more than once")]
    DuplicateField {
        name: String,
        offset: usize,
        line: usize,
    },
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber {
        text: String,
        offset: usize,
        line: usize,
    },
}

impl LoadError {
    pub fn line(&self) -> usize {
        match self {
            LoadError::UnexpectedChar { line, .. }
            | LoadError::UnexpectedToken { line, .. }
            | LoadError::UnknownIdentifier { line, .. }
            | LoadError::UnknownAttribute { line, .. }
            | LoadError::MissingSeparator { line, .. }
            | LoadError::Unterminated { line, .. }
            | LoadError::UnexpectedEof { line, .. }
            | LoadError::DuplicateField { line, .. }
            | LoadError::InvalidNumber { line, .. } => *line,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            LoadError::UnexpectedChar { offset, .. }
            | LoadError::UnexpectedToken { offset, .. }
            | LoadError::UnknownIdentifier { offset, .. }
            | LoadError::UnknownAttribute { offset, .. }
            | LoadError::MissingSeparator { offset, .. }
            | LoadError::Unterminated { offset, .. }
            | LoadError::UnexpectedEof { offset, .. }
            | LoadError::DuplicateField { offset, .. }
            | LoadError::InvalidNumber { offset, .. } => *offset,
        }
    }
}

/// Failure to load or save a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] LoadError),
}
