use super::Cursor;

/// Number of upcoming characters quoted in "Expected one of ..." messages.
const FOUND_PREVIEW_LEN: usize = 5;

/// A command string did not fit the grammar.
///
/// `token_level` is the index of the grammar node being matched when the
/// failure happened, or the node count for trailing input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub token_level: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(token_level: usize, message: impl Into<String>) -> Self {
        Self {
            token_level,
            message: message.into(),
        }
    }

    pub(crate) fn unexpected_end(token_level: usize) -> Self {
        Self::new(token_level, "Unexpected end of command")
    }

    pub(crate) fn expected_delimiter(token_level: usize, found: char) -> Self {
        Self::new(token_level, format!("Expected \" \", found {found}"))
    }

    /// `expected` is the alternatives already joined with " or ".
    pub(crate) fn expected_one_of(token_level: usize, expected: &str, cursor: &Cursor) -> Self {
        let found: String = cursor.next_n(FOUND_PREVIEW_LEN).iter().collect();
        Self::new(token_level, format!("Expected one of {expected}, found {found}"))
    }

    pub(crate) fn trailing_input(token_level: usize, cursor: &Cursor) -> Self {
        Self::new(
            token_level,
            format!("Expected end of command, found {}", cursor.rest()),
        )
    }
}

/// Failure of a match call.
///
/// `Parse` is an ordinary mismatch. `UnknownType` means the grammar names a
/// type with no registered resolver; it is never swallowed by optional
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("internal matcher error: no resolver registered for type '{type_name}' (token {token_level})")]
    UnknownType {
        token_level: usize,
        type_name: String,
    },
}

impl MatchError {
    pub fn token_level(&self) -> usize {
        match self {
            MatchError::Parse(error) => error.token_level,
            MatchError::UnknownType { token_level, .. } => *token_level,
        }
    }

    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            MatchError::Parse(error) => Some(error),
            MatchError::UnknownType { .. } => None,
        }
    }
}
