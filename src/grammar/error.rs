#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("empty grammar")]
    Empty,
    #[error("unclosed quote starting at position {0}")]
    UnclosedQuote(usize),
    #[error("unclosed angle bracket at position {0}")]
    UnclosedAngleBracket(usize),
    #[error("unclosed square bracket at position {0}")]
    UnclosedSquareBracket(usize),
    #[error("empty alternative at position {0}")]
    EmptyAlternative(usize),
    #[error("missing parameter name at position {0}")]
    MissingParamName(usize),
    #[error("missing type for parameter '{0}'")]
    MissingParamType(String),
    #[error("duplicate parameter name '{0}'")]
    DuplicateParam(String),
    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { pos: usize, found: String },
}
