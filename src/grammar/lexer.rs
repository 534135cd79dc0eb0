use std::fmt;

use super::GrammarError;

/// Raw token produced by the grammar lexer.
/// The parser turns a sequence of these into a [`super::CommandDef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexToken {
    /// A bare word (e.g. "add", "word")
    Literal(String),
    /// A slash-separated set of words (e.g. "reminder/rm" -> ["reminder", "rm"])
    Alternation(Vec<String>),
    /// A double-quoted string with escapes resolved (e.g. "\"uwu\"" -> "uwu")
    Quoted(String),
    /// Opening angle bracket `<`
    OpenAngle,
    /// Closing angle bracket `>`
    CloseAngle,
    /// Opening square bracket `[`
    OpenBracket,
    /// Closing square bracket `]`
    CloseBracket,
    /// Name/type separator `:`
    Colon,
    /// Choice separator `|`
    Pipe,
}

impl fmt::Display for LexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexToken::Literal(word) => write!(f, "'{word}'"),
            LexToken::Alternation(words) => write!(f, "'{}'", words.join("/")),
            LexToken::Quoted(value) => write!(f, "\"{value}\""),
            LexToken::OpenAngle => f.write_str("'<'"),
            LexToken::CloseAngle => f.write_str("'>'"),
            LexToken::OpenBracket => f.write_str("'['"),
            LexToken::CloseBracket => f.write_str("']'"),
            LexToken::Colon => f.write_str("':'"),
            LexToken::Pipe => f.write_str("'|'"),
        }
    }
}

/// A token together with the char position it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub pos: usize,
    pub token: LexToken,
}

/// Tokenize a grammar string into a sequence of positioned `LexToken`s.
///
/// Bracket balancing is left to the parser; the lexer only rejects
/// unterminated quotes and empty slash alternatives.
pub fn tokenize(grammar: &str) -> Result<Vec<Spanned>, GrammarError> {
    let mut tokens = Vec::new();
    let mut chars = grammar.chars().enumerate().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '<' => LexToken::OpenAngle,
            '>' => LexToken::CloseAngle,
            '[' => LexToken::OpenBracket,
            ']' => LexToken::CloseBracket,
            ':' => LexToken::Colon,
            '|' => LexToken::Pipe,
            '"' => {
                chars.next(); // consume opening quote
                let value = consume_quoted(&mut chars)
                    .ok_or(GrammarError::UnclosedQuote(pos))?;
                tokens.push(Spanned {
                    pos,
                    token: LexToken::Quoted(value),
                });
                continue;
            }
            _ => {
                let word = consume_word(&mut chars);
                tokens.push(Spanned {
                    pos,
                    token: classify_word(&word, pos)?,
                });
                continue;
            }
        };
        chars.next();
        tokens.push(Spanned { pos, token });
    }

    Ok(tokens)
}

/// Read the body of a quoted string up to the closing `"`.
/// Returns `None` when the input ends first.
fn consume_quoted(
    chars: &mut std::iter::Peekable<std::iter::Enumerate<std::str::Chars<'_>>>,
) -> Option<String> {
    let mut value = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Some(value),
            '\\' => {
                let (_, escaped) = chars.next()?;
                value.push(escaped);
            }
            _ => value.push(c),
        }
    }
    None
}

fn consume_word(
    chars: &mut std::iter::Peekable<std::iter::Enumerate<std::str::Chars<'_>>>,
) -> String {
    let mut word = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if is_word_boundary(c) {
            break;
        }
        word.push(c);
        chars.next();
    }
    word
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '<' | '>' | '[' | ']' | ':' | '|' | '"')
}

/// Classify a raw word as a single literal or a slash alternation.
fn classify_word(word: &str, pos: usize) -> Result<LexToken, GrammarError> {
    if !word.contains('/') {
        return Ok(LexToken::Literal(word.to_string()));
    }
    let parts: Vec<String> = word.split('/').map(|s| s.to_string()).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(GrammarError::EmptyAlternative(pos));
    }
    Ok(LexToken::Alternation(parts))
}
