use std::collections::HashSet;

use super::lexer::{LexToken, Spanned, tokenize};
use super::{CommandDef, GrammarError, Node, Param, ParamType};

/// Parse a grammar string into a [`CommandDef`].
///
/// Parameter names must be unique; every alternative set must be non-empty.
pub fn parse_grammar(grammar: &str) -> Result<CommandDef, GrammarError> {
    let tokens = tokenize(grammar)?;
    if tokens.is_empty() {
        return Err(GrammarError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        index: 0,
        seen_names: HashSet::new(),
    };
    let mut nodes = Vec::new();
    while let Some(spanned) = parser.next() {
        nodes.push(parser.parse_node(spanned)?);
    }

    Ok(CommandDef::new(nodes))
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    index: usize,
    seen_names: HashSet<String>,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<&'a Spanned> {
        let spanned = self.tokens.get(self.index)?;
        self.index += 1;
        Some(spanned)
    }

    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.index)
    }

    fn parse_node(&mut self, spanned: &'a Spanned) -> Result<Node, GrammarError> {
        match &spanned.token {
            LexToken::Literal(word) => Ok(Node::StringLiteral {
                values: vec![word.clone()],
            }),
            LexToken::Alternation(words) => Ok(Node::StringLiteral {
                values: words.clone(),
            }),
            LexToken::OpenAngle => self.parse_param(spanned.pos, false),
            LexToken::OpenBracket => self.parse_param(spanned.pos, true),
            _ => Err(unexpected(spanned)),
        }
    }

    /// Parse `name: type` or `name: "a" | "b"` followed by the closing bracket.
    /// The opening bracket at `start` has already been consumed.
    fn parse_param(&mut self, start: usize, optional: bool) -> Result<Node, GrammarError> {
        let unclosed = || {
            if optional {
                GrammarError::UnclosedSquareBracket(start)
            } else {
                GrammarError::UnclosedAngleBracket(start)
            }
        };

        let name = match self.next() {
            Some(Spanned {
                token: LexToken::Literal(name),
                ..
            }) => name.clone(),
            Some(s) if s.token == LexToken::Colon || is_close(&s.token, optional) => {
                return Err(GrammarError::MissingParamName(s.pos));
            }
            Some(s) => return Err(unexpected(s)),
            None => return Err(unclosed()),
        };

        match self.next() {
            Some(s) if s.token == LexToken::Colon => {}
            Some(s) if is_close(&s.token, optional) => {
                return Err(GrammarError::MissingParamType(name));
            }
            Some(s) => return Err(unexpected(s)),
            None => return Err(unclosed()),
        }

        let ptype = match self.next() {
            Some(Spanned {
                token: LexToken::Literal(type_name),
                ..
            }) => ParamType::Typename {
                value: type_name.clone(),
            },
            Some(Spanned {
                pos,
                token: LexToken::Quoted(first),
            }) => ParamType::StringOr {
                values: self.parse_choices(*pos, first, optional, start)?,
            },
            Some(s) if is_close(&s.token, optional) => {
                return Err(GrammarError::MissingParamType(name));
            }
            Some(s) => return Err(unexpected(s)),
            None => return Err(unclosed()),
        };

        match self.next() {
            Some(s) if is_close(&s.token, optional) => {}
            Some(s) => return Err(unexpected(s)),
            None => return Err(unclosed()),
        }

        if !self.seen_names.insert(name.clone()) {
            return Err(GrammarError::DuplicateParam(name));
        }

        Ok(Node::Param(Param {
            name,
            optional,
            ptype,
        }))
    }

    /// Collect `"a" | "b" | ...` after the first quoted value has been read.
    fn parse_choices(
        &mut self,
        first_pos: usize,
        first: &str,
        optional: bool,
        start: usize,
    ) -> Result<Vec<String>, GrammarError> {
        if first.is_empty() {
            return Err(GrammarError::EmptyAlternative(first_pos));
        }
        let mut values = vec![first.to_string()];

        while let Some(pipe) = self.peek().filter(|s| s.token == LexToken::Pipe) {
            self.index += 1;
            match self.next() {
                Some(Spanned {
                    pos,
                    token: LexToken::Quoted(value),
                }) => {
                    if value.is_empty() {
                        return Err(GrammarError::EmptyAlternative(*pos));
                    }
                    values.push(value.clone());
                }
                Some(s) if is_close(&s.token, optional) => {
                    return Err(GrammarError::EmptyAlternative(pipe.pos));
                }
                Some(s) => return Err(unexpected(s)),
                None if optional => return Err(GrammarError::UnclosedSquareBracket(start)),
                None => return Err(GrammarError::UnclosedAngleBracket(start)),
            }
        }

        Ok(values)
    }
}

fn is_close(token: &LexToken, optional: bool) -> bool {
    if optional {
        *token == LexToken::CloseBracket
    } else {
        *token == LexToken::CloseAngle
    }
}

fn unexpected(spanned: &Spanned) -> GrammarError {
    GrammarError::UnexpectedToken {
        pos: spanned.pos,
        found: spanned.token.to_string(),
    }
}
