//! Specializing compiler: turns a [`CommandDef`] and a resolver table into a
//! [`CommandMatcher`] that runs a flat list of prepared steps.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use super::alternatives::Alternatives;
use super::{
    Cursor, MatchError, Params, ParseError, Resolved, ResolverTable, TypeResolver,
    expect_delimiter,
};
use crate::grammar::{CommandDef, Node, ParamType};

/// Build a matcher for `ast` with every per-node decision made up front.
///
/// Resolvers are captured from `resolvers` now; later changes to the table
/// do not affect the matcher. A type name with no resolver compiles to a
/// step that fails with [`MatchError::UnknownType`] when reached, as
/// [`super::match_command`] does.
pub fn compile<C: Sync>(ast: &CommandDef, resolvers: &ResolverTable<C>) -> CommandMatcher<C> {
    let mut steps = Vec::with_capacity(ast.len());
    let mut mandatory_ahead = false;

    // walk backwards so each step knows whether a mandatory node follows it
    for (index, node) in ast.iter().enumerate().rev() {
        mandatory_ahead |= node.is_mandatory();
        steps.push(Step {
            index,
            delimited: index != 0,
            end_of_input: if mandatory_ahead {
                EndOfInput::Fail
            } else {
                EndOfInput::Finish
            },
            action: compile_node(index, node, resolvers),
        });
    }
    steps.reverse();

    debug!(steps = steps.len(), "compiled command matcher");
    CommandMatcher {
        steps,
        token_count: ast.len(),
    }
}

fn compile_node<C: Sync>(index: usize, node: &Node, resolvers: &ResolverTable<C>) -> Action<C> {
    let param = match node {
        Node::StringLiteral { values } => return Action::Literal(Alternatives::new(values)),
        Node::Param(param) => param,
    };

    match &param.ptype {
        ParamType::StringOr { values } => Action::Choice {
            name: param.name.clone(),
            optional: param.optional,
            alternatives: Alternatives::new(values),
        },
        ParamType::Typename { value: type_name } => match resolvers.get(type_name) {
            Some(resolver) => Action::Resolve {
                name: param.name.clone(),
                optional: param.optional,
                resolver: Arc::clone(resolver),
            },
            None => {
                warn!(token = index, type_name = %type_name, "no resolver registered for type");
                Action::MissingResolver {
                    type_name: type_name.clone(),
                }
            }
        },
    }
}

/// What to do when the input runs out before a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndOfInput {
    /// A literal or required param is still ahead
    Fail,
    /// Only optional params remain; return what was captured
    Finish,
}

struct Step<C: Sync> {
    index: usize,
    delimited: bool,
    end_of_input: EndOfInput,
    action: Action<C>,
}

enum Action<C: Sync> {
    Literal(Alternatives),
    Choice {
        name: String,
        optional: bool,
        alternatives: Alternatives,
    },
    Resolve {
        name: String,
        optional: bool,
        resolver: Arc<dyn TypeResolver<C>>,
    },
    MissingResolver {
        type_name: String,
    },
}

impl<C: Sync> Action<C> {
    fn kind(&self) -> &'static str {
        match self {
            Action::Literal(_) => "literal",
            Action::Choice { optional: false, .. } => "choice",
            Action::Choice { optional: true, .. } => "optional choice",
            Action::Resolve { optional: false, .. } => "resolve",
            Action::Resolve { optional: true, .. } => "optional resolve",
            Action::MissingResolver { .. } => "missing resolver",
        }
    }
}

/// Precompiled matcher produced by [`compile`].
///
/// Cheap to share: wrap it in an `Arc` to run many matches concurrently.
pub struct CommandMatcher<C: Sync> {
    steps: Vec<Step<C>>,
    token_count: usize,
}

impl<C: Sync> fmt::Debug for CommandMatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.steps.iter().map(|s| s.action.kind()).collect();
        f.debug_struct("CommandMatcher")
            .field("steps", &kinds)
            .finish()
    }
}

impl<C: Sync> CommandMatcher<C> {
    /// Match `input`, producing the same result as
    /// [`super::match_command`] on the source grammar.
    pub async fn matches(&self, input: &str, context: &C) -> Result<Params, MatchError> {
        let mut cursor = Cursor::new(input);
        let mut params = Params::new();

        for step in &self.steps {
            let backup = cursor.clone();

            if cursor.at_end() {
                match step.end_of_input {
                    EndOfInput::Fail => return Err(ParseError::unexpected_end(step.index).into()),
                    EndOfInput::Finish => return Ok(params),
                }
            }

            if step.delimited {
                expect_delimiter(&mut cursor, step.index)?;
            }

            match &step.action {
                Action::Literal(alternatives) => {
                    let Some(candidate) = alternatives.first_match(&cursor) else {
                        return Err(ParseError::expected_one_of(
                            step.index,
                            alternatives.expected(),
                            &cursor,
                        )
                        .into());
                    };
                    cursor.consume_n(candidate.len);
                }
                Action::Choice {
                    name,
                    optional,
                    alternatives,
                } => match alternatives.first_match(&cursor) {
                    Some(candidate) => {
                        params.insert(name.clone(), Value::String(candidate.value.clone()));
                        cursor.consume_n(candidate.len);
                    }
                    None if *optional => {
                        trace!(
                            token = step.index,
                            name = %name,
                            "optional choice not matched, backtracking"
                        );
                        cursor = backup;
                    }
                    None => {
                        return Err(ParseError::expected_one_of(
                            step.index,
                            alternatives.expected(),
                            &cursor,
                        )
                        .into());
                    }
                },
                Action::Resolve {
                    name,
                    optional,
                    resolver,
                } => {
                    let tagged = cursor.clone().with_token_index(step.index);
                    match resolver.resolve(tagged, context).await {
                        Ok(Resolved {
                            cursor: advanced,
                            value,
                        }) => {
                            cursor = advanced;
                            params.insert(name.clone(), value);
                        }
                        Err(error) if *optional => {
                            trace!(
                                token = step.index,
                                name = %name,
                                %error,
                                "optional parameter not resolved, backtracking"
                            );
                            cursor = backup;
                        }
                        Err(error) => return Err(error.into()),
                    }
                }
                Action::MissingResolver { type_name } => {
                    return Err(MatchError::UnknownType {
                        token_level: step.index,
                        type_name: type_name.clone(),
                    });
                }
            }
        }

        if !cursor.at_end() {
            return Err(ParseError::trailing_input(self.token_count, &cursor).into());
        }
        Ok(params)
    }
}
