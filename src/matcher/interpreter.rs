//! AST-walking matcher.

use serde_json::Value;
use tracing::trace;

use super::alternatives::longest_match;
use super::{Cursor, MatchError, Params, ParseError, Resolved, ResolverTable, expect_delimiter};
use crate::grammar::{CommandDef, Node, ParamType};

/// Match `input` against `ast`, returning the captured parameters.
///
/// Optional parameters that fail to match leave the cursor exactly where it
/// was before their delimiter. Resolvers are awaited one at a time, in
/// grammar order, each with its own clone of the cursor and `context`.
pub async fn match_command<C: Sync>(
    ast: &CommandDef,
    input: &str,
    resolvers: &ResolverTable<C>,
    context: &C,
) -> Result<Params, MatchError> {
    let mut cursor = Cursor::new(input);
    let mut params = Params::new();

    for (i, node) in ast.iter().enumerate() {
        let backup = cursor.clone();

        if cursor.at_end() {
            if ast.nodes()[i..].iter().any(Node::is_mandatory) {
                return Err(ParseError::unexpected_end(i).into());
            }
            break;
        }

        if i != 0 {
            expect_delimiter(&mut cursor, i)?;
        }

        let param = match node {
            Node::StringLiteral { values } => {
                let Some(matched) = longest_match(&cursor, values) else {
                    let expected = values.join(" or ");
                    return Err(ParseError::expected_one_of(i, &expected, &cursor).into());
                };
                cursor.consume_n(matched.chars().count());
                continue;
            }
            Node::Param(param) => param,
        };

        match &param.ptype {
            ParamType::StringOr { values } => match longest_match(&cursor, values) {
                Some(matched) => {
                    params.insert(param.name.clone(), Value::String(matched.to_string()));
                    cursor.consume_n(matched.chars().count());
                }
                None if param.optional => {
                    trace!(
                        token = i,
                        name = %param.name,
                        "optional choice not matched, backtracking"
                    );
                    cursor = backup;
                }
                None => {
                    let expected = values.join(" or ");
                    return Err(ParseError::expected_one_of(i, &expected, &cursor).into());
                }
            },
            ParamType::Typename { value: type_name } => {
                let resolver = resolvers
                    .get(type_name)
                    .ok_or_else(|| MatchError::UnknownType {
                        token_level: i,
                        type_name: type_name.clone(),
                    })?;
                let tagged = cursor.clone().with_token_index(i);
                match resolver.resolve(tagged, context).await {
                    Ok(Resolved {
                        cursor: advanced,
                        value,
                    }) => {
                        cursor = advanced;
                        params.insert(param.name.clone(), value);
                    }
                    Err(error) if param.optional => {
                        trace!(
                            token = i,
                            name = %param.name,
                            %error,
                            "optional parameter not resolved, backtracking"
                        );
                        cursor = backup;
                    }
                    Err(error) => return Err(error.into()),
                }
            }
        }
    }

    if !cursor.at_end() {
        return Err(ParseError::trailing_input(ast.len(), &cursor).into());
    }
    Ok(params)
}
