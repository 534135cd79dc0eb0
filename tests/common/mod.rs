#![allow(dead_code)]

use async_trait::async_trait;
use cmdmatch::grammar::CommandDef;
use cmdmatch::matcher::{
    Cursor, MatchError, Params, ParseError, Resolved, ResolverTable, TypeResolver, compile,
    match_command,
};
use serde_json::json;

/// Context handed to every resolver: the channels a `channel` param may name.
#[derive(Debug, Clone)]
pub struct Channels {
    pub names: Vec<String>,
}

pub fn channels() -> Channels {
    Channels {
        names: vec!["general".into(), "random".into()],
    }
}

/// `#name` where `name` is one of the context's channels. Suspends once
/// before looking at the input.
pub struct ChannelResolver;

#[async_trait]
impl TypeResolver<Channels> for ChannelResolver {
    async fn resolve(
        &self,
        mut cursor: Cursor,
        context: &Channels,
    ) -> Result<Resolved, ParseError> {
        tokio::task::yield_now().await;
        if cursor.peek(0) != Some('#') {
            return Err(ParseError::new(cursor.token_index(), "Expected channel"));
        }
        cursor.consume(0);
        let name = cursor.consume_while(|c| c != ' ');
        if !context.names.contains(&name) {
            return Err(ParseError::new(
                cursor.token_index(),
                format!("Unknown channel {name}"),
            ));
        }
        Ok(Resolved::new(cursor, json!({ "channel": name })))
    }
}

/// Resolver table used across the integration tests:
/// `word`, `string`, `number`, `channel`, `flaky` (consumes then fails) and
/// `nothing` (consumes nothing). `missing` is deliberately unregistered.
pub fn resolvers() -> ResolverTable<Channels> {
    ResolverTable::with_builtins()
        .with("channel", ChannelResolver)
        .with_fn("number", number)
        .with_fn("flaky", flaky)
        .with_fn("nothing", nothing)
}

fn number(mut cursor: Cursor, _: &Channels) -> Result<Resolved, ParseError> {
    let digits = cursor.consume_while(|c| c.is_ascii_digit());
    match digits.parse::<u64>() {
        Ok(n) => Ok(Resolved::new(cursor, n)),
        Err(_) => Err(ParseError::new(cursor.token_index(), "Expected number")),
    }
}

fn flaky(mut cursor: Cursor, _: &Channels) -> Result<Resolved, ParseError> {
    cursor.consume_n(2);
    Err(ParseError::new(cursor.token_index(), "flaky failed"))
}

fn nothing(cursor: Cursor, _: &Channels) -> Result<Resolved, ParseError> {
    Ok(Resolved::new(cursor, serde_json::Value::Null))
}

/// Run both matchers and fail the test if they disagree, including on the
/// order in which parameters were captured.
pub async fn match_both(
    ast: &CommandDef,
    input: &str,
    resolvers: &ResolverTable<Channels>,
    context: &Channels,
) -> Result<Params, MatchError> {
    let interpreted = match_command(ast, input, resolvers, context).await;
    let compiled = compile(ast, resolvers).matches(input, context).await;
    assert_eq!(
        interpreted, compiled,
        "interpreter and compiled matcher disagree on {input:?}"
    );
    if let (Ok(interpreted), Ok(compiled)) = (&interpreted, &compiled) {
        assert_eq!(
            capture_order(interpreted),
            capture_order(compiled),
            "capture order differs on {input:?}"
        );
    }
    interpreted
}

/// Parameter names and values in the order they were captured.
pub fn capture_order(params: &Params) -> Vec<(&str, &serde_json::Value)> {
    params.iter().collect()
}
