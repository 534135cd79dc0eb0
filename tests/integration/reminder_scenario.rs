use cmdmatch::grammar::{parse_grammar, render_grammar};
use cmdmatch::matcher::{MatchError, Params, ParseError, ResolverTable};
use rstest::{fixture, rstest};
use serde_json::json;

use super::common::{Channels, channels, match_both, resolvers};

const REMINDER: &str =
    r#"reminder/rm add [emote: "uwu" | "owo"] <duration: word> <text: string>"#;
const NOTIFY: &str = "notify [target: channel] <text: string>";

#[fixture]
fn table() -> ResolverTable<Channels> {
    resolvers()
}

fn params(value: serde_json::Value) -> Params {
    value
        .as_object()
        .unwrap()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[rstest]
#[case::all_params(
    "rm add owo 10s howdy there friend",
    json!({"emote": "owo", "duration": "10s", "text": "howdy there friend"}),
)]
#[case::optional_missing(
    "rm add 10s howdy there friend",
    json!({"duration": "10s", "text": "howdy there friend"}),
)]
#[case::long_alias(
    "reminder add uwu 5m stretch",
    json!({"emote": "uwu", "duration": "5m", "text": "stretch"}),
)]
#[tokio::test]
async fn reminder_matches(
    table: ResolverTable<Channels>,
    #[case] input: &str,
    #[case] expected: serde_json::Value,
) {
    let ast = parse_grammar(REMINDER).unwrap();
    let result = match_both(&ast, input, &table, &channels()).await.unwrap();
    assert_eq!(result, params(expected));
}

#[rstest]
#[case::glued_choice("rm addowo howdy there friend", 2, "Expected \" \", found o")]
#[case::missing_text("rm add owo 10s", 4, "Unexpected end of command")]
#[case::missing_text_with_space(
    "rm add owo 10s ",
    4,
    "Expected string, found end of command"
)]
#[case::unknown_verb("rm delete 1", 1, "Expected one of add, found delet")]
// an optional choice commits to "owo" without looking past it
#[case::choice_prefix_commits("rm add owoo later", 3, "Expected \" \", found o")]
#[tokio::test]
async fn reminder_errors(
    table: ResolverTable<Channels>,
    #[case] input: &str,
    #[case] token_level: usize,
    #[case] message: &str,
) {
    let ast = parse_grammar(REMINDER).unwrap();
    let context = channels();
    let error = match_both(&ast, input, &table, &context).await.unwrap_err();
    assert_eq!(
        error,
        MatchError::Parse(ParseError::new(token_level, message))
    );
    assert_eq!(error.to_string(), message);
}

#[test]
fn reminder_renders_as_usage() {
    let ast = parse_grammar(REMINDER).unwrap();
    assert_eq!(
        render_grammar(&ast),
        "reminder/rm add [uwu/owo] <DURATION> <TEXT>"
    );
}

#[rstest]
#[case::known(
    "notify #general hello",
    json!({"target": {"channel": "general"}, "text": "hello"}),
)]
#[case::default_target("notify hello", json!({"text": "hello"}))]
#[tokio::test]
async fn async_resolver_uses_context(
    table: ResolverTable<Channels>,
    #[case] input: &str,
    #[case] expected: serde_json::Value,
) {
    let ast = parse_grammar(NOTIFY).unwrap();
    let result = match_both(&ast, input, &table, &channels()).await.unwrap();
    assert_eq!(result, params(expected));
}

#[rstest]
#[tokio::test]
async fn unknown_channel_falls_back_to_text(table: ResolverTable<Channels>) {
    // the optional channel fails, so "#nowhere" becomes part of the text
    let ast = parse_grammar(NOTIFY).unwrap();
    let input = "notify #nowhere hi";
    let result = match_both(&ast, input, &table, &channels()).await.unwrap();
    assert_eq!(result, params(json!({"text": "#nowhere hi"})));
}

#[rstest]
#[tokio::test]
async fn required_channel_error_is_resolver_error(table: ResolverTable<Channels>) {
    let ast = parse_grammar("join <target: channel>").unwrap();
    let context = Channels {
        names: vec!["ops".into()],
    };
    let error = match_both(&ast, "join #general", &table, &context).await;
    let error = error.unwrap_err();
    assert_eq!(
        error,
        MatchError::Parse(ParseError::new(1, "Unknown channel general"))
    );
}
