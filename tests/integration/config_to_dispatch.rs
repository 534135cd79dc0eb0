use std::fs;

use cmdmatch::command_set::{CommandSet, DispatchError};
use cmdmatch::config::{ConfigError, ConfigLoader, DefaultConfigLoader, parse_config};
use indoc::indoc;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use super::common::{Channels, channels, resolvers};

const CHAT_COMMANDS: &str = indoc! {r#"
    commands:
      - name: remind
        grammar: 'reminder/rm add [emote: "uwu" | "owo"] <duration: word> <text: string>'
        description: Schedule a reminder
      - name: forget
        grammar: 'reminder/rm remove/delete <id: number>'
      - name: notify
        grammar: "notify [target: channel] <text: string>"
        description: Post to a channel
      - name: ping
        grammar: ping
"#};

#[fixture]
fn commands() -> CommandSet<Channels> {
    let config = parse_config(CHAT_COMMANDS).unwrap();
    config.validate().unwrap();
    CommandSet::from_config(&config, &resolvers()).unwrap()
}

#[rstest]
#[case::remind(
    "rm add owo 10s howdy",
    "remind",
    json!({"emote": "owo", "duration": "10s", "text": "howdy"}),
)]
#[case::forget("reminder DELETE 7", "forget", json!({"id": 7}))]
#[case::notify_with_target(
    "notify #random lunch?",
    "notify",
    json!({"target": {"channel": "random"}, "text": "lunch?"}),
)]
#[case::notify_without_target("notify lunch?", "notify", json!({"text": "lunch?"}))]
#[case::ping("ping", "ping", json!({}))]
#[tokio::test]
async fn configured_commands_dispatch(
    commands: CommandSet<Channels>,
    #[case] input: &str,
    #[case] command: &str,
    #[case] params: serde_json::Value,
) {
    let dispatched = commands.dispatch(input, &channels()).await.unwrap();
    assert_eq!(dispatched.command, command);
    assert_eq!(serde_json::to_value(&dispatched.params).unwrap(), params);
}

#[rstest]
#[case::forget_without_id("rm remove", "forget", 2, "Unexpected end of command")]
#[case::forget_bad_id("rm remove x", "forget", 2, "Expected number")]
#[case::unknown_word("pong", "remind", 0, "Expected one of reminder or rm, found pong")]
#[tokio::test]
async fn closest_failure_is_reported(
    commands: CommandSet<Channels>,
    #[case] input: &str,
    #[case] closest: &str,
    #[case] token_level: usize,
    #[case] message: &str,
) {
    match commands.dispatch(input, &channels()).await {
        Err(DispatchError::NoMatch { command, error }) => {
            assert_eq!(command, closest);
            assert_eq!(error.token_level, token_level);
            assert_eq!(error.message, message);
        }
        other => panic!("expected NoMatch, got {other:?}"),
    }
}

#[rstest]
fn usage_follows_config_order(commands: CommandSet<Channels>) {
    let usage = commands.usage();
    let rendered: Vec<(&str, &str, Option<&str>)> = usage
        .iter()
        .map(|(name, usage, description)| (*name, usage.as_str(), *description))
        .collect();
    assert_eq!(
        rendered,
        vec![
            (
                "remind",
                "reminder/rm add [uwu/owo] <DURATION> <TEXT>",
                Some("Schedule a reminder"),
            ),
            ("forget", "reminder/rm remove/delete <ID>", None),
            ("notify", "notify [TARGET] <TEXT>", Some("Post to a channel")),
            ("ping", "ping", None),
        ]
    );
}

#[test]
fn unknown_types_are_rejected_when_building_the_set() {
    let config = parse_config(indoc! {"
        commands:
          - name: sum
            grammar: 'sum <a: integer> <b: number>'
    "})
    .unwrap();
    config.validate().unwrap();

    let Err(ConfigError::Validation(errors)) = CommandSet::from_config(&config, &resolvers())
    else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("commands.sum: unknown type 'integer'"));
}

#[tokio::test]
async fn local_config_overrides_global_before_dispatch() {
    let home = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();
    let global = home.path().join("cmdmatch.yml");
    fs::write(
        &global,
        indoc! {"
            commands:
              - name: greet
                grammar: hello
              - name: ping
                grammar: ping
        "},
    )
    .unwrap();
    fs::write(
        cwd.path().join("cmdmatch.yml"),
        indoc! {"
            commands:
              - name: greet
                grammar: 'hi/hello <who: word>'
        "},
    )
    .unwrap();

    let config = DefaultConfigLoader::with_global_path(global)
        .load(cwd.path())
        .unwrap();
    let commands = CommandSet::from_config(&config, &resolvers()).unwrap();
    assert_eq!(commands.len(), 2);

    let dispatched = commands.dispatch("HI there", &channels()).await.unwrap();
    assert_eq!(dispatched.command, "greet");
    assert_eq!(dispatched.params.get_str("who"), Some("there"));

    let error = commands.dispatch("hello", &channels()).await.unwrap_err();
    match error {
        DispatchError::NoMatch { command, .. } => assert_eq!(command, "greet"),
        other => panic!("expected NoMatch, got {other:?}"),
    }
}
