use std::sync::Arc;

use cmdmatch::command_set::CommandSet;
use cmdmatch::grammar::parse_grammar;
use cmdmatch::matcher::{compile, match_command};
use tokio::task::JoinSet;

use super::common::{capture_order, channels, resolvers};

const NOTIFY: &str = "notify [target: channel] <text: string>";

const INPUTS: &[&str] = &[
    "notify #general standup in 5",
    "notify #random",
    "notify #nowhere hi",
    "notify hello",
    "NOTIFY  hello",
    "notify",
];

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_matcher_agrees_with_interpreter_across_tasks() {
    let ast = Arc::new(parse_grammar(NOTIFY).unwrap());
    let table = Arc::new(resolvers());
    let context = Arc::new(channels());
    let matcher = Arc::new(compile(&*ast, &*table));

    let mut tasks = JoinSet::new();
    for round in 0..8 {
        for input in INPUTS {
            let (ast, table, context, matcher) = (
                Arc::clone(&ast),
                Arc::clone(&table),
                Arc::clone(&context),
                Arc::clone(&matcher),
            );
            tasks.spawn(async move {
                let compiled = matcher.matches(input, &*context).await;
                let interpreted = match_command(&*ast, input, &*table, &*context).await;
                (round, *input, interpreted, compiled)
            });
        }
    }

    let mut finished = 0;
    while let Some(joined) = tasks.join_next().await {
        let (round, input, interpreted, compiled) = joined.unwrap();
        assert_eq!(interpreted, compiled, "round {round}, input {input:?}");
        if let (Ok(interpreted), Ok(compiled)) = (&interpreted, &compiled) {
            assert_eq!(capture_order(interpreted), capture_order(compiled));
        }
        finished += 1;
    }
    assert_eq!(finished, 8 * INPUTS.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn command_set_is_shareable() {
    let table = resolvers();
    let mut set = CommandSet::new();
    let notify = parse_grammar(NOTIFY).unwrap();
    let ping = parse_grammar("ping").unwrap();
    set.add("notify", notify, &table).add("ping", ping, &table);
    let set = Arc::new(set);
    let context = Arc::new(channels());

    let handles: Vec<_> = ["ping", "notify #general hi", "Ping"]
        .into_iter()
        .map(|input| {
            let (set, context) = (Arc::clone(&set), Arc::clone(&context));
            tokio::spawn(async move {
                let dispatched = set.dispatch(input, &*context).await;
                dispatched.map(|d| d.command)
            })
        })
        .collect();

    let mut commands = Vec::new();
    for handle in handles {
        commands.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(commands, vec!["ping", "notify", "ping"]);
}
