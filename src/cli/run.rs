use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use serde_json::json;
use tracing::debug;

use super::{Cli, Commands, DispatchArgs, MatchArgs};
use crate::command_set::{CommandSet, DispatchError};
use crate::config::{Config, ConfigLoader, DefaultConfigLoader};
use crate::grammar::{parse_grammar, render_grammar};
use crate::matcher::{MatchError, ResolverTable, compile, match_command};

pub const EXIT_MATCH: u8 = 0;
pub const EXIT_NO_MATCH: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Execute a parsed command line, writing results to `out`.
///
/// Returns the process exit code. Grammar, config and internal matcher
/// errors are returned as `Err` and map to [`EXIT_ERROR`].
pub async fn run(cli: &Cli, out: &mut impl Write) -> Result<u8, anyhow::Error> {
    match &cli.command {
        Commands::Match(args) => run_match(args, out).await,
        Commands::Parse(args) => {
            let def = parse_grammar(&args.grammar)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&def)?)?;
            Ok(EXIT_MATCH)
        }
        Commands::Render(args) => {
            let def = parse_grammar(&args.grammar)?;
            writeln!(out, "{}", render_grammar(&def))?;
            Ok(EXIT_MATCH)
        }
        Commands::Dispatch(args) => {
            let config = load_config(cli.config.as_deref())?;
            run_dispatch(&config, args, out).await
        }
        Commands::List => {
            let config = load_config(cli.config.as_deref())?;
            let resolvers = ResolverTable::<()>::with_builtins();
            let commands = CommandSet::from_config(&config, &resolvers)?;
            for (name, usage, description) in commands.usage() {
                match description {
                    Some(description) => writeln!(out, "{name}: {usage}  # {description}")?,
                    None => writeln!(out, "{name}: {usage}")?,
                }
            }
            Ok(EXIT_MATCH)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, anyhow::Error> {
    let cwd = std::env::current_dir()?;
    let Some(path) = path else {
        return Ok(DefaultConfigLoader::new().load(&cwd)?);
    };
    DefaultConfigLoader::from_file(path.to_path_buf())
        .load(&cwd)
        .with_context(|| format!("failed to load config {}", path.display()))
}

async fn run_match(args: &MatchArgs, out: &mut impl Write) -> Result<u8, anyhow::Error> {
    let def = parse_grammar(&args.grammar)?;
    let resolvers = ResolverTable::<()>::with_builtins();

    let result = if args.interpret {
        debug!("matching with interpreter");
        match_command(&def, &args.input, &resolvers, &()).await
    } else {
        compile(&def, &resolvers).matches(&args.input, &()).await
    };

    match result {
        Ok(params) => {
            writeln!(out, "{}", serde_json::to_string(&params)?)?;
            Ok(EXIT_MATCH)
        }
        Err(MatchError::Parse(error)) => {
            let body = json!({"error": error.message, "token_level": error.token_level});
            writeln!(out, "{body}")?;
            Ok(EXIT_NO_MATCH)
        }
        Err(fatal) => Err(fatal.into()),
    }
}

async fn run_dispatch(
    config: &Config,
    args: &DispatchArgs,
    out: &mut impl Write,
) -> Result<u8, anyhow::Error> {
    let resolvers = ResolverTable::<()>::with_builtins();
    let commands = CommandSet::from_config(config, &resolvers)?;

    match commands.dispatch(&args.input, &()).await {
        Ok(dispatched) => {
            writeln!(out, "{}", serde_json::to_string(&dispatched)?)?;
            Ok(EXIT_MATCH)
        }
        Err(DispatchError::NoMatch { command, error }) => {
            let body = json!({
                "error": error.message,
                "token_level": error.token_level,
                "closest": command,
            });
            writeln!(out, "{body}")?;
            Ok(EXIT_NO_MATCH)
        }
        Err(e) => Err(e.into()),
    }
}
