mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use run::{EXIT_ERROR, EXIT_MATCH, EXIT_NO_MATCH, run};

#[derive(Parser)]
#[command(name = "cmdmatch")]
pub struct Cli {
    /// Config file to use instead of the global and local cmdmatch.yml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum Commands {
    /// Match a command string against a grammar and print the parameters
    Match(MatchArgs),
    /// Print the parsed grammar as JSON
    Parse(GrammarArgs),
    /// Print the usage form of a grammar
    Render(GrammarArgs),
    /// Match a command string against the configured commands
    Dispatch(DispatchArgs),
    /// List the configured commands
    List,
}

#[derive(clap::Args)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct MatchArgs {
    /// Grammar to match against
    #[arg(long, short)]
    pub grammar: String,

    /// Walk the grammar directly instead of compiling it first
    #[arg(long)]
    pub interpret: bool,

    /// Command string to match
    pub input: String,
}

#[derive(clap::Args)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct GrammarArgs {
    /// Grammar string, e.g. 'rm add <text: string>'
    pub grammar: String,
}

#[derive(clap::Args)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct DispatchArgs {
    /// Command string to match
    pub input: String,
}
