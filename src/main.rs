use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmdmatch::cli::{self, Cli};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CMDMATCH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut stdout = std::io::stdout().lock();
    match cli::run(&cli, &mut stdout).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("cmdmatch: {e:#}");
            ExitCode::from(cli::EXIT_ERROR)
        }
    }
}
