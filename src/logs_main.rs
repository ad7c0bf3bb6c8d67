//! `prs-logs`: interactive browser for saved pipeline logs.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prs::{browser, store};

#[derive(Parser, Debug)]
#[command(name = "prs-logs", version, about = "Browse saved prs reasoning logs")]
struct Cli {}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let _cli = Cli::parse();

    let result = store::default_logs_dir().and_then(|dir| browser::run(&dir, io::stdin().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
