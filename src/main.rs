//! `prs`: run a task through the four-phase reasoning pipeline and save
//! the transcript as a log entry.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prs::assistant::AssistantClient;
use prs::error::Error;
use prs::task::Task;
use prs::{context, pipeline, store, task};

#[derive(Parser, Debug)]
#[command(
    name = "prs",
    version,
    about = "Four-phase reasoning pipeline for coding tasks"
)]
struct Cli {
    /// Load the task from a file (.yaml/.yml/.json structured, otherwise plain text)
    #[arg(long, short = 'f', value_name = "PATH", conflicts_with = "task")]
    file: Option<PathBuf>,

    /// Task description given directly
    #[arg(long, short = 't', value_name = "TEXT")]
    task: Option<String>,

    /// Write a template task file to PATH and exit
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.template {
        // Template failures are reported but never fail the process.
        match task::write_template(path) {
            Ok(()) => println!("Template written to {}", path.display()),
            Err(err) => eprintln!("Could not write template: {err}"),
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let task = resolve_task(cli)?;
    let cwd = std::env::current_dir()?;
    let project_context = context::detect_project_context(&cwd)?;

    // One client for all four phases, constructed here and passed down.
    let client = AssistantClient::new();
    let transcript = pipeline::run_pipeline(&task, &project_context, &client)?;

    let dir = store::default_logs_dir()?;
    let path = store::save_log(&dir, &transcript)?;
    println!("Saved: {}", path.display());
    Ok(())
}

fn resolve_task(cli: &Cli) -> Result<Task, Error> {
    if let Some(path) = &cli.file {
        return task::load_task(path);
    }
    if let Some(text) = &cli.task {
        return task::validate_task(serde_json::Value::String(text.clone()));
    }
    prompt_for_task()
}

fn prompt_for_task() -> Result<Task, Error> {
    print!("Describe the task: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let text = line.trim();
    if text.is_empty() {
        return Err(Error::Validation("task description is empty".to_string()));
    }
    Ok(Task::from_text(text))
}
