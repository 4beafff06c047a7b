use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use dev_quiz::{GeneratorConfig, Quiz};
use tracing_subscriber::EnvFilter;

/// Terminal quiz with AI generated programming questions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generator model to ask for questions
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL of the generator API
    #[arg(long)]
    base_url: Option<String>,

    /// File to write logs to (the terminal belongs to the quiz)
    #[arg(long, value_name = "FILE", default_value = "dev-quiz.log")]
    log_file: PathBuf,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Cannot open log file {}: {}", args.log_file.display(), e);
        return ExitCode::FAILURE;
    }

    let config = match GeneratorConfig::from_env(args.base_url, args.model) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "Generator configured");

    if let Err(e) = Quiz::from_config(config).run().await {
        tracing::error!(error = %e, "Quiz aborted");
        eprintln!("Error running quiz: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Priority: RUST_LOG env var > --verbose flag > default (info).
fn init_logging(args: &Args) -> std::io::Result<()> {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
