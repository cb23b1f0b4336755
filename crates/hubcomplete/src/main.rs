use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::{Env, Target};
use hubcomplete_core::Settings;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

mod search;
mod tui;

#[derive(Parser)]
#[command(name = "hubcomplete")]
#[command(about = "Search GitHub users and repositories as you type", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Write log output to a file instead of stderr
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Quiet window after the last keystroke before searching
    #[arg(long = "debounce-ms", global = true, value_name = "MS", default_value_t = 2000)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print the merged results
    #[command(alias = "s")]
    Search(search::SearchArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug (overridden by RUST_LOG)
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut logger = env_logger::Builder::from_env(env);
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        logger.target(Target::Pipe(Box::new(file)));
    }
    logger.init();

    let settings = Settings::with_debounce(Duration::from_millis(cli.debounce_ms));

    match cli.command {
        Some(Commands::Search(args)) => search::execute(args),
        None => tui::run(settings),
    }
}
