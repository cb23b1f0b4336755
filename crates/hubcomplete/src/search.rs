use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hubcomplete_api::GithubClient;
use hubcomplete_core::view::hint_text;
use hubcomplete_core::{MIN_QUERY_CHARS, SearchOutcome, SuggestionKind, aggregate, is_qualifying};
use indicatif::ProgressBar;
use unicode_width::UnicodeWidthStr;

#[derive(Args, Debug)]
#[command(about = "Search GitHub users and repositories")]
pub struct SearchArgs {
    #[arg(help = "Text to search for (at least 3 characters)")]
    query: String,

    #[arg(long, help = "Print the merged results as JSON")]
    json: bool,
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}

pub fn execute(args: SearchArgs) -> Result<()> {
    if !is_qualifying(&args.query) {
        anyhow::bail!("{}", hint_text(MIN_QUERY_CHARS));
    }

    let client = GithubClient::from_env()?;
    log::debug!("Searching {} for {:?}", client.api_base_url(), args.query);

    let outcome = if args.json {
        aggregate::search(&client, &args.query)
    } else {
        let spinner = create_spinner(&format!("Searching for '{}'...", args.query));
        let outcome = aggregate::search(&client, &args.query);
        spinner.finish_and_clear();
        outcome
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&args.query, &outcome);
    }

    Ok(())
}

fn kind_marker(kind: SuggestionKind) -> colored::ColoredString {
    match kind {
        SuggestionKind::Repository => "repo".magenta(),
        SuggestionKind::User => "user".cyan(),
    }
}

fn print_outcome(query: &str, outcome: &SearchOutcome) {
    for error in &outcome.errors {
        eprintln!("{} {}", "✗".red().bold(), error.red());
    }

    if outcome.results.is_empty() {
        println!("No results for '{}'", query.cyan());
        return;
    }

    println!(
        "{} {} results for '{}':",
        "Found".green().bold(),
        outcome.results.len(),
        query.cyan()
    );

    let label_width = outcome
        .results
        .iter()
        .map(|s| s.label.width())
        .max()
        .unwrap_or(0);

    for suggestion in &outcome.results {
        let padding = " ".repeat(label_width - suggestion.label.width());
        println!(
            "  {} {}{}  {}",
            kind_marker(suggestion.kind),
            suggestion.label.bold(),
            padding,
            suggestion.url.dimmed()
        );
    }
}
