use clap::Parser;
use colored::Colorize;

use sage_core::config::DEFAULT_SEARCH_RESULTS;
use sage_core::error::SageError;

mod commands;

#[derive(Parser)]
#[command(name = "sage")]
#[command(version, about = "Sage - personalized web-search assistant", long_about = None)]
struct Cli {
    /// The question to research (runs the default research query when omitted)
    query: Option<String>,

    /// Personalize the answer for this user profile (created on first use)
    #[arg(long, value_name = "ID")]
    user_id: Option<String>,

    /// List all stored user profiles
    #[arg(long, conflicts_with_all = ["query", "user_id", "show_profile", "update_profile"])]
    list_users: bool,

    /// Show one stored user profile
    #[arg(long, value_name = "ID", conflicts_with_all = ["query", "user_id", "update_profile"])]
    show_profile: Option<String>,

    /// Update one profile field: --update-profile <ID> <FIELD> <VALUE>
    #[arg(long, num_args = 3, value_names = ["ID", "FIELD", "VALUE"],
          conflicts_with_all = ["query", "user_id"])]
    update_profile: Option<Vec<String>>,

    /// Maximum number of search results to request
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SEARCH_RESULTS)]
    max_results: usize,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; credentials may come from the process
    // environment directly
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{} {err}", "error:".bright_red());
        if err.is_missing_credential() {
            commands::ask::print_setup_instructions();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SageError> {
    if cli.list_users {
        return commands::profile::list_users().await;
    }

    if let Some(user_id) = cli.show_profile.as_deref() {
        return commands::profile::show_profile(user_id).await;
    }

    if let Some(args) = cli.update_profile.as_deref() {
        // clap's num_args = 3 guarantees exactly three values
        return commands::profile::update_profile(&args[0], &args[1], &args[2]).await;
    }

    commands::ask::execute(
        cli.query.as_deref(),
        cli.user_id.as_deref(),
        cli.max_results,
    )
    .await
}
