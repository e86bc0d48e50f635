use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mindsync", version, about = "MindSync mood-aware day planner")]
struct Cli {
    /// Backend base URL (overrides config and MINDSYNC_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in with how you feel
    Mood(commands::mood::MoodArgs),
    /// Build a time-blocked schedule for a list of tasks
    Plan(commands::plan::PlanArgs),
    /// Interactive planning session
    Shell,
    /// Check that the backend is reachable
    Health,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINDSYNC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();
    let result = match cli.command {
        Commands::Mood(args) => commands::mood::run(args, api_url).await,
        Commands::Plan(args) => commands::plan::run(args, api_url).await,
        Commands::Shell => commands::shell::run(api_url).await,
        Commands::Health => commands::health::run(api_url).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
