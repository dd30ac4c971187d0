use anyhow::Result;
use clap::Parser;

/// planr - Task Plan Client
///
/// Submit a free-text goal to a plan service and render the generated task
/// plan as cards.
///
/// The service URL defaults to http://127.0.0.1:5000 and can be overridden
/// with --api-url or the PLANR_API_URL environment variable.
///
/// Examples:
///   planr create "Plan a weekend garden overhaul"
///   planr show 7
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plan service URL (also via PLANR_API_URL)
    #[arg(
        long = "api-url",
        value_name = "URL",
        env = "PLANR_API_URL",
        global = true
    )]
    pub api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a task plan for a goal
    Create(CreateArgs),

    /// Display a previously saved plan
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// The goal to break down into a plan
    #[arg(value_name = "GOAL")]
    pub goal: String,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Saved plan id
    #[arg(value_name = "ID")]
    pub id: u64,

    /// Print the raw plan JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => planr::commands::create(&args.goal, cli.api_url).await?,
        Commands::Show(args) => planr::commands::show(args.id, args.json, cli.api_url).await?,
    }
    Ok(())
}
