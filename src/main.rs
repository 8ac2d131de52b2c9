use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    ConfigCommand, DataCommand, GroceryCommand, MealCommand, PlanCommand, ProfileCommand,
    ProgressCommand, RecipeCommand, SettingsCommand, TrackCommand,
};
use config::Config;
use dietplan_core::{AppStateStore, FileStore, SystemClock};

#[derive(Parser)]
#[command(name = "diet")]
#[command(version)]
#[command(about = "A diet planning and tracking CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// View and edit your profile
    Profile(ProfileCommand),

    /// Generate and browse meal plans
    Plan(PlanCommand),

    /// Log quick meals
    Meal(MealCommand),

    /// Track water, steps and mood for today
    Track(TrackCommand),

    /// Points, badges, streaks and challenges
    Progress(ProgressCommand),

    /// Manage the grocery list
    Grocery(GroceryCommand),

    /// Manage saved recipes
    Recipe(RecipeCommand),

    /// View and change app settings
    Settings(SettingsCommand),

    /// Export or import all data
    Data(DataCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dietplan=warn,dietplan_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    let command = match cli.command {
        Some(Commands::Config(cmd)) => return cmd.run(&config),
        Some(command) => command,
        None => {
            println!("Use --help to see available commands");
            return Ok(());
        }
    };

    let storage = Arc::new(FileStore::new(config.data_dir.value.clone()));
    let mut store = AppStateStore::load(storage, Arc::new(SystemClock)).await;

    let result = execute_command(command, &mut store, &config).await;

    // Pending slice writes must land before the process exits
    store.flush().await;

    result
}

async fn execute_command(
    command: Commands,
    store: &mut AppStateStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Profile(cmd) => cmd.run(store),
        Commands::Plan(cmd) => cmd.run(store, config).await,
        Commands::Meal(cmd) => cmd.run(store),
        Commands::Track(cmd) => cmd.run(store),
        Commands::Progress(cmd) => cmd.run(store),
        Commands::Grocery(cmd) => cmd.run(store),
        Commands::Recipe(cmd) => cmd.run(store),
        Commands::Settings(cmd) => cmd.run(store),
        Commands::Data(cmd) => cmd.run(store),
        Commands::Config(cmd) => cmd.run(config),
    }
}
