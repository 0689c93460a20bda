use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use household_budget::cli::{
    handle_category_command, handle_month_command, handle_source_command, handle_year_command,
    CategoryCommands, MonthCommands, SourceCommands, YearCommands,
};
use household_budget::config::paths::{BudgetPaths, DATA_DIR_ENV};
use household_budget::logging::init_tracing;
use household_budget::storage::{BudgetStore, Storage};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Household budget tracker backed by plain JSON files",
    long_about = "Tracks monthly budgets per category and income per source. \
                  Everything is stored as readable JSON in a budget-data folder \
                  inside a directory you choose, so it can live in a synced folder."
)]
struct Cli {
    /// Folder that holds (or will hold) the budget-data directory
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    dir: Option<PathBuf>,

    /// Log storage activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and the starter configuration
    Init,

    /// Show the resolved data paths
    Config,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Income source management commands
    #[command(subcommand)]
    Source(SourceCommands),

    /// Monthly spending and income commands
    #[command(subcommand)]
    Month(MonthCommands),

    /// Yearly summary and export commands
    #[command(subcommand)]
    Year(YearCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = BudgetPaths::resolve(cli.dir)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("budget - household budget tracker");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget init' to get started.");
            return Ok(());
        }
    };

    let open = || Storage::open_at(paths.clone());

    match command {
        Commands::Config => {
            println!("Budget Configuration");
            println!("====================");
            println!("Root directory:  {}", paths.root_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Config file:     {}", paths.config_file().display());
        }
        Commands::Init => {
            let storage = open()?;
            let before = storage.read_config()?;
            let config = storage.load_config()?;

            println!("Budget data directory: {}", paths.data_dir().display());
            if before.is_corrupt() {
                println!("The existing config.json could not be read.");
                println!(
                    "It was kept as {} and a new starter configuration was written.",
                    paths.corrupt_config_file().display()
                );
            } else if before.is_absent() {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!(
                "{} categories and {} income sources configured.",
                config.categories.len(),
                config.income_sources.len()
            );
            println!("Run 'budget category list' to see all categories.");
        }
        Commands::Category(cmd) => handle_category_command(&open()?, cmd)?,
        Commands::Source(cmd) => handle_source_command(&open()?, cmd)?,
        Commands::Month(cmd) => handle_month_command(&open()?, cmd)?,
        Commands::Year(cmd) => handle_year_command(&open()?, cmd)?,
    }

    Ok(())
}
