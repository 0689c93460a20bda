//! Year CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use tracing::info;

use crate::display::year::{format_totals, format_year_summary};
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_year_csv, export_year_json, export_year_yaml};
use crate::models::YearMonth;
use crate::services::YearSummary;
use crate::storage::BudgetStore;

/// Export formats
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

/// Year subcommands
#[derive(Subcommand)]
pub enum YearCommands {
    /// Show the year's months, category totals and averages
    Show {
        /// Year to show (defaults to this year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Only total January through this month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        through: Option<u32>,
    },

    /// Export a year
    Export {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a year command
pub fn handle_year_command(store: &dyn BudgetStore, cmd: YearCommands) -> BudgetResult<()> {
    match cmd {
        YearCommands::Show { year, through } => {
            let year = year.unwrap_or_else(|| YearMonth::current().year());
            let config = store.load_config()?;
            let yearly = store.load_year(year)?;
            let summary = YearSummary::build(&config, year, &yearly)?;

            match through {
                Some(month) => {
                    let totals = summary.year_to_date(month)?;
                    println!("Year {} to date (January to month {})", year, month);
                    println!();
                    print!("{}", format_totals(year, &totals));
                }
                None => print!("{}", format_year_summary(&summary)),
            }
        }

        YearCommands::Export {
            year,
            format,
            output,
        } => {
            let year = year.unwrap_or_else(|| YearMonth::current().year());

            match &output {
                Some(path) => {
                    let file = File::create(path).map_err(|e| {
                        BudgetError::Export(format!("Cannot create {}: {}", path.display(), e))
                    })?;
                    let mut writer = BufWriter::new(file);
                    write_export(store, year, format, &mut writer)?;
                    writer
                        .flush()
                        .map_err(|e| BudgetError::Export(e.to_string()))?;
                    info!(path = %path.display(), ?format, year, "Year exported");
                    println!("Exported {} to {}", year, path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    write_export(store, year, format, &mut handle)?;
                }
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    store: &dyn BudgetStore,
    year: i32,
    format: ExportFormat,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        ExportFormat::Csv => export_year_csv(store, year, writer),
        ExportFormat::Json => export_year_json(store, year, writer),
        ExportFormat::Yaml => export_year_yaml(store, year, writer),
    }
}
