//! Income source CLI commands

use clap::{Args, Subcommand};

use crate::display::income::{format_income_warning, format_source_details, format_source_list};
use crate::error::BudgetResult;
use crate::models::{Money, YearMonth};
use crate::services::{IncomeService, IncomeSourceUpdate, NewIncomeSource, SavedIncomeSource};
use crate::storage::BudgetStore;

use super::parse_amount;

/// Default amounts for an income source
#[derive(Args, Default)]
pub struct DefaultAmounts {
    /// Gross pay
    #[arg(long)]
    pub gross: Option<String>,
    /// Pension contribution
    #[arg(long)]
    pub pension: Option<String>,
    /// National insurance
    #[arg(long)]
    pub ni: Option<String>,
    /// Income tax
    #[arg(long)]
    pub tax: Option<String>,
    /// Take-home pay (defaults to gross minus deductions when adding)
    #[arg(long)]
    pub net: Option<String>,
}

struct ParsedAmounts {
    gross: Option<Money>,
    pension: Option<Money>,
    ni: Option<Money>,
    tax: Option<Money>,
    net: Option<Money>,
}

impl DefaultAmounts {
    fn parse(&self) -> BudgetResult<ParsedAmounts> {
        let field = |value: &Option<String>, name: &str| {
            value.as_deref().map(|v| parse_amount(v, name)).transpose()
        };
        Ok(ParsedAmounts {
            gross: field(&self.gross, "gross")?,
            pension: field(&self.pension, "pension")?,
            ni: field(&self.ni, "national insurance")?,
            tax: field(&self.tax, "tax")?,
            net: field(&self.net, "net")?,
        })
    }
}

/// Income source subcommands
#[derive(Subcommand)]
pub enum SourceCommands {
    /// List all income sources
    List,

    /// Show an income source with its default breakdown
    Show {
        /// Source name or ID
        source: String,
    },

    /// Add an income source
    Add {
        /// Source name
        name: String,
        /// First month paid (YYYY-MM, defaults to this month)
        #[arg(long)]
        start: Option<YearMonth>,
        /// Last month paid (YYYY-MM, omit for ongoing)
        #[arg(long)]
        end: Option<YearMonth>,
        /// Display colour
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        amounts: DefaultAmounts,
    },

    /// Edit an income source
    Edit {
        /// Source name or ID
        source: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New first month
        #[arg(long)]
        start: Option<YearMonth>,
        /// New last month
        #[arg(long, conflicts_with = "ongoing")]
        end: Option<YearMonth>,
        /// Clear the end month
        #[arg(long)]
        ongoing: bool,
        /// New display colour
        #[arg(long)]
        color: Option<String>,
        #[command(flatten)]
        amounts: DefaultAmounts,
    },

    /// Remove an income source
    Remove {
        /// Source name or ID
        source: String,
    },
}

fn print_saved(verb: &str, saved: &SavedIncomeSource) {
    println!("{} income source: {}", verb, saved.source.name);
    println!("  ID:     {}", saved.source.id);
    println!("  Active: {}", saved.source.date_range_label());
    if let Some(warning) = format_income_warning(&saved.check) {
        println!("{}", warning);
    }
}

/// Handle an income source command
pub fn handle_source_command(store: &dyn BudgetStore, cmd: SourceCommands) -> BudgetResult<()> {
    let service = IncomeService::new(store);

    match cmd {
        SourceCommands::List => {
            let sources = service.list()?;
            print!("{}", format_source_list(&sources));
        }

        SourceCommands::Show { source } => {
            let source = service.find(&source)?;
            print!("{}", format_source_details(&source));
        }

        SourceCommands::Add {
            name,
            start,
            end,
            color,
            amounts,
        } => {
            let amounts = amounts.parse()?;
            let mut input = NewIncomeSource::new(name, start.unwrap_or_else(YearMonth::current));
            input.end_date = end;
            input.color = color;
            input.gross = amounts.gross.unwrap_or_default();
            input.pension = amounts.pension.unwrap_or_default();
            input.national_insurance = amounts.ni.unwrap_or_default();
            input.tax = amounts.tax.unwrap_or_default();
            input.net = amounts
                .net
                .unwrap_or(input.gross - input.pension - input.national_insurance - input.tax);

            let saved = service.add(input)?;
            print_saved("Added", &saved);
        }

        SourceCommands::Edit {
            source,
            name,
            start,
            end,
            ongoing,
            color,
            amounts,
        } => {
            let existing = service.find(&source)?;
            let amounts = amounts.parse()?;
            let update = IncomeSourceUpdate {
                name,
                color,
                start_date: start,
                end_date: if ongoing { Some(None) } else { end.map(Some) },
                gross: amounts.gross,
                pension: amounts.pension,
                national_insurance: amounts.ni,
                tax: amounts.tax,
                net: amounts.net,
            };

            if update == IncomeSourceUpdate::default() {
                println!("No changes specified.");
                return Ok(());
            }

            let saved = service.update(&existing.id, update)?;
            print_saved("Updated", &saved);
        }

        SourceCommands::Remove { source } => {
            let existing = service.find(&source)?;
            let removed = service.remove(&existing.id)?;
            println!("Removed income source: {}", removed.name);
        }
    }

    Ok(())
}
