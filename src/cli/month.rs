//! Month CLI commands
//!
//! Every editing command opens the month in a [`MonthEditor`], applies one
//! change and saves, so the file always holds one entry per configured
//! category.

use clap::Subcommand;

use crate::display::income::format_income_warning;
use crate::display::month::format_month_summary;
use crate::display::report::format_variance;
use crate::error::BudgetResult;
use crate::models::{MonthlyIncome, YearMonth};
use crate::services::{suggest_for_period, summarize, CategoryService, IncomeService, MonthEditor};
use crate::storage::BudgetStore;

use super::parse_amount;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show a month's budget, spending and income
    Show {
        /// Month to show (YYYY-MM, defaults to this month)
        #[arg(short, long)]
        period: Option<YearMonth>,
    },

    /// Record what was spent against a category
    Expense {
        /// Category name or ID
        category: String,
        /// Amount spent
        amount: String,
        #[arg(short, long)]
        period: Option<YearMonth>,
    },

    /// Set every fixed category's spending to its budget
    #[command(name = "apply-fixed")]
    ApplyFixed {
        #[arg(short, long)]
        period: Option<YearMonth>,
    },

    /// Record income received from a source
    Income {
        /// Source name or ID
        source: String,
        #[arg(short, long)]
        period: Option<YearMonth>,
        /// Use the source's default amounts
        #[arg(long, conflicts_with_all = ["gross", "pension", "ni", "tax", "net"])]
        defaults: bool,
        #[arg(long)]
        gross: Option<String>,
        #[arg(long)]
        pension: Option<String>,
        #[arg(long)]
        ni: Option<String>,
        #[arg(long)]
        tax: Option<String>,
        /// Take-home pay (defaults to gross minus deductions)
        #[arg(long)]
        net: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the income that would be pre-filled for a month
    Suggest {
        #[arg(short, long)]
        period: Option<YearMonth>,
    },
}

/// Handle a month command
pub fn handle_month_command(store: &dyn BudgetStore, cmd: MonthCommands) -> BudgetResult<()> {
    match cmd {
        MonthCommands::Show { period } => {
            let period = period.unwrap_or_else(YearMonth::current);
            let config = store.load_config()?;
            let data = store.load_period(period)?;
            let summary = summarize(&config, &data);
            print!("{}", format_month_summary(&period.friendly(), &summary));
        }

        MonthCommands::Expense {
            category,
            amount,
            period,
        } => {
            let period = period.unwrap_or_else(YearMonth::current);
            let category = CategoryService::new(store).find(&category)?;
            let amount = parse_amount(&amount, "amount")?;

            let mut editor = MonthEditor::open(store, store.load_config()?, period)?;
            editor.set_expense(&category.id, amount)?;
            editor.save()?;

            let row = editor
                .summary()
                .categories
                .into_iter()
                .find(|row| row.category.id == category.id);
            println!("{}: {} spent on {}", period.friendly(), amount, category.name);
            if let Some(row) = row {
                println!(
                    "  Budget {}, variance {}",
                    row.category.budget_amount,
                    format_variance(row.variance)
                );
            }
        }

        MonthCommands::ApplyFixed { period } => {
            let period = period.unwrap_or_else(YearMonth::current);
            let mut editor = MonthEditor::open(store, store.load_config()?, period)?;
            let count = editor.apply_fixed_defaults();
            editor.save()?;
            println!(
                "{}: set {} fixed categories to their budget",
                period.friendly(),
                count
            );
        }

        MonthCommands::Income {
            source,
            period,
            defaults,
            gross,
            pension,
            ni,
            tax,
            net,
            notes,
        } => {
            let period = period.unwrap_or_else(YearMonth::current);
            let source = IncomeService::new(store).find(&source)?;
            let mut editor = MonthEditor::open(store, store.load_config()?, period)?;

            let check = if defaults {
                editor.use_income_defaults(&source.id)?
            } else {
                let current = editor
                    .income(&source.id)
                    .cloned()
                    .unwrap_or_else(|| MonthlyIncome::empty(source.id.clone()));
                let field = |value: Option<String>, name: &str, fallback| {
                    value
                        .map(|v| parse_amount(&v, name))
                        .transpose()
                        .map(|parsed| parsed.unwrap_or(fallback))
                };

                let mut income = MonthlyIncome {
                    source_id: source.id.clone(),
                    gross: field(gross, "gross", current.gross)?,
                    pension: field(pension, "pension", current.pension)?,
                    national_insurance: field(ni, "national insurance", current.national_insurance)?,
                    tax: field(tax, "tax", current.tax)?,
                    net: current.net,
                    notes: notes.or(current.notes),
                };
                income.net = match net {
                    Some(net) => parse_amount(&net, "net")?,
                    None => income.gross - income.deductions(),
                };
                editor.set_income(income)?
            };
            editor.save()?;

            if let Some(saved) = editor.income(&source.id) {
                println!(
                    "{}: {} gross {}, net {}",
                    period.friendly(),
                    source.name,
                    saved.gross,
                    saved.net
                );
                if !saved.gross.is_positive() {
                    println!("Nothing recorded: income with no gross pay is not saved.");
                }
            }
            if let Some(warning) = format_income_warning(&check) {
                println!("{}", warning);
            }
        }

        MonthCommands::Suggest { period } => {
            let period = period.unwrap_or_else(YearMonth::current);
            let config = store.load_config()?;
            let suggestions = suggest_for_period(&config.income_sources, period);

            if suggestions.is_empty() {
                println!("No income sources are active in {}.", period.friendly());
                return Ok(());
            }

            println!("Suggested income for {}:", period.friendly());
            for income in suggestions {
                let name = config
                    .income_source(&income.source_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or(income.source_id.as_str());
                println!(
                    "  {:<24} gross {:>12}  deductions {:>12}  net {:>12}",
                    name,
                    income.gross,
                    income.deductions(),
                    income.net
                );
            }
        }
    }

    Ok(())
}
