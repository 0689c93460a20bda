//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::BudgetResult;
use crate::models::CategoryType;
use crate::services::{CategoryService, CategoryUpdate};
use crate::storage::BudgetStore;

use super::{parse_amount, parse_category_type};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories in display order
    List,

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Monthly budget (e.g., "600" or "600.00")
        #[arg(short, long, default_value = "0")]
        budget: String,
        /// "fixed" or "variable"
        #[arg(short = 't', long = "type", default_value = "variable")]
        category_type: String,
        /// Display colour, e.g. "#84cc16"
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New monthly budget
        #[arg(short, long)]
        budget: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
        /// New display colour
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a category
    Remove {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(store: &dyn BudgetStore, cmd: CategoryCommands) -> BudgetResult<()> {
    let service = CategoryService::new(store);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let category = service.find(&category)?;
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Add {
            name,
            budget,
            category_type,
            color,
        } => {
            let budget = parse_amount(&budget, "budget")?;
            let category_type: CategoryType = parse_category_type(&category_type)?;
            let category = service.add(&name, category_type, budget, color)?;

            println!("Added category: {}", category.name);
            println!("  ID: {}", category.id);
            println!("  {} budget: {}", category.category_type, category.budget_amount);
        }

        CategoryCommands::Edit {
            category,
            name,
            budget,
            category_type,
            color,
        } => {
            let existing = service.find(&category)?;
            let update = CategoryUpdate {
                name,
                category_type: category_type
                    .as_deref()
                    .map(parse_category_type)
                    .transpose()?,
                budget_amount: budget
                    .as_deref()
                    .map(|b| parse_amount(b, "budget"))
                    .transpose()?,
                color,
            };

            if update == CategoryUpdate::default() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&existing.id, update)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Remove { category } => {
            let existing = service.find(&category)?;
            let removed = service.remove(&existing.id)?;
            println!("Removed category: {}", removed.name);
            println!("Amounts already recorded against it stay in their month files.");
        }
    }

    Ok(())
}
