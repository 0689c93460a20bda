//! Household budget tracker
//!
//! Tracks a household's monthly budget per spending category and its income
//! per source, storing everything as human-readable JSON files in a folder
//! the user chooses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Store root and file path resolution
//! - `error`: Custom error types
//! - `models`: Configuration, categories, income, month records and summaries
//! - `storage`: The store contract, the folder store and an in-memory store
//! - `services`: Month summaries, income checks, settings, editing, yearly analytics
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML year exports
//! - `cli`: Command handlers for the `budget` binary
//! - `logging`: Tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use household_budget::config::BudgetPaths;
//! use household_budget::services::summarize;
//! use household_budget::storage::{BudgetStore, Storage};
//!
//! let storage = Storage::open_at(BudgetPaths::resolve(None)?)?;
//! let config = storage.load_config()?;
//! let march = storage.load_month(2024, 3)?;
//! let summary = summarize(&config, &march);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
