// sfplanner/src/cli.rs
//! This file defines the command-line interface (CLI) for the sfplanner application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sfplanner_core::SortKey;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "sfplanner",
    author = "SFPlanner Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track expenses, search them with regular expressions and watch a budget cap",
    long_about = "SFPlanner keeps a local ledger of expense records. Every record is validated on entry, the ledger can be sorted and searched with regular expressions (matches are highlighted), and a stats view compares spending against a budget cap in your chosen base currency. The whole state can be exported to and imported from a JSON file.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Directory holding records.json and settings.json.
    #[arg(long = "data-dir", value_name = "DIR", env = "SFPLANNER_DATA_DIR", global = true, help = "Directory holding the ledger files (defaults to the platform data directory).")]
    pub data_dir: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `sfplanner` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Adds a new expense record.")]
    Add(AddCommand),

    #[command(about = "Edits an existing record; omitted fields keep their current value.")]
    Edit(EditCommand),

    #[command(about = "Deletes a record.")]
    Delete {
        /// Id of the record to delete.
        #[arg(value_name = "ID")]
        id: String,
        /// Delete without confirmation.
        #[arg(long, short = 'y', help = "Delete without a confirmation prompt.")]
        yes: bool,
    },

    #[command(about = "Lists records, optionally sorted and filtered by a regex search.")]
    List(ListCommand),

    #[command(about = "Shows totals, the top category, the 7-day trend and budget cap status.")]
    Stats {
        /// Last day of the trend window (defaults to the local date).
        #[arg(long, value_name = "YYYY-MM-DD", help = "Last day of the 7-day trend window (defaults to today).")]
        today: Option<String>,
    },

    #[command(subcommand, about = "Shows or changes currency, rates, cap and categories.")]
    Settings(SettingsCommand),

    #[command(about = "Exports records and settings as JSON.")]
    Export {
        /// Write to this file instead of stdout.
        #[arg(long, short = 'o', value_name = "FILE", help = "Write the export to a file instead of stdout.")]
        output: Option<PathBuf>,
    },

    #[command(about = "Replaces all records (and merges settings) from an exported JSON file.")]
    Import {
        /// File produced by `export`.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Arguments for the `add` command.
#[derive(Args, Debug)]
pub struct AddCommand {
    #[arg(long, value_name = "TEXT", help = "What the money was spent on.")]
    pub description: String,

    #[arg(long, value_name = "AMOUNT", help = "Amount in USD, up to 2 decimals.")]
    pub amount: String,

    #[arg(long, value_name = "NAME", help = "Category, letters separated by single spaces or hyphens.")]
    pub category: String,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Date of the expense.")]
    pub date: String,
}

/// Arguments for the `edit` command.
#[derive(Args, Debug)]
pub struct EditCommand {
    #[arg(value_name = "ID")]
    pub id: String,

    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
}

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListCommand {
    #[arg(long, value_name = "KEY", default_value_t = SortKey::DateDesc, help = "Sort order: date_desc, date_asc, description_asc, description_desc, amount_asc, amount_desc.")]
    pub sort: SortKey,

    #[arg(long, short = 's', value_name = "PATTERN", help = "Only show records matching this regular expression.")]
    pub search: Option<String>,

    #[arg(long = "case-sensitive", help = "Match the search pattern case-sensitively.")]
    pub case_sensitive: bool,

    #[arg(long, help = "Print records as lines with escaped <mark> highlight markup instead of a table.")]
    pub markup: bool,
}

/// Subcommands for the `settings` command.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    #[command(about = "Prints the current settings.")]
    Show,

    #[command(about = "Updates settings; unspecified values keep their current value.")]
    Set(SettingsSetCommand),
}

/// Arguments for `settings set`.
#[derive(Args, Debug)]
pub struct SettingsSetCommand {
    #[arg(long = "base-currency", value_name = "CODE", help = "USD, EUR or GBP.")]
    pub base_currency: Option<String>,

    #[arg(long = "rate-eur", value_name = "RATE", help = "EUR per USD.")]
    pub rate_eur: Option<String>,

    #[arg(long = "rate-gbp", value_name = "RATE", help = "GBP per USD.")]
    pub rate_gbp: Option<String>,

    #[arg(long = "budget-cap", value_name = "AMOUNT", help = "Spending cap in USD (empty means 0).")]
    pub budget_cap: Option<String>,

    #[arg(long, value_name = "LIST", help = "Comma-separated category names.")]
    pub categories: Option<String>,
}
