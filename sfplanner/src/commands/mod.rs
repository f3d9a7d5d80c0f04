// sfplanner/src/commands/mod.rs
//! Command dispatch and the per-invocation session.
//!
//! A [`Session`] is opened for every command: it loads the ledger and the
//! settings from the data directory and owns the store used to write them
//! back. Commands only persist what they changed.

pub mod records;
pub mod settings;
pub mod stats;
pub mod transfer;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use sfplanner_core::{Ledger, RecordStore, Settings};

use crate::cli::{Cli, Commands};
use crate::ui::output_format;
use crate::ui::theme::{build_theme_map, ThemeMap};
use crate::utils::data_store::{default_data_dir, JsonFileStore};

/// Failures the CLI reports on top of the library's own errors.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Nothing was saved: {0} field(s) failed validation.")]
    InvalidFields(usize),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing the outcome of a change to stdout.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stdout_supports_color = io::stdout().is_terminal();
    let _ = output_format::print_success_message(&mut io::stdout(), msg.as_ref(), theme, stdout_supports_color);
}

/// Loaded state for one command invocation.
pub struct Session {
    pub store: JsonFileStore,
    pub ledger: Ledger,
    pub settings: Settings,
    pub theme: ThemeMap,
    pub quiet: bool,
}

impl Session {
    pub fn open(data_dir: &Path, theme: ThemeMap, quiet: bool) -> Result<Self> {
        let store = JsonFileStore::new(data_dir);
        let records = store
            .load_records()
            .with_context(|| format!("Failed to read records from {}", data_dir.display()))?;
        let settings = store
            .load_settings(&Settings::default())
            .with_context(|| format!("Failed to read settings from {}", data_dir.display()))?;
        debug!(
            "Session opened on {} with {} records.",
            data_dir.display(),
            records.len()
        );
        Ok(Self {
            store,
            ledger: Ledger::new(records),
            settings,
            theme,
            quiet,
        })
    }

    pub fn save_records(&mut self) -> Result<()> {
        self.store
            .save_records(self.ledger.records())
            .with_context(|| format!("Failed to write records to {}", self.store.dir().display()))
    }

    pub fn save_settings(&mut self) -> Result<()> {
        self.store
            .save_settings(&self.settings)
            .with_context(|| format!("Failed to write settings to {}", self.store.dir().display()))
    }

    /// Informational output, silenced by `--quiet`.
    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            info_msg(msg, &self.theme);
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        warn_msg(msg, &self.theme);
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        error_msg(msg, &self.theme);
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        success_msg(msg, &self.theme);
    }
}

/// Runs the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let theme = build_theme_map(cli.theme.as_deref()).context("Theme error")?;
    let data_dir: PathBuf = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut session = Session::open(&data_dir, theme, cli.quiet)?;

    match cli.command {
        Commands::Add(args) => records::add(&mut session, args),
        Commands::Edit(args) => records::edit(&mut session, args),
        Commands::Delete { id, yes } => records::delete(&mut session, &id, yes),
        Commands::List(args) => records::list(&session, args),
        Commands::Stats { today } => stats::show(&session, today.as_deref()),
        Commands::Settings(cmd) => settings::run(&mut session, cmd),
        Commands::Export { output } => transfer::export(&session, output.as_deref()),
        Commands::Import { file } => transfer::import(&mut session, &file),
    }
}
