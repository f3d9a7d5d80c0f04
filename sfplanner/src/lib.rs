// sfplanner/src/lib.rs
//! # SFPlanner CLI Application
//!
//! Terminal front end for `sfplanner-core`. Each invocation loads the ledger
//! and settings from the data directory, runs one command and writes back
//! whatever changed.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

pub use commands::run;
