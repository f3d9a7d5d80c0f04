// sfplanner/src/commands/records.rs
//! Record commands: add, edit, delete and list.

use anyhow::{Context, Result};
use chrono::Utc;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};

use sfplanner_core::{
    compile_search_pattern, filter_records, sort_records, PlannerError, Record, RecordInput,
};

use super::{CommandError, Session};
use crate::cli::{AddCommand, EditCommand, ListCommand};
use crate::ui::output_format::paint;
use crate::ui::table::{records_markup, records_table};
use crate::ui::theme::ThemeEntry;

/// Prints each field error and converts a validation failure into a command error.
fn report_invalid(session: &Session, err: PlannerError) -> anyhow::Error {
    match err {
        PlannerError::InvalidRecord(errors) => {
            for e in &errors {
                session.error(e.to_string());
            }
            CommandError::InvalidFields(errors.len()).into()
        }
        other => other.into(),
    }
}

fn warn_unknown_category(session: &Session, record: &Record) {
    if !session.settings.is_known_category(&record.category) {
        session.warn(format!(
            "Category '{}' is not in your category list ({}).",
            record.category,
            session.settings.categories.join(", ")
        ));
    }
}

pub fn add(session: &mut Session, args: AddCommand) -> Result<()> {
    let input = RecordInput {
        description: args.description,
        amount: args.amount,
        category: args.category,
        date: args.date,
    };
    let record = match session.ledger.add(&input, Utc::now()) {
        Ok(record) => record.clone(),
        Err(e) => return Err(report_invalid(session, e)),
    };
    warn_unknown_category(session, &record);
    session.save_records()?;
    info!("Record '{}' added.", record.id);
    session.success(format!("Record added ({}).", record.id));
    Ok(())
}

pub fn edit(session: &mut Session, args: EditCommand) -> Result<()> {
    let current = session
        .ledger
        .get(&args.id)
        .ok_or_else(|| PlannerError::RecordNotFound(args.id.clone()))?;
    let input = RecordInput {
        description: args.description.unwrap_or_else(|| current.description.clone()),
        amount: args.amount.unwrap_or_else(|| format!("{:.2}", current.amount)),
        category: args.category.unwrap_or_else(|| current.category.clone()),
        date: args.date.unwrap_or_else(|| current.date.clone()),
    };
    let record = match session.ledger.update(&args.id, &input, Utc::now()) {
        Ok(record) => record.clone(),
        Err(e) => return Err(report_invalid(session, e)),
    };
    warn_unknown_category(session, &record);
    session.save_records()?;
    info!("Record '{}' updated.", record.id);
    session.success(format!("Record updated ({}).", record.id));
    Ok(())
}

/// Asks on stdout and reads the answer from stdin; only `y` confirms.
fn confirm(session: &Session, question: &str) -> Result<bool> {
    let supports_color = io::stdout().is_terminal();
    print!("{} (y/N): ", paint(question, ThemeEntry::Prompt, &session.theme, supports_color));
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation input.")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

pub fn delete(session: &mut Session, id: &str, yes: bool) -> Result<()> {
    let description = session
        .ledger
        .get(id)
        .map(|r| r.description.clone())
        .ok_or_else(|| PlannerError::RecordNotFound(id.to_string()))?;

    if !yes && !confirm(session, &format!("Delete record {} ({})?", id, description))? {
        session.info("Delete cancelled.");
        return Ok(());
    }

    session.ledger.delete(id)?;
    session.save_records()?;
    info!("Record '{}' deleted.", id);
    session.success(format!("Record deleted ({}).", id));
    Ok(())
}

pub fn list(session: &Session, args: ListCommand) -> Result<()> {
    let sorted = sort_records(session.ledger.records(), args.sort);
    let search = compile_search_pattern(args.search.as_deref().unwrap_or(""), !args.case_sensitive);
    if let Some(error) = &search.error {
        session.error(error);
        session.warn("Showing all records unfiltered.");
    }
    let shown = filter_records(&sorted, search.matcher());
    debug!("Listing {} of {} records (sort: {}).", shown.len(), sorted.len(), args.sort);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.markup {
        for line in records_markup(&shown, &session.settings, search.matcher()) {
            writeln!(out, "{}", line)?;
        }
    } else if !shown.is_empty() {
        let supports_color = stdout.is_terminal();
        let table = records_table(&shown, &session.settings, search.matcher(), &session.theme, supports_color);
        writeln!(out, "{}", table)?;
    }
    writeln!(out, "Showing {} of {} records.", shown.len(), sorted.len())?;
    Ok(())
}
