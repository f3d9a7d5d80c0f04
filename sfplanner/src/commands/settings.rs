// sfplanner/src/commands/settings.rs
//! `settings show` and `settings set`.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io;

use sfplanner_core::{PlannerError, SettingsInput};

use super::Session;
use crate::cli::{SettingsCommand, SettingsSetCommand};
use crate::ui::table::settings_table;

pub fn run(session: &mut Session, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show => {
            let supports_color = io::stdout().is_terminal();
            println!("{}", settings_table(&session.settings, &session.theme, supports_color));
            Ok(())
        }
        SettingsCommand::Set(args) => set(session, args),
    }
}

/// Lays the given values over the current settings in form shape.
fn merged_input(current: SettingsInput, args: SettingsSetCommand) -> SettingsInput {
    SettingsInput {
        base_currency: args.base_currency.unwrap_or(current.base_currency),
        rate_eur: args.rate_eur.unwrap_or(current.rate_eur),
        rate_gbp: args.rate_gbp.unwrap_or(current.rate_gbp),
        budget_cap: args.budget_cap.unwrap_or(current.budget_cap),
        categories: args.categories.unwrap_or(current.categories),
    }
}

fn set(session: &mut Session, args: SettingsSetCommand) -> Result<()> {
    let input = merged_input(session.settings.to_input(), args);
    let updated = session
        .settings
        .with_input(&input)
        .map_err(PlannerError::from)?;

    if updated == session.settings {
        session.info("Settings unchanged.");
        return Ok(());
    }
    session.settings = updated;
    session.save_settings()?;
    info!("Settings saved.");
    session.success("Settings saved.");
    Ok(())
}
