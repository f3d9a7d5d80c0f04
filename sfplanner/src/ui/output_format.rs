// sfplanner/src/ui/output_format.rs
//! Themed message output.
//!
//! Every helper takes the writer and a `supports_color` flag so callers decide
//! whether ANSI styling is appropriate (normally: the stream is a terminal).

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Renders `text` in the theme color for `entry`, or unchanged when color is off.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match color_for(theme, entry) {
        Some(color) if supports_color => text.color(color).to_string(),
        _ => text.to_string(),
    }
}

/// Like [`paint`], also bold.
pub fn paint_bold(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match color_for(theme, entry) {
        Some(color) if supports_color => text.color(color).bold().to_string(),
        _ => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(msg, entry, theme, supports_color))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, &format!("Warning: {}", msg), ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, &format!("Error: {}", msg), ThemeEntry::Error, theme, supports_color)
}
