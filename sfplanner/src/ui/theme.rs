//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the structure for theme configuration, allowing users
//! to customize the colors of the planner's output. It supports 16-color
//! ANSI named colors for foreground styling and can load a theme from a YAML
//! file, falling back to the defaults for entries the file leaves out.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Table headers and section titles.
    Header,
    /// Confirmation that a change was saved.
    Success,
    /// General informational messages.
    Info,
    /// Warning messages.
    Warn,
    /// Error messages, including field validation failures.
    Error,
    /// Spans matched by a search pattern.
    Highlight,
    /// Confirmation questions.
    Prompt,
    /// Cap status while spending is within the cap.
    UnderCap,
    /// Cap status once spending exceeds the cap.
    OverCap,
    /// Bars of the 7-day trend chart.
    TrendBar,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 10] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Highlight,
        ThemeEntry::Prompt,
        ThemeEntry::UnderCap,
        ThemeEntry::OverCap,
        ThemeEntry::TrendBar,
    ];

    fn default_color(&self) -> &'static str {
        match self {
            ThemeEntry::Header => "brightblue",
            ThemeEntry::Success => "green",
            ThemeEntry::Info => "white",
            ThemeEntry::Warn => "yellow",
            ThemeEntry::Error => "red",
            ThemeEntry::Highlight => "brightyellow",
            ThemeEntry::Prompt => "cyan",
            ThemeEntry::UnderCap => "green",
            ThemeEntry::OverCap => "brightred",
            ThemeEntry::TrendBar => "cyan",
        }
    }
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" |
            "brightblack" | "brightred" | "brightgreen" | "brightyellow" | "brightblue" |
            "brightmagenta" | "brightcyan" | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    /// Converts the `ThemeColor` into its corresponding `owo_colors::AnsiColors`.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

/// Foreground color for `entry`, if the theme sets one.
pub fn color_for(theme: &ThemeMap, entry: ThemeEntry) -> Option<AnsiColors> {
    theme
        .get(&entry)
        .and_then(|style| style.fg.as_ref())
        .map(ThemeColor::to_ansi_color)
}

impl ThemeStyle {
    /// Loads a theme from a YAML file on disk and fills missing entries from the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for (entry, style) in &custom {
            if let Some(ThemeColor::Named(name)) = &style.fg {
                name.parse::<ThemeColor>().with_context(|| {
                    format!("Theme entry '{:?}' in {} has color '{}'", entry, path.display(), name)
                })?;
            }
        }

        for (entry, style) in Self::default_theme_map() {
            custom.entry(entry).or_insert(style);
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        ThemeEntry::ALL
            .into_iter()
            .map(|entry| {
                let style = ThemeStyle { fg: Some(ThemeColor::Named(entry.default_color().into())) };
                (entry, style)
            })
            .collect()
    }
}
