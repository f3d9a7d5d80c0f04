// File: sfplanner-core/src/settings.rs
//! User settings: base currency, conversion rates, budget cap and the
//! suggested category list.
//!
//! Settings are stored and imported as partial documents. [`SettingsPatch`]
//! carries whatever fields were present and [`Settings::overlay`] lays them
//! over a complete base, so a file written by an older version (or edited by
//! hand) still loads with sensible values for the missing keys.
//!
//! License: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validators::validate_amount;

/// Categories offered to new users.
pub const DEFAULT_CATEGORIES: [&str; 6] = ["Food", "Books", "Transport", "Entertainment", "Fees", "Other"];

/// Display currencies. Amounts are always stored in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Prefix written before a formatted amount.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "EUR ",
            Currency::Gbp => "GBP ",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| SettingsError::UnknownCurrency(code.to_string()))
    }
}

/// Conversion rates from USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    #[serde(rename = "EUR")]
    pub eur: f64,
    #[serde(rename = "GBP")]
    pub gbp: f64,
}

impl Default for Rates {
    fn default() -> Self {
        Self { eur: 0.92, gbp: 0.79 }
    }
}

/// The complete settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_currency: Currency,
    pub rates: Rates,
    /// Spending cap in USD.
    pub budget_cap: f64,
    pub categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: Currency::Usd,
            rates: Rates::default(),
            budget_cap: 500.0,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Partial rates, as found in stored or imported documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesPatch {
    #[serde(rename = "EUR", default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<f64>,
    #[serde(rename = "GBP", default, skip_serializing_if = "Option::is_none")]
    pub gbp: Option<f64>,
}

/// Partial settings, as found in stored or imported documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<RatesPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl From<&Settings> for SettingsPatch {
    fn from(settings: &Settings) -> Self {
        Self {
            base_currency: Some(settings.base_currency),
            rates: Some(RatesPatch {
                eur: Some(settings.rates.eur),
                gbp: Some(settings.rates.gbp),
            }),
            budget_cap: Some(settings.budget_cap),
            categories: Some(settings.categories.clone()),
        }
    }
}

/// Raw settings form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInput {
    pub base_currency: String,
    pub rate_eur: String,
    pub rate_gbp: String,
    pub budget_cap: String,
    /// Comma-separated category names.
    pub categories: String,
}

/// Rejected settings input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Rates and cap must be valid numbers.")]
    InvalidNumbers,

    #[error("At least one category is required.")]
    NoCategories,

    #[error("Unsupported base currency '{0}'. Expected one of USD, EUR, GBP.")]
    UnknownCurrency(String),
}

impl Settings {
    /// Converts a USD amount into the base currency.
    pub fn convert(&self, amount: f64) -> f64 {
        match self.base_currency {
            Currency::Usd => amount,
            Currency::Eur => amount * self.rates.eur,
            Currency::Gbp => amount * self.rates.gbp,
        }
    }

    /// Returns these settings with every field present in `patch` replaced.
    ///
    /// Rates are rebuilt from `rates_base` with the patch's rates on top, so
    /// a patch without rates resets them to `rates_base`.
    pub fn overlay(&self, patch: &SettingsPatch, rates_base: &Rates) -> Settings {
        let mut rates = *rates_base;
        if let Some(patch_rates) = &patch.rates {
            if let Some(eur) = patch_rates.eur {
                rates.eur = eur;
            }
            if let Some(gbp) = patch_rates.gbp {
                rates.gbp = gbp;
            }
        }
        Settings {
            base_currency: patch.base_currency.unwrap_or(self.base_currency),
            rates,
            budget_cap: patch.budget_cap.unwrap_or(self.budget_cap),
            categories: patch
                .categories
                .clone()
                .unwrap_or_else(|| self.categories.clone()),
        }
    }

    /// Validates a settings form and returns the updated settings.
    pub fn with_input(&self, input: &SettingsInput) -> Result<Settings, SettingsError> {
        let eur = validate_amount(&input.rate_eur);
        let gbp = validate_amount(&input.rate_gbp);
        let cap_text = if input.budget_cap.trim().is_empty() { "0" } else { input.budget_cap.as_str() };
        let cap = validate_amount(cap_text);
        let categories = parse_categories(&input.categories);

        let (Ok(eur), Ok(gbp), Ok(budget_cap)) = (eur, gbp, cap) else {
            return Err(SettingsError::InvalidNumbers);
        };
        if categories.is_empty() {
            return Err(SettingsError::NoCategories);
        }
        let base_currency: Currency = input.base_currency.parse()?;

        debug!(
            "Settings updated: base {}, EUR {}, GBP {}, cap {}, {} categories.",
            base_currency,
            eur,
            gbp,
            budget_cap,
            categories.len()
        );
        Ok(Settings {
            base_currency,
            rates: Rates { eur, gbp },
            budget_cap,
            categories,
        })
    }

    /// Whether `name` is in the suggested category list (case-insensitive).
    pub fn is_known_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Current values in form shape, for pre-filling edits.
    pub fn to_input(&self) -> SettingsInput {
        SettingsInput {
            base_currency: self.base_currency.code().to_string(),
            rate_eur: self.rates.eur.to_string(),
            rate_gbp: self.rates.gbp.to_string(),
            budget_cap: self.budget_cap.to_string(),
            categories: self.categories.join(", "),
        }
    }
}

/// Splits a comma-separated category list, trimming and dropping empties.
pub fn parse_categories(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run_values() {
        let s = Settings::default();
        assert_eq!(s.base_currency, Currency::Usd);
        assert_eq!(s.rates, Rates { eur: 0.92, gbp: 0.79 });
        assert_eq!(s.budget_cap, 500.0);
        assert_eq!(s.categories.len(), 6);
        assert!(s.is_known_category("food"));
    }

    #[test]
    fn currency_parsing_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" GBP ".parse::<Currency>().unwrap(), Currency::Gbp);
        assert_eq!(
            "JPY".parse::<Currency>().unwrap_err(),
            SettingsError::UnknownCurrency("JPY".into())
        );
    }

    #[test]
    fn convert_uses_base_currency_rate() {
        let mut s = Settings::default();
        assert_eq!(s.convert(10.0), 10.0);
        s.base_currency = Currency::Gbp;
        s.rates.gbp = 0.5;
        assert_eq!(s.convert(10.0), 5.0);
    }

    #[test]
    fn overlay_keeps_unpatched_fields() {
        let base = Settings {
            budget_cap: 100.0,
            ..Settings::default()
        };
        let patch = SettingsPatch {
            base_currency: Some(Currency::Eur),
            rates: Some(RatesPatch { eur: Some(0.9), gbp: None }),
            ..SettingsPatch::default()
        };
        let merged = base.overlay(&patch, &Rates::default());
        assert_eq!(merged.base_currency, Currency::Eur);
        assert_eq!(merged.budget_cap, 100.0);
        assert_eq!(merged.rates, Rates { eur: 0.9, gbp: 0.79 });
        assert_eq!(merged.categories, base.categories);
    }

    #[test]
    fn overlay_without_rates_resets_to_rates_base() {
        let mut current = Settings::default();
        current.rates = Rates { eur: 1.5, gbp: 1.5 };
        let merged = current.overlay(&SettingsPatch::default(), &Rates::default());
        assert_eq!(merged.rates, Rates::default());
    }

    #[test]
    fn patch_deserializes_partial_documents() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"budgetCap": 250, "rates": {"GBP": 0.8}}"#).unwrap();
        assert_eq!(patch.budget_cap, Some(250.0));
        assert_eq!(patch.rates, Some(RatesPatch { eur: None, gbp: Some(0.8) }));
        assert!(patch.categories.is_none());
    }

    #[test]
    fn with_input_validates_numbers_and_categories() {
        let s = Settings::default();
        let mut input = s.to_input();
        input.budget_cap = "".into();
        input.categories = " Rent , , Food ".into();
        let updated = s.with_input(&input).unwrap();
        assert_eq!(updated.budget_cap, 0.0);
        assert_eq!(updated.categories, vec!["Rent".to_string(), "Food".to_string()]);

        let mut bad_rate = s.to_input();
        bad_rate.rate_eur = "0.925".into();
        assert_eq!(s.with_input(&bad_rate).unwrap_err(), SettingsError::InvalidNumbers);

        let mut no_categories = s.to_input();
        no_categories.categories = " , ".into();
        assert_eq!(s.with_input(&no_categories).unwrap_err(), SettingsError::NoCategories);

        let mut bad_currency = s.to_input();
        bad_currency.base_currency = "XYZ".into();
        assert!(matches!(
            s.with_input(&bad_currency),
            Err(SettingsError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn settings_serialize_with_currency_codes() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["baseCurrency"], "USD");
        assert_eq!(json["rates"]["EUR"], 0.92);
        assert_eq!(json["budgetCap"], 500.0);
    }
}
