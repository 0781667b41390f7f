use anyhow::Result;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use strum_macros::{AsRefStr, EnumString};

use crate::dates::localize;
use crate::parse_input::{ParseOptions, parse_date_expression};

/// Which side of the reference date an incomplete expression resolves to
/// ("15 mars" without a year, "vendredi" without a week).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PreferDates {
    #[default]
    Future,
    Past,
    CurrentPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizerSettings {
    pub timezone: Tz,
    pub prefer_dates_from: PreferDates,
    pub language: Language,
    /// Instant used as "now" for relative expressions. `None` reads the clock
    /// on every call.
    pub reference: Option<DateTime<Utc>>,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Paris,
            prefer_dates_from: PreferDates::Future,
            language: Language::Fr,
            reference: None,
        }
    }
}

/// Turns a short piece of text into a point in time.
///
/// `Ok(None)` means no date was recognised, which callers treat as "try the next
/// window". `Err` is reserved for failures that should abort the whole request.
pub trait DateNormalizer: Send + Sync {
    fn normalize(&self, window: &str) -> Result<Option<DateTime<Tz>>>;
}

/// Built-in [`DateNormalizer`] for French text.
#[derive(Debug, Clone, Default)]
pub struct FrenchDateParser {
    settings: NormalizerSettings,
}

impl FrenchDateParser {
    pub fn new(settings: NormalizerSettings) -> Self {
        Self { settings }
    }
}

impl DateNormalizer for FrenchDateParser {
    fn normalize(&self, window: &str) -> Result<Option<DateTime<Tz>>> {
        let tz = self.settings.timezone;
        let now = self.settings.reference.unwrap_or_else(Utc::now);
        let local = now.with_timezone(&tz).naive_local();
        let reference = local.with_nanosecond(0).unwrap_or(local);
        let options = ParseOptions {
            reference,
            prefer_dates_from: self.settings.prefer_dates_from,
        };

        let parsed = match self.settings.language {
            Language::Fr => parse_date_expression(window, options)?,
        };
        let Some(naive) = parsed else {
            return Ok(None);
        };
        Ok(localize(&tz, naive))
    }
}
