use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::Config;
use crate::indicators::{IndicatorKind, candidate_windows};
use crate::normalizer::{DateNormalizer, FrenchDateParser};

/// Dates found in one piece of text. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateResult {
    pub due_date: Option<DateTime<Tz>>,
    pub completion_date: Option<DateTime<Tz>>,
}

/// Finds due and completion dates in free-form French text.
///
/// Holds no mutable state, so one instance can serve any number of requests
/// concurrently.
pub struct DateExtractor {
    pub config: Config,
    normalizer: Box<dyn DateNormalizer>,
}

impl DateExtractor {
    /// Creates a new `DateExtractor`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Creates a new `DateExtractor` backed by the built-in [`FrenchDateParser`].
    pub fn with_config(config: Config) -> Self {
        let normalizer = FrenchDateParser::new(config.normalizer_settings());
        Self::with_normalizer(config, Box::new(normalizer))
    }

    /// Creates a `DateExtractor` that delegates date recognition to `normalizer`.
    pub fn with_normalizer(config: Config, normalizer: Box<dyn DateNormalizer>) -> Self {
        Self { config, normalizer }
    }

    /// Looks for a due date and a completion date in `text`.
    ///
    /// For each kind, indicator phrases are tried in list order; the first one
    /// whose window yields a date wins. A kind with no usable window stays `None`.
    /// Errors come only from the normalizer and abort the whole extraction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::{TimeZone, Utc};
    /// # use datefr_core::{Config, DateExtractor};
    /// let config = Config {
    ///     reference: Some(Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()),
    ///     ..Config::default()
    /// };
    /// let extractor = DateExtractor::with_config(config);
    ///
    /// let result = extractor.extract("Rapport à faire avant 15 mars 2025").unwrap();
    /// assert_eq!(result.due_date.unwrap().to_rfc3339(), "2025-03-15T00:00:00+01:00");
    /// assert!(result.completion_date.is_none());
    /// ```
    pub fn extract(&self, text: &str) -> Result<DateResult> {
        let text = text.to_lowercase();
        Ok(DateResult {
            due_date: self.first_date(&text, IndicatorKind::Due)?,
            completion_date: self.first_date(&text, IndicatorKind::Completion)?,
        })
    }

    fn first_date(&self, text: &str, kind: IndicatorKind) -> Result<Option<DateTime<Tz>>> {
        let indicators = match kind {
            IndicatorKind::Due => &self.config.due_indicators,
            IndicatorKind::Completion => &self.config.completion_indicators,
        };
        for hit in candidate_windows(text, indicators, self.config.window_len) {
            if let Some(date) = self.normalizer.normalize(hit.window)? {
                tracing::debug!(
                    kind = kind.as_ref(),
                    indicator = hit.indicator,
                    window = hit.window,
                    %date,
                    "date found"
                );
                return Ok(Some(date));
            }
            tracing::debug!(
                kind = kind.as_ref(),
                indicator = hit.indicator,
                window = hit.window,
                "no date after indicator"
            );
        }
        Ok(None)
    }
}
