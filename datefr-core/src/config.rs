use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::indicators::{COMPLETION_INDICATORS, DEFAULT_WINDOW_LEN, DUE_INDICATORS};
use crate::keywords::Keywords;
use crate::normalizer::{Language, NormalizerSettings, PreferDates};

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Timezone every returned timestamp is expressed in.
    pub timezone: Tz,
    pub prefer_dates_from: PreferDates,
    /// Characters handed to the date parser after an indicator phrase.
    pub window_len: usize,
    /// Built-in due-date phrases followed by `extra_due_indicators`, lowercased.
    pub due_indicators: Vec<String>,
    /// Built-in completion phrases followed by `extra_completion_indicators`, lowercased.
    pub completion_indicators: Vec<String>,
    /// Fixed "now" for relative dates. Never read from disk; `None` uses the clock.
    pub reference: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    timezone: Option<String>,
    prefer_dates_from: Option<String>,
    window_len: Option<usize>,
    extra_due_indicators: Option<Vec<String>>,
    extra_completion_indicators: Option<Vec<String>>,
    /// Optional table:
    /// [synonyms]
    /// "2main" = "demain"
    synonyms: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            timezone: chrono_tz::Europe::Paris,
            prefer_dates_from: PreferDates::Future,
            window_len: DEFAULT_WINDOW_LEN,
            due_indicators: DUE_INDICATORS.iter().map(|s| s.to_string()).collect(),
            completion_indicators: COMPLETION_INDICATORS.iter().map(|s| s.to_string()).collect(),
            reference: None,
        }
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Self::from_file_config(file_config)
    }

    /// Same as [`Config::load`] but reads `path` instead of searching the standard locations.
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Self::from_file_config(file_config)
    }

    /// `host:port`, ready for a socket bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn normalizer_settings(&self) -> NormalizerSettings {
        NormalizerSettings {
            timezone: self.timezone,
            prefer_dates_from: self.prefer_dates_from,
            language: Language::Fr,
            reference: self.reference,
        }
    }

    fn from_file_config(file_config: FileConfig) -> Result<Self> {
        let defaults = Self::default();

        let timezone = match file_config.timezone.as_deref() {
            Some(name) => Tz::from_str(name)
                .map_err(|e| anyhow::anyhow!("{e}"))
                .with_context(|| format!("invalid timezone {name:?}"))?,
            None => defaults.timezone,
        };

        let prefer_dates_from = match file_config.prefer_dates_from.as_deref() {
            Some(value) => PreferDates::from_str(value).with_context(|| {
                format!("invalid prefer_dates_from {value:?} (expected future, past or current_period)")
            })?,
            None => defaults.prefer_dates_from,
        };

        let window_len = file_config.window_len.unwrap_or(defaults.window_len);
        if window_len == 0 {
            anyhow::bail!("window_len must be greater than zero");
        }

        let due_indicators =
            Self::merge_indicators(defaults.due_indicators, file_config.extra_due_indicators);
        let completion_indicators = Self::merge_indicators(
            defaults.completion_indicators,
            file_config.extra_completion_indicators,
        );

        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Ok(Self {
            host: file_config.host.unwrap_or(defaults.host),
            port: file_config.port.unwrap_or(defaults.port),
            timezone,
            prefer_dates_from,
            window_len,
            due_indicators,
            completion_indicators,
            reference: None,
        })
    }

    /// Built-in phrases keep their priority; extra ones are tried afterwards.
    fn merge_indicators(mut builtin: Vec<String>, extra: Option<Vec<String>>) -> Vec<String> {
        for phrase in extra.unwrap_or_default() {
            let phrase = phrase.trim().to_lowercase();
            if !phrase.is_empty() && !builtin.contains(&phrase) {
                builtin.push(phrase);
            }
        }
        builtin
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("datefr").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("datefr").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical keyword (eg. "demain").
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}
