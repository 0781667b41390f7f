use anyhow::{Context, Result, bail};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::keywords::{Keyword, Keywords};
use crate::normalizer::PreferDates;

const WEEKDAYS: &str = "lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche";

/// Longer spellings come first so `janvier` is not cut to `janv`.
const MONTHS: &str = "janvier|janv|février|fevrier|févr|fevr|fév|fev|mars|avril|avr|mai|juin|\
juillet|juil|août|aout|septembre|sept|sep|octobre|oct|novembre|nov|décembre|decembre|déc|dec";

/// How far to look for a valid day when the year is missing (29 février).
const YEAR_SEARCH_SPAN: i32 = 8;

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug)]
pub struct ParseOptions {
    /// Wall-clock "now" in the target timezone.
    pub reference: NaiveDateTime,
    pub prefer_dates_from: PreferDates,
}

/// A date recognised at the start of some text.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DateMatch<'a> {
    pub date: NaiveDate,
    /// Time implied by the expression itself. Relative words ("demain",
    /// "dans 3 jours") carry the reference time of day.
    pub time: Option<NaiveTime>,
    /// Whatever follows the date expression.
    pub rest: &'a str,
}

struct Patterns {
    filler: Regex,
    words: Regex,
    offset: Regex,
    period: Regex,
    iso: Regex,
    numeric: Regex,
    textual: Regex,
    year: Regex,
    month_next: Regex,
    month_year: Regex,
    weekday: Regex,
    modifier: Regex,
    bare_day: Regex,
    number_suffix: Regex,
    trailing_time: Regex,
}

impl Patterns {
    fn new() -> Self {
        let re = |pattern: &str| Regex::new(pattern).expect("date pattern must compile");
        Self {
            filler: re(r"(?i)^(?:[:,;\-–]\s*|(?:d['’]ici|au\s+plus\s+tard|le|la|au|du|ce|cette)\s+|l['’])"),
            words: re(r"(?i)^([\p{L}\p{N}'’\-]+)(?:\s+([\p{L}'’\-]+))?"),
            offset: re(
                r"(?i)^(?:(dans|il\s+y\s+a)\s+)?(\d+|une?|deux|trois|quatre|cinq|six|sept|huit|neuf|dix|quinze)\s+(jours?|semaines?|mois|ans?|ann[ée]es?)\b",
            ),
            period: re(r"(?i)^(semaine|mois|an|ann[ée]e)\s+([\p{L}]+)\b"),
            iso: re(r"(?i)^(\d{4})-(\d{1,2})-(\d{1,2})(?:t(\d{1,2}):(\d{2})(?::(\d{2}))?)?\b"),
            numeric: re(r"^(\d{1,2})[/.\-](\d{1,2})(?:[/.\-](\d{4}|\d{2}))?\b"),
            textual: re(&format!(
                r"(?i)^(?:(?:{WEEKDAYS})\s+)?(?:(\d{{1,2}})(?:er|e)?|(premier))\s+({MONTHS})\b\.?"
            )),
            // Group 2 set means the number is an hour ("15 mars 14:30").
            year: re(r"(?i)^\s+(\d+)\b(\s*(?::\d|h\b|heures?\b))?"),
            month_next: re(&format!(r"(?i)^\s+(?:{MONTHS})\b")),
            month_year: re(&format!(r"(?i)^({MONTHS})\b\.?\s+(\d{{4}})\b")),
            weekday: re(&format!(r"(?i)^({WEEKDAYS})\b")),
            modifier: re(r"(?i)^\s+([\p{L}]+)\b"),
            bare_day: re(r"(?i)^(\d{1,2})(?:er|e)?\b"),
            // "15/03", "15:30", "15 h": the number is not a lone day.
            number_suffix: re(r"(?i)^(?:[/.\-]\d|\s*(?::\d|h\b|heures?\b))"),
            trailing_time: re(
                r"(?i)^\s*,?\s*(?:(?:à|a|vers|dès)\s+)?(\d{1,2}\s*(?:heures?|h)\s*(?:\d{2})?|\d{1,2}:\d{2}(?::\d{2})?|[\p{L}]+)\b",
            ),
        }
    }
}

static PATTERNS: Lazy<Patterns> = Lazy::new(Patterns::new);

/// Parses a French date expression found at the start of `input`.
///
/// Anything after the expression is ignored, so the window following an
/// indicator can safely run into the rest of the sentence. An optional time
/// (`à 14h30`, `à midi`) right after the date is honoured.
///
/// Absolute dates without a time resolve to midnight. Relative words keep the
/// reference time of day, like "now + 1 day" would.
///
/// # Returns
///
/// - `Ok(Some(_))` with the wall-clock date and time.
/// - `Ok(None)` if `input` does not start with a date (or names an impossible
///   one, e.g. `31 février`).
/// - `Err(_)` when the expression is a date but cannot be represented
///   (`dans 999999999 ans`).
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use datefr_core::normalizer::PreferDates;
/// # use datefr_core::parse_input::{parse_date_expression, ParseOptions};
/// let opts = ParseOptions {
///     reference: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap().and_hms_opt(9, 0, 0).unwrap(),
///     prefer_dates_from: PreferDates::Future,
/// };
///
/// let parsed = parse_date_expression("le 15 mars à 14h, merci", opts).unwrap().unwrap();
/// assert_eq!(parsed.to_string(), "2025-03-15 14:00:00");
/// ```
pub fn parse_date_expression(input: &str, options: ParseOptions) -> Result<Option<NaiveDateTime>> {
    let Some(found) = parse_date_token(input, options)? else {
        return Ok(None);
    };
    let time = parse_trailing_time(found.rest)
        .or(found.time)
        .unwrap_or(NaiveTime::MIN);
    Ok(Some(found.date.and_time(time)))
}

/// Recognises the date part of an expression, processed in the following order:
/// 1.  **Relative keywords**: `aujourd'hui`, `demain`, `après-demain`, `hier`,
///     `avant-hier` and registered synonyms.
/// 2.  **Offsets**: `dans 3 jours`, `il y a deux semaines`, `1 mois`.
/// 3.  **Periods**: `semaine prochaine`, `mois dernier`, `année prochaine`.
/// 4.  **ISO**: `2025-03-15`, `2025-03-15T14:30`.
/// 5.  **Numeric, day first**: `15/03/2025`, `15-03-25`, `15.03`.
/// 6.  **Textual**: `[lundi] 15 mars [2025]`, `1er avril`, `premier mai`.
/// 7.  **Month and year**: `mars 2025` (first of the month).
/// 8.  **Weekday**: `vendredi`, `lundi prochain`, `mardi dernier`.
/// 9.  **Day of month**: `15`, `1er` (month picked from the preference).
///
/// Leading filler (`le`, `la`, `l'`, `au`, `du`, `ce`, `cette`, `d'ici`,
/// `au plus tard`) is skipped first.
pub fn parse_date_token(input: &str, options: ParseOptions) -> Result<Option<DateMatch<'_>>> {
    let text = strip_filler(input.trim_start());

    if let Some(found) = relative_keyword(text, &options) {
        return Ok(Some(found));
    }
    if let Some(found) = relative_offset(text, &options)? {
        return Ok(Some(found));
    }
    if let Some(found) = relative_period(text, &options)? {
        return Ok(Some(found));
    }

    Ok(iso_date(text)
        .or_else(|| numeric_date(text, &options))
        .or_else(|| textual_date(text, &options))
        .or_else(|| month_year(text))
        .or_else(|| weekday_date(text, &options))
        .or_else(|| bare_day(text, &options)))
}

/// Parses a French time of day.
///
/// Understands, case-insensitively:
/// 1.  **Keywords**: `matin` (08:00), `midi` (12:00), `soir` (18:00), `minuit` (00:00).
/// 2.  **French notation**: `14h`, `14h30`, `14 h 30`, `14 heures`.
/// 3.  **Colon notation**: `14:30`, `9:05:30`.
/// 4.  **Hour only**: `8`, `17`.
///
/// ```
/// # use chrono::NaiveTime;
/// # use datefr_core::parse_input::parse_time_token;
/// assert_eq!(parse_time_token("14h30"), NaiveTime::from_hms_opt(14, 30, 0));
/// assert_eq!(parse_time_token("midi"), NaiveTime::from_hms_opt(12, 0, 0));
/// assert_eq!(parse_time_token("25h"), None);
/// ```
pub fn parse_time_token(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    match Keywords::lookup(s) {
        Some(Keyword::Matin) => return NaiveTime::from_hms_opt(8, 0, 0),
        Some(Keyword::Midi) => return NaiveTime::from_hms_opt(12, 0, 0),
        Some(Keyword::Soir) => return NaiveTime::from_hms_opt(18, 0, 0),
        Some(Keyword::Minuit) => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    let compact: String = s
        .to_lowercase()
        .replace("heures", "h")
        .replace("heure", "h")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if let Some((hour, minute)) = compact.split_once('h') {
        let hour = hour.parse::<u32>().ok()?;
        let minute = if minute.is_empty() {
            0
        } else {
            minute.parse::<u32>().ok()?
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    let parts: Vec<&str> = compact.split(':').collect();
    let numbers: Option<Vec<u32>> = parts.iter().map(|p| p.parse::<u32>().ok()).collect();
    match numbers?.as_slice() {
        [h] if *h <= 23 => NaiveTime::from_hms_opt(*h, 0, 0),
        [h, m] => NaiveTime::from_hms_opt(*h, *m, 0),
        [h, m, sec] => NaiveTime::from_hms_opt(*h, *m, *sec),
        _ => None,
    }
}

fn strip_filler(mut text: &str) -> &str {
    while let Some(m) = PATTERNS.filler.find(text) {
        text = text[m.end()..].trim_start();
    }
    text
}

fn rest_after<'a>(text: &'a str, caps: &Captures) -> &'a str {
    let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    &text[end..]
}

fn relative_keyword<'a>(text: &'a str, options: &ParseOptions) -> Option<DateMatch<'a>> {
    let caps = PATTERNS.words.captures(text)?;
    let first = caps.get(1)?;
    // Two-word spellings ("après demain") win over their first word.
    let pair = caps.get(2).and_then(|second| {
        let words = format!("{} {}", first.as_str(), second.as_str());
        Keywords::lookup(&normalize_apostrophes(&words)).map(|k| (k, second.end()))
    });
    let (keyword, end) = match pair {
        Some(found) => found,
        None => (
            Keywords::lookup(&normalize_apostrophes(first.as_str()))?,
            first.end(),
        ),
    };

    let days = match keyword {
        Keyword::Aujourdhui | Keyword::Maintenant => 0,
        Keyword::Demain => 1,
        Keyword::ApresDemain => 2,
        Keyword::Hier => -1,
        Keyword::AvantHier => -2,
        _ => return None,
    };
    let date = options
        .reference
        .date()
        .checked_add_signed(Duration::days(days))?;
    Some(DateMatch {
        date,
        time: Some(options.reference.time()),
        rest: &text[end..],
    })
}

fn relative_offset<'a>(text: &'a str, options: &ParseOptions) -> Result<Option<DateMatch<'a>>> {
    let Some(caps) = PATTERNS.offset.captures(text) else {
        return Ok(None);
    };
    let past = caps
        .get(1)
        .map(|m| m.as_str().to_lowercase().starts_with("il"))
        .unwrap_or(false);
    let amount = parse_amount(&caps[2])?;
    let unit = caps[3].to_lowercase();
    let amount = if past { -amount } else { amount };

    let shifted = if unit.starts_with("jour") {
        shift_days(options.reference, amount)?
    } else if unit.starts_with("semaine") {
        let days = amount
            .checked_mul(7)
            .with_context(|| format!("date hors limites: {}", &caps[0]))?;
        shift_days(options.reference, days)?
    } else if unit == "mois" {
        shift_months(options.reference, amount)?
    } else {
        let months = amount
            .checked_mul(12)
            .with_context(|| format!("date hors limites: {}", &caps[0]))?;
        shift_months(options.reference, months)?
    };

    Ok(Some(DateMatch {
        date: shifted.date(),
        time: Some(shifted.time()),
        rest: rest_after(text, &caps),
    }))
}

fn relative_period<'a>(text: &'a str, options: &ParseOptions) -> Result<Option<DateMatch<'a>>> {
    let Some(caps) = PATTERNS.period.captures(text) else {
        return Ok(None);
    };
    let step = match Keywords::lookup(&caps[2]) {
        Some(Keyword::Prochain) => 1,
        Some(Keyword::Dernier) => -1,
        _ => return Ok(None),
    };
    let unit = caps[1].to_lowercase();
    let shifted = match unit.as_str() {
        "semaine" => shift_days(options.reference, 7 * step)?,
        "mois" => shift_months(options.reference, step)?,
        _ => shift_months(options.reference, 12 * step)?,
    };
    Ok(Some(DateMatch {
        date: shifted.date(),
        time: Some(shifted.time()),
        rest: rest_after(text, &caps),
    }))
}

fn iso_date(text: &str) -> Option<DateMatch<'_>> {
    let caps = PATTERNS.iso.captures(text)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let time = match (caps.get(4), caps.get(5)) {
        (Some(h), Some(m)) => {
            let sec = caps.get(6).and_then(|s| s.as_str().parse().ok()).unwrap_or(0);
            Some(NaiveTime::from_hms_opt(
                h.as_str().parse().ok()?,
                m.as_str().parse().ok()?,
                sec,
            )?)
        }
        _ => None,
    };
    Some(DateMatch {
        date,
        time,
        rest: rest_after(text, &caps),
    })
}

fn numeric_date<'a>(text: &'a str, options: &ParseOptions) -> Option<DateMatch<'a>> {
    let caps = PATTERNS.numeric.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let date = match caps.get(3) {
        Some(year) => {
            NaiveDate::from_ymd_opt(explicit_year(year.as_str())?, month, day)?
        }
        None => resolve_year(month, day, options)?,
    };
    Some(DateMatch {
        date,
        time: None,
        rest: rest_after(text, &caps),
    })
}

fn textual_date<'a>(text: &'a str, options: &ParseOptions) -> Option<DateMatch<'a>> {
    let caps = PATTERNS.textual.captures(text)?;
    let day: u32 = match caps.get(1) {
        Some(digits) => digits.as_str().parse().ok()?,
        None => 1,
    };
    let month = month_number(&caps[3])?;
    let rest = rest_after(text, &caps);

    match PATTERNS.year.captures(rest) {
        Some(year) if year.get(2).is_none() => Some(DateMatch {
            date: NaiveDate::from_ymd_opt(explicit_year(&year[1])?, month, day)?,
            time: None,
            rest: rest_after(rest, &year),
        }),
        _ => Some(DateMatch {
            date: resolve_year(month, day, options)?,
            time: None,
            rest,
        }),
    }
}

/// Four digits as written, two digits in the 2000s. Anything else is a
/// truncated or mistyped year and must not be guessed.
fn explicit_year(digits: &str) -> Option<i32> {
    let year: i32 = digits.parse().ok()?;
    match digits.len() {
        4 => Some(year),
        2 => Some(2000 + year),
        _ => None,
    }
}

fn month_year(text: &str) -> Option<DateMatch<'_>> {
    let caps = PATTERNS.month_year.captures(text)?;
    let month = month_number(&caps[1])?;
    let date = NaiveDate::from_ymd_opt(caps[2].parse().ok()?, month, 1)?;
    Some(DateMatch {
        date,
        time: None,
        rest: rest_after(text, &caps),
    })
}

fn weekday_date<'a>(text: &'a str, options: &ParseOptions) -> Option<DateMatch<'a>> {
    let caps = PATTERNS.weekday.captures(text)?;
    let weekday = weekday_number(&caps[1])?;
    let mut rest = rest_after(text, &caps);

    let mut direction = options.prefer_dates_from;
    if let Some(modifier) = PATTERNS.modifier.captures(rest) {
        let forced = match Keywords::lookup(&modifier[1]) {
            Some(Keyword::Prochain) => Some(PreferDates::Future),
            Some(Keyword::Dernier) => Some(PreferDates::Past),
            _ => None,
        };
        if let Some(forced) = forced {
            direction = forced;
            rest = rest_after(rest, &modifier);
        }
    }

    Some(DateMatch {
        date: resolve_weekday(weekday, direction, options.reference.date()),
        time: None,
        rest,
    })
}

/// A lone day number ("pour le 15"). Numbers followed by a month or an hour
/// belong to other forms and are left alone.
fn bare_day<'a>(text: &'a str, options: &ParseOptions) -> Option<DateMatch<'a>> {
    let caps = PATTERNS.bare_day.captures(text)?;
    let rest = rest_after(text, &caps);
    if PATTERNS.month_next.is_match(rest)
        || PATTERNS.number_suffix.is_match(rest)
        || cut_month_name(rest)
    {
        return None;
    }
    let day: u32 = caps[1].parse().ok()?;
    Some(DateMatch {
        date: resolve_day(day, options)?,
        time: None,
        rest,
    })
}

/// The window ends inside a month name ("15 ma").
fn cut_month_name(rest: &str) -> bool {
    let word = rest.trim().to_lowercase();
    !word.is_empty()
        && !word.contains(char::is_whitespace)
        && MONTHS.split('|').any(|month| month.starts_with(&word))
}

/// Time written right after a date (`à 14h`, `, 9:30`, `midi`).
fn parse_trailing_time(rest: &str) -> Option<NaiveTime> {
    let caps = PATTERNS.trailing_time.captures(rest)?;
    parse_time_token(&caps[1])
}

/// Picks the year for a day-and-month without one.
fn resolve_year(month: u32, day: u32, options: &ParseOptions) -> Option<NaiveDate> {
    let today = options.reference.date();
    let year = today.year();
    match options.prefer_dates_from {
        PreferDates::CurrentPeriod => NaiveDate::from_ymd_opt(year, month, day),
        PreferDates::Future => (year..=year + YEAR_SEARCH_SPAN)
            .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
            .find(|d| !is_before_reference(*d, options)),
        PreferDates::Past => (year - YEAR_SEARCH_SPAN..=year)
            .rev()
            .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
            .find(|d| *d <= today),
    }
}

/// Picks the month for a day number without one. A day the chosen month
/// does not have (31 in April) is `None`.
fn resolve_day(day: u32, options: &ParseOptions) -> Option<NaiveDate> {
    let today = options.reference.date();
    let this_month = today.with_day(1)?;
    let month = match options.prefer_dates_from {
        PreferDates::CurrentPeriod => this_month,
        PreferDates::Future => {
            let this_one = this_month.with_day(day);
            if day > today.day() || this_one.is_some_and(|d| !is_before_reference(d, options)) {
                this_month
            } else {
                this_month.checked_add_months(Months::new(1))?
            }
        }
        PreferDates::Past if day <= today.day() => this_month,
        PreferDates::Past => this_month.checked_sub_months(Months::new(1))?,
    };
    month.with_day(day)
}

/// A date without a time means its midnight, which on the reference day is
/// usually already gone.
fn is_before_reference(date: NaiveDate, options: &ParseOptions) -> bool {
    date.and_time(NaiveTime::MIN) < options.reference
}

/// Same weekday as today counts as a full week away, except for `CurrentPeriod`
/// which stays in the current Monday-to-Sunday week.
fn resolve_weekday(weekday: Weekday, direction: PreferDates, today: NaiveDate) -> NaiveDate {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let delta = match direction {
        PreferDates::Future => match (target - current).rem_euclid(7) {
            0 => 7,
            d => d,
        },
        PreferDates::Past => match (current - target).rem_euclid(7) {
            0 => -7,
            d => -d,
        },
        PreferDates::CurrentPeriod => target - current,
    };
    today + Duration::days(delta)
}

fn shift_days(reference: NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    Duration::try_days(days)
        .and_then(|delta| reference.checked_add_signed(delta))
        .with_context(|| format!("date hors limites: {days} jours à partir du {reference}"))
}

fn shift_months(reference: NaiveDateTime, months: i64) -> Result<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs())
        .with_context(|| format!("date hors limites: {months} mois à partir du {reference}"))?;
    let shifted = if months >= 0 {
        reference.checked_add_months(Months::new(magnitude))
    } else {
        reference.checked_sub_months(Months::new(magnitude))
    };
    match shifted {
        Some(dt) => Ok(dt),
        None => bail!("date hors limites: {months} mois à partir du {reference}"),
    }
}

fn parse_amount(s: &str) -> Result<i64> {
    let amount = match s.to_lowercase().as_str() {
        "un" | "une" => 1,
        "deux" => 2,
        "trois" => 3,
        "quatre" => 4,
        "cinq" => 5,
        "six" => 6,
        "sept" => 7,
        "huit" => 8,
        "neuf" => 9,
        "dix" => 10,
        "quinze" => 15,
        digits => digits
            .parse::<i64>()
            .with_context(|| format!("nombre hors limites: {digits}"))?,
    };
    Ok(amount)
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    let month = match name.as_str() {
        n if n.starts_with("janv") => 1,
        n if n.starts_with("fé") || n.starts_with("fe") => 2,
        "mars" => 3,
        n if n.starts_with("avr") => 4,
        "mai" => 5,
        "juin" => 6,
        n if n.starts_with("juil") => 7,
        n if n.starts_with("ao") => 8,
        n if n.starts_with("sep") => 9,
        n if n.starts_with("oct") => 10,
        n if n.starts_with("nov") => 11,
        n if n.starts_with("dé") || n.starts_with("de") => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_number(name: &str) -> Option<Weekday> {
    let weekday = match name.to_lowercase().as_str() {
        "lundi" => Weekday::Mon,
        "mardi" => Weekday::Tue,
        "mercredi" => Weekday::Wed,
        "jeudi" => Weekday::Thu,
        "vendredi" => Weekday::Fri,
        "samedi" => Weekday::Sat,
        "dimanche" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn normalize_apostrophes(s: &str) -> String {
    s.replace('’', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Friday 10 January 2025, 09:15.
    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn opts(prefer: PreferDates) -> ParseOptions {
        ParseOptions {
            reference: reference(),
            prefer_dates_from: prefer,
        }
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn parse(input: &str) -> Option<NaiveDateTime> {
        parse_date_expression(input, opts(PreferDates::Future)).unwrap()
    }

    #[test]
    fn textual_dates_with_year() {
        assert_eq!(parse("15 mars 2025"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("le 2 janvier 2024"), Some(dt(2024, 1, 2, 0, 0)));
        assert_eq!(parse("10 février 2024"), Some(dt(2024, 2, 10, 0, 0)));
        assert_eq!(parse("10 fevrier 2024"), Some(dt(2024, 2, 10, 0, 0)));
        assert_eq!(parse("15 janv. 2025"), Some(dt(2025, 1, 15, 0, 0)));
        assert_eq!(parse("1er août 2025"), Some(dt(2025, 8, 1, 0, 0)));
        assert_eq!(parse("lundi 3 mars 2025"), Some(dt(2025, 3, 3, 0, 0)));
        assert_eq!(parse("15 MARS 2025"), Some(dt(2025, 3, 15, 0, 0)));
    }

    #[test]
    fn trailing_words_are_ignored() {
        assert_eq!(
            parse("2 janvier 2024 et échéance 10 février 2024"),
            Some(dt(2024, 1, 2, 0, 0))
        );
        assert_eq!(parse("15/03/2025, merci d'avance"), Some(dt(2025, 3, 15, 0, 0)));
    }

    #[test]
    fn leading_filler_is_skipped() {
        assert_eq!(parse("au plus tard le 20 juin"), Some(dt(2025, 6, 20, 0, 0)));
        assert_eq!(parse(": 20 juin 2025"), Some(dt(2025, 6, 20, 0, 0)));
        assert_eq!(parse("d'ici le 20 juin 2025"), Some(dt(2025, 6, 20, 0, 0)));
        assert_eq!(parse("ce vendredi"), Some(dt(2025, 1, 17, 0, 0)));
    }

    #[test]
    fn missing_year_follows_preference() {
        assert_eq!(parse("premier mai"), Some(dt(2025, 5, 1, 0, 0)));
        assert_eq!(parse("5 janvier"), Some(dt(2026, 1, 5, 0, 0)));
        // Midnight of the reference day has already passed.
        assert_eq!(parse("10 janvier"), Some(dt(2026, 1, 10, 0, 0)));
        assert_eq!(parse("29 février"), Some(dt(2028, 2, 29, 0, 0)));

        let past = parse_date_expression("1er avril", opts(PreferDates::Past)).unwrap();
        assert_eq!(past, Some(dt(2024, 4, 1, 0, 0)));
        let current = parse_date_expression("5 janvier", opts(PreferDates::CurrentPeriod)).unwrap();
        assert_eq!(current, Some(dt(2025, 1, 5, 0, 0)));
    }

    #[test]
    fn missing_year_on_the_reference_day() {
        let midnight = ParseOptions {
            reference: dt(2025, 1, 10, 0, 0),
            prefer_dates_from: PreferDates::Future,
        };
        assert_eq!(
            parse_date_expression("10 janvier", midnight).unwrap(),
            Some(dt(2025, 1, 10, 0, 0))
        );
        assert_eq!(
            parse_date_expression("10 janvier", opts(PreferDates::Past)).unwrap(),
            Some(dt(2025, 1, 10, 0, 0))
        );
    }

    #[test]
    fn textual_years() {
        assert_eq!(parse("2 janvier 24"), Some(dt(2024, 1, 2, 0, 0)));
        assert_eq!(parse("15 mars 2025 à 14h"), Some(dt(2025, 3, 15, 14, 0)));
        assert_eq!(parse("15 mars 14:30"), Some(dt(2025, 3, 15, 14, 30)));
        assert_eq!(parse("15 mars 14 h 30"), Some(dt(2025, 3, 15, 14, 30)));
    }

    #[test]
    fn truncated_or_impossible_years_are_none() {
        assert_eq!(parse("15 mars 202"), None);
        assert_eq!(parse("15 mars 2"), None);
        assert_eq!(parse("15 mars 99999"), None);
    }

    #[test]
    fn day_of_month_alone() {
        // Reference is 10 January 2025.
        assert_eq!(parse("15"), Some(dt(2025, 1, 15, 0, 0)));
        assert_eq!(parse("le 1er"), Some(dt(2025, 2, 1, 0, 0)));
        assert_eq!(parse("le 10"), Some(dt(2025, 2, 10, 0, 0)));
        assert_eq!(parse("31, merci"), Some(dt(2025, 1, 31, 0, 0)));
        assert_eq!(parse("le 15 à 14h"), Some(dt(2025, 1, 15, 14, 0)));

        let past = parse_date_expression("15", opts(PreferDates::Past)).unwrap();
        assert_eq!(past, Some(dt(2024, 12, 15, 0, 0)));
        let current = parse_date_expression("5", opts(PreferDates::CurrentPeriod)).unwrap();
        assert_eq!(current, Some(dt(2025, 1, 5, 0, 0)));
    }

    #[test]
    fn day_of_month_missing_from_target_month() {
        let february = ParseOptions {
            reference: dt(2025, 2, 10, 9, 15),
            prefer_dates_from: PreferDates::Future,
        };
        assert_eq!(parse_date_expression("30", february).unwrap(), None);
        assert_eq!(
            parse_date_expression("28", february).unwrap(),
            Some(dt(2025, 2, 28, 0, 0))
        );
    }

    #[test]
    fn numbers_that_are_not_a_day() {
        assert_eq!(parse("15 ma"), None);
        assert_eq!(parse("15 h 30"), None);
        assert_eq!(parse("31/02/2025"), None);
        assert_eq!(parse("45"), None);
        assert_eq!(parse("2025"), None);
    }

    #[test]
    fn numeric_dates_are_day_first() {
        assert_eq!(parse("15/03/2025"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("15-03-25"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("15.03.2025"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("15/03"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("03/01"), Some(dt(2026, 1, 3, 0, 0)));
    }

    #[test]
    fn iso_dates() {
        assert_eq!(parse("2025-03-15"), Some(dt(2025, 3, 15, 0, 0)));
        assert_eq!(parse("2025-03-15t14:30"), Some(dt(2025, 3, 15, 14, 30)));
    }

    #[test]
    fn month_and_year() {
        assert_eq!(parse("mars 2025"), Some(dt(2025, 3, 1, 0, 0)));
        assert_eq!(parse("décembre 2026"), Some(dt(2026, 12, 1, 0, 0)));
    }

    #[test]
    fn relative_keywords_keep_reference_time() {
        assert_eq!(parse("aujourd'hui"), Some(dt(2025, 1, 10, 9, 15)));
        assert_eq!(parse("aujourd’hui"), Some(dt(2025, 1, 10, 9, 15)));
        assert_eq!(parse("demain"), Some(dt(2025, 1, 11, 9, 15)));
        assert_eq!(parse("après demain"), Some(dt(2025, 1, 12, 9, 15)));
        assert_eq!(parse("hier"), Some(dt(2025, 1, 9, 9, 15)));
        assert_eq!(parse("avant-hier"), Some(dt(2025, 1, 8, 9, 15)));
    }

    #[test]
    fn explicit_time_overrides() {
        assert_eq!(parse("après-demain à 14h30"), Some(dt(2025, 1, 12, 14, 30)));
        assert_eq!(parse("hier soir"), Some(dt(2025, 1, 9, 18, 0)));
        assert_eq!(parse("15 mars 2025 à 14h"), Some(dt(2025, 3, 15, 14, 0)));
        assert_eq!(parse("15 mars à midi"), Some(dt(2025, 3, 15, 12, 0)));
        assert_eq!(parse("15/03/2025 vers 9:05"), Some(dt(2025, 3, 15, 9, 5)));
        assert_eq!(parse("15/03/2025 à 25h"), Some(dt(2025, 3, 15, 0, 0)));
    }

    #[test]
    fn offsets() {
        assert_eq!(parse("dans 3 jours"), Some(dt(2025, 1, 13, 9, 15)));
        assert_eq!(parse("d'ici 3 jours"), Some(dt(2025, 1, 13, 9, 15)));
        assert_eq!(parse("dans deux semaines"), Some(dt(2025, 1, 24, 9, 15)));
        assert_eq!(parse("dans une semaine"), Some(dt(2025, 1, 17, 9, 15)));
        assert_eq!(parse("dans 1 mois"), Some(dt(2025, 2, 10, 9, 15)));
        assert_eq!(parse("il y a 2 ans"), Some(dt(2023, 1, 10, 9, 15)));
    }

    #[test]
    fn periods() {
        assert_eq!(parse("la semaine prochaine"), Some(dt(2025, 1, 17, 9, 15)));
        assert_eq!(parse("le mois dernier"), Some(dt(2024, 12, 10, 9, 15)));
        assert_eq!(parse("l'année prochaine"), Some(dt(2026, 1, 10, 9, 15)));
        assert_eq!(parse("la semaine"), None);
    }

    #[test]
    fn weekdays() {
        // Reference is a Friday.
        assert_eq!(parse("vendredi"), Some(dt(2025, 1, 17, 0, 0)));
        assert_eq!(parse("lundi"), Some(dt(2025, 1, 13, 0, 0)));
        assert_eq!(parse("lundi prochain"), Some(dt(2025, 1, 13, 0, 0)));
        assert_eq!(parse("lundi dernier"), Some(dt(2025, 1, 6, 0, 0)));
        assert_eq!(parse("vendredi dernier à 17h"), Some(dt(2025, 1, 3, 17, 0)));

        let current = opts(PreferDates::CurrentPeriod);
        assert_eq!(
            parse_date_expression("mercredi", current).unwrap(),
            Some(dt(2025, 1, 8, 0, 0))
        );
        assert_eq!(
            parse_date_expression("dimanche", current).unwrap(),
            Some(dt(2025, 1, 12, 0, 0))
        );
    }

    #[test]
    fn impossible_or_unknown_dates_are_none() {
        assert_eq!(parse("31 février 2025"), None);
        assert_eq!(parse("31/02/2025"), None);
        assert_eq!(parse("xyzzy plugh"), None);
        assert_eq!(parse("la fin du mois"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn out_of_range_offsets_are_errors() {
        let o = opts(PreferDates::Future);
        assert!(parse_date_expression("dans 99999999999999999999 jours", o).is_err());
        assert!(parse_date_expression("dans 999999999 ans", o).is_err());
        assert!(parse_date_expression("il y a 99999999 jours", o).is_err());
    }

    #[test]
    fn date_token_reports_rest() {
        let found = parse_date_token("15 mars 2025 pour le client", opts(PreferDates::Future))
            .unwrap()
            .unwrap();
        assert_eq!(found.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(found.time, None);
        assert_eq!(found.rest, " pour le client");
    }

    #[test]
    fn time_token_parsing() {
        assert_eq!(parse_time_token("matin"), NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(parse_time_token("midi"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_time_token("soir"), NaiveTime::from_hms_opt(18, 0, 0));
        assert_eq!(parse_time_token("minuit"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time_token("14h"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time_token("14H30"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time_token("14 h 30"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time_token("14 heures"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time_token("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_time_token("9:05:30"), NaiveTime::from_hms_opt(9, 5, 30));
        assert_eq!(parse_time_token("17"), NaiveTime::from_hms_opt(17, 0, 0));

        assert_eq!(parse_time_token("25h"), None);
        assert_eq!(parse_time_token("24"), None);
        assert_eq!(parse_time_token("chat"), None);
        assert_eq!(parse_time_token("et"), None);
    }
}
