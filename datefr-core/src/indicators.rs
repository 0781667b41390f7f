use strum_macros::AsRefStr;

/// Phrases announcing a deadline, in priority order.
pub const DUE_INDICATORS: &[&str] = &[
    "à faire avant",
    "à rendre avant",
    "date limite",
    "échéance",
    "deadline",
    "dû pour",
    "à remettre le",
    "pour le",
];

/// Phrases announcing that something was done, in priority order.
pub const COMPLETION_INDICATORS: &[&str] = &[
    "terminé le",
    "fini le",
    "complété le",
    "achevé le",
    "fait le",
    "réalisé le",
];

/// Number of characters handed to the date parser after an indicator.
pub const DEFAULT_WINDOW_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IndicatorKind {
    Due,
    Completion,
}

/// An indicator phrase found in the text, with the window that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorMatch<'a> {
    pub indicator: &'a str,
    /// Byte offset of the phrase's first occurrence.
    pub position: usize,
    /// Up to `window_len` characters after the phrase, whitespace-trimmed.
    pub window: &'a str,
}

/// Returns the first indicator, in **list order**, that occurs in `text`.
///
/// Position in the text does not matter: if both `"date limite"` and `"échéance"`
/// appear, `"date limite"` wins because it comes first in [`DUE_INDICATORS`],
/// even when `"échéance"` appears earlier in the sentence. When the phrase occurs
/// more than once, only its first occurrence is used.
///
/// The window is counted in characters, not bytes, so accented letters count
/// once. Near the end of the text the window is simply shorter.
///
/// `text` is expected to be lowercased already; the indicator lists are.
///
/// # Examples
///
/// ```
/// # use datefr_core::indicators::{find_window, DUE_INDICATORS};
/// let text = "rapport à faire avant le 15 mars 2025, merci";
/// let hit = find_window(text, DUE_INDICATORS, 50).unwrap();
/// assert_eq!(hit.indicator, "à faire avant");
/// assert_eq!(hit.window, "le 15 mars 2025, merci");
/// ```
pub fn find_window<'a, S: AsRef<str>>(
    text: &'a str,
    indicators: &'a [S],
    window_len: usize,
) -> Option<IndicatorMatch<'a>> {
    candidate_windows(text, indicators, window_len).next()
}

/// Every indicator of `indicators` present in `text`, in list order, each with
/// its window. The extractor walks this until the date parser accepts a window.
pub fn candidate_windows<'a, S: AsRef<str>>(
    text: &'a str,
    indicators: &'a [S],
    window_len: usize,
) -> impl Iterator<Item = IndicatorMatch<'a>> + 'a {
    indicators.iter().filter_map(move |indicator| {
        let indicator = indicator.as_ref();
        if indicator.is_empty() {
            return None;
        }
        let position = text.find(indicator)?;
        let start = position + indicator.len();
        Some(IndicatorMatch {
            indicator,
            position,
            window: window_after(text, start, window_len),
        })
    })
}

fn window_after(text: &str, start: usize, window_len: usize) -> &str {
    let tail = &text[start..];
    let end = tail
        .char_indices()
        .nth(window_len)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    tail[..end].trim()
}
