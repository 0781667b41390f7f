use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// French words the date parser gives a meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
pub enum Keyword {
    #[strum(to_string = "aujourd'hui")]
    Aujourdhui,
    #[strum(to_string = "maintenant")]
    Maintenant,
    #[strum(to_string = "demain")]
    Demain,
    #[strum(to_string = "après-demain")]
    ApresDemain,
    #[strum(to_string = "hier")]
    Hier,
    #[strum(to_string = "avant-hier")]
    AvantHier,
    #[strum(to_string = "prochain")]
    Prochain,
    #[strum(to_string = "dernier")]
    Dernier,
    #[strum(to_string = "matin")]
    Matin,
    #[strum(to_string = "midi")]
    Midi,
    #[strum(to_string = "soir")]
    Soir,
    #[strum(to_string = "minuit")]
    Minuit,
}

pub struct Keywords;

impl Keywords {
    /// Returns the **global keyword registry** (input → canonical).
    ///
    /// The registry is:
    /// - **Initialized once** on first access (via [`once_cell::sync::Lazy`]).
    /// - **Thread-safe** (wrapped in [`RwLock`]): many readers or one writer.
    /// - **Lowercased**: keys are stored with Unicode lowercasing, so `Après-Demain`
    ///   and `après-demain` resolve to the same entry.
    ///
    /// Besides the canonical spellings it is seeded with the forms people type
    /// without accents or with a space instead of a hyphen (`apres-demain`,
    /// `apres demain`, `aujourdhui`) and the feminine forms of `prochain`/`dernier`.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            for keyword in Keyword::iter() {
                m.insert(keyword.as_ref().to_string(), keyword);
            }
            m.insert("aujourdhui".to_string(), Keyword::Aujourdhui);
            m.insert("auj".to_string(), Keyword::Aujourdhui);
            m.insert("apres-demain".to_string(), Keyword::ApresDemain);
            m.insert("après demain".to_string(), Keyword::ApresDemain);
            m.insert("apres demain".to_string(), Keyword::ApresDemain);
            m.insert("avant hier".to_string(), Keyword::AvantHier);
            m.insert("prochaine".to_string(), Keyword::Prochain);
            m.insert("dernière".to_string(), Keyword::Dernier);
            m.insert("derniere".to_string(), Keyword::Dernier);
            m.insert("passé".to_string(), Keyword::Dernier);
            m.insert("passée".to_string(), Keyword::Dernier);

            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must be a **known** word already
    /// in the registry (a canonical form or an existing synonym). If `target` isn't
    /// known, the pair is ignored silently.
    ///
    /// Typical call site: during `Config::load()`, after reading `[synonyms]`
    /// from `config.toml`:
    ///
    /// ```toml
    /// [synonyms]
    /// "2main" = "demain"
    /// tantot = "aujourd'hui"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = match Self::registry().write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_lowercase()) {
                reg.insert(alias.to_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical spelling (eg "demain").
    pub fn is_canonical(word: &str) -> bool {
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Resolves `input` (case-insensitively) to the keyword it stands for, if any.
    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = match Self::registry().read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        reg.get(&input.to_lowercase()).copied()
    }

    /// Returns `true` if `input` equals (case-insensitively) the given keyword
    /// or any of its registered synonyms.
    ///
    /// ```
    /// # use datefr_core::keywords::{Keyword, Keywords};
    /// assert!(Keywords::matches(Keyword::Demain, "demain"));
    /// assert!(Keywords::matches(Keyword::ApresDemain, "Apres-Demain"));
    /// assert!(!Keywords::matches(Keyword::Demain, "hier"));
    /// ```
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input)
            .map(|canon| canon == keyword)
            .unwrap_or(false)
    }
}
