//! Localized string tables.
//!
//! Each language is one JSON document:
//!
//! ```json
//! { "meta": { "label": "EN", "switch_to": "Switch to English" },
//!   "strings": { "nav.faq": "FAQ" } }
//! ```
//!
//! The first language given to [`LocaleCatalog::from_sources`] is the
//! default. Every key of every other language must also exist in the
//! default table, so a miss in a non-default language can always fall back
//! to default text and never to the raw key.

use std::collections::HashMap;

use serde::Deserialize;

const EN_JSON: &str = include_str!("../../locales/en.json");
const TH_JSON: &str = include_str!("../../locales/th.json");

/// Error returned while building a [`LocaleCatalog`].
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("no languages supplied")]
    Empty,
    #[error("language `{0}` supplied twice")]
    Duplicate(String),
    #[error("invalid string table for `{code}`: {source}")]
    Parse {
        code: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("key `{key}` of `{code}` is missing from the default language")]
    OrphanKey { code: String, key: String },
}

/// How a language presents itself on the language toggle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleMeta {
    /// Short toggle text, e.g. `EN`.
    pub label: String,
    /// Accessible description of switching to this language.
    pub switch_to: String,
}

#[derive(Debug, Deserialize)]
struct LocaleFile {
    meta: LocaleMeta,
    strings: HashMap<String, String>,
}

#[derive(Debug)]
struct Locale {
    code: String,
    meta: LocaleMeta,
    strings: HashMap<String, String>,
}

/// All languages of the page in toggle order, default first.
#[derive(Debug)]
pub struct LocaleCatalog {
    locales: Vec<Locale>,
}

impl LocaleCatalog {
    /// The English and Thai tables shipped with the page.
    ///
    /// # Errors
    ///
    /// Only if the embedded tables are malformed.
    pub fn embedded() -> Result<Self, LocaleError> {
        Self::from_sources(&[("en", EN_JSON), ("th", TH_JSON)])
    }

    /// Build a catalog from `(code, json)` pairs. The first pair is the default.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] for an empty list, a repeated code, malformed
    /// JSON, or a key that the default language lacks.
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self, LocaleError> {
        if sources.is_empty() {
            return Err(LocaleError::Empty);
        }
        let mut locales: Vec<Locale> = Vec::with_capacity(sources.len());
        for (code, raw) in sources {
            let code = normalize(code);
            if locales.iter().any(|l| l.code == code) {
                return Err(LocaleError::Duplicate(code));
            }
            let file: LocaleFile =
                serde_json::from_str(raw).map_err(|source| LocaleError::Parse { code: code.clone(), source })?;
            locales.push(Locale { code, meta: file.meta, strings: file.strings });
        }

        let (default, rest) = locales.split_first().ok_or(LocaleError::Empty)?;
        for locale in rest {
            let mut keys: Vec<&String> = locale.strings.keys().collect();
            keys.sort();
            if let Some(key) = keys.into_iter().find(|k| !default.strings.contains_key(*k)) {
                return Err(LocaleError::OrphanKey { code: locale.code.clone(), key: key.clone() });
            }
        }
        Ok(Self { locales })
    }

    fn default_locale(&self) -> &Locale {
        // Construction guarantees at least one locale.
        &self.locales[0]
    }

    fn find(&self, lang: &str) -> Option<&Locale> {
        let lang = normalize(lang);
        self.locales.iter().find(|l| l.code == lang)
    }

    #[must_use]
    pub fn default_code(&self) -> &str {
        &self.default_locale().code
    }

    /// Language codes in toggle order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.code.as_str())
    }

    /// `lang` if known (case-insensitive), else the default language.
    #[must_use]
    pub fn resolve(&self, lang: &str) -> &str {
        self.find(lang).unwrap_or_else(|| self.default_locale()).code.as_str()
    }

    /// Text for `key` in `lang`, falling back to the default language.
    #[must_use]
    pub fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        let locale = self.find(lang).unwrap_or_else(|| self.default_locale());
        locale
            .strings
            .get(key)
            .or_else(|| self.default_locale().strings.get(key))
            .map(String::as_str)
    }

    /// The language after `lang` in cyclic toggle order.
    #[must_use]
    pub fn next(&self, lang: &str) -> &str {
        let current = self.resolve(lang);
        let idx = self.locales.iter().position(|l| l.code == current).unwrap_or(0);
        self.locales[(idx + 1) % self.locales.len()].code.as_str()
    }

    /// Toggle presentation of `lang` (resolved).
    #[must_use]
    pub fn meta(&self, lang: &str) -> &LocaleMeta {
        &self.find(lang).unwrap_or_else(|| self.default_locale()).meta
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}
