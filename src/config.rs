//! Page configuration: element ids, class names, storage keys and
//! intersection tuning.
//!
//! Every field has a default matching the shipped marketing page, so an
//! empty JSON object (or no config at all) is a valid configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::geometry::{Margin, MarginParseError};

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.12;
pub const DEFAULT_REVEAL_MARGIN: &str = "0px 0px -40px 0px";
pub const DEFAULT_NAV_MARGIN: &str = "-30% 0px -60% 0px";
pub const DEFAULT_SCROLL_OFFSET_PX: f64 = 10.0;

/// Error returned by [`PageConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Margin(#[from] MarginParseError),
    #[error("threshold {0} outside 0.0..=1.0")]
    Threshold(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub language: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { theme: "theme".into(), language: "lang".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Button that flips the theme.
    pub toggle_id: String,
    /// Class placed on the document element while dark.
    pub dark_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { toggle_id: "theme-toggle".into(), dark_class: "dark".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub toggle_id: String,
    /// Attribute naming the string key an element displays.
    pub key_attribute: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self { toggle_id: "lang-toggle".into(), key_attribute: "data-i18n".into() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub trigger_id: String,
    pub menu_id: String,
    pub hidden_class: String,
    /// Links inside the menu carrying this class close it.
    pub link_class: String,
    /// Links inside the menu pointing at one of these `href`s also close it.
    pub close_hrefs: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            trigger_id: "mobile-menu-btn".into(),
            menu_id: "mobile-menu".into(),
            hidden_class: "hidden".into(),
            link_class: "mobile-nav-link".into(),
            close_hrefs: vec!["#contact".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub header_id: String,
    pub scrolled_class: String,
    /// Scroll distance past which the header counts as scrolled.
    pub offset_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { header_id: "site-header".into(), scrolled_class: "scrolled".into(), offset_px: DEFAULT_SCROLL_OFFSET_PX }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub item_class: String,
    pub trigger_class: String,
    pub region_class: String,
    pub inner_class: String,
    pub open_class: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            item_class: "faq-item".into(),
            trigger_class: "faq-trigger".into(),
            region_class: "faq-answer".into(),
            inner_class: "faq-answer-inner".into(),
            open_class: "open".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub target_class: String,
    pub revealed_class: String,
    pub threshold: f64,
    pub margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            target_class: "reveal".into(),
            revealed_class: "visible".into(),
            threshold: DEFAULT_REVEAL_THRESHOLD,
            margin: DEFAULT_REVEAL_MARGIN.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Tag of the tracked sections; only those with an `id` are tracked.
    pub section_tag: String,
    pub link_class: String,
    pub active_classes: Vec<String>,
    pub inactive_classes: Vec<String>,
    pub threshold: f64,
    pub margin: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            section_tag: "section".into(),
            link_class: "nav-link".into(),
            active_classes: vec!["text-brand-500".into(), "dark:text-brand-400".into()],
            inactive_classes: vec!["text-gray-600".into()],
            threshold: 0.0,
            margin: DEFAULT_NAV_MARGIN.into(),
        }
    }
}

/// Complete page configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub log_level: String,
    pub storage: StorageKeys,
    pub theme: ThemeConfig,
    pub language: LanguageConfig,
    pub menu: MenuConfig,
    pub header: HeaderConfig,
    pub accordion: AccordionConfig,
    pub reveal: RevealConfig,
    pub nav: NavConfig,
    /// Element whose text becomes the current year.
    pub year_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            storage: StorageKeys::default(),
            theme: ThemeConfig::default(),
            language: LanguageConfig::default(),
            menu: MenuConfig::default(),
            header: HeaderConfig::default(),
            accordion: AccordionConfig::default(),
            reveal: RevealConfig::default(),
            nav: NavConfig::default(),
            year_id: "footer-year".into(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON, unparseable margins, or
    /// thresholds outside `0.0..=1.0`.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check margins and thresholds.
    ///
    /// # Errors
    ///
    /// See [`PageConfig::from_json`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reveal_margin()?;
        self.nav_margin()?;
        for threshold in [self.reveal.threshold, self.nav.threshold] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Threshold(threshold));
            }
        }
        Ok(())
    }

    /// Parsed reveal margin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Margin`] when the string does not parse.
    pub fn reveal_margin(&self) -> Result<Margin, ConfigError> {
        Ok(self.reveal.margin.parse()?)
    }

    /// Parsed active-section margin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Margin`] when the string does not parse.
    pub fn nav_margin(&self) -> Result<Margin, ConfigError> {
        Ok(self.nav.margin.parse()?)
    }

    /// Console log level; unknown names mean `Info`.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
