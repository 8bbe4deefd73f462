//! Binary page states: color theme, mobile menu, header scroll shadow.

#[cfg(test)]
#[path = "toggle_test.rs"]
mod toggle_test;

use crate::config::{HeaderConfig, MenuConfig, ThemeConfig};
use crate::dom::PageTree;
use crate::effect::Effect;
use crate::prefs::Preference;

// =============================================================================
// THEME
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value; anything else is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Startup theme: saved preference, else platform hint, else light.
    #[must_use]
    pub fn resolve(saved: Option<&str>, prefers_dark: bool) -> Self {
        match saved.and_then(Self::parse) {
            Some(theme) => theme,
            None if prefers_dark => Self::Dark,
            None => Self::Light,
        }
    }
}

/// Dark marker on the document element.
#[derive(Debug, Clone)]
pub struct ThemeController<N> {
    root: Option<N>,
    theme: Theme,
    dark_class: String,
}

impl<N: Clone> ThemeController<N> {
    #[must_use]
    pub fn new(root: Option<N>, config: &ThemeConfig) -> Self {
        Self { root, theme: Theme::Light, dark_class: config.dark_class.clone() }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Show `theme` without persisting it (startup path).
    pub fn show(&mut self, theme: Theme) -> Vec<Effect<N>> {
        self.theme = theme;
        self.root
            .iter()
            .map(|root| Effect::class(root.clone(), &self.dark_class, theme == Theme::Dark))
            .collect()
    }

    /// Show `theme` and persist it.
    pub fn apply(&mut self, theme: Theme) -> Vec<Effect<N>> {
        let mut effects = self.show(theme);
        effects.push(Effect::Persist { pref: Preference::Theme, value: theme.as_str().to_owned() });
        effects
    }

    /// Invert the theme (user action; persists).
    pub fn toggle(&mut self) -> Vec<Effect<N>> {
        let next = self.theme.toggled();
        log::debug!("theme -> {}", next.as_str());
        self.apply(next)
    }
}

// =============================================================================
// MOBILE MENU
// =============================================================================

/// Open/closed mobile menu with its trigger's expanded state.
#[derive(Debug, Clone)]
pub struct MenuController<N> {
    trigger: N,
    menu: N,
    open: bool,
    hidden_class: String,
}

impl<N: Clone> MenuController<N> {
    #[must_use]
    pub fn new(trigger: N, menu: N, open: bool, config: &MenuConfig) -> Self {
        Self { trigger, menu, open, hidden_class: config.hidden_class.clone() }
    }

    /// Find trigger and menu; `None` unless both exist. The initial state is
    /// read from the menu's hidden class.
    pub fn attach<T: PageTree<Node = N>>(tree: &T, config: &MenuConfig) -> Option<Self> {
        let trigger = tree.element_by_id(&config.trigger_id)?;
        let menu = tree.element_by_id(&config.menu_id)?;
        let open = !tree.has_class(&menu, &config.hidden_class);
        Some(Self::new(trigger, menu, open, config))
    }

    /// Links inside the menu that close it when activated.
    pub fn closing_links<T: PageTree<Node = N>>(&self, tree: &T, config: &MenuConfig) -> Vec<N>
    where
        N: PartialEq,
    {
        let mut links = tree.elements_by_class(Some(&self.menu), &config.link_class);
        for node in tree.elements_with_attribute(Some(&self.menu), "href") {
            let matches = tree.attribute(&node, "href").is_some_and(|href| config.close_hrefs.contains(&href));
            if matches && !links.contains(&node) {
                links.push(node);
            }
        }
        links
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn trigger(&self) -> &N {
        &self.trigger
    }

    pub fn toggle(&mut self) -> Vec<Effect<N>> {
        self.set_open(!self.open)
    }

    /// Navigation inside the menu: close it; never opens.
    pub fn close(&mut self) -> Vec<Effect<N>> {
        if !self.open {
            return Vec::new();
        }
        self.set_open(false)
    }

    fn set_open(&mut self, open: bool) -> Vec<Effect<N>> {
        self.open = open;
        vec![
            Effect::class(self.menu.clone(), &self.hidden_class, !open),
            Effect::expanded(self.trigger.clone(), open),
        ]
    }
}

// =============================================================================
// HEADER SHADOW
// =============================================================================

/// `scrolled` class on the header once the page leaves the top.
#[derive(Debug, Clone)]
pub struct HeaderShadow<N> {
    header: N,
    scrolled: bool,
    offset_px: f64,
    class: String,
}

impl<N: Clone> HeaderShadow<N> {
    #[must_use]
    pub fn new(header: N, config: &HeaderConfig) -> Self {
        Self { header, scrolled: false, offset_px: config.offset_px, class: config.scrolled_class.clone() }
    }

    pub fn attach<T: PageTree<Node = N>>(tree: &T, config: &HeaderConfig) -> Option<Self> {
        tree.element_by_id(&config.header_id).map(|header| Self::new(header, config))
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Writes only when crossing the offset.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Vec<Effect<N>> {
        let scrolled = scroll_y > self.offset_px;
        if scrolled == self.scrolled {
            return Vec::new();
        }
        self.scrolled = scrolled;
        vec![Effect::class(self.header.clone(), &self.class, scrolled)]
    }

    /// Write the current state unconditionally (page loaded mid-scroll).
    pub fn sync(&mut self, scroll_y: f64) -> Vec<Effect<N>> {
        self.scrolled = scroll_y > self.offset_px;
        vec![Effect::class(self.header.clone(), &self.class, self.scrolled)]
    }
}
