//! Bootstrap driver: composes every controller against one page.
//!
//! ARCHITECTURE
//! ============
//! [`Page::boot`] resolves and shows the initial theme, applies the initial
//! language, attaches the structural controllers (menu, header, accordion,
//! reveal, nav tracking) and writes the footer year. The host then asks for
//! [`Page::wiring`] to learn which elements need listeners and observers,
//! and routes every callback back in as a [`PageEvent`] through
//! [`Page::dispatch`]. Events run to completion one at a time; there is no
//! other entry point that mutates the page.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use std::rc::Rc;

use crate::config::{DEFAULT_NAV_MARGIN, DEFAULT_REVEAL_MARGIN, PageConfig};
use crate::dom::PageTree;
use crate::effect::{Effect, apply};
use crate::geometry::{Margin, Rect};
use crate::group::{ExclusiveGroup, MemberId};
use crate::i18n::{LocaleCatalog, Localizer};
use crate::prefs::{Preference, Preferences};
use crate::toggle::{HeaderShadow, MenuController, Theme, ThemeController};
use crate::viewport::{ActiveSectionTracker, IntersectionEntry, RevealTracker};

/// One-shot facts about the host, read before boot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostHints {
    /// Platform prefers a dark presentation.
    pub prefers_dark: bool,
    /// Viewport intersection observation is available.
    pub intersection_observer: bool,
    /// Year from the host clock, for display.
    pub current_year: i32,
    /// Scroll offset at boot.
    pub scroll_y: f64,
}

impl Default for HostHints {
    fn default() -> Self {
        Self { prefers_dark: false, intersection_observer: true, current_year: 1970, scroll_y: 0.0 }
    }
}

/// Everything a host callback can report.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    ThemeToggle,
    LanguageToggle,
    MenuToggle,
    /// A closing link inside the mobile menu was activated.
    MenuLink,
    AccordionTrigger(MemberId),
    Scroll { y: f64 },
    RevealIntersections(Vec<IntersectionEntry<N>>),
    SectionIntersections(Vec<IntersectionEntry<N>>),
    /// Section rectangles measured by the host when it has no observer.
    SectionsMeasured { viewport: Rect, rects: Vec<(N, Rect)> },
}

/// Observer subscription parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSpec<N> {
    pub targets: Vec<N>,
    pub threshold: f64,
    pub margin: Margin,
}

/// Listener targets the host must subscribe after boot.
#[derive(Debug, Clone, PartialEq)]
pub struct Wiring<N> {
    pub theme_toggle: Option<N>,
    pub language_toggle: Option<N>,
    pub menu_trigger: Option<N>,
    pub menu_links: Vec<N>,
    pub accordion_triggers: Vec<(MemberId, N)>,
    /// Some scroll consumer exists (header shadow or measured sections).
    pub scroll: bool,
    /// Sections to measure on scroll, when there is no observer.
    pub measured_sections: Vec<N>,
    /// Reveal observer; `None` when nothing is pending or no observer exists.
    pub reveal: Option<ObserverSpec<N>>,
    /// Active-section observer; `None` without sections, links or observer.
    pub sections: Option<ObserverSpec<N>>,
}

/// A booted page and its controllers.
pub struct Page<T: PageTree> {
    tree: T,
    prefs: Preferences,
    config: PageConfig,
    hints: HostHints,
    reveal_margin: Margin,
    nav_margin: Margin,
    theme: ThemeController<T::Node>,
    localizer: Option<Localizer<T::Node>>,
    menu: Option<MenuController<T::Node>>,
    menu_links: Vec<T::Node>,
    header: Option<HeaderShadow<T::Node>>,
    accordion: ExclusiveGroup<T::Node>,
    reveal: RevealTracker<T::Node>,
    sections: Option<ActiveSectionTracker<T::Node>>,
}

fn margin_or_default(parsed: Result<Margin, crate::config::ConfigError>, fallback: &str) -> Margin {
    parsed.unwrap_or_else(|err| {
        log::warn!("{err}; using `{fallback}`");
        fallback.parse().unwrap_or_default()
    })
}

impl<T: PageTree> Page<T> {
    /// Bring `tree` to its initial state and attach all controllers.
    ///
    /// `catalog` is `None` when the string tables failed to load; the page
    /// then keeps its authored text.
    pub fn boot(tree: T, prefs: Preferences, catalog: Option<Rc<LocaleCatalog>>, config: PageConfig, hints: HostHints) -> Self {
        let reveal_margin = margin_or_default(config.reveal_margin(), DEFAULT_REVEAL_MARGIN);
        let nav_margin = margin_or_default(config.nav_margin(), DEFAULT_NAV_MARGIN);

        // Theme first so the page never flashes the wrong palette.
        let mut theme = ThemeController::new(tree.root(), &config.theme);
        let initial = Theme::resolve(prefs.get(Preference::Theme).as_deref(), hints.prefers_dark);
        apply(&tree, &prefs, theme.show(initial));

        let localizer = catalog.map(|catalog| {
            let saved = prefs.get(Preference::Language);
            let mut localizer = Localizer::attach(&tree, Rc::clone(&catalog), &config);
            let lang = saved.unwrap_or_else(|| catalog.default_code().to_owned());
            apply(&tree, &prefs, localizer.apply_language(&lang));
            localizer
        });
        if localizer.is_none() {
            log::warn!("no string tables; page text left as authored");
        }

        let mut header = HeaderShadow::attach(&tree, &config.header);
        if let Some(header) = header.as_mut() {
            apply(&tree, &prefs, header.sync(hints.scroll_y));
        }

        let menu = MenuController::attach(&tree, &config.menu);
        let menu_links = menu.as_ref().map(|m| m.closing_links(&tree, &config.menu)).unwrap_or_default();

        let (accordion, setup) = ExclusiveGroup::attach(&tree, &config.accordion);
        apply(&tree, &prefs, setup);

        let mut reveal = RevealTracker::attach(&tree, &config.reveal);
        if !hints.intersection_observer {
            log::info!("no intersection observer; revealing {} targets", reveal.pending().len());
            apply(&tree, &prefs, reveal.reveal_all());
        }

        let sections = ActiveSectionTracker::attach(&tree, &config, nav_margin);

        if let Some(year) = tree.element_by_id(&config.year_id) {
            tree.set_text(&year, &hints.current_year.to_string());
        }

        log::info!(
            "page booted: theme={} lang={} faq_items={} reveal_pending={}",
            theme.theme().as_str(),
            localizer.as_ref().map_or("-", |l| l.current()),
            accordion.members().len(),
            reveal.pending().len(),
        );

        Self {
            tree,
            prefs,
            config,
            hints,
            reveal_margin,
            nav_margin,
            theme,
            localizer,
            menu,
            menu_links,
            header,
            accordion,
            reveal,
            sections,
        }
    }

    /// Listener and observer targets for the host.
    #[must_use]
    pub fn wiring(&self) -> Wiring<T::Node> {
        let observer = self.hints.intersection_observer;
        let reveal = (observer && !self.reveal.pending().is_empty()).then(|| ObserverSpec {
            targets: self.reveal.pending().to_vec(),
            threshold: self.config.reveal.threshold,
            margin: self.reveal_margin,
        });
        let sections = self.sections.as_ref().filter(|_| observer).map(|s| ObserverSpec {
            targets: s.targets(),
            threshold: self.config.nav.threshold,
            margin: self.nav_margin,
        });
        let measured_sections = match (&self.sections, observer) {
            (Some(s), false) => s.targets(),
            _ => Vec::new(),
        };

        Wiring {
            theme_toggle: self.tree.element_by_id(&self.config.theme.toggle_id),
            language_toggle: self.localizer.as_ref().and_then(|l| l.toggle_control().cloned()),
            menu_trigger: self.menu.as_ref().map(|m| m.trigger().clone()),
            menu_links: self.menu_links.clone(),
            accordion_triggers: self
                .accordion
                .members()
                .iter()
                .enumerate()
                .map(|(i, m)| (MemberId(i), m.trigger.clone()))
                .collect(),
            scroll: self.header.is_some() || !measured_sections.is_empty(),
            measured_sections,
            reveal,
            sections,
        }
    }

    /// Route one host event. Returns reveal targets the host should stop observing.
    pub fn dispatch(&mut self, event: PageEvent<T::Node>) -> Vec<T::Node> {
        let effects: Vec<Effect<T::Node>> = match event {
            PageEvent::ThemeToggle => self.theme.toggle(),
            PageEvent::LanguageToggle => self.localizer.as_mut().map(Localizer::toggle_language).unwrap_or_default(),
            PageEvent::MenuToggle => self.menu.as_mut().map(MenuController::toggle).unwrap_or_default(),
            PageEvent::MenuLink => self.menu.as_mut().map(MenuController::close).unwrap_or_default(),
            PageEvent::AccordionTrigger(id) => self.accordion.toggle(id),
            PageEvent::Scroll { y } => self.header.as_mut().map(|h| h.on_scroll(y)).unwrap_or_default(),
            PageEvent::RevealIntersections(entries) => self.reveal.on_intersections(&entries),
            PageEvent::SectionIntersections(entries) => {
                self.sections.as_mut().map(|s| s.on_intersections(&entries)).unwrap_or_default()
            }
            PageEvent::SectionsMeasured { viewport, rects } => {
                self.sections.as_mut().map(|s| s.on_measured(viewport, &rects)).unwrap_or_default()
            }
        };
        apply(&self.tree, &self.prefs, effects)
    }

    #[must_use]
    pub fn tree(&self) -> &T {
        &self.tree
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Active language, `None` without string tables.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.localizer.as_ref().map(Localizer::current)
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MenuController::is_open)
    }

    #[must_use]
    pub fn accordion(&self) -> &ExclusiveGroup<T::Node> {
        &self.accordion
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealTracker<T::Node> {
        &self.reveal
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.sections.as_ref().and_then(ActiveSectionTracker::active)
    }
}
