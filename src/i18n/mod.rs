//! Localization engine: active language, text re-render, toggle label.
//!
//! DESIGN
//! ======
//! Bindable elements (those carrying the key attribute, `data-i18n` by
//! default) are collected once at attach time. Applying a language rewrites
//! every binding whose key resolves, sets `lang` on the document element,
//! persists the choice, and relabels the toggle with the language the next
//! click would switch to. Unknown languages resolve to the default before
//! any of that happens, so applying `"fr"` is indistinguishable from
//! applying `"en"`.

pub mod catalog;


use std::rc::Rc;

pub use catalog::{LocaleCatalog, LocaleError, LocaleMeta};

use crate::config::PageConfig;
use crate::dom::PageTree;
use crate::effect::Effect;
use crate::prefs::Preference;

#[derive(Debug, Clone)]
struct Binding<N> {
    node: N,
    key: String,
}

/// Language state machine bound to one page.
#[derive(Debug)]
pub struct Localizer<N> {
    catalog: Rc<LocaleCatalog>,
    current: String,
    root: Option<N>,
    toggle: Option<N>,
    bindings: Vec<Binding<N>>,
}

impl<N: Clone> Localizer<N> {
    /// Collect bindings and the toggle from `tree`. Starts in the default
    /// language without touching the page; call [`Localizer::apply_language`]
    /// to render.
    pub fn attach<T: PageTree<Node = N>>(tree: &T, catalog: Rc<LocaleCatalog>, config: &PageConfig) -> Self {
        let attr = config.language.key_attribute.as_str();
        let bindings = tree
            .elements_with_attribute(None, attr)
            .into_iter()
            .filter_map(|node| {
                let key = tree.attribute(&node, attr)?;
                (!key.is_empty()).then_some(Binding { node, key })
            })
            .collect::<Vec<_>>();
        log::debug!("localizer attached to {} bindable elements", bindings.len());

        Self {
            current: catalog.default_code().to_owned(),
            catalog,
            root: tree.root(),
            toggle: tree.element_by_id(&config.language.toggle_id),
            bindings,
        }
    }

    /// The active language code.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// The toggle control, if the page has one.
    #[must_use]
    pub fn toggle_control(&self) -> Option<&N> {
        self.toggle.as_ref()
    }

    /// Switch to `lang` (or the default if unknown) and re-render.
    pub fn apply_language(&mut self, lang: &str) -> Vec<Effect<N>> {
        let lang = self.catalog.resolve(lang).to_owned();
        let mut effects = Vec::with_capacity(self.bindings.len() + 4);

        for binding in &self.bindings {
            if let Some(text) = self.catalog.lookup(&lang, &binding.key) {
                effects.push(Effect::SetHtml { node: binding.node.clone(), html: text.to_owned() });
            }
        }
        if let Some(root) = &self.root {
            effects.push(Effect::attr(root.clone(), "lang", lang.clone()));
        }
        effects.push(Effect::Persist { pref: Preference::Language, value: lang.clone() });
        if let Some(toggle) = &self.toggle {
            let next = self.catalog.meta(self.catalog.next(&lang));
            effects.push(Effect::SetText { node: toggle.clone(), text: next.label.clone() });
            effects.push(Effect::attr(toggle.clone(), "aria-label", next.switch_to.clone()));
        }

        if self.current != lang {
            log::debug!("language {} -> {lang}", self.current);
        }
        self.current = lang;
        effects
    }

    /// Advance to the next language in toggle order.
    pub fn toggle_language(&mut self) -> Vec<Effect<N>> {
        let next = self.catalog.next(&self.current).to_owned();
        self.apply_language(&next)
    }
}
