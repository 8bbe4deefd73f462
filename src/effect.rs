//! Side effects produced by controllers and their application.
//!
//! Controllers decide; they never write. Each handler updates its own state
//! and returns a list of [`Effect`]s, which [`apply`] then performs against
//! the page tree and preference store. Stopping observation belongs to the
//! host's intersection observer, so those effects are handed back.

#[cfg(test)]
#[path = "effect_test.rs"]
mod effect_test;

use crate::dom::PageTree;
use crate::prefs::{Preference, Preferences};

/// One presentational write.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<N> {
    /// Add or remove a class.
    SetClass { node: N, class: String, on: bool },
    SetAttribute { node: N, name: String, value: String },
    RemoveAttribute { node: N, name: String },
    /// Replace content with trusted markup.
    SetHtml { node: N, html: String },
    SetText { node: N, text: String },
    Persist { pref: Preference, value: String },
    /// Stop delivering intersection events for this target.
    Unobserve { node: N },
}

impl<N> Effect<N> {
    #[must_use]
    pub fn class(node: N, class: &str, on: bool) -> Self {
        Self::SetClass { node, class: class.to_owned(), on }
    }

    #[must_use]
    pub fn attr(node: N, name: &str, value: impl Into<String>) -> Self {
        Self::SetAttribute { node, name: name.to_owned(), value: value.into() }
    }

    /// `aria-expanded` mirror of a boolean state.
    #[must_use]
    pub fn expanded(node: N, open: bool) -> Self {
        Self::attr(node, "aria-expanded", if open { "true" } else { "false" })
    }
}

/// Perform `effects` in order. Returns the targets to unobserve.
pub fn apply<T: PageTree>(tree: &T, prefs: &Preferences, effects: Vec<Effect<T::Node>>) -> Vec<T::Node> {
    let mut unobserve = Vec::new();
    for effect in effects {
        match effect {
            Effect::SetClass { node, class, on } => tree.set_class(&node, &class, on),
            Effect::SetAttribute { node, name, value } => tree.set_attribute(&node, &name, &value),
            Effect::RemoveAttribute { node, name } => tree.remove_attribute(&node, &name),
            Effect::SetHtml { node, html } => tree.set_inner_html(&node, &html),
            Effect::SetText { node, text } => tree.set_text(&node, &text),
            Effect::Persist { pref, value } => prefs.set(pref, &value),
            Effect::Unobserve { node } => unobserve.push(node),
        }
    }
    unobserve
}
