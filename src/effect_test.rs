use std::rc::Rc;

use super::*;
use crate::config::StorageKeys;
use crate::dom::MemoryTree;
use crate::prefs::MemoryBackend;

#[test]
fn apply_writes_tree_and_store_and_returns_unobserved() {
    let tree = MemoryTree::new();
    let el = tree.append(tree.html(), "div", &[]);
    let backend = MemoryBackend::new();
    let prefs = Preferences::new(Rc::new(backend.clone()), StorageKeys::default());

    let left = apply(
        &tree,
        &prefs,
        vec![
            Effect::class(el, "open", true),
            Effect::expanded(el, true),
            Effect::SetHtml { node: el, html: "<b>hi</b>".into() },
            Effect::Persist { pref: Preference::Theme, value: "dark".into() },
            Effect::Unobserve { node: el },
        ],
    );

    assert!(tree.has_class(&el, "open"));
    assert_eq!(tree.attribute(&el, "aria-expanded").as_deref(), Some("true"));
    assert_eq!(tree.inner_html(&el), "<b>hi</b>");
    assert_eq!(backend.raw("theme").as_deref(), Some("dark"));
    assert_eq!(left, vec![el]);
}

#[test]
fn later_effects_win_on_the_same_target() {
    let tree = MemoryTree::new();
    let el = tree.append(tree.html(), "div", &[("hidden", "")]);
    let prefs = Preferences::new(Rc::new(MemoryBackend::new()), StorageKeys::default());

    apply(
        &tree,
        &prefs,
        vec![
            Effect::class(el, "open", true),
            Effect::class(el, "open", false),
            Effect::RemoveAttribute { node: el, name: "hidden".into() },
            Effect::SetText { node: el, text: "2026".into() },
        ],
    );

    assert!(!tree.has_class(&el, "open"));
    assert_eq!(tree.attribute(&el, "hidden"), None);
    assert_eq!(tree.inner_html(&el), "2026");
}
