//! Minimal page-tree access used by every controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers never touch the browser document directly. They read the
//! static structure through [`PageTree`] at startup and write presentational
//! state back through it via [`crate::effect::apply`]. The browser document is
//! one implementation (`host::WebTree`, hydrate only); [`MemoryTree`] is the
//! other, used by tests and by anything that wants to drive the engine
//! without a browser.
//!
//! All methods take `&self`: both implementations mutate through shared
//! handles, the same way web-sys DOM calls do.

pub mod memory;

pub use memory::{MemoryTree, NodeId};

/// Read/write access to the rendered page.
///
/// Lookups return nodes in document order. Writes to a node that no longer
/// exists are silently ignored.
pub trait PageTree {
    /// Handle to one element of the tree.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The document element (`<html>`), which carries theme and language.
    fn root(&self) -> Option<Self::Node>;

    /// Find an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All elements carrying `class`, under `scope` or the whole document.
    fn elements_by_class(&self, scope: Option<&Self::Node>, class: &str) -> Vec<Self::Node>;

    /// All elements with tag name `tag` (lowercase), under `scope` or the whole document.
    fn elements_by_tag(&self, scope: Option<&Self::Node>, tag: &str) -> Vec<Self::Node>;

    /// All elements that carry attribute `name`, under `scope` or the whole document.
    fn elements_with_attribute(&self, scope: Option<&Self::Node>, name: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add (`on = true`) or remove `class`.
    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    fn inner_html(&self, node: &Self::Node) -> String;

    /// Replace the node's content with `html`. Markup is not escaped.
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Replace the node's content with plain text.
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Move all of `node`'s content into a new `<div class="{class}">` child.
    ///
    /// Returns the new wrapper, or `None` if the node is gone.
    fn wrap_children(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;
}
