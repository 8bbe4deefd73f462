//! In-memory [`PageTree`] used to drive the engine without a browser.
//!
//! Nodes live in an arena; a node's content is an opaque markup string
//! followed by its element children. Detaching children (by replacing
//! content) leaves them in the arena but unreachable from the root, so
//! lookups no longer see them.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::PageTree;

/// Arena index of a node in a [`MemoryTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct MemNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    content: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl MemNode {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            content: String::new(),
            children: Vec::new(),
            parent,
        }
    }
}

/// Arena-backed page tree rooted at an `<html>` element.
#[derive(Debug)]
pub struct MemoryTree {
    nodes: RefCell<Vec<MemNode>>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    /// Create a tree holding only the `<html>` root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: RefCell::new(vec![MemNode::new("html", None)]) }
    }

    /// The `<html>` root. Always present.
    #[must_use]
    pub fn html(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`.
    ///
    /// `attrs` are set in order; a `class` attribute is split on whitespace.
    pub fn append(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = {
            let mut nodes = self.nodes.borrow_mut();
            let id = NodeId(nodes.len());
            nodes.push(MemNode::new(tag, Some(parent)));
            if let Some(p) = nodes.get_mut(parent.0) {
                p.children.push(id);
            }
            id
        };
        for (name, value) in attrs {
            self.set_attribute(&id, name, value);
        }
        id
    }

    /// Append an element and give it initial markup content.
    pub fn append_with_html(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)], html: &str) -> NodeId {
        let id = self.append(parent, tag, attrs);
        if let Some(node) = self.nodes.borrow_mut().get_mut(id.0) {
            node.content = html.to_owned();
        }
        id
    }

    /// Classes currently on `node`, in insertion order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.nodes.borrow().get(node.0).map(|n| n.classes.clone()).unwrap_or_default()
    }

    /// Parent element, `None` for the root and for detached nodes.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node.0).and_then(|n| n.parent)
    }

    /// Direct element children of `node`.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow().get(node.0).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn walk(&self, scope: Option<&NodeId>, mut keep: impl FnMut(&MemNode) -> bool) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let start = scope.copied().unwrap_or(NodeId(0));
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes.get(start.0).map(|n| n.children.iter().rev().copied().collect()).unwrap_or_default();
        while let Some(id) = stack.pop() {
            let Some(node) = nodes.get(id.0) else {
                continue;
            };
            if keep(node) {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    fn serialize(nodes: &[MemNode], id: NodeId, out: &mut String) {
        let Some(node) = nodes.get(id.0) else {
            return;
        };
        out.push('<');
        out.push_str(&node.tag);
        if !node.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", node.classes.join(" ")));
        }
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        Self::serialize_content(nodes, node, out);
        out.push_str(&format!("</{}>", node.tag));
    }

    fn serialize_content(nodes: &[MemNode], node: &MemNode, out: &mut String) {
        out.push_str(&node.content);
        for child in &node.children {
            Self::serialize(nodes, *child, out);
        }
    }

    fn replace_content(&self, node: NodeId, content: String) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(target) = nodes.get_mut(node.0) else {
            return;
        };
        let detached = std::mem::take(&mut target.children);
        target.content = content;
        for child in detached {
            if let Some(c) = nodes.get_mut(child.0) {
                c.parent = None;
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

impl PageTree for MemoryTree {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(NodeId(0))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk(None, |n| n.attributes.get("id").is_some_and(|v| v == id)).into_iter().next()
    }

    fn elements_by_class(&self, scope: Option<&NodeId>, class: &str) -> Vec<NodeId> {
        self.walk(scope, |n| n.classes.iter().any(|c| c == class))
    }

    fn elements_by_tag(&self, scope: Option<&NodeId>, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.walk(scope, |n| n.tag == tag)
    }

    fn elements_with_attribute(&self, scope: Option<&NodeId>, name: &str) -> Vec<NodeId> {
        if name == "class" {
            return self.walk(scope, |n| !n.classes.is_empty());
        }
        self.walk(scope, |n| n.attributes.contains_key(name))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let n = nodes.get(node.0)?;
        if name == "class" {
            return (!n.classes.is_empty()).then(|| n.classes.join(" "));
        }
        n.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(n) = nodes.get_mut(node.0) else {
            return;
        };
        if name == "class" {
            n.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            n.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(n) = nodes.get_mut(node.0) else {
            return;
        };
        if name == "class" {
            n.classes.clear();
        } else {
            n.attributes.remove(name);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow().get(node.0).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn set_class(&self, node: &NodeId, class: &str, on: bool) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(n) = nodes.get_mut(node.0) else {
            return;
        };
        let present = n.classes.iter().any(|c| c == class);
        if on && !present {
            n.classes.push(class.to_owned());
        } else if !on && present {
            n.classes.retain(|c| c != class);
        }
    }

    fn inner_html(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        if let Some(n) = nodes.get(node.0) {
            Self::serialize_content(&nodes, n, &mut out);
        }
        out
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.replace_content(*node, html.to_owned());
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.replace_content(*node, escape_text(text));
    }

    fn wrap_children(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let target = nodes.get_mut(node.0)?;
        let content = std::mem::take(&mut target.content);
        let children = std::mem::take(&mut target.children);

        let wrapper_id = NodeId(nodes.len());
        let mut wrapper = MemNode::new("div", Some(*node));
        wrapper.classes.push(class.to_owned());
        wrapper.content = content;
        wrapper.children.clone_from(&children);
        nodes.push(wrapper);

        for child in children {
            if let Some(c) = nodes.get_mut(child.0) {
                c.parent = Some(wrapper_id);
            }
        }
        if let Some(target) = nodes.get_mut(node.0) {
            target.children.push(wrapper_id);
        }
        Some(wrapper_id)
    }
}
