//! [`PageTree`] over the live browser document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCollection, NodeList};

use crate::dom::PageTree;

pub struct WebTree {
    document: Document,
}

impl WebTree {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn from_collection(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length()).filter_map(|i| collection.item(i)).collect()
}

fn from_node_list(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl PageTree for WebTree {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn elements_by_class(&self, scope: Option<&Element>, class: &str) -> Vec<Element> {
        from_collection(match scope {
            Some(el) => el.get_elements_by_class_name(class),
            None => self.document.get_elements_by_class_name(class),
        })
    }

    fn elements_by_tag(&self, scope: Option<&Element>, tag: &str) -> Vec<Element> {
        from_collection(match scope {
            Some(el) => el.get_elements_by_tag_name(tag),
            None => self.document.get_elements_by_tag_name(tag),
        })
    }

    fn elements_with_attribute(&self, scope: Option<&Element>, name: &str) -> Vec<Element> {
        let selector = format!("[{name}]");
        let found = match scope {
            Some(el) => el.query_selector_all(&selector),
            None => self.document.query_selector_all(&selector),
        };
        found.map(from_node_list).unwrap_or_default()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn wrap_children(&self, node: &Element, class: &str) -> Option<Element> {
        let inner = self.document.create_element("div").ok()?;
        inner.set_class_name(class);
        while let Some(child) = node.first_child() {
            if inner.append_child(&child).is_err() {
                break;
            }
        }
        node.append_child(&inner).ok()?;
        Some(inner)
    }
}
