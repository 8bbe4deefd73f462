use super::*;

// =============================================================
// Lookups
// =============================================================

#[test]
fn lookups_follow_document_order() {
    let tree = MemoryTree::new();
    let body = tree.append(tree.html(), "body", &[]);
    let first = tree.append(body, "section", &[("id", "a"), ("class", "reveal card")]);
    let nested = tree.append(first, "p", &[("class", "reveal")]);
    let second = tree.append(body, "section", &[("id", "b")]);

    assert_eq!(tree.elements_by_class(None, "reveal"), vec![first, nested]);
    assert_eq!(tree.elements_by_tag(None, "SECTION"), vec![first, second]);
    assert_eq!(tree.element_by_id("b"), Some(second));
    assert_eq!(tree.element_by_id("missing"), None);
}

#[test]
fn scoped_lookup_excludes_scope_and_outside_nodes() {
    let tree = MemoryTree::new();
    let menu = tree.append(tree.html(), "nav", &[("class", "link")]);
    let inside = tree.append(menu, "a", &[("class", "link"), ("href", "#faq")]);
    let _outside = tree.append(tree.html(), "a", &[("class", "link")]);

    assert_eq!(tree.elements_by_class(Some(&menu), "link"), vec![inside]);
    assert_eq!(tree.elements_with_attribute(Some(&menu), "href"), vec![inside]);
}

// =============================================================
// Writes
// =============================================================

#[test]
fn set_class_is_idempotent() {
    let tree = MemoryTree::new();
    let root = tree.html();
    tree.set_class(&root, "dark", true);
    tree.set_class(&root, "dark", true);
    assert_eq!(tree.classes(root), vec!["dark".to_owned()]);
    tree.set_class(&root, "dark", false);
    assert!(!tree.has_class(&root, "dark"));
}

#[test]
fn set_text_escapes_markup_but_inner_html_does_not() {
    let tree = MemoryTree::new();
    let el = tree.append(tree.html(), "span", &[]);
    tree.set_text(&el, "<b>x</b>");
    assert_eq!(tree.inner_html(&el), "&lt;b&gt;x&lt;/b&gt;");
    tree.set_inner_html(&el, "<b>x</b>");
    assert_eq!(tree.inner_html(&el), "<b>x</b>");
}

#[test]
fn replacing_content_detaches_children() {
    let tree = MemoryTree::new();
    let parent = tree.append(tree.html(), "div", &[]);
    let child = tree.append(parent, "span", &[("class", "gone")]);
    tree.set_inner_html(&parent, "plain");
    assert_eq!(tree.parent(child), None);
    assert!(tree.elements_by_class(None, "gone").is_empty());
    assert_eq!(tree.inner_html(&parent), "plain");
}

#[test]
fn wrap_children_moves_content_into_wrapper() {
    let tree = MemoryTree::new();
    let answer = tree.append_with_html(tree.html(), "div", &[("class", "faq-answer")], "Text ");
    let link = tree.append(answer, "a", &[("href", "#x")]);

    let inner = tree.wrap_children(&answer, "faq-answer-inner").expect("wrapper");

    assert_eq!(tree.children(answer), vec![inner]);
    assert_eq!(tree.children(inner), vec![link]);
    assert_eq!(tree.parent(link), Some(inner));
    assert_eq!(
        tree.inner_html(&answer),
        "<div class=\"faq-answer-inner\">Text <a href=\"#x\"></a></div>"
    );
}

#[test]
fn class_attribute_round_trips_through_classes() {
    let tree = MemoryTree::new();
    let el = tree.append(tree.html(), "div", &[("class", "a  b")]);
    assert_eq!(tree.attribute(&el, "class").as_deref(), Some("a b"));
    tree.remove_attribute(&el, "class");
    assert_eq!(tree.attribute(&el, "class"), None);
}
