use super::*;
use crate::config::PageConfig;
use crate::dom::MemoryTree;

// =============================================================
// Theme
// =============================================================

#[test]
fn resolve_prefers_saved_value_over_hint() {
    assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
    assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
}

#[test]
fn resolve_falls_back_to_hint_then_light() {
    assert_eq!(Theme::resolve(None, true), Theme::Dark);
    assert_eq!(Theme::resolve(None, false), Theme::Light);
    assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
}

#[test]
fn show_does_not_persist_but_apply_does() {
    let mut theme = ThemeController::new(Some(0_u8), &ThemeConfig::default());
    assert_eq!(theme.show(Theme::Dark), vec![Effect::class(0, "dark", true)]);
    assert_eq!(
        theme.apply(Theme::Light),
        vec![Effect::class(0, "dark", false), Effect::Persist { pref: Preference::Theme, value: "light".into() }]
    );
}

#[test]
fn theme_toggle_twice_restores_state_and_persisted_value() {
    let mut theme = ThemeController::new(Some(0_u8), &ThemeConfig::default());
    theme.show(Theme::Dark);
    let first = theme.toggle();
    assert_eq!(theme.theme(), Theme::Light);
    let second = theme.toggle();
    assert_eq!(theme.theme(), Theme::Dark);
    assert_eq!(second, vec![Effect::class(0, "dark", true), Effect::Persist { pref: Preference::Theme, value: "dark".into() }]);
    assert_ne!(first, second);
}

#[test]
fn theme_without_root_only_persists() {
    let mut theme: ThemeController<u8> = ThemeController::new(None, &ThemeConfig::default());
    assert_eq!(theme.toggle(), vec![Effect::Persist { pref: Preference::Theme, value: "dark".into() }]);
}

// =============================================================
// Menu
// =============================================================

fn menu_page() -> (MemoryTree, PageConfig) {
    let tree = MemoryTree::new();
    let body = tree.append(tree.html(), "body", &[]);
    tree.append(body, "button", &[("id", "mobile-menu-btn"), ("aria-expanded", "false")]);
    let menu = tree.append(body, "div", &[("id", "mobile-menu"), ("class", "hidden")]);
    tree.append(menu, "a", &[("class", "mobile-nav-link"), ("href", "#faq")]);
    tree.append(menu, "a", &[("class", "btn"), ("href", "#contact")]);
    tree.append(menu, "a", &[("class", "btn"), ("href", "/privacy")]);
    (tree, PageConfig::default())
}

#[test]
fn menu_attach_reads_initial_state_and_links() {
    let (tree, config) = menu_page();
    let menu = MenuController::attach(&tree, &config.menu).expect("menu");
    assert!(!menu.is_open());
    assert_eq!(menu.closing_links(&tree, &config.menu).len(), 2);
}

#[test]
fn menu_attach_needs_both_elements() {
    let tree = MemoryTree::new();
    tree.append(tree.html(), "button", &[("id", "mobile-menu-btn")]);
    assert!(MenuController::attach(&tree, &PageConfig::default().menu).is_none());
}

#[test]
fn menu_toggle_is_self_inverse() {
    let mut menu = MenuController::new(1_u8, 2, false, &MenuConfig::default());
    assert_eq!(menu.toggle(), vec![Effect::class(2, "hidden", false), Effect::expanded(1, true)]);
    assert_eq!(menu.toggle(), vec![Effect::class(2, "hidden", true), Effect::expanded(1, false)]);
    assert!(!menu.is_open());
}

#[test]
fn navigation_only_ever_closes_the_menu() {
    let mut menu = MenuController::new(1_u8, 2, false, &MenuConfig::default());
    assert!(menu.close().is_empty());
    assert!(!menu.is_open());

    menu.toggle();
    assert_eq!(menu.close(), vec![Effect::class(2, "hidden", true), Effect::expanded(1, false)]);
    assert!(!menu.is_open());
}

// =============================================================
// Header
// =============================================================

#[test]
fn header_shadow_writes_only_on_crossing() {
    let mut header = HeaderShadow::new(5_u8, &HeaderConfig::default());
    assert!(header.on_scroll(10.0).is_empty());
    assert_eq!(header.on_scroll(11.0), vec![Effect::class(5, "scrolled", true)]);
    assert!(header.on_scroll(400.0).is_empty());
    assert_eq!(header.on_scroll(0.0), vec![Effect::class(5, "scrolled", false)]);
}

#[test]
fn header_sync_always_writes() {
    let mut header = HeaderShadow::new(5_u8, &HeaderConfig::default());
    assert_eq!(header.sync(0.0), vec![Effect::class(5, "scrolled", false)]);
    assert!(!header.is_scrolled());
}
