use super::*;
use crate::dom::MemoryTree;

fn entry(target: u32, hit: bool, ratio: f64) -> IntersectionEntry<u32> {
    IntersectionEntry::new(target, hit, ratio)
}

fn nav_tracker() -> ActiveSectionTracker<u32> {
    let config = PageConfig::default();
    ActiveSectionTracker::new(
        vec![(1, "problem".into()), (2, "solution".into()), (3, "faq".into())],
        vec![(10, Some("#problem".into())), (20, Some("#solution".into())), (30, Some("#faq".into())), (40, None)],
        &config.nav,
        config.nav_margin().expect("margin"),
    )
}

fn has_effect(effects: &[Effect<u32>], node: u32, class: &str, on: bool) -> bool {
    effects.contains(&Effect::class(node, class, on))
}

// =============================================================
// Reveal-once
// =============================================================

#[test]
fn reveal_requires_threshold() {
    let mut tracker = RevealTracker::new(vec![1, 2], &RevealConfig::default());
    assert!(tracker.on_intersections(&[entry(1, true, 0.05)]).is_empty());

    let effects = tracker.on_intersections(&[entry(1, true, 0.12)]);
    assert_eq!(effects, vec![Effect::class(1, "visible", true), Effect::Unobserve { node: 1 }]);
    assert!(tracker.is_revealed(&1));
    assert_eq!(tracker.pending(), &[2]);
}

#[test]
fn reveal_is_monotonic() {
    let mut tracker = RevealTracker::new(vec![1], &RevealConfig::default());
    tracker.on_intersections(&[entry(1, true, 0.5)]);

    // Leaving the viewport and re-entering changes nothing.
    assert!(tracker.on_intersections(&[entry(1, false, 0.0)]).is_empty());
    assert!(tracker.on_intersections(&[entry(1, true, 1.0)]).is_empty());
    assert!(tracker.is_revealed(&1));
}

#[test]
fn non_intersecting_entry_never_reveals() {
    let mut tracker = RevealTracker::new(vec![1], &RevealConfig::default());
    assert!(tracker.on_intersections(&[entry(1, false, 0.9)]).is_empty());
    assert!(!tracker.is_revealed(&1));
}

#[test]
fn reveal_all_reveals_every_pending_target_once() {
    let mut tracker = RevealTracker::new(vec![1, 2], &RevealConfig::default());
    tracker.on_intersections(&[entry(1, true, 1.0)]);
    let effects = tracker.reveal_all();
    assert_eq!(effects, vec![Effect::class(2, "visible", true), Effect::Unobserve { node: 2 }]);
    assert!(tracker.pending().is_empty());
}

#[test]
fn reveal_attach_collects_class_targets() {
    let tree = MemoryTree::new();
    let a = tree.append(tree.html(), "div", &[("class", "reveal")]);
    let _plain = tree.append(tree.html(), "div", &[]);
    let tracker = RevealTracker::attach(&tree, &RevealConfig::default());
    assert_eq!(tracker.pending(), &[a]);
}

// =============================================================
// Active section
// =============================================================

#[test]
fn intersecting_section_activates_its_link_only() {
    let mut tracker = nav_tracker();
    let effects = tracker.on_intersections(&[entry(2, true, 0.3)]);

    assert_eq!(tracker.active(), Some("solution"));
    assert!(has_effect(&effects, 20, "text-brand-500", true));
    assert!(has_effect(&effects, 20, "dark:text-brand-400", true));
    assert!(has_effect(&effects, 20, "text-gray-600", false));
    assert!(has_effect(&effects, 10, "text-brand-500", false));
    assert!(has_effect(&effects, 10, "text-gray-600", true));
    assert!(has_effect(&effects, 40, "text-gray-600", true));
}

#[test]
fn topmost_intersecting_section_wins_regardless_of_batch_order() {
    let mut tracker = nav_tracker();
    tracker.on_intersections(&[entry(3, true, 0.2), entry(2, true, 0.2)]);
    assert_eq!(tracker.active(), Some("solution"));
}

#[test]
fn section_leaving_band_hands_over_to_next_intersecting() {
    let mut tracker = nav_tracker();
    tracker.on_intersections(&[entry(1, true, 0.1)]);
    tracker.on_intersections(&[entry(2, true, 0.1)]);
    assert_eq!(tracker.active(), Some("problem"));

    tracker.on_intersections(&[entry(1, false, 0.0)]);
    assert_eq!(tracker.active(), Some("solution"));
}

#[test]
fn empty_band_keeps_last_active_section() {
    let mut tracker = nav_tracker();
    tracker.on_intersections(&[entry(3, true, 0.4)]);
    let effects = tracker.on_intersections(&[entry(3, false, 0.0)]);
    assert!(effects.is_empty());
    assert_eq!(tracker.active(), Some("faq"));
}

#[test]
fn unchanged_active_section_writes_nothing() {
    let mut tracker = nav_tracker();
    tracker.on_intersections(&[entry(1, true, 0.4)]);
    assert!(tracker.on_intersections(&[entry(1, true, 0.6)]).is_empty());
}

#[test]
fn measured_fallback_uses_middle_band() {
    let mut tracker = nav_tracker();
    let viewport = Rect::new(0.0, 0.0, 1000.0, 1000.0);
    // Band is 300..400. Section 1 ends above it, section 2 spans it.
    let rects = [
        (1, Rect::new(-500.0, 0.0, 1000.0, 700.0)),
        (2, Rect::new(200.0, 0.0, 1000.0, 600.0)),
        (3, Rect::new(800.0, 0.0, 1000.0, 600.0)),
    ];
    tracker.on_measured(viewport, &rects);
    assert_eq!(tracker.active(), Some("solution"));
}

#[test]
fn attach_requires_sections_and_links() {
    let config = PageConfig::default();
    let margin = config.nav_margin().expect("margin");

    let tree = MemoryTree::new();
    tree.append(tree.html(), "section", &[("id", "faq")]);
    assert!(ActiveSectionTracker::attach(&tree, &config, margin).is_none());

    tree.append(tree.html(), "section", &[]);
    tree.append(tree.html(), "a", &[("class", "nav-link"), ("href", "#faq")]);
    let tracker = ActiveSectionTracker::attach(&tree, &config, margin).expect("tracker");
    assert_eq!(tracker.targets().len(), 1);
}
