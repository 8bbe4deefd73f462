use super::*;

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 800.0)
}

// =============================================================
// Margin parsing
// =============================================================

#[test]
fn parses_four_value_margin() {
    let m: Margin = "-30% 0px -60% 0px".parse().expect("margin");
    assert_eq!(m.top, MarginValue::Percent(-30.0));
    assert_eq!(m.right, MarginValue::Px(0.0));
    assert_eq!(m.bottom, MarginValue::Percent(-60.0));
    assert_eq!(m.left, MarginValue::Px(0.0));
}

#[test]
fn expands_shorthand_forms() {
    let one: Margin = "10px".parse().expect("one");
    assert_eq!(one.left, MarginValue::Px(10.0));
    let two: Margin = "5% 0".parse().expect("two");
    assert_eq!(two.bottom, MarginValue::Percent(5.0));
    assert_eq!(two.left, MarginValue::Px(0.0));
}

#[test]
fn rejects_unitless_and_overlong_margins() {
    assert!("10".parse::<Margin>().is_err());
    assert!("1px 2px 3px 4px 5px".parse::<Margin>().is_err());
    assert!("".parse::<Margin>().is_err());
    let err = "abc%".parse::<Margin>().unwrap_err();
    assert_eq!(err.reason, "bad percentage");
}

#[test]
fn display_is_accepted_by_parser() {
    let m: Margin = "0px 0px -40px 0px".parse().expect("margin");
    assert_eq!(m.to_string(), "0px 0px -40px 0px");
    assert_eq!(m.to_string().parse::<Margin>().expect("reparse"), m);
}

// =============================================================
// Intersection
// =============================================================

#[test]
fn negative_margins_shrink_root_to_middle_band() {
    let m: Margin = "-30% 0px -60% 0px".parse().expect("margin");
    let band = m.apply(viewport());
    assert!((band.top - 240.0).abs() < 1e-9);
    assert!((band.bottom() - 320.0).abs() < 1e-9);
    assert!((band.width - 1000.0).abs() < 1e-9);
}

#[test]
fn bottom_margin_delays_visibility() {
    let m: Margin = "0px 0px -40px 0px".parse().expect("margin");
    // Target occupies the last 30px of the viewport: outside the shrunk root.
    let target = Rect::new(770.0, 0.0, 100.0, 100.0);
    assert_eq!(measure(target, viewport(), &m), (false, 0.0));
}

#[test]
fn ratio_is_visible_fraction_of_target() {
    let target = Rect::new(700.0, 0.0, 100.0, 200.0);
    let (hit, ratio) = measure(target, viewport(), &Margin::default());
    assert!(hit);
    assert!((ratio - 0.5).abs() < 1e-9);
}

#[test]
fn zero_area_target_touching_root_is_fully_visible() {
    let target = Rect::new(100.0, 10.0, 0.0, 0.0);
    assert_eq!(measure(target, viewport(), &Margin::default()), (true, 1.0));
}
