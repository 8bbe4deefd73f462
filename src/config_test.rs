use super::*;

#[test]
fn empty_object_yields_shipped_defaults() {
    let config = PageConfig::from_json("{}").expect("config");
    assert_eq!(config, PageConfig::default());
    assert_eq!(config.storage.language, "lang");
    assert_eq!(config.menu.close_hrefs, vec!["#contact".to_owned()]);
    assert!((config.reveal.threshold - 0.12).abs() < f64::EPSILON);
}

#[test]
fn partial_sections_keep_sibling_defaults() {
    let config = PageConfig::from_json(r#"{ "theme": { "dark_class": "theme-dark" }, "log_level": "debug" }"#)
        .expect("config");
    assert_eq!(config.theme.dark_class, "theme-dark");
    assert_eq!(config.theme.toggle_id, "theme-toggle");
    assert_eq!(config.log_level(), log::Level::Debug);
}

#[test]
fn default_margins_parse() {
    let config = PageConfig::default();
    assert_eq!(config.reveal_margin().expect("reveal").to_string(), "0px 0px -40px 0px");
    assert_eq!(config.nav_margin().expect("nav").to_string(), "-30% 0px -60% 0px");
}

#[test]
fn rejects_bad_margin() {
    let err = PageConfig::from_json(r#"{ "nav": { "margin": "30 percent" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Margin(_)));
}

#[test]
fn rejects_out_of_range_threshold() {
    let err = PageConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Threshold(t) if (t - 1.5).abs() < f64::EPSILON));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(PageConfig::from_json("{"), Err(ConfigError::Parse(_))));
}

#[test]
fn unknown_log_level_falls_back_to_info() {
    let config = PageConfig { log_level: "chatty".into(), ..PageConfig::default() };
    assert_eq!(config.log_level(), log::Level::Info);
}
