use crate::*;
use serde_json::json;

#[test]
fn render_config_site_defaults() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.dpi(), 100.0);
    assert_eq!(cfg.font_size(), 10.0);
    assert_eq!(cfg.title_font_size(), 12.0);
    assert_eq!(cfg.pad_inches(), 0.1);
    assert!(cfg.tight_bbox());
    assert_eq!(cfg.background(), Color::WHITE);
    assert_eq!(cfg.color_cycle().len(), 10);
}

#[test]
fn render_config_dotted_set_and_merge() {
    let mut cfg = RenderConfig::default();
    cfg.set_value("dpi", json!(200));
    cfg.set_value("svg.precision", json!(3));
    assert_eq!(cfg.dpi(), 200.0);
    assert_eq!(cfg.get_f64("svg.precision"), Some(3.0));

    cfg.deep_merge(&json!({ "svg": { "other": true }, "background": "none" }));
    assert_eq!(cfg.get_f64("svg.precision"), Some(3.0));
    assert_eq!(cfg.get_bool("svg.other"), Some(true));
    assert!(cfg.background().is_transparent());
}

#[test]
fn render_config_falls_back_on_invalid_values() {
    let mut cfg = RenderConfig::empty_object();
    cfg.set_value("dpi", json!(-5));
    cfg.set_value("colorCycle", json!(["nope"]));
    assert_eq!(cfg.dpi(), 100.0);
    assert_eq!(cfg.color_cycle()[0], crate::color::DEFAULT_CYCLE[0]);
}

#[test]
fn render_config_loads_yaml_and_json5() {
    let cfg = RenderConfig::from_text("dpi: 150\ncolorCycle: [red, blue]\n", DocumentFormat::Yaml)
        .unwrap();
    assert_eq!(cfg.dpi(), 150.0);
    assert_eq!(cfg.color_cycle(), vec![Color::RED, Color::BLUE]);
    assert_eq!(cfg.font_size(), 10.0);

    let cfg = RenderConfig::from_text(
        "{ fontSize: 12, /* c */ tightBBox: false }",
        DocumentFormat::Json5,
    )
    .unwrap();
    assert_eq!(cfg.font_size(), 12.0);
    assert!(!cfg.tight_bbox());
}
