use super::*;
use serde_json::json;

fn hooks(v: serde_json::Value) -> HookList {
    serde_json::from_value(v).unwrap()
}

#[test]
fn no_hooks_is_darkgrid_deep() {
    let t = Theme::from_hooks(&HookList::new()).unwrap();
    assert_eq!(t, Theme::default());
    assert_eq!(t.style, AxesStyle::DarkGrid);
    assert_eq!(t.palette.name(), "deep");
    assert!(t.grid_by_default());
    assert!(t.spine_color().is_none());
}

#[test]
fn set_theme_with_named_style() {
    let t = Theme::from_hooks(&hooks(json!({"set_theme": {"style": "dark"}}))).unwrap();
    assert_eq!(t.style, AxesStyle::Dark);
    assert!(!t.grid_by_default());
}

#[test]
fn hooks_apply_in_order() {
    let t = Theme::from_hooks(&hooks(json!({
        "set_style": "ticks",
        "set_palette": "colorblind",
        "set_context": "talk"
    })))
    .unwrap();
    assert_eq!(t.style, AxesStyle::Ticks);
    assert!(t.tick_marks());
    assert_eq!(t.palette.name(), "colorblind");
    assert_eq!(t.text_scale(), 1.5);

    // set_theme resets anything configured before it.
    let t = Theme::from_hooks(&hooks(json!({"set_style": "white", "set_theme": null}))).unwrap();
    assert_eq!(t.style, AxesStyle::DarkGrid);
}

#[test]
fn font_scale_multiplies_context() {
    let t = Theme::from_hooks(&hooks(json!({"set_theme": {"context": "paper", "font_scale": 2.0}})))
        .unwrap();
    assert!((t.text_scale() - 1.6).abs() < 1e-12);
}

#[test]
fn bad_style_hooks_are_configuration_errors() {
    for v in [
        json!({"set_theme": {"style": "neon"}}),
        json!({"set_palette": "rainbow"}),
        json!({"set_context": "cinema"}),
        json!({"set_theme": {"rc": {}}}),
        json!({"despine": null}),
        json!({"set_palette": null}),
        json!({"set_style": 3}),
    ] {
        let err = Theme::from_hooks(&hooks(v.clone())).unwrap_err();
        assert!(matches!(err, DatagifError::Configuration(_)), "{v}: {err}");
    }
}
