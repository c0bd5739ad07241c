use super::*;
use serde_json::json;

fn args(v: serde_json::Value) -> StyleArgs {
    serde_json::from_value(v).unwrap()
}

#[test]
fn typed_getters_read_values() {
    let a = args(json!({"s": 5, "alpha": 0.4, "clip_on": false, "marker": "^", "bins": 20}));
    let mut r = StyleReader::new("scatterplot", &a);
    assert_eq!(r.f64("s").unwrap(), Some(5.0));
    assert_eq!(r.unit("alpha").unwrap(), Some(0.4));
    assert_eq!(r.bool("clip_on").unwrap(), Some(false));
    assert_eq!(r.str("marker").unwrap(), Some("^"));
    assert_eq!(r.count("bins").unwrap(), Some(20));
    assert_eq!(r.f64("zorder").unwrap(), None);
    assert!(r.finish().is_ok());
}

#[test]
fn leftover_keys_are_unexpected_keyword_arguments() {
    let a = args(json!({"s": 5, "sizes": 3}));
    let mut r = StyleReader::new("scatterplot", &a);
    r.f64("s").unwrap();
    let err = r.finish().unwrap_err();
    assert!(matches!(err, DatagifError::Render(_)));
    assert!(err.to_string().contains("unexpected keyword argument 'sizes'"));
}

#[test]
fn ill_typed_values_are_render_errors() {
    let a = args(json!({"s": "big", "alpha": 2.0, "bins": 0, "fill": "yes"}));
    let mut r = StyleReader::new("histplot", &a);
    assert!(matches!(r.f64("s"), Err(DatagifError::Render(_))));
    assert!(r.unit("alpha").is_err());
    assert!(r.count("bins").is_err());
    assert!(r.bool("fill").is_err());
}

#[test]
fn aliases_consume_every_spelling() {
    let a = args(json!({"lw": 3, "c": "k"}));
    let mut r = StyleReader::new("lineplot", &a);
    assert_eq!(r.f64_alias(&["linewidth", "lw"]).unwrap(), Some(3.0));
    assert_eq!(
        r.color(&["color", "c"], &Palette::default()).unwrap(),
        Some(Rgb::gray(0.0))
    );
    assert!(r.finish().is_ok());
}

#[test]
fn null_is_present_for_raw_but_absent_for_typed() {
    let a = args(json!({"estimator": null, "color": null}));
    let mut r = StyleReader::new("lineplot", &a);
    assert_eq!(r.raw(&["estimator"]), Some(&serde_json::Value::Null));
    assert_eq!(r.color(&["color"], &Palette::default()).unwrap(), None);
    assert!(r.finish().is_ok());
}

#[test]
fn colormap_lookup_goes_through_the_reader() {
    let a = args(json!({"cmap": "mako"}));
    let mut r = StyleReader::new("histplot", &a);
    assert!(r.colormap("cmap").unwrap().is_some());

    let a = args(json!({"cmap": "jet"}));
    let mut r = StyleReader::new("histplot", &a);
    assert!(r.colormap("cmap").is_err());
}
