use super::*;
use serde_json::json;

fn hooks(v: serde_json::Value) -> HookList {
    serde_json::from_value(v).unwrap()
}

fn dots(points: &[(f64, f64)]) -> Mark {
    Mark::new(Shape::Markers {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        colors: vec![Rgb::gray(0.0); points.len()],
        marker: MarkerShape::Circle,
        size: 36.0,
        edge: None,
        edge_width: 0.0,
    })
}

#[test]
fn default_figure_is_640_by_480() {
    let fig = Figure::new(Theme::default());
    assert_eq!(fig.pixel_size(), (640, 480));
    assert!(fig.grid_visible());
    assert!(fig.marks().is_empty());
}

#[test]
fn hooks_customize_text_size_and_layout() {
    let mut fig = Figure::new(Theme::default());
    fig.apply_hooks(&hooks(json!({
        "tight_layout": null,
        "subplots": {"figsize": [6, 6]},
        "title": "Hurricane Trajectory",
        "xlabel": "longitude",
        "ylabel": {"ylabel": "latitude"},
        "suptitle": "2005",
        "grid": false,
        "axis": "off"
    })))
    .unwrap();
    assert!(fig.tight_layout);
    assert_eq!(fig.pixel_size(), (600, 600));
    assert_eq!(fig.title.as_deref(), Some("Hurricane Trajectory"));
    assert_eq!(fig.xlabel.as_deref(), Some("longitude"));
    assert_eq!(fig.ylabel.as_deref(), Some("latitude"));
    assert_eq!(fig.suptitle.as_deref(), Some("2005"));
    assert!(!fig.grid_visible());
    assert!(!fig.axis_visible);
}

#[test]
fn limit_hooks_accept_positional_and_named_forms() {
    let mut fig = Figure::new(Theme::default());
    fig.apply_hooks(&hooks(json!({"xlim": [0, 10], "ylim": {"top": 5}})))
        .unwrap();
    assert_eq!(fig.xlim.both(), Some((0.0, 10.0)));
    assert_eq!(fig.ylim, AxisLimits { lo: None, hi: Some(5.0) });

    fig.push(dots(&[(1.0, -5.0), (2.0, 3.0)]));
    let ((x0, x1), (y0, y1)) = fig.view_limits();
    assert_eq!((x0, x1), (0.0, 10.0));
    assert!((y0 - -5.4).abs() < 1e-9);
    assert_eq!(y1, 5.0);
}

#[test]
fn bad_hooks_are_configuration_errors() {
    for v in [
        json!({"legend": null}),
        json!({"title": null}),
        json!({"xlim": "wide"}),
        json!({"xlim": {"lower": 1}}),
        json!({"figure": {"figsize": [6]}}),
        json!({"subplots": {"nrows": 2}}),
        json!({"axis": "equal"}),
        json!({"tight_layout": {"pad": 1}}),
    ] {
        let mut fig = Figure::new(Theme::default());
        let err = fig.apply_hooks(&hooks(v.clone())).unwrap_err();
        assert!(matches!(err, DatagifError::Configuration(_)), "{v}: {err}");
    }
}

#[test]
fn autoscale_adds_five_percent_margins() {
    let mut fig = Figure::new(Theme::default());
    fig.push(dots(&[(0.0, 10.0), (100.0, 20.0)]));
    let ((x0, x1), (y0, y1)) = fig.view_limits();
    assert!((x0 - -5.0).abs() < 1e-9 && (x1 - 105.0).abs() < 1e-9);
    assert!((y0 - 9.5).abs() < 1e-9 && (y1 - 20.5).abs() < 1e-9);
}

#[test]
fn degenerate_ranges_are_widened() {
    let mut fig = Figure::new(Theme::default());
    fig.push(dots(&[(0.5, 200.0)]));
    let ((x0, x1), (y0, y1)) = fig.view_limits();
    assert!(x0 < 0.5 && x1 > 0.5);
    assert!(y0 < 200.0 && y1 > 200.0);

    let empty = Figure::new(Theme::default());
    assert_eq!(empty.view_limits(), ((0.0, 1.0), (0.0, 1.0)));
}

#[test]
fn fixed_limits_override_hook_limits() {
    let mut fig = Figure::new(Theme::default());
    fig.apply_hooks(&hooks(json!({"xlim": [0, 1]}))).unwrap();
    fig.set_xlim(-3.0, 7.0);
    assert_eq!(fig.xlim.both(), Some((-3.0, 7.0)));
}

#[test]
fn draw_order_is_stable_by_zorder() {
    let mut fig = Figure::new(Theme::default());
    let mut top = dots(&[(0.0, 0.0)]);
    top.zorder = 5.0;
    fig.push(top);
    fig.push(dots(&[(1.0, 1.0)]));
    fig.push(dots(&[(2.0, 2.0)]));
    let order: Vec<f64> = fig
        .marks_in_draw_order()
        .iter()
        .filter_map(|m| m.bounds())
        .map(|r| r.x0)
        .collect();
    assert_eq!(order, vec![1.0, 2.0, 0.0]);
}

#[test]
fn color_cycle_follows_palette() {
    let mut fig = Figure::new(Theme::default());
    let first = fig.next_color();
    let second = fig.next_color();
    assert_eq!(first, fig.theme.palette.color(0));
    assert_eq!(second, fig.theme.palette.color(1));
}
