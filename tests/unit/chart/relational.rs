use super::*;
use crate::chart::{kind::PlotKind, theme::Theme};
use crate::config::args::StyleArgs;
use crate::data::dataset::Column;
use serde_json::json;

fn data() -> Dataset {
    Dataset::new(vec![
        Column::new("x", [1.0, 2.0, 2.0, 3.0, 4.0]),
        Column::new("y", [10.0, 20.0, 40.0, 30.0, 50.0]),
        Column::new("g", ["a", "b", "a", "b", "a"]),
    ])
    .unwrap()
}

fn layer(kind: PlotKind, style: serde_json::Value) -> PlotLayer {
    PlotLayer {
        kind,
        x: "x".into(),
        y: "y".into(),
        style: serde_json::from_value::<StyleArgs>(style).unwrap(),
    }
}

#[test]
fn scatter_draws_one_point_per_row() {
    let mut fig = Figure::new(Theme::default());
    scatterplot(&mut fig, &data(), &layer(PlotKind::Scatterplot, json!({"s": 5, "color": "r"})))
        .unwrap();
    let [mark] = fig.marks() else {
        panic!("expected one mark");
    };
    let Shape::Markers { points, colors, size, .. } = &mark.shape else {
        panic!("expected markers");
    };
    assert_eq!(points.len(), 5);
    assert_eq!(*size, 5.0);
    assert!(colors.iter().all(|c| c.to_u8() == (0xc4, 0x4e, 0x52)));
}

#[test]
fn scatter_without_color_takes_the_next_cycle_color() {
    let mut fig = Figure::new(Theme::default());
    let l = layer(PlotKind::Scatterplot, json!({}));
    scatterplot(&mut fig, &data(), &l).unwrap();
    scatterplot(&mut fig, &data(), &l).unwrap();
    let firsts: Vec<Rgb> = fig
        .marks()
        .iter()
        .map(|m| match &m.shape {
            Shape::Markers { colors, .. } => colors[0],
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(firsts, vec![Palette::default().color(0), Palette::default().color(1)]);
}

#[test]
fn unknown_style_key_is_rejected_before_drawing() {
    let mut fig = Figure::new(Theme::default());
    let err = scatterplot(&mut fig, &data(), &layer(PlotKind::Scatterplot, json!({"bins": 3})))
        .unwrap_err();
    assert!(matches!(err, DatagifError::Render(_)));
    assert!(err.to_string().contains("unexpected keyword argument 'bins'"));
    assert!(fig.marks().is_empty());

    let err = scatterplot(&mut fig, &data(), &layer(PlotKind::Scatterplot, json!({"s": "big"})))
        .unwrap_err();
    assert!(matches!(err, DatagifError::Render(_)));
}

#[test]
fn lineplot_averages_repeated_x() {
    let mut fig = Figure::new(Theme::default());
    lineplot(&mut fig, &data(), &layer(PlotKind::Lineplot, json!({"lw": 2, "linestyle": "--"})))
        .unwrap();
    let Shape::Line { points, width, dash, .. } = &fig.marks()[0].shape else {
        panic!("expected a line");
    };
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![10.0, 30.0, 30.0, 50.0]);
    assert_eq!(*width, 2.0);
    assert_eq!(*dash, LineDash::Dashed);
}

#[test]
fn lineplot_null_estimator_keeps_raw_rows() {
    let mut fig = Figure::new(Theme::default());
    lineplot(&mut fig, &data(), &layer(PlotKind::Lineplot, json!({"estimator": null})))
        .unwrap();
    let Shape::Line { points, .. } = &fig.marks()[0].shape else {
        panic!("expected a line");
    };
    assert_eq!(points.len(), 5);
}

#[test]
fn hue_splits_lines_and_fills_the_legend() {
    let mut fig = Figure::new(Theme::default());
    lineplot(&mut fig, &data(), &layer(PlotKind::Lineplot, json!({"hue": "g"}))).unwrap();
    assert_eq!(fig.marks().len(), 2);
    let labels: Vec<&str> = fig.legend().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
}

#[test]
fn hue_colors_scatter_points_by_level() {
    let mut fig = Figure::new(Theme::default());
    scatterplot(&mut fig, &data(), &layer(PlotKind::Scatterplot, json!({"hue": "g"}))).unwrap();
    let Shape::Markers { colors, .. } = &fig.marks()[0].shape else {
        panic!("expected markers");
    };
    let p = Palette::default();
    assert_eq!(colors, &vec![p.color(0), p.color(1), p.color(0), p.color(1), p.color(0)]);
}

#[test]
fn missing_hue_column_is_schema_error() {
    let mut fig = Figure::new(Theme::default());
    let err = scatterplot(&mut fig, &data(), &layer(PlotKind::Scatterplot, json!({"hue": "nope"})))
        .unwrap_err();
    assert!(matches!(err, DatagifError::Schema(_)));
}

#[test]
fn relplot_sizes_the_figure_and_picks_the_kind() {
    let mut fig = Figure::new(Theme::default());
    relplot(
        &mut fig,
        &data(),
        &layer(PlotKind::Relplot, json!({"kind": "line", "height": 4, "aspect": 1.5})),
    )
    .unwrap();
    assert_eq!(fig.size_in, (6.0, 4.0));
    assert!(matches!(fig.marks()[0].shape, Shape::Line { .. }));

    let mut fig = Figure::new(Theme::default());
    relplot(&mut fig, &data(), &layer(PlotKind::Relplot, json!({}))).unwrap();
    assert_eq!(fig.size_in, (5.0, 5.0));
    assert!(matches!(fig.marks()[0].shape, Shape::Markers { .. }));

    let err = relplot(&mut fig, &data(), &layer(PlotKind::Relplot, json!({"kind": "bar"})))
        .unwrap_err();
    assert!(matches!(err, DatagifError::Render(_)));
}

#[test]
fn null_coordinates_are_skipped() {
    let data = Dataset::new(vec![
        Column::new("x", [Value::Float(1.0), Value::Null, Value::Float(3.0)]),
        Column::new("y", [Value::Float(1.0), Value::Float(2.0), Value::Null]),
    ])
    .unwrap();
    let mut fig = Figure::new(Theme::default());
    scatterplot(&mut fig, &data, &layer(PlotKind::Scatterplot, json!({}))).unwrap();
    let Shape::Markers { points, .. } = &fig.marks()[0].shape else {
        panic!("expected markers");
    };
    assert_eq!(points, &vec![Point::new(1.0, 1.0)]);
}

#[test]
fn text_columns_are_schema_errors() {
    let mut fig = Figure::new(Theme::default());
    let mut l = layer(PlotKind::Scatterplot, json!({}));
    l.x = "g".into();
    assert!(matches!(
        scatterplot(&mut fig, &data(), &l),
        Err(DatagifError::Schema(_))
    ));
}
