//! Figure → plotters chart.
//!
//! The figure's marks are data-space geometry; plotters owns the axes, mesh, tick labels and
//! the data → pixel mapping. Marks are drawn in pixel space so that clipped and unclipped marks
//! share one code path.

use kurbo::{Point, Rect};
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::{
    chart::{
        color::Rgb,
        figure::{ContourRing, Figure, LineDash, Mark, MarkerShape, Shape},
    },
    foundation::error::{DatagifError, DatagifResult},
    render::fonts::resolve_family,
};

const TARGET_TICKS: usize = 6;

/// Font sizes in pixels for one figure.
#[derive(Clone, Copy, Debug)]
struct TextSizes {
    tick: f64,
    label: f64,
    title: f64,
    suptitle: f64,
}

fn draw_err(e: impl std::fmt::Debug) -> DatagifError {
    DatagifError::render(format!("draw figure: {e:?}"))
}

fn rgb(c: Rgb) -> RGBColor {
    let (r, g, b) = c.to_u8();
    RGBColor(r, g, b)
}

/// Tick label without trailing zeros.
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= 1e6 || value.abs() < 1e-4 {
        return format!("{value:.1e}");
    }
    format!("{value:.6}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Draw `fig` onto `root`, which must cover the whole backend.
///
/// Returns the plotting rectangle in backend pixels.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    fig: &Figure,
) -> DatagifResult<Rect> {
    let theme = &fig.theme;
    let family = resolve_family(&theme.font_family);
    let text = family.is_some();
    let family = family.unwrap_or_default();
    let text_color = rgb(theme.text_color());

    let (w, h) = root.dim_in_pixel();
    let (w, h) = (f64::from(w), f64::from(h));
    let pt = fig.dpi / 72.0;
    let s = theme.text_scale() * pt;
    let sizes = TextSizes {
        tick: 11.0 * s,
        label: 12.0 * s,
        title: 12.0 * s,
        suptitle: 14.0 * s,
    };

    root.fill(&WHITE).map_err(draw_err)?;

    let suptitle = fig.suptitle.as_deref().filter(|_| text);
    let (title_area, chart_area) = match suptitle {
        Some(_) => {
            let (top, rest) = root.split_vertically((sizes.suptitle * 1.8).round() as u32);
            (Some(top), rest)
        }
        None => (None, root.clone()),
    };
    if let (Some(area), Some(title)) = (&title_area, suptitle) {
        let style = (family.as_str(), sizes.suptitle)
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (aw, ah) = area.dim_in_pixel();
        area.draw_text(title, &style, (aw as i32 / 2, ah as i32 / 2))
            .map_err(draw_err)?;
    }

    let decorated = fig.axis_visible && text;
    let x_area = if decorated {
        sizes.tick * 1.8 + if fig.xlabel.is_some() { sizes.label * 1.5 } else { 0.0 }
    } else {
        0.0
    };
    let y_area = if decorated {
        sizes.tick * 3.6 + if fig.ylabel.is_some() { sizes.label * 1.5 } else { 0.0 }
    } else {
        0.0
    };
    let pad = sizes.label * 0.5;
    let (left, right, top, bottom) = if fig.tight_layout {
        (pad, pad, pad, pad)
    } else {
        (
            (0.125 * w - y_area).max(pad),
            0.1 * w,
            if suptitle.is_some() { pad } else { 0.12 * h },
            (0.11 * h - x_area).max(pad),
        )
    };

    let (x_range, y_range) = fig.view_limits();
    let mut builder = ChartBuilder::on(&chart_area);
    builder
        .margin_left(left.round() as u32)
        .margin_right(right.round() as u32)
        .margin_top(top.round() as u32)
        .margin_bottom(bottom.round() as u32)
        .x_label_area_size(x_area.round() as u32)
        .y_label_area_size(y_area.round() as u32);
    if let Some(title) = fig.title.as_deref().filter(|_| text) {
        builder.caption(
            title,
            (family.as_str(), sizes.title).into_font().color(&text_color),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_err)?;

    if fig.axis_visible {
        chart
            .plotting_area()
            .fill(&rgb(theme.axes_facecolor()))
            .map_err(draw_err)?;

        let tick_fmt = |v: &f64| format_tick(*v);
        let tick_len = if theme.tick_marks() { (3.5 * pt).round() as i32 } else { 0 };
        let labels = if text { TARGET_TICKS } else { 0 };
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(labels)
            .y_labels(labels)
            .x_label_formatter(&tick_fmt)
            .y_label_formatter(&tick_fmt)
            .light_line_style(TRANSPARENT)
            .bold_line_style(rgb(theme.grid_color()).stroke_width(pt.round().max(1.0) as u32))
            .axis_style(TRANSPARENT)
            .set_all_tick_mark_size(tick_len)
            .label_style((family.as_str(), sizes.tick).into_font().color(&text_color))
            .axis_desc_style((family.as_str(), sizes.label).into_font().color(&text_color));
        if !fig.grid_visible() {
            mesh.disable_mesh();
        }
        if let Some(label) = fig.xlabel.as_deref().filter(|_| text) {
            mesh.x_desc(label);
        }
        if let Some(label) = fig.ylabel.as_deref().filter(|_| text) {
            mesh.y_desc(label);
        }
        mesh.draw().map_err(draw_err)?;
    }

    let (px, py) = chart.plotting_area().get_pixel_range();
    let plot_rect = Rect::new(
        f64::from(px.start),
        f64::from(py.start),
        f64::from(px.end),
        f64::from(py.end),
    );
    {
        let clip_area = chart.plotting_area().strip_coord_spec();
        let origin = (px.start, py.start);
        let view = Rect::new(x_range.0, y_range.0, x_range.1, y_range.1);
        for mark in fig.marks_in_draw_order() {
            let to_px = |p: Point| chart.backend_coord(&(p.x, p.y));
            if mark.clip {
                let shifted = |p: Point| {
                    let (x, y) = to_px(p);
                    (x - origin.0, y - origin.1)
                };
                draw_mark(&clip_area, mark, &shifted, Some(view), pt)?;
            } else {
                draw_mark(root, mark, &to_px, None, pt)?;
            }
        }

        if fig.axis_visible
            && let Some(spine) = theme.spine_color()
        {
            let (cw, ch) = clip_area.dim_in_pixel();
            clip_area
                .draw(&Rectangle::new(
                    [(0, 0), (cw as i32 - 1, ch as i32 - 1)],
                    rgb(spine).stroke_width((1.25 * pt).round().max(1.0) as u32),
                ))
                .map_err(draw_err)?;
        }
    }

    if text && !fig.legend().is_empty() {
        for entry in fig.legend() {
            let color = rgb(entry.color);
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(draw_err)?
                .label(entry.label.as_str())
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, color.filled()));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(RGBColor(0xcc, 0xcc, 0xcc))
            .label_font((family.as_str(), sizes.tick).into_font().color(&text_color))
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(plot_rect)
}

fn draw_mark<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    mark: &Mark,
    to_px: &dyn Fn(Point) -> (i32, i32),
    view: Option<Rect>,
    pt: f64,
) -> DatagifResult<()> {
    let alpha = mark.alpha;
    match &mark.shape {
        Shape::Markers {
            points,
            colors,
            marker,
            size,
            edge,
            edge_width,
        } => {
            let diameter = size.sqrt() * pt;
            let edge = edge
                .filter(|_| *edge_width > 0.0)
                .map(|c| rgb(c).mix(alpha).stroke_width((edge_width * pt).round().max(1.0) as u32));
            for (p, color) in points.iter().zip(colors) {
                if view.is_some_and(|v| !in_view(v, *p)) {
                    continue;
                }
                let c = to_px(*p);
                draw_glyph(area, *marker, c, diameter, rgb(*color).mix(alpha).filled())?;
                if let Some(stroke) = edge {
                    draw_glyph(area, *marker, c, diameter, stroke)?;
                }
            }
        }
        Shape::Line {
            points,
            color,
            width,
            dash,
            marker,
        } => {
            let color = rgb(*color).mix(alpha);
            let stroke = color.stroke_width((width * pt).round().max(1.0) as u32);
            let px: Vec<(i32, i32)> = points.iter().map(|p| to_px(*p)).collect();
            if px.len() > 1 {
                let unit = (width * pt).max(1.0);
                match dash {
                    LineDash::Solid => area.draw(&PathElement::new(px.clone(), stroke)),
                    LineDash::Dashed => area.draw(&DashedPathElement::new(
                        px.clone(),
                        (3.7 * unit).round() as u32,
                        (1.6 * unit).round() as u32,
                        stroke,
                    )),
                    LineDash::Dotted => area.draw(&DashedPathElement::new(
                        px.clone(),
                        unit.round() as u32,
                        (1.65 * unit).round() as u32,
                        stroke,
                    )),
                }
                .map_err(draw_err)?;
            }
            if let Some(marker) = marker {
                for c in &px {
                    draw_glyph(area, *marker, *c, 6.0 * pt, color.filled())?;
                }
            }
        }
        Shape::Cells { cells } => {
            for (rect, color) in cells {
                let a = to_px(Point::new(rect.x0, rect.y0));
                let b = to_px(Point::new(rect.x1, rect.y1));
                area.draw(&Rectangle::new([a, b], rgb(*color).mix(alpha).filled()))
                    .map_err(draw_err)?;
            }
        }
        Shape::Contours {
            rings, fill, width, ..
        } => {
            for ContourRing {
                points,
                color,
                closed,
            } in rings
            {
                if points.len() < 2 {
                    continue;
                }
                let mut px: Vec<(i32, i32)> = points.iter().map(|p| to_px(*p)).collect();
                let color = rgb(*color).mix(alpha);
                if *fill {
                    area.draw(&Polygon::new(px, color.filled())).map_err(draw_err)?;
                } else {
                    if *closed && let Some(first) = px.first().copied() {
                        px.push(first);
                    }
                    let stroke = color.stroke_width((width * pt).round().max(1.0) as u32);
                    area.draw(&PathElement::new(px, stroke)).map_err(draw_err)?;
                }
            }
        }
    }
    Ok(())
}

fn in_view(v: Rect, p: Point) -> bool {
    p.x >= v.x0 && p.x <= v.x1 && p.y >= v.y0 && p.y <= v.y1
}

fn draw_glyph<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    marker: MarkerShape,
    (x, y): (i32, i32),
    diameter: f64,
    style: ShapeStyle,
) -> DatagifResult<()> {
    let r = (diameter / 2.0).round().max(1.0) as i32;
    match marker {
        MarkerShape::Circle => area.draw(&Circle::new((x, y), r, style)),
        MarkerShape::Square => area.draw(&Rectangle::new([(x - r, y - r), (x + r, y + r)], style)),
        MarkerShape::Triangle => area.draw(&TriangleMarker::new((x, y), r, style)),
    }
    .map_err(draw_err)
}

#[cfg(test)]
#[path = "../../tests/unit/render/plot.rs"]
mod tests;
