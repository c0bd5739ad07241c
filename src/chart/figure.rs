use kurbo::{Point, Rect};

use crate::{
    chart::{color::Rgb, theme::Theme},
    config::args::{Bag, Hook, HookArgs, HookList},
    foundation::error::{DatagifError, DatagifResult},
};

/// Default figure size in inches.
pub const DEFAULT_FIGSIZE_IN: (f64, f64) = (6.4, 4.8);
/// Default resolution.
pub const DEFAULT_DPI: f64 = 100.0;
/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Figure hooks understood by [`Figure::apply_hook`].
pub const FIGURE_HOOKS: [&str; 11] = [
    "title",
    "xlabel",
    "ylabel",
    "xlim",
    "ylim",
    "figure",
    "subplots",
    "tight_layout",
    "grid",
    "axis",
    "suptitle",
];

/// Scatter marker glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerShape {
    /// `o`
    #[default]
    Circle,
    /// `s`
    Square,
    /// `^`
    Triangle,
}

impl MarkerShape {
    /// Parse a matplotlib marker code.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "o" => Some(Self::Circle),
            "s" => Some(Self::Square),
            "^" => Some(Self::Triangle),
            _ => None,
        }
    }
}

/// Stroke pattern of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineDash {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
}

impl LineDash {
    /// Parse a matplotlib line style code.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "-" | "solid" => Some(Self::Solid),
            "--" | "dashed" => Some(Self::Dashed),
            ":" | "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }
}

/// One iso-line of a contour layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourRing {
    /// Vertices in data coordinates.
    pub points: Vec<Point>,
    /// Stroke (or fill) color.
    pub color: Rgb,
    /// First and last vertex coincide.
    pub closed: bool,
}

/// Geometry of a mark, in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Scatter points; `colors` holds one color per point.
    Markers {
        points: Vec<Point>,
        colors: Vec<Rgb>,
        marker: MarkerShape,
        /// Marker area in pt².
        size: f64,
        edge: Option<Rgb>,
        edge_width: f64,
    },
    /// Polyline, optionally with a marker at every vertex.
    Line {
        points: Vec<Point>,
        color: Rgb,
        width: f64,
        dash: LineDash,
        marker: Option<MarkerShape>,
    },
    /// Filled axis-aligned cells (2D histogram).
    Cells { cells: Vec<(Rect, Rgb)> },
    /// Iso-lines; `grid` is the evaluated domain, which also drives autoscaling.
    Contours {
        rings: Vec<ContourRing>,
        fill: bool,
        width: f64,
        grid: Rect,
    },
}

/// Something drawn inside the axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Geometry.
    pub shape: Shape,
    /// Opacity.
    pub alpha: f64,
    /// Drawing order; higher draws later. Ties keep insertion order.
    pub zorder: f64,
    /// Clip to the axes rectangle.
    pub clip: bool,
}

impl Mark {
    /// Mark with default opacity, z-order and clipping.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            alpha: 1.0,
            zorder: 2.0,
            clip: true,
        }
    }

    /// Data-space bounding box, or `None` for an empty mark.
    pub fn bounds(&self) -> Option<Rect> {
        fn of_points<'p>(pts: impl IntoIterator<Item = &'p Point>) -> Option<Rect> {
            pts.into_iter()
                .fold(None, |acc: Option<Rect>, p| match acc {
                    None => Some(Rect::from_points(*p, *p)),
                    Some(r) => Some(r.union_pt(*p)),
                })
        }
        match &self.shape {
            Shape::Markers { points, .. } | Shape::Line { points, .. } => of_points(points),
            Shape::Cells { cells } => cells
                .iter()
                .map(|(r, _)| *r)
                .reduce(|a, b| a.union(b)),
            Shape::Contours { grid, .. } => Some(*grid),
        }
    }
}

/// Legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// Label text.
    pub label: String,
    /// Swatch color.
    pub color: Rgb,
}

/// Explicit range for one axis; unset ends autoscale.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    /// Lower end.
    pub lo: Option<f64>,
    /// Upper end.
    pub hi: Option<f64>,
}

impl AxisLimits {
    /// Both ends fixed.
    pub fn fixed(lo: f64, hi: f64) -> Self {
        Self {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    /// `(lo, hi)` when both ends are set.
    pub fn both(self) -> Option<(f64, f64)> {
        Some((self.lo?, self.hi?))
    }
}

/// Single-axes figure: a value built fresh for every frame and dropped after saving.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Size in inches.
    pub size_in: (f64, f64),
    /// Pixels per inch.
    pub dpi: f64,
    /// Visual style.
    pub theme: Theme,
    /// Axes title.
    pub title: Option<String>,
    /// Figure title above the axes title.
    pub suptitle: Option<String>,
    /// x axis label.
    pub xlabel: Option<String>,
    /// y axis label.
    pub ylabel: Option<String>,
    /// Explicit x range.
    pub xlim: AxisLimits,
    /// Explicit y range.
    pub ylim: AxisLimits,
    /// Grid override; `None` follows the theme.
    pub grid: Option<bool>,
    /// Draw axes decorations (frame, ticks, labels).
    pub axis_visible: bool,
    /// Shrink margins to fit the decorations.
    pub tight_layout: bool,
    marks: Vec<Mark>,
    legend: Vec<LegendEntry>,
    color_cycle: usize,
}

impl Figure {
    /// Empty figure with the default size.
    pub fn new(theme: Theme) -> Self {
        Self {
            size_in: DEFAULT_FIGSIZE_IN,
            dpi: DEFAULT_DPI,
            theme,
            title: None,
            suptitle: None,
            xlabel: None,
            ylabel: None,
            xlim: AxisLimits::default(),
            ylim: AxisLimits::default(),
            grid: None,
            axis_visible: true,
            tight_layout: false,
            marks: Vec::new(),
            legend: Vec::new(),
            color_cycle: 0,
        }
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi).round().max(1.0) as u32;
        (px(self.size_in.0), px(self.size_in.1))
    }

    /// Effective grid visibility.
    pub fn grid_visible(&self) -> bool {
        self.grid.unwrap_or_else(|| self.theme.grid_by_default())
    }

    /// Apply hooks in order.
    pub fn apply_hooks(&mut self, hooks: &HookList) -> DatagifResult<()> {
        for hook in hooks.iter() {
            self.apply_hook(hook)?;
        }
        Ok(())
    }

    /// Apply one figure customization hook.
    pub fn apply_hook(&mut self, hook: &Hook) -> DatagifResult<()> {
        let name = hook.name.as_str();
        let args = &hook.args;
        match name {
            "title" => self.title = Some(text_arg(name, args, "label")?),
            "suptitle" => self.suptitle = Some(text_arg(name, args, "t")?),
            "xlabel" => self.xlabel = Some(text_arg(name, args, "xlabel")?),
            "ylabel" => self.ylabel = Some(text_arg(name, args, "ylabel")?),
            "xlim" => self.xlim = limits_arg(name, args, self.xlim, ["left", "right"])?,
            "ylim" => self.ylim = limits_arg(name, args, self.ylim, ["bottom", "top"])?,
            "figure" | "subplots" => match args {
                HookArgs::NoArgs => {}
                HookArgs::Named(bag) => self.apply_figure_args(name, bag)?,
                HookArgs::Positional(_) => return Err(ill_shaped(name, "named 'figsize'/'dpi'")),
            },
            "tight_layout" => match args {
                HookArgs::NoArgs => self.tight_layout = true,
                _ => return Err(ill_shaped(name, "no arguments")),
            },
            "grid" => {
                self.grid = Some(match args {
                    HookArgs::NoArgs => !self.grid_visible(),
                    HookArgs::Positional(v) => bool_arg(name, v)?,
                    HookArgs::Named(bag) => match (bag.len(), bag.get("visible")) {
                        (1, Some(v)) => bool_arg(name, v)?,
                        _ => return Err(ill_shaped(name, "a boolean or named 'visible'")),
                    },
                })
            }
            "axis" => self.apply_axis(args)?,
            other => {
                return Err(DatagifError::configuration(format!(
                    "unknown figure hook '{other}', must be one of {}",
                    FIGURE_HOOKS.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn apply_figure_args(&mut self, name: &str, bag: &Bag) -> DatagifResult<()> {
        for (key, v) in bag {
            match key.as_str() {
                "figsize" => {
                    let size = v
                        .as_array()
                        .filter(|a| a.len() == 2)
                        .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)))
                        .filter(|(w, h)| *w > 0.0 && *h > 0.0 && w.is_finite() && h.is_finite())
                        .ok_or_else(|| ill_shaped(name, "'figsize' as [width, height] in inches"))?;
                    self.size_in = size;
                }
                "dpi" => {
                    self.dpi = v
                        .as_f64()
                        .filter(|d| d.is_finite() && *d > 0.0)
                        .ok_or_else(|| ill_shaped(name, "a positive 'dpi'"))?;
                }
                other => {
                    return Err(DatagifError::configuration(format!(
                        "{name}() got an unexpected keyword argument '{other}'"
                    )));
                }
            }
        }
        Ok(())
    }

    fn apply_axis(&mut self, args: &HookArgs) -> DatagifResult<()> {
        match args {
            HookArgs::Positional(serde_json::Value::String(s)) => match s.as_str() {
                "off" => self.axis_visible = false,
                "on" => self.axis_visible = true,
                _ => return Err(ill_shaped("axis", "\"on\", \"off\" or [xmin, xmax, ymin, ymax]")),
            },
            HookArgs::Positional(serde_json::Value::Array(items)) if items.len() == 4 => {
                let v: Vec<f64> = items
                    .iter()
                    .map(serde_json::Value::as_f64)
                    .collect::<Option<_>>()
                    .ok_or_else(|| ill_shaped("axis", "four numbers"))?;
                self.xlim = AxisLimits::fixed(v[0], v[1]);
                self.ylim = AxisLimits::fixed(v[2], v[3]);
            }
            _ => return Err(ill_shaped("axis", "\"on\", \"off\" or [xmin, xmax, ymin, ymax]")),
        }
        Ok(())
    }

    /// Fix the x range (overrides earlier limits).
    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = AxisLimits::fixed(lo, hi);
    }

    /// Fix the y range (overrides earlier limits).
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = AxisLimits::fixed(lo, hi);
    }

    /// Next color of the theme's palette cycle.
    pub fn next_color(&mut self) -> Rgb {
        let c = self.theme.palette.color(self.color_cycle);
        self.color_cycle += 1;
        c
    }

    /// Add a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Marks in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Marks in drawing order (z-order, ties in insertion order).
    pub fn marks_in_draw_order(&self) -> Vec<&Mark> {
        let mut marks: Vec<&Mark> = self.marks.iter().collect();
        marks.sort_by(|a, b| a.zorder.total_cmp(&b.zorder));
        marks
    }

    /// Add a legend row.
    pub fn add_legend_entry(&mut self, label: impl Into<String>, color: Rgb) {
        self.legend.push(LegendEntry {
            label: label.into(),
            color,
        });
    }

    /// Legend rows.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Union of every mark's bounding box.
    pub fn data_bounds(&self) -> Option<Rect> {
        self.marks
            .iter()
            .filter_map(Mark::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Displayed `(x range, y range)`: explicit limits where set, autoscaled data extents with
    /// margins elsewhere. Degenerate ranges are widened.
    pub fn view_limits(&self) -> ((f64, f64), (f64, f64)) {
        let data = self.data_bounds();
        let x = resolve_axis(self.xlim, data.map(|r| (r.x0, r.x1)));
        let y = resolve_axis(self.ylim, data.map(|r| (r.y0, r.y1)));
        (x, y)
    }
}

fn resolve_axis(limits: AxisLimits, data: Option<(f64, f64)>) -> (f64, f64) {
    let auto = match data {
        Some((lo, hi)) => {
            let (lo, hi) = nonsingular(lo, hi);
            let pad = (hi - lo) * AUTOSCALE_MARGIN;
            (lo - pad, hi + pad)
        }
        None => (0.0, 1.0),
    };
    let lo = limits.lo.unwrap_or(auto.0);
    let hi = limits.hi.unwrap_or(auto.1);
    nonsingular(lo, hi)
}

fn nonsingular(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let eps = if lo.abs() < 1.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - eps, hi + eps)
    } else {
        (lo, hi)
    }
}

fn ill_shaped(hook: &str, expected: &str) -> DatagifError {
    DatagifError::configuration(format!("{hook}(): expected {expected}"))
}

fn bool_arg(hook: &str, v: &serde_json::Value) -> DatagifResult<bool> {
    v.as_bool().ok_or_else(|| ill_shaped(hook, "a boolean"))
}

fn text_arg(hook: &str, args: &HookArgs, key: &str) -> DatagifResult<String> {
    let v = match args {
        HookArgs::Positional(v) => v,
        HookArgs::Named(bag) if bag.len() == 1 && bag.contains_key(key) => &bag[key],
        _ => return Err(ill_shaped(hook, &format!("a text argument or named '{key}'"))),
    };
    match v {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(ill_shaped(hook, "text")),
    }
}

fn limits_arg(
    hook: &str,
    args: &HookArgs,
    current: AxisLimits,
    names: [&str; 2],
) -> DatagifResult<AxisLimits> {
    let num = |v: &serde_json::Value| -> DatagifResult<Option<f64>> {
        if v.is_null() {
            return Ok(None);
        }
        v.as_f64()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or_else(|| ill_shaped(hook, "numeric limits"))
    };
    let shape = format!("[lo, hi] or named '{}'/'{}'", names[0], names[1]);
    match args {
        HookArgs::Positional(serde_json::Value::Array(items)) if items.len() == 2 => {
            Ok(AxisLimits {
                lo: num(&items[0])?,
                hi: num(&items[1])?,
            })
        }
        HookArgs::Named(bag) => {
            let mut out = current;
            for (key, v) in bag {
                if key == names[0] {
                    out.lo = num(v)?.or(out.lo);
                } else if key == names[1] {
                    out.hi = num(v)?.or(out.hi);
                } else {
                    return Err(DatagifError::configuration(format!(
                        "{hook}() got an unexpected keyword argument '{key}'"
                    )));
                }
            }
            Ok(out)
        }
        _ => Err(ill_shaped(hook, &shape)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/figure.rs"]
mod tests;
