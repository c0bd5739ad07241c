//! Scatter, line and figure-level relational plots.

use kurbo::Point;

use crate::{
    chart::{
        color::{Colormap, Palette, Rgb},
        figure::{Figure, LineDash, Mark, MarkerShape, Shape},
        kind::PlotLayer,
        style::StyleReader,
    },
    data::dataset::Dataset,
    foundation::{
        error::{DatagifError, DatagifResult},
        value::Value,
    },
};

const DEFAULT_MARKER_AREA: f64 = 36.0;
const DEFAULT_LINE_WIDTH: f64 = 1.5;
const RELPLOT_HEIGHT_IN: f64 = 5.0;
const MAX_LEGEND_ROWS: usize = 10;

/// Shared style keys of every relational plot.
struct Common<'a> {
    color: Option<Rgb>,
    alpha: f64,
    hue: Option<&'a str>,
    clip: bool,
    zorder: Option<f64>,
}

impl<'a> Common<'a> {
    fn read(style: &mut StyleReader<'a>, palette: &Palette) -> DatagifResult<Self> {
        Ok(Self {
            color: style.color(&["color", "c"], palette)?,
            alpha: style.unit("alpha")?.unwrap_or(1.0),
            hue: style.str("hue")?,
            clip: style.bool("clip_on")?.unwrap_or(true),
            zorder: style.f64("zorder")?,
        })
    }

    fn mark(&self, shape: Shape) -> Mark {
        let mut mark = Mark::new(shape);
        mark.alpha = self.alpha;
        mark.clip = self.clip;
        if let Some(z) = self.zorder {
            mark.zorder = z;
        }
        mark
    }
}

struct ScatterStyle<'a> {
    common: Common<'a>,
    size: f64,
    marker: MarkerShape,
    edge: Option<Rgb>,
    edge_width: f64,
}

impl<'a> ScatterStyle<'a> {
    fn read(style: &mut StyleReader<'a>, palette: &Palette) -> DatagifResult<Self> {
        let common = Common::read(style, palette)?;
        let size = style.non_negative("s")?.unwrap_or(DEFAULT_MARKER_AREA);
        let marker = marker(style)?.unwrap_or_default();
        let edge = match style.raw(&["edgecolor"]) {
            Some(v) if v.as_str() == Some("none") => None,
            _ => Some(style.color(&["edgecolor"], palette)?.unwrap_or(Rgb::gray(1.0))),
        };
        let edge_width = style.non_negative("linewidth")?.unwrap_or(0.48);
        Ok(Self {
            common,
            size,
            marker,
            edge,
            edge_width,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Estimator {
    Mean,
    Median,
    Raw,
}

struct LineStyle<'a> {
    common: Common<'a>,
    width: f64,
    dash: LineDash,
    estimator: Estimator,
    marker: Option<MarkerShape>,
}

impl<'a> LineStyle<'a> {
    fn read(style: &mut StyleReader<'a>, palette: &Palette) -> DatagifResult<Self> {
        let common = Common::read(style, palette)?;
        let width = style
            .f64_alias(&["linewidth", "lw"])?
            .unwrap_or(DEFAULT_LINE_WIDTH);
        let dash = match style.str("linestyle")? {
            None => LineDash::Solid,
            Some(code) => LineDash::parse(code).ok_or_else(|| {
                DatagifError::render(format!("unsupported linestyle '{code}' (use '-', '--' or ':')"))
            })?,
        };
        let estimator = match style.raw(&["estimator"]) {
            None => Estimator::Mean,
            Some(serde_json::Value::Null) => Estimator::Raw,
            Some(v) => match v.as_str() {
                Some("mean") => Estimator::Mean,
                Some("median") => Estimator::Median,
                _ => {
                    return Err(DatagifError::render(format!(
                        "unsupported estimator {v} (use \"mean\", \"median\" or null)"
                    )));
                }
            },
        };
        let marker = marker(style)?;
        Ok(Self {
            common,
            width,
            dash,
            estimator,
            marker,
        })
    }
}

fn marker(style: &mut StyleReader<'_>) -> DatagifResult<Option<MarkerShape>> {
    style
        .str("marker")?
        .map(|code| {
            MarkerShape::parse(code).ok_or_else(|| {
                DatagifError::render(format!("unsupported marker '{code}' (use 'o', 's' or '^')"))
            })
        })
        .transpose()
}

/// Draw a scatter layer.
pub fn scatterplot(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    let palette = fig.theme.palette.clone();
    let mut style = StyleReader::new("scatterplot", &layer.style);
    let opts = ScatterStyle::read(&mut style, &palette)?;
    style.finish()?;
    draw_scatter(fig, data, layer, &opts)
}

/// Draw a line layer.
pub fn lineplot(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    let palette = fig.theme.palette.clone();
    let mut style = StyleReader::new("lineplot", &layer.style);
    let opts = LineStyle::read(&mut style, &palette)?;
    style.finish()?;
    draw_line(fig, data, layer, &opts)
}

/// Draw a figure-level relational plot; `kind` picks scatter (default) or line, and
/// `height`/`aspect` resize the figure.
pub fn relplot(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    let palette = fig.theme.palette.clone();
    let mut style = StyleReader::new("relplot", &layer.style);
    let height = positive(&mut style, "height")?.unwrap_or(RELPLOT_HEIGHT_IN);
    let aspect = positive(&mut style, "aspect")?.unwrap_or(1.0);
    match style.str("kind")?.unwrap_or("scatter") {
        "scatter" => {
            let opts = ScatterStyle::read(&mut style, &palette)?;
            style.finish()?;
            fig.size_in = (height * aspect, height);
            draw_scatter(fig, data, layer, &opts)
        }
        "line" => {
            let opts = LineStyle::read(&mut style, &palette)?;
            style.finish()?;
            fig.size_in = (height * aspect, height);
            draw_line(fig, data, layer, &opts)
        }
        other => Err(DatagifError::render(format!(
            "relplot(): unsupported kind '{other}' (use 'scatter' or 'line')"
        ))),
    }
}

fn positive(style: &mut StyleReader<'_>, key: &str) -> DatagifResult<Option<f64>> {
    match style.f64(key)? {
        Some(v) if v <= 0.0 => Err(DatagifError::render(format!(
            "relplot(): '{key}' must be positive, got {v}"
        ))),
        other => Ok(other),
    }
}

/// Rows with finite x and y (and a non-null hue when one is requested).
fn rows<'d>(
    data: &'d Dataset,
    layer: &PlotLayer,
    hue: Option<&str>,
) -> DatagifResult<Vec<(Point, Option<&'d Value>)>> {
    let xs = data.column(&layer.x)?.numeric()?;
    let ys = data.column(&layer.y)?.numeric()?;
    let hues = match hue {
        Some(col) => Some(data.column(col)?.values()),
        None => None,
    };
    Ok(xs
        .into_iter()
        .zip(ys)
        .enumerate()
        .filter_map(|(row, (x, y))| {
            let (x, y) = (x?, y?);
            if !(x.is_finite() && y.is_finite()) {
                return None;
            }
            let h = match hues {
                Some(values) => Some(values.get(row).filter(|v| !v.is_null())?),
                None => None,
            };
            Some((Point::new(x, y), h))
        })
        .collect())
}

/// Color assignment for the distinct values of a hue column.
struct HueMap<'d> {
    levels: Vec<&'d Value>,
    colors: Vec<Rgb>,
}

impl<'d> HueMap<'d> {
    fn new(values: impl IntoIterator<Item = &'d Value>, palette: &Palette) -> Self {
        let mut levels: Vec<&Value> = values.into_iter().collect();
        levels.sort_by(|a, b| a.total_cmp(b));
        levels.dedup_by(|a, b| a.total_cmp(*b).is_eq());

        let numeric = levels.iter().all(|v| v.as_f64().is_some());
        let colors = if numeric && levels.len() > 1 {
            let cmap = Colormap::named("flare").unwrap_or_else(|_| Colormap::light(palette.color(0)));
            let lo = levels.first().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let hi = levels.last().and_then(|v| v.as_f64()).unwrap_or(1.0);
            levels
                .iter()
                .map(|v| cmap.sample((v.as_f64().unwrap_or(lo) - lo) / (hi - lo)))
                .collect()
        } else {
            (0..levels.len()).map(|i| palette.color(i)).collect()
        };
        Self { levels, colors }
    }

    fn color_of(&self, v: &Value) -> Rgb {
        let idx = self
            .levels
            .binary_search_by(|x| x.total_cmp(v))
            .unwrap_or(0);
        self.colors[idx]
    }

    fn add_legend(&self, fig: &mut Figure) {
        let n = self.levels.len();
        let step = n.div_ceil(MAX_LEGEND_ROWS).max(1);
        for idx in (0..n).step_by(step) {
            fig.add_legend_entry(self.levels[idx].to_string(), self.colors[idx]);
        }
    }
}

fn draw_scatter(
    fig: &mut Figure,
    data: &Dataset,
    layer: &PlotLayer,
    opts: &ScatterStyle<'_>,
) -> DatagifResult<()> {
    let rows = rows(data, layer, opts.common.hue)?;
    let colors = match opts.common.hue {
        Some(_) => {
            let hue = HueMap::new(rows.iter().filter_map(|(_, h)| *h), &fig.theme.palette);
            hue.add_legend(fig);
            rows.iter()
                .map(|(_, h)| h.map_or(Rgb::gray(0.0), |v| hue.color_of(v)))
                .collect()
        }
        None => {
            let color = opts.common.color.unwrap_or_else(|| fig.next_color());
            vec![color; rows.len()]
        }
    };
    fig.push(opts.common.mark(Shape::Markers {
        points: rows.iter().map(|(p, _)| *p).collect(),
        colors,
        marker: opts.marker,
        size: opts.size,
        edge: opts.edge,
        edge_width: opts.edge_width,
    }));
    Ok(())
}

fn draw_line(
    fig: &mut Figure,
    data: &Dataset,
    layer: &PlotLayer,
    opts: &LineStyle<'_>,
) -> DatagifResult<()> {
    let rows = rows(data, layer, opts.common.hue)?;
    let mut series: Vec<(Rgb, Vec<Point>)> = Vec::new();
    match opts.common.hue {
        Some(_) => {
            let hue = HueMap::new(rows.iter().filter_map(|(_, h)| *h), &fig.theme.palette);
            hue.add_legend(fig);
            for (idx, level) in hue.levels.iter().enumerate() {
                let pts = rows
                    .iter()
                    .filter(|(_, h)| h.is_some_and(|v| v.total_cmp(level).is_eq()))
                    .map(|(p, _)| *p)
                    .collect();
                series.push((hue.colors[idx], pts));
            }
        }
        None => {
            let color = opts.common.color.unwrap_or_else(|| fig.next_color());
            series.push((color, rows.iter().map(|(p, _)| *p).collect()));
        }
    }

    for (color, pts) in series {
        fig.push(opts.common.mark(Shape::Line {
            points: aggregate(pts, opts.estimator),
            color,
            width: opts.width,
            dash: opts.dash,
            marker: opts.marker,
        }));
    }
    Ok(())
}

/// Sort by x and collapse repeated x values with the estimator.
fn aggregate(mut pts: Vec<Point>, estimator: Estimator) -> Vec<Point> {
    pts.sort_by(|a, b| a.x.total_cmp(&b.x));
    if estimator == Estimator::Raw {
        return pts;
    }
    pts.chunk_by(|a, b| a.x == b.x)
        .map(|group| {
            let mut ys: Vec<f64> = group.iter().map(|p| p.y).collect();
            let y = match estimator {
                Estimator::Median => median(&mut ys),
                _ => ys.iter().sum::<f64>() / ys.len() as f64,
            };
            Point::new(group[0].x, y)
        })
        .collect()
}

fn median(ys: &mut [f64]) -> f64 {
    ys.sort_by(f64::total_cmp);
    let mid = ys.len() / 2;
    if ys.len() % 2 == 0 {
        (ys[mid - 1] + ys[mid]) / 2.0
    } else {
        ys[mid]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/relational.rs"]
mod tests;
