//! Bivariate histogram and kernel density layers.

use kurbo::Rect;

use crate::{
    chart::{
        color::{Colormap, Rgb},
        contour::Field,
        figure::{ContourRing, Figure, Mark, Shape},
        kind::PlotLayer,
        style::StyleReader,
    },
    data::dataset::Dataset,
    foundation::error::{DatagifError, DatagifResult},
};

const MAX_AUTO_BINS: usize = 50;
/// Largest accepted `bins` per axis.
pub const MAX_BINS: usize = 1024;
/// Largest accepted number of contour `levels`.
pub const MAX_LEVELS: usize = 256;
const KDE_GRID: usize = 100;
const KDE_CUT: f64 = 3.0;
const DEFAULT_LEVELS: usize = 10;
const DEFAULT_THRESH: f64 = 0.05;
const DEFAULT_CONTOUR_WIDTH: f64 = 1.5;

/// Density value enclosing `1 - q` of the total mass when summing from the top.
///
/// Cells at or below the returned value hold at most a `q` share of the total.
pub fn quantile_to_level(values: &[f64], q: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(|a, b| b.total_cmp(a));
    let total: f64 = sorted.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let target = 1.0 - q;
    let mut acc = 0.0;
    for v in &sorted {
        acc += v;
        if acc / total >= target {
            return *v;
        }
    }
    sorted[sorted.len() - 1]
}

fn edges(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    };
    (0..=bins)
        .map(|i| lo + (hi - lo) * i as f64 / bins as f64)
        .collect()
}

fn bin_of(v: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let (lo, hi) = (edges[0], edges[bins]);
    (((v - lo) / (hi - lo) * bins as f64).floor() as usize).min(bins - 1)
}

fn extent(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
    )
}

/// Draw a bivariate histogram heatmap.
pub fn histplot(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    let palette = fig.theme.palette.clone();
    let mut style = StyleReader::new("histplot", &layer.style);
    let bins = style.count_at_most("bins", MAX_BINS)?;
    let pthresh = style.unit("pthresh")?;
    let cmap = style.colormap("cmap")?;
    let color = style.color(&["color"], &palette)?;
    let alpha = style.unit("alpha")?.unwrap_or(1.0);
    let zorder = style.f64("zorder")?;
    style.finish()?;

    let points = data.numeric_pairs(&layer.x, &layer.y)?;
    let cmap = match cmap {
        Some(cmap) => cmap,
        None => Colormap::light(color.unwrap_or_else(|| fig.next_color())),
    };
    if points.is_empty() {
        return Ok(());
    }

    let bins = bins.unwrap_or_else(|| MAX_AUTO_BINS.min((points.len() as f64).sqrt().ceil() as usize));
    let (x0, x1, y0, y1) = extent(&points);
    let xe = edges(x0, x1, bins);
    let ye = edges(y0, y1, bins);

    let n_cells = bins
        .checked_mul(bins)
        .ok_or_else(|| DatagifError::render(format!("histplot(): {bins}x{bins} bins overflow")))?;
    let mut counts = vec![0.0_f64; n_cells];
    for &(x, y) in &points {
        counts[bin_of(y, &ye) * bins + bin_of(x, &xe)] += 1.0;
    }
    let floor = pthresh.map_or(0.0, |q| quantile_to_level(&counts, q));
    let vmax = counts.iter().copied().fold(0.0, f64::max);

    let cells = counts
        .iter()
        .enumerate()
        .filter(|(_, c)| **c > floor)
        .map(|(idx, c)| {
            let (i, j) = (idx % bins, idx / bins);
            let rect = Rect::new(xe[i], ye[j], xe[i + 1], ye[j + 1]);
            (rect, cmap.sample(c / vmax))
        })
        .collect();

    let mut mark = Mark::new(Shape::Cells { cells });
    mark.alpha = alpha;
    if let Some(z) = zorder {
        mark.zorder = z;
    }
    fig.push(mark);
    Ok(())
}

/// Gaussian kernel density estimate on a regular grid.
struct Density {
    xs: Vec<f64>,
    ys: Vec<f64>,
    z: Vec<f64>,
}

impl Density {
    /// Scott's-rule bandwidth scaled by `bw_adjust`, full covariance; `None` when the sample
    /// is too small or degenerate.
    fn estimate(points: &[(f64, f64)], bw_adjust: f64) -> Option<Self> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let (mx, my) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
        let (mx, my) = (mx / nf, my / nf);
        let (mut vxx, mut vyy, mut vxy) = (0.0, 0.0, 0.0);
        for &(x, y) in points {
            vxx += (x - mx) * (x - mx);
            vyy += (y - my) * (y - my);
            vxy += (x - mx) * (y - my);
        }
        let factor = nf.powf(-1.0 / 6.0) * bw_adjust;
        let f2 = factor * factor / (nf - 1.0);
        let (sxx, syy, sxy) = (vxx * f2, vyy * f2, vxy * f2);
        let det = sxx * syy - sxy * sxy;
        if sxx <= 0.0 || syy <= 0.0 || det <= 1e-12 * sxx * syy {
            return None;
        }
        let (ixx, iyy, ixy) = (syy / det, sxx / det, -sxy / det);
        let norm = 1.0 / (2.0 * std::f64::consts::PI * det.sqrt() * nf);

        let (x0, x1, y0, y1) = extent(points);
        let (bx, by) = (sxx.sqrt() * KDE_CUT, syy.sqrt() * KDE_CUT);
        let axis = |lo: f64, hi: f64| -> Vec<f64> {
            (0..KDE_GRID)
                .map(|i| lo + (hi - lo) * i as f64 / (KDE_GRID - 1) as f64)
                .collect()
        };
        let xs = axis(x0 - bx, x1 + bx);
        let ys = axis(y0 - by, y1 + by);

        let mut z = Vec::with_capacity(KDE_GRID * KDE_GRID);
        for &gy in &ys {
            for &gx in &xs {
                let mut acc = 0.0;
                for &(x, y) in points {
                    let (dx, dy) = (gx - x, gy - y);
                    let q = dx * dx * ixx + 2.0 * dx * dy * ixy + dy * dy * iyy;
                    acc += (-0.5 * q).exp();
                }
                z.push(acc * norm);
            }
        }
        Some(Self { xs, ys, z })
    }

    fn domain(&self) -> Rect {
        Rect::new(
            self.xs[0],
            self.ys[0],
            self.xs[self.xs.len() - 1],
            self.ys[self.ys.len() - 1],
        )
    }
}

/// Draw bivariate density contours.
pub fn kdeplot(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    let palette = fig.theme.palette.clone();
    let mut style = StyleReader::new("kdeplot", &layer.style);
    let levels = style.count_at_most("levels", MAX_LEVELS)?.unwrap_or(DEFAULT_LEVELS);
    let thresh = style.unit("thresh")?.unwrap_or(DEFAULT_THRESH);
    let bw_adjust = match style.f64("bw_adjust")? {
        Some(b) if b <= 0.0 => {
            return Err(DatagifError::render(format!(
                "kdeplot(): 'bw_adjust' must be positive, got {b}"
            )));
        }
        other => other.unwrap_or(1.0),
    };
    let color = style.color(&["color"], &palette)?;
    let cmap = style.colormap("cmap")?;
    let width = style
        .f64_alias(&["linewidths"])?
        .unwrap_or(DEFAULT_CONTOUR_WIDTH);
    let fill = style.bool("fill")?.unwrap_or(false);
    let alpha = style.unit("alpha")?.unwrap_or(1.0);
    let zorder = style.f64("zorder")?;
    style.finish()?;

    let points = data.numeric_pairs(&layer.x, &layer.y)?;
    let base = color.unwrap_or_else(|| fig.next_color());
    let Some(density) = Density::estimate(&points, bw_adjust) else {
        tracing::warn!(
            rows = points.len(),
            x = %layer.x,
            y = %layer.y,
            "sample too small or degenerate for a density estimate; skipping kdeplot layer"
        );
        return Ok(());
    };

    let peak = density.z.iter().copied().fold(0.0, f64::max);
    let mut draw_levels: Vec<f64> = (0..levels)
        .map(|i| {
            let q = if levels == 1 {
                thresh
            } else {
                thresh + (1.0 - thresh) * i as f64 / (levels - 1) as f64
            };
            quantile_to_level(&density.z, q)
        })
        .filter(|l| *l > 0.0 && *l < peak)
        .collect();
    draw_levels.sort_by(f64::total_cmp);
    draw_levels.dedup();

    let shade = |idx: usize| -> Rgb {
        let t = if draw_levels.len() > 1 {
            idx as f64 / (draw_levels.len() - 1) as f64
        } else {
            1.0
        };
        match (&cmap, fill) {
            (Some(cmap), _) => cmap.sample(t),
            (None, true) => Colormap::light(base).sample(0.15 + 0.85 * t),
            (None, false) => base,
        }
    };

    let Some(field) = Field::new(&density.xs, &density.ys, &density.z) else {
        return Ok(());
    };
    let mut rings = Vec::new();
    for (idx, level) in draw_levels.iter().enumerate() {
        let color = shade(idx);
        for (points, closed) in field.iso_lines(*level) {
            rings.push(ContourRing {
                points,
                color,
                closed,
            });
        }
    }

    let mut mark = Mark::new(Shape::Contours {
        rings,
        fill,
        width,
        grid: density.domain(),
    });
    mark.alpha = alpha;
    if let Some(z) = zorder {
        mark.zorder = z;
    }
    fig.push(mark);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/chart/distribution.rs"]
mod tests;
