use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{
    chart::{self, figure::Figure, kind::PlotKind, kind::PlotLayer, theme::Theme},
    config::{
        args::HookList,
        broadcast::OneOrMany,
        encoder::EncoderSettings,
        request::{AnimationRequest, HookPhase},
    },
    data::{
        bounds::{Bounds, global_bounds},
        dataset::Dataset,
        partition::{TimeSlice, partition},
    },
    encode::assemble::assemble,
    foundation::{
        error::{DatagifError, DatagifResult},
        value::Value,
    },
    render::{FigureBackend, raster::RasterBackend},
};

/// Axis ranges forced onto every frame; `None` leaves that axis to autoscaling and hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisPolicy {
    /// Fixed x range.
    pub x: Option<Bounds>,
    /// Fixed y range.
    pub y: Option<Bounds>,
}

impl AxisPolicy {
    /// Global bounds of the layers' x and/or y columns over the whole dataset.
    ///
    /// Several distinct columns on one axis share one combined range.
    pub fn fixed(data: &Dataset, layers: &[PlotLayer], fix_x: bool, fix_y: bool) -> DatagifResult<Self> {
        let x = if fix_x {
            Some(global_bounds(data, layers.iter().map(|l| l.x.as_str()))?)
        } else {
            None
        };
        let y = if fix_y {
            Some(global_bounds(data, layers.iter().map(|l| l.y.as_str()))?)
        } else {
            None
        };
        Ok(Self { x, y })
    }
}

/// Everything a finished build produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationReport {
    /// The written animation.
    pub gif_path: PathBuf,
    /// Number of frames (distinct time values).
    pub frame_count: usize,
    /// Frame files left on disk; empty unless frames were retained.
    pub retained_frames: Vec<PathBuf>,
}

/// Draw one time slice onto a fresh figure and persist it to `path`.
///
/// Hooks run before or after the layers according to `phase`; fixed axes are applied last and
/// win over any limits the hooks set.
#[allow(clippy::too_many_arguments)]
pub fn render_frame(
    slice: &TimeSlice,
    layers: &[PlotLayer],
    hooks: &HookList,
    phase: HookPhase,
    axes: AxisPolicy,
    theme: &Theme,
    path: &Path,
    backend: &mut dyn FigureBackend,
) -> DatagifResult<PathBuf> {
    let mut fig = Figure::new(theme.clone());

    if phase == HookPhase::BeforeLayers {
        fig.apply_hooks(hooks)?;
    }
    for layer in layers {
        chart::draw_layer(&mut fig, &slice.rows, layer)?;
    }
    if phase == HookPhase::AfterLayers {
        fig.apply_hooks(hooks)?;
    }

    if let Some(b) = axes.x {
        fig.set_xlim(b.min, b.max);
    }
    if let Some(b) = axes.y {
        fig.set_ylim(b.min, b.max);
    }

    backend.save(&fig, path)?;
    Ok(path.to_path_buf())
}

/// Render one frame per distinct time value and assemble them into `{save_dir}/{name}.gif`.
///
/// Every input is validated before the first file is written. A failure while rendering or
/// assembling leaves already-written frames on disk.
#[tracing::instrument(skip_all, fields(name = %request.name, t = %request.t))]
pub fn build_animation(
    data: &Dataset,
    request: &AnimationRequest,
    backend: &mut dyn FigureBackend,
) -> DatagifResult<AnimationReport> {
    request.validate()?;
    let layers = request.layers()?;

    let mut columns: Vec<&str> = vec![request.t.as_str()];
    for layer in &layers {
        columns.extend([layer.x.as_str(), layer.y.as_str()]);
        columns.extend(chart::hue_column(layer));
    }
    data.require_columns(columns)?;

    let settings = EncoderSettings::from_options(&request.encoder_config)?;
    let theme = Theme::from_hooks(&request.style_setup_hooks)?;
    ensure_dir(&request.save_dir)?;

    let slices = partition(data, &request.t)?;
    if slices.is_empty() {
        return Err(DatagifError::schema(format!(
            "time column '{}' has no non-null values",
            request.t
        )));
    }
    let covered: usize = slices.iter().map(|s| s.rows.n_rows()).sum();
    if covered < data.n_rows() {
        tracing::warn!(
            skipped = data.n_rows() - covered,
            "rows with a null time value belong to no frame"
        );
    }
    settings.check_frame_count(slices.len())?;
    let axes = AxisPolicy::fixed(data, &layers, request.fix_x, request.fix_y)?;
    let planned = plan_frame_paths(request, &slices)?;

    let mut frame_paths = Vec::with_capacity(slices.len());
    for (slice, path) in slices.iter().zip(&planned) {
        tracing::debug!(time = %slice.time, rows = slice.rows.n_rows(), path = %path.display(), "rendering frame");
        frame_paths.push(render_frame(
            slice,
            &layers,
            &request.figure_hooks,
            request.hook_phase,
            axes,
            &theme,
            path,
            backend,
        )?);
    }

    let gif_path = request.gif_path();
    assemble(&frame_paths, &gif_path, &request.encoder_config, request.save_frames)?;

    Ok(AnimationReport {
        gif_path,
        frame_count: frame_paths.len(),
        retained_frames: if request.save_frames {
            frame_paths
        } else {
            Vec::new()
        },
    })
}

/// [`build_animation`] with the built-in raster backend.
pub fn build_gif(data: &Dataset, request: &AnimationRequest) -> DatagifResult<AnimationReport> {
    let mut backend = RasterBackend::new();
    build_animation(data, request, &mut backend)
}

/// Animate a single `relplot` layer; `request.plots` is ignored.
pub fn relplot_gif(data: &Dataset, request: AnimationRequest) -> DatagifResult<AnimationReport> {
    single_kind_gif(PlotKind::Relplot, data, request)
}

/// Animate a single `scatterplot` layer; `request.plots` is ignored.
pub fn scatterplot_gif(data: &Dataset, request: AnimationRequest) -> DatagifResult<AnimationReport> {
    single_kind_gif(PlotKind::Scatterplot, data, request)
}

/// Animate a single `lineplot` layer; `request.plots` is ignored.
pub fn lineplot_gif(data: &Dataset, request: AnimationRequest) -> DatagifResult<AnimationReport> {
    single_kind_gif(PlotKind::Lineplot, data, request)
}

fn single_kind_gif(
    kind: PlotKind,
    data: &Dataset,
    mut request: AnimationRequest,
) -> DatagifResult<AnimationReport> {
    request.plots = OneOrMany::One(kind);
    build_gif(data, &request)
}

/// One frame path per slice; distinct times whose labels collide are rejected.
fn plan_frame_paths(request: &AnimationRequest, slices: &[TimeSlice]) -> DatagifResult<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Value> = HashMap::with_capacity(slices.len());
    let mut paths = Vec::with_capacity(slices.len());
    for slice in slices {
        let path = request.frame_path(&slice.time);
        if let Some(prev) = seen.insert(path.clone(), &slice.time) {
            return Err(DatagifError::configuration(format!(
                "time values {prev:?} and {:?} both map to frame file '{}'",
                slice.time,
                path.display()
            )));
        }
        paths.push(path);
    }
    Ok(paths)
}

fn ensure_dir(dir: &Path) -> DatagifResult<()> {
    let meta = std::fs::metadata(dir).map_err(|e| DatagifError::io_at("open save_dir", dir, e))?;
    if !meta.is_dir() {
        return Err(DatagifError::io(format!(
            "save_dir '{}' is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
