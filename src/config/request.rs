use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chart::kind::{PlotKind, PlotLayer};
use crate::config::args::{Bag, HookArgs, HookList, StyleArgs};
use crate::config::broadcast::{OneOrMany, resolve_layers};
use crate::foundation::error::{DatagifError, DatagifResult};
use crate::foundation::value::Value;

/// When figure hooks run relative to the plot layers of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    /// Customize the figure, then draw the layers.
    #[default]
    BeforeLayers,
    /// Draw the layers, then customize the figure.
    AfterLayers,
}

/// Everything needed to animate a dataset, except the dataset itself.
///
/// Deserializes from JSON; every field is optional and falls back to [`Default`]. The field
/// aliases accept request documents written against the Python `datagif` argument names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationRequest {
    /// Plot kind(s) layered onto every frame.
    pub plots: OneOrMany<PlotKind>,
    /// Existing directory receiving frames and the animation.
    pub save_dir: PathBuf,
    /// Base name of every output file.
    pub name: String,
    /// x column(s).
    pub x: OneOrMany<String>,
    /// y column(s).
    pub y: OneOrMany<String>,
    /// Time column.
    pub t: String,
    /// Hold the x range at the dataset-wide min/max.
    pub fix_x: bool,
    /// Hold the y range at the dataset-wide min/max.
    pub fix_y: bool,
    /// Keep the per-frame PNGs after assembling the animation.
    pub save_frames: bool,
    /// Figure customization hooks, applied to every frame in order.
    #[serde(alias = "plt_funcs")]
    pub figure_hooks: HookList,
    /// When `figure_hooks` run.
    pub hook_phase: HookPhase,
    /// Theme hooks, applied once before any frame is drawn.
    #[serde(alias = "seaborn_funcs")]
    pub style_setup_hooks: HookList,
    /// Style arguments, one bag or one per layer.
    #[serde(alias = "seaborn_args")]
    pub style_args: OneOrMany<StyleArgs>,
    /// Encoder options merged with defaults.
    #[serde(alias = "imageio_args")]
    pub encoder_config: Bag,
}

impl Default for AnimationRequest {
    fn default() -> Self {
        Self {
            plots: OneOrMany::One(PlotKind::Scatterplot),
            save_dir: PathBuf::from("."),
            name: "datagif".to_string(),
            x: OneOrMany::default(),
            y: OneOrMany::default(),
            t: String::new(),
            fix_x: false,
            fix_y: false,
            save_frames: false,
            figure_hooks: HookList::new(),
            hook_phase: HookPhase::BeforeLayers,
            style_setup_hooks: HookList::new(),
            style_args: OneOrMany::default(),
            encoder_config: Bag::new(),
        }
    }
}

impl AnimationRequest {
    /// Request with the required parameters set and everything else defaulted.
    pub fn new(
        plots: impl Into<OneOrMany<PlotKind>>,
        save_dir: impl Into<PathBuf>,
        name: impl Into<String>,
        x: impl Into<OneOrMany<String>>,
        y: impl Into<OneOrMany<String>>,
        t: impl Into<String>,
    ) -> Self {
        Self {
            plots: plots.into(),
            save_dir: save_dir.into(),
            name: name.into(),
            x: x.into(),
            y: y.into(),
            t: t.into(),
            ..Self::default()
        }
    }

    /// Set both axis-fixing flags.
    pub fn with_fixed_axes(mut self, fix_x: bool, fix_y: bool) -> Self {
        self.fix_x = fix_x;
        self.fix_y = fix_y;
        self
    }

    /// Keep or delete the per-frame PNGs.
    pub fn with_save_frames(mut self, save_frames: bool) -> Self {
        self.save_frames = save_frames;
        self
    }

    /// Append a figure hook.
    pub fn with_figure_hook(mut self, name: impl Into<String>, args: impl Into<HookArgs>) -> Self {
        self.figure_hooks.push(name, args);
        self
    }

    /// Append a theme hook.
    pub fn with_style_setup_hook(
        mut self,
        name: impl Into<String>,
        args: impl Into<HookArgs>,
    ) -> Self {
        self.style_setup_hooks.push(name, args);
        self
    }

    /// Replace the style arguments.
    pub fn with_style_args(mut self, style_args: impl Into<OneOrMany<StyleArgs>>) -> Self {
        self.style_args = style_args.into();
        self
    }

    /// Set one encoder option.
    pub fn with_encoder_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.encoder_config.insert(key.into(), value);
        self
    }

    /// Set when figure hooks run.
    pub fn with_hook_phase(mut self, phase: HookPhase) -> Self {
        self.hook_phase = phase;
        self
    }

    /// Load a request from a JSON file.
    pub fn from_json_path(path: &Path) -> DatagifResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| DatagifError::io_at("read request", path, e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| DatagifError::configuration(format!("parse request JSON: {e}")))
    }

    /// Resolve the plot layers drawn onto each frame.
    pub fn layers(&self) -> DatagifResult<Vec<PlotLayer>> {
        resolve_layers(&self.plots, &self.x, &self.y, &self.style_args)
    }

    /// `{save_dir}/{name}_{time}.png`
    pub fn frame_path(&self, time: &Value) -> PathBuf {
        self.save_dir
            .join(format!("{}_{}.png", self.name, time.file_label()))
    }

    /// `{save_dir}/{name}.gif`
    pub fn gif_path(&self) -> PathBuf {
        self.save_dir.join(format!("{}.gif", self.name))
    }

    /// Reject requests that cannot name their outputs.
    pub fn validate(&self) -> DatagifResult<()> {
        if self.name.is_empty() {
            return Err(DatagifError::configuration("output name must be non-empty"));
        }
        if self.name.contains(['/', '\\']) {
            return Err(DatagifError::configuration(format!(
                "output name '{}' must not contain path separators",
                self.name
            )));
        }
        if self.t.is_empty() {
            return Err(DatagifError::configuration("time column 't' must be set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/request.rs"]
mod tests;
