//! datagif turns a table with a time column into an animated GIF.
//!
//! Rows are grouped by time value; each group is drawn as one frame (one or more layered
//! statistical plots, optional figure hooks, optionally fixed axes), and the frames are encoded
//! in ascending time order:
//!
//! - Load a [`Dataset`] (CSV or JSON records)
//! - Describe the animation with an [`AnimationRequest`]
//! - Call [`build_gif`], or [`build_animation`] with your own [`FigureBackend`]
#![forbid(unsafe_code)]

mod chart;
mod config;
mod data;
mod foundation;

pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod render;

pub use crate::foundation::error::{DatagifError, DatagifResult};
pub use crate::foundation::value::Value;

pub use crate::chart::figure::{Figure, Mark, Shape};
pub use crate::chart::kind::{PlotKind, PlotLayer};
pub use crate::chart::theme::Theme;
pub use crate::config::args::{Bag, Hook, HookArgs, HookList, StyleArgs};
pub use crate::config::broadcast::OneOrMany;
pub use crate::config::encoder::{EncoderMode, EncoderSettings, FrameDuration};
pub use crate::config::request::{AnimationRequest, HookPhase};
pub use crate::data::bounds::{Bounds, global_bounds};
pub use crate::data::dataset::{Column, Dataset};
pub use crate::data::partition::{TimeSlice, distinct_times, partition};
pub use crate::encode::assemble::{assemble, assemble_into, cleanup_frames};
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::pipeline::{
    AnimationReport, AxisPolicy, build_animation, build_gif, lineplot_gif, relplot_gif,
    render_frame, scatterplot_gif,
};
pub use crate::render::raster::{RasterBackend, write_png};
pub use crate::render::plot::draw_figure;
pub use crate::render::{FigureBackend, FrameRGBA};
