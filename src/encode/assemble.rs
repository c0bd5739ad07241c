use std::path::{Path, PathBuf};

use image::imageops::FilterType;

use crate::{
    config::{args::Bag, encoder::EncoderSettings},
    encode::{
        gif::GifSink,
        sink::{FrameSink, SinkConfig},
    },
    foundation::error::{DatagifError, DatagifResult},
    render::FrameRGBA,
};

/// Encode `frame_paths` (already in time order) into an animation at `output_path`.
///
/// `encoder_options` are merged with the defaults before parsing. Unless `retain_frames` is set,
/// every frame file is deleted once the animation is finalized.
#[tracing::instrument(skip(frame_paths, encoder_options), fields(frames = frame_paths.len()))]
pub fn assemble(
    frame_paths: &[PathBuf],
    output_path: &Path,
    encoder_options: &Bag,
    retain_frames: bool,
) -> DatagifResult<()> {
    let settings = EncoderSettings::from_options(encoder_options)?;
    let mut sink = GifSink::new(output_path);
    assemble_into(frame_paths, &mut sink, &settings)?;
    tracing::info!(path = %output_path.display(), frames = frame_paths.len(), "wrote animation");

    if !retain_frames {
        cleanup_frames(frame_paths)?;
    }
    Ok(())
}

/// Decode each frame file and push it into `sink`, then finish the sink.
///
/// Frames whose size differs from the first are resized to match it. On error the sink is left
/// unfinished; dropping it releases whatever it holds.
pub fn assemble_into(
    frame_paths: &[PathBuf],
    sink: &mut dyn FrameSink,
    settings: &EncoderSettings,
) -> DatagifResult<()> {
    let Some((first_path, rest)) = frame_paths.split_first() else {
        return Err(DatagifError::configuration("no frames to assemble"));
    };
    settings.check_frame_count(frame_paths.len())?;

    let first = load_frame(first_path, None)?;
    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        frame_count: frame_paths.len(),
        settings: settings.clone(),
    })?;
    let size = (first.width, first.height);
    sink.push_frame(0, &first)?;
    for (i, path) in rest.iter().enumerate() {
        let frame = load_frame(path, Some(size))?;
        sink.push_frame(i + 1, &frame)?;
    }
    sink.end()
}

/// Read a frame image as RGBA8, resizing it to `size` when given and different.
pub fn load_frame(path: &Path, size: Option<(u32, u32)>) -> DatagifResult<FrameRGBA> {
    let mut img = image::open(path)
        .map_err(|e| DatagifError::io_at("read frame", path, e))?
        .to_rgba8();
    if let Some((w, h)) = size
        && img.dimensions() != (w, h)
    {
        tracing::debug!(path = %path.display(), from = ?img.dimensions(), to = ?(w, h), "resizing frame");
        img = image::imageops::resize(&img, w, h, FilterType::Triangle);
    }
    let (width, height) = img.dimensions();
    Ok(FrameRGBA {
        width,
        height,
        data: img.into_raw(),
    })
}

/// Delete every frame file.
///
/// All files are attempted even after a failure; the first failure is returned.
pub fn cleanup_frames(frame_paths: &[PathBuf]) -> DatagifResult<()> {
    let mut first_err = None;
    for path in frame_paths {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to delete frame");
            first_err.get_or_insert_with(|| DatagifError::io_at("delete frame", path, e));
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/assemble.rs"]
mod tests;
