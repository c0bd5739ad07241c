use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use ::gif::{Encoder, Frame, Repeat};

use crate::{
    config::encoder::EncoderMode,
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{DatagifError, DatagifResult},
    render::FrameRGBA,
};

/// Incremental GIF writer over a buffered file.
///
/// The file is created in `begin` and closed when the sink is finished or dropped.
pub struct GifSink {
    path: PathBuf,
    cfg: Option<SinkConfig>,
    encoder: Option<Encoder<BufWriter<File>>>,
    next_idx: usize,
}

impl GifSink {
    /// Sink that writes to `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cfg: None,
            encoder: None,
            next_idx: 0,
        }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn gif_error(&self, e: impl std::fmt::Display) -> DatagifError {
        DatagifError::io_at("write gif", &self.path, e)
    }
}

fn dim_u16(v: u32, what: &str) -> DatagifResult<u16> {
    u16::try_from(v)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| DatagifError::configuration(format!("gif {what} must be in 1..=65535, got {v}")))
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> DatagifResult<()> {
        let width = dim_u16(cfg.width, "width")?;
        let height = dim_u16(cfg.height, "height")?;

        let file = File::create(&self.path).map_err(|e| DatagifError::io_at("create", &self.path, e))?;
        let mut encoder =
            Encoder::new(BufWriter::new(file), width, height, &[]).map_err(|e| self.gif_error(e))?;

        if cfg.settings.mode == EncoderMode::Animated {
            let repeat = match cfg.settings.loop_count {
                0 => Repeat::Infinite,
                n => Repeat::Finite(n),
            };
            encoder.set_repeat(repeat).map_err(|e| self.gif_error(e))?;
        }

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA) -> DatagifResult<()> {
        let Some(cfg) = &self.cfg else {
            return Err(DatagifError::render("gif sink: push_frame called before begin"));
        };
        if idx < self.next_idx {
            return Err(DatagifError::render(format!(
                "gif sink: frame {idx} pushed out of order"
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(DatagifError::render(format!(
                "gif sink: frame {idx} is {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let mut rgba = frame.data.clone();
        let mut gif_frame = Frame::from_rgba_speed(
            frame.width as u16,
            frame.height as u16,
            &mut rgba,
            cfg.settings.speed,
        );
        gif_frame.delay = cfg.settings.delay_centis(idx);

        let result = match self.encoder.as_mut() {
            Some(encoder) => encoder.write_frame(&gif_frame),
            None => return Err(DatagifError::render("gif sink already finished")),
        };
        result.map_err(|e| self.gif_error(e))?;
        self.next_idx = idx + 1;
        Ok(())
    }

    fn end(&mut self) -> DatagifResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(DatagifError::render("gif sink: end called before begin"));
        };
        let mut writer = encoder.into_inner().map_err(|e| self.gif_error(e))?;
        writer.flush().map_err(|e| self.gif_error(e))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
