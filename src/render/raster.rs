use std::path::Path;

use kurbo::Rect;
use plotters::prelude::*;

use crate::{
    chart::figure::Figure,
    foundation::error::{DatagifError, DatagifResult},
    render::{FigureBackend, FrameRGBA, plot::draw_figure},
};

/// Built-in backend: figure → plotters bitmap → PNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterBackend;

impl RasterBackend {
    /// Create a backend.
    pub fn new() -> Self {
        Self
    }

    /// Rasterize `figure` at its pixel size.
    pub fn render_rgba(&self, figure: &Figure) -> DatagifResult<FrameRGBA> {
        self.render_with_plot_area(figure).map(|(frame, _)| frame)
    }

    pub(crate) fn render_with_plot_area(&self, figure: &Figure) -> DatagifResult<(FrameRGBA, Rect)> {
        let (width, height) = figure.pixel_size();
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| DatagifError::render(format!("{width}x{height} frame is too large")))?;
        let mut rgb = vec![0u8; len];
        let plot_area = {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            draw_figure(&root, figure)?
        };

        let mut data = Vec::with_capacity(len / 3 * 4);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok((
            FrameRGBA {
                width,
                height,
                data,
            },
            plot_area,
        ))
    }
}

impl FigureBackend for RasterBackend {
    fn save(&mut self, figure: &Figure, path: &Path) -> DatagifResult<()> {
        let frame = self.render_rgba(figure)?;
        write_png(path, &frame)
    }
}

/// Write `frame` as a PNG file.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> DatagifResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DatagifError::io_at("write png", path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
