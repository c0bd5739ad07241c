//! Figure rendering: plotters charts, font lookup and the raster backend.

pub(crate) mod fonts;
pub(crate) mod plot;
pub(crate) mod raster;

use std::path::Path;

use crate::{chart::figure::Figure, foundation::error::DatagifResult};

/// A rendered frame as straight-alpha RGBA8 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8 order.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Opaque frame filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: rgba.repeat(n),
        }
    }
}

/// Persists a finished figure to an image file.
///
/// The frame renderer hands every figure to exactly one `save` call and drops it afterwards.
pub trait FigureBackend {
    /// Write `figure` to `path`, replacing any existing file.
    fn save(&mut self, figure: &Figure, path: &Path) -> DatagifResult<()>;
}
