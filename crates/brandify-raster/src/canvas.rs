use brandify_render::Rgba;
use tiny_skia::{Color, Pixmap, Transform};

use crate::error::RasterError;

/// Device surface for one rendered image.
///
/// Drawing happens in logical units; [`Canvas::transform`] maps them to
/// device pixels.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixmap: Pixmap,
    scale: f32,
}

impl Canvas {
    /// Allocate a cleared `width x height` device surface.
    pub fn new(width: u32, height: u32, scale: f32) -> Result<Self, RasterError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RasterError::CanvasAllocation { width, height })?;
        Ok(Self { pixmap, scale })
    }

    /// Resize to `width x height` (reallocating only when the size changes) and clear.
    pub fn reset(&mut self, width: u32, height: u32, scale: f32) -> Result<(), RasterError> {
        if self.pixmap.width() != width || self.pixmap.height() != height {
            self.pixmap = Pixmap::new(width, height)
                .ok_or(RasterError::CanvasAllocation { width, height })?;
        } else {
            self.pixmap.fill(Color::TRANSPARENT);
        }
        self.scale = scale;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Logical to device transform.
    pub fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixmap
            .fill(Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight (non-premultiplied) RGBA at a device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::rgba(
            color.red(),
            color.green(),
            color.blue(),
            color.alpha(),
        ))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap
            .encode_png()
            .map_err(|err| RasterError::PngEncode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_canvas_is_an_error() {
        let err = Canvas::new(0, 10, 1.0).expect_err("zero width");
        assert_eq!(err.code(), "CANVAS_ALLOC");
    }

    #[test]
    fn reset_resizes_and_clears() {
        let mut canvas = Canvas::new(4, 4, 1.0).expect("canvas");
        canvas.clear(Rgba::WHITE);
        canvas.reset(4, 4, 2.0).expect("same size");
        assert_eq!(canvas.pixel(1, 1).map(|c| c.a), Some(0));
        canvas.reset(8, 6, 2.0).expect("resize");
        assert_eq!((canvas.width(), canvas.height()), (8, 6));
        assert_eq!(canvas.scale(), 2.0);
    }

    #[test]
    fn png_has_signature() {
        let canvas = Canvas::new(2, 2, 1.0).expect("canvas");
        let png = canvas.encode_png().expect("png");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
