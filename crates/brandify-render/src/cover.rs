use brandify::ImagePosition;

use crate::render_ir::{ImageSlot, RectF, Scene, Shape};

/// Scale a `src_w x src_h` image to cover `frame`, centered, then shift by `offset`.
///
/// Zero-sized sources are treated as 1x1.
pub fn cover_rect(src_w: u32, src_h: u32, frame: RectF, offset: ImagePosition) -> RectF {
    let aspect = src_w.max(1) as f32 / src_h.max(1) as f32;
    let mut width = frame.width;
    let mut height = frame.height;
    if frame.height > 0.0 && frame.width / frame.height > aspect {
        height = frame.width / aspect;
    } else {
        width = frame.height * aspect;
    }
    RectF::new(
        frame.x - (width - frame.width) / 2.0 + offset.x,
        frame.y - (height - frame.height) / 2.0 + offset.y,
        width,
        height,
    )
}

/// Draw `slot` cover-fitted into `frame`, clipped to `clip`.
///
/// The caller checks image readiness first and draws a placeholder otherwise.
pub fn draw_cover(
    scene: &mut Scene,
    slot: ImageSlot,
    src_size: (u32, u32),
    clip: Shape,
    frame: RectF,
    offset: ImagePosition,
) {
    let dest = cover_rect(src_size.0, src_size.1, frame, offset);
    scene.scoped(clip, |scene| scene.image(slot, dest));
}
