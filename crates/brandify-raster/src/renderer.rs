use core::f32::consts::PI;

use brandify_render::{
    DrawCommand, ImageCommand, Paint, PathSegment, PointF, RectF, Rgba, Scene, Shape, TextAlign,
    TextBaseline, TextCommand,
};
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, LinearGradient, Mask, Path, PathBuilder, PixmapPaint,
    Point, Rect, SpreadMode, Stroke, Transform,
};

use crate::canvas::Canvas;
use crate::error::RasterError;
use crate::font::MonoFontBackend;
use crate::images::ImageRegistry;

/// Circle approximation constant for cubic quarter arcs.
const KAPPA: f32 = 0.552_284_8;
/// Target device-pixel length of one flattened arc segment.
const ARC_SEGMENT_PX: f32 = 2.0;
const MIN_ARC_SEGMENTS: usize = 4;
const MAX_ARC_SEGMENTS: usize = 128;

/// Raster backend configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterConfig {
    /// Backdrop painted under the scene's own clear color.
    pub clear_color: Rgba,
    /// Anti-alias fills, strokes and clip edges.
    pub anti_alias: bool,
    /// Sampling used when scaling logo and photo pixels.
    pub image_quality: FilterQuality,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            clear_color: Rgba::WHITE,
            anti_alias: true,
            image_quality: FilterQuality::Bilinear,
        }
    }
}

/// Executes scene draw commands onto a tiny-skia canvas.
#[derive(Clone, Debug, Default)]
pub struct RasterRenderer {
    cfg: RasterConfig,
    fonts: MonoFontBackend,
}

/// Clip state for one `render_scene` call; dropped when the call returns.
struct ClipStack {
    current: Option<Mask>,
    saved: Vec<Option<Mask>>,
}

impl RasterRenderer {
    pub fn new(cfg: RasterConfig) -> Self {
        Self {
            cfg,
            fonts: MonoFontBackend,
        }
    }

    pub fn config(&self) -> RasterConfig {
        self.cfg
    }

    /// Resize `canvas` to the scene's device size and execute every command.
    pub fn render_scene(
        &self,
        scene: &Scene,
        images: &ImageRegistry,
        canvas: &mut Canvas,
    ) -> Result<(), RasterError> {
        canvas.reset(scene.device_width(), scene.device_height(), scene.scale)?;
        let mut clips = ClipStack {
            current: None,
            saved: Vec::new(),
        };
        for cmd in &scene.commands {
            self.execute(cmd, images, canvas, &mut clips)?;
        }
        if !clips.saved.is_empty() {
            log::warn!("scene left {} unrestored save(s)", clips.saved.len());
        }
        Ok(())
    }

    fn execute(
        &self,
        cmd: &DrawCommand,
        images: &ImageRegistry,
        canvas: &mut Canvas,
        clips: &mut ClipStack,
    ) -> Result<(), RasterError> {
        match cmd {
            DrawCommand::Clear(color) => self.clear(canvas, *color),
            DrawCommand::Fill { shape, paint } => {
                let Some(path) = build_path(shape, canvas.scale()) else {
                    return Ok(());
                };
                let Some(paint) = self.skia_paint(paint) else {
                    return Ok(());
                };
                let transform = canvas.transform();
                canvas.pixmap_mut().fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    transform,
                    clips.current.as_ref(),
                );
            }
            DrawCommand::Stroke {
                shape,
                color,
                width,
            } => {
                let Some(path) = build_path(shape, canvas.scale()) else {
                    return Ok(());
                };
                let Some(paint) = self.skia_paint(&Paint::Solid(*color)) else {
                    return Ok(());
                };
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                let transform = canvas.transform();
                canvas.pixmap_mut().stroke_path(
                    &path,
                    &paint,
                    &stroke,
                    transform,
                    clips.current.as_ref(),
                );
            }
            DrawCommand::Text(text) => self.draw_text(text, canvas, clips.current.as_ref()),
            DrawCommand::Image(image) => {
                self.draw_image(image, images, canvas, clips.current.as_ref())
            }
            DrawCommand::Save => clips.saved.push(clips.current.clone()),
            DrawCommand::Restore => match clips.saved.pop() {
                Some(previous) => clips.current = previous,
                None => log::warn!("restore without matching save ignored"),
            },
            DrawCommand::Clip(shape) => {
                clips.current = Some(self.clip_mask(shape, canvas, clips.current.take())?);
            }
        }
        Ok(())
    }

    fn clear(&self, canvas: &mut Canvas, color: Rgba) {
        canvas.clear(self.cfg.clear_color);
        if color.a == 0 {
            return;
        }
        let Some(rect) = Rect::from_xywh(0.0, 0.0, canvas.width() as f32, canvas.height() as f32)
        else {
            return;
        };
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        canvas
            .pixmap_mut()
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Intersect `current` with `shape`; a degenerate shape clips everything.
    fn clip_mask(
        &self,
        shape: &Shape,
        canvas: &Canvas,
        current: Option<Mask>,
    ) -> Result<Mask, RasterError> {
        let (width, height) = (canvas.width(), canvas.height());
        let path = build_path(shape, canvas.scale());
        match (current, path) {
            (Some(mut mask), Some(path)) => {
                mask.intersect_path(
                    &path,
                    FillRule::Winding,
                    self.cfg.anti_alias,
                    canvas.transform(),
                );
                Ok(mask)
            }
            (None, Some(path)) => {
                let mut mask =
                    Mask::new(width, height).ok_or(RasterError::CanvasAllocation { width, height })?;
                mask.fill_path(
                    &path,
                    FillRule::Winding,
                    self.cfg.anti_alias,
                    canvas.transform(),
                );
                Ok(mask)
            }
            (_, None) => {
                Mask::new(width, height).ok_or(RasterError::CanvasAllocation { width, height })
            }
        }
    }

    fn skia_paint(&self, paint: &Paint) -> Option<tiny_skia::Paint<'static>> {
        let mut out = tiny_skia::Paint {
            anti_alias: self.cfg.anti_alias,
            ..tiny_skia::Paint::default()
        };
        match paint {
            Paint::Solid(color) => out.set_color_rgba8(color.r, color.g, color.b, color.a),
            Paint::LinearGradient { start, end, stops } => {
                let first = stops.first()?;
                let skia_stops = stops
                    .iter()
                    .map(|stop| {
                        tiny_skia::GradientStop::new(stop.offset, skia_color(stop.color))
                    })
                    .collect();
                match LinearGradient::new(
                    Point::from_xy(start.x, start.y),
                    Point::from_xy(end.x, end.y),
                    skia_stops,
                    SpreadMode::Pad,
                    Transform::identity(),
                ) {
                    Some(shader) => out.shader = shader,
                    None => {
                        let color = first.color;
                        out.set_color_rgba8(color.r, color.g, color.b, color.a);
                    }
                }
            }
        }
        Some(out)
    }

    fn draw_text(&self, text: &TextCommand, canvas: &mut Canvas, clip: Option<&Mask>) {
        let color = ColorU8::from_rgba(text.color.r, text.color.g, text.color.b, text.color.a);
        let Some(run) = self.fonts.rasterize(&text.text, &text.style, color) else {
            return;
        };
        let selection = run.selection;
        let width = run.pixmap.width() as f32 * selection.scale;
        let left = match text.align {
            TextAlign::Left => text.x,
            TextAlign::Center => text.x - width / 2.0,
            TextAlign::Right => text.x - width,
        };
        let top = match text.baseline {
            TextBaseline::Top => text.y,
            TextBaseline::Middle => text.y - selection.height() / 2.0,
            TextBaseline::Alphabetic => text.y - selection.ascent(),
        };
        let transform = canvas
            .transform()
            .pre_translate(left, top)
            .pre_scale(selection.scale, selection.scale);
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        canvas
            .pixmap_mut()
            .draw_pixmap(0, 0, run.pixmap.as_ref(), &paint, transform, clip);
    }

    fn draw_image(
        &self,
        image: &ImageCommand,
        images: &ImageRegistry,
        canvas: &mut Canvas,
        clip: Option<&Mask>,
    ) {
        let Some(pixmap) = images.pixmap(image.slot) else {
            log::debug!("skipping {:?} image: no pixels registered", image.slot);
            return;
        };
        let dest = image.dest;
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let transform = canvas
            .transform()
            .pre_translate(dest.x, dest.y)
            .pre_scale(
                dest.width / pixmap.width() as f32,
                dest.height / pixmap.height() as f32,
            );
        let paint = PixmapPaint {
            quality: self.cfg.image_quality,
            ..PixmapPaint::default()
        };
        canvas
            .pixmap_mut()
            .draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, clip);
    }
}

fn skia_color(color: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Build a device-independent path for `shape`; `scale` only tunes arc flattening.
fn build_path(shape: &Shape, scale: f32) -> Option<Path> {
    match shape {
        Shape::Rect(rect) => Some(PathBuilder::from_rect(skia_rect(*rect)?)),
        Shape::RoundedRect { rect, radius } => rounded_rect_path(*rect, *radius),
        Shape::Circle { center, radius } => PathBuilder::from_circle(center.x, center.y, *radius),
        Shape::Path(segments) => segments_path(segments, scale),
    }
}

fn skia_rect(rect: RectF) -> Option<Rect> {
    Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

fn rounded_rect_path(rect: RectF, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(skia_rect(rect)?));
    }
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

fn segments_path(segments: &[PathSegment], scale: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    let mut has_point = false;
    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                pb.move_to(p.x, p.y);
                has_point = true;
            }
            PathSegment::LineTo(p) => {
                pb.line_to(p.x, p.y);
                has_point = true;
            }
            PathSegment::QuadTo { ctrl, to } => {
                pb.quad_to(ctrl.x, ctrl.y, to.x, to.y);
                has_point = true;
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
                has_point = true;
            }
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let points = flatten_arc(center, radius, start_angle, end_angle, scale);
                for (index, p) in points.iter().enumerate() {
                    if index == 0 && !has_point {
                        pb.move_to(p.x, p.y);
                    } else {
                        pb.line_to(p.x, p.y);
                    }
                }
                has_point = has_point || !points.is_empty();
            }
            PathSegment::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Points along a clockwise (y-down) arc from `start` to `end`, endpoints included.
///
/// An end angle below the start wraps forward by a full turn.
pub(crate) fn flatten_arc(
    center: PointF,
    radius: f32,
    start: f32,
    end: f32,
    scale: f32,
) -> Vec<PointF> {
    if radius.is_nan() || radius <= 0.0 || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let mut sweep = end - start;
    if sweep < 0.0 {
        sweep = sweep.rem_euclid(2.0 * PI);
    }
    let sweep = sweep.min(2.0 * PI);
    let arc_px = sweep * radius * scale.max(1.0);
    let steps = ((arc_px / ARC_SEGMENT_PX).ceil() as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS);
    (0..=steps)
        .map(|i| {
            let angle = start + sweep * i as f32 / steps as f32;
            PointF::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: PointF, b: PointF) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn arc_wraps_when_end_precedes_start() {
        let center = PointF::new(0.0, 0.0);
        let points = flatten_arc(center, 10.0, 1.75 * PI, 0.25 * PI, 1.0);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!(close(first, PointF::new(10.0 * (1.75 * PI).cos(), 10.0 * (1.75 * PI).sin())));
        assert!(close(last, PointF::new(10.0 * (0.25 * PI).cos(), 10.0 * (0.25 * PI).sin())));
        // The short way through angle zero, not the long way round.
        let mid = points[points.len() / 2];
        assert!(mid.x > 9.9);
    }

    #[test]
    fn degenerate_arcs_are_empty() {
        assert!(flatten_arc(PointF::new(0.0, 0.0), 0.0, 0.0, PI, 1.0).is_empty());
        assert!(flatten_arc(PointF::new(0.0, 0.0), 5.0, f32::NAN, PI, 1.0).is_empty());
    }

    #[test]
    fn clip_restore_limits_fill_region() {
        let mut scene = Scene::new(10, 10, 1.0, Rgba::rgba(0, 0, 0, 0));
        scene.scoped(Shape::Rect(RectF::new(0.0, 0.0, 5.0, 10.0)), |scene| {
            scene.fill(Shape::Rect(scene.bounds()), Rgba::BLACK);
        });
        let mut canvas = Canvas::new(1, 1, 1.0).expect("canvas");
        RasterRenderer::default()
            .render_scene(&scene, &ImageRegistry::new(), &mut canvas)
            .expect("render");
        assert_eq!(canvas.pixel(2, 5), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(8, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut scene = Scene::new(4, 4, 1.0, Rgba::BLACK);
        scene.push(DrawCommand::Restore);
        scene.fill(Shape::Rect(RectF::new(0.0, 0.0, 4.0, 4.0)), Rgba::WHITE);
        let mut canvas = Canvas::new(4, 4, 1.0).expect("canvas");
        RasterRenderer::default()
            .render_scene(&scene, &ImageRegistry::new(), &mut canvas)
            .expect("render");
        assert_eq!(canvas.pixel(1, 1), Some(Rgba::WHITE));
    }

    #[test]
    fn rounded_rect_clamps_radius() {
        let path = rounded_rect_path(RectF::new(0.0, 0.0, 20.0, 10.0), 50.0).expect("path");
        let bounds = path.bounds();
        assert!((bounds.width() - 20.0).abs() < 1e-3);
        assert!((bounds.height() - 10.0).abs() < 1e-3);
    }
}
