use core::f32::consts::PI;

use brandify::{WelcomeDocument, WelcomeProfile};

use super::{arc_shape, line_shape, translucent_white, ComposeContext, Compositor};
use crate::cover::draw_cover;
use crate::decor;
use crate::render_engine::ImageStatus;
use crate::render_ir::{
    ImageSlot, PathSegment, PointF, RectF, Rgba, Shape, TextAlign, TextCommand, TextStyle,
};

const CENTER: PointF = PointF::new(400.0, 520.0);
const GOLD: Rgba = Rgba::hex(0xfacc15);
const OLD_GOLD: Rgba = Rgba::hex(0xd4af37);
const BRIGHT_GOLD: Rgba = Rgba::hex(0xffd700);
const NAVY: Rgba = Rgba::hex(0x1e3a8a);
const SOFT_WHITE: Rgba = Rgba::hex(0xe5e5e5);

const RING_RADIUS: f32 = 160.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct CorporateCompositor;

#[derive(Clone, Copy, Debug, Default)]
pub struct CreativeCompositor;

#[derive(Clone, Copy, Debug, Default)]
pub struct ModernCompositor;

#[derive(Clone, Copy, Debug, Default)]
pub struct ElegantCompositor;

impl Compositor for CorporateCompositor {
    type Input = WelcomeDocument;

    fn name(&self) -> &'static str {
        "corporate"
    }

    fn compose(&self, doc: &WelcomeDocument, ctx: &mut ComposeContext<'_>) {
        decor::corporate_background(ctx.scene);
        decor::corporate_stars(ctx.scene, ctx.rng);
        draw_welcome_header(ctx);
        draw_ring_frame(ctx, &doc.profile);
        draw_badge_caption(ctx, &doc.profile);
        draw_website(ctx, &doc.website, Rgba::WHITE);
        let y = ctx.page_height() - 120.0;
        let right = ctx.page_width() - 60.0;
        ctx.scene.stroke(
            line_shape(PointF::new(60.0, y), PointF::new(right, y)),
            translucent_white(0.3),
            1.5,
        );
    }
}

impl Compositor for CreativeCompositor {
    type Input = WelcomeDocument;

    fn name(&self) -> &'static str {
        "creative"
    }

    fn compose(&self, doc: &WelcomeDocument, ctx: &mut ComposeContext<'_>) {
        decor::creative_background(ctx.scene);
        draw_welcome_header(ctx);
        draw_ring_frame(ctx, &doc.profile);
        draw_badge_caption(ctx, &doc.profile);
        draw_website(ctx, &doc.website, Rgba::WHITE);
    }
}

impl Compositor for ModernCompositor {
    type Input = WelcomeDocument;

    fn name(&self) -> &'static str {
        "modern"
    }

    fn compose(&self, doc: &WelcomeDocument, ctx: &mut ComposeContext<'_>) {
        decor::modern_background(ctx.scene, ctx.rng);
        draw_welcome_header(ctx);

        let frame = RectF::new(CENTER.x - 150.0, CENTER.y - 200.0 - 50.0, 300.0, 400.0);
        let clip = Shape::RoundedRect {
            rect: frame,
            radius: 20.0,
        };
        match ctx.photo_size(doc.profile.image.is_some()) {
            Some(size) => draw_cover(
                ctx.scene,
                ImageSlot::Photo,
                size,
                clip,
                frame,
                ctx.image_position,
            ),
            None => ctx.scene.fill(clip, Rgba::hex(0x404040)),
        }
        let arc_center = PointF::new(CENTER.x, frame.bottom());
        for (start, end) in [(1.1, 1.4), (1.6, 1.9)] {
            ctx.scene.stroke(
                arc_shape(arc_center, 100.0, PI * start, PI * end),
                BRIGHT_GOLD,
                2.0,
            );
        }

        let caption_y = CENTER.y + 180.0;
        centered(
            ctx,
            "WELCOME TO THE TEAM",
            caption_y,
            &TextStyle::sans(300, 24.0),
            SOFT_WHITE,
        );
        centered(
            ctx,
            &doc.profile.name.to_uppercase(),
            caption_y + 60.0,
            &TextStyle::sans(900, 64.0),
            Rgba::WHITE,
        );
        centered(
            ctx,
            &doc.profile.designation,
            caption_y + 110.0,
            &TextStyle::sans(400, 22.0),
            BRIGHT_GOLD,
        );
        draw_website(ctx, &doc.website, Rgba::hex(0xd1d5db));
    }
}

impl Compositor for ElegantCompositor {
    type Input = WelcomeDocument;

    fn name(&self) -> &'static str {
        "elegant"
    }

    fn compose(&self, doc: &WelcomeDocument, ctx: &mut ComposeContext<'_>) {
        decor::elegant_background(ctx.scene);
        draw_welcome_header(ctx);

        let frame = RectF::new(CENTER.x - 175.0, CENTER.y - 225.0 - 80.0, 350.0, 450.0);
        match ctx.photo_size(doc.profile.image.is_some()) {
            Some(size) => draw_cover(
                ctx.scene,
                ImageSlot::Photo,
                size,
                Shape::Rect(frame),
                frame,
                ctx.image_position,
            ),
            None => ctx.scene.fill(Shape::Rect(frame), Rgba::hex(0x333333)),
        }
        let border = RectF::new(
            frame.x - 10.0,
            frame.y - 10.0,
            frame.width + 20.0,
            frame.height + 20.0,
        );
        ctx.scene.stroke(Shape::Rect(border), OLD_GOLD, 2.0);
        let corners = [
            (PointF::new(border.x, border.y), 0.0),
            (PointF::new(border.right(), border.y), 90.0),
            (PointF::new(border.right(), border.bottom()), 180.0),
            (PointF::new(border.x, border.bottom()), 270.0),
        ];
        for (origin, degrees) in corners {
            ctx.scene
                .stroke(corner_flourish(origin, degrees), OLD_GOLD, 2.0);
        }

        let caption_y = CENTER.y + 250.0;
        centered(
            ctx,
            &doc.profile.name,
            caption_y,
            &TextStyle::serif(700, 64.0),
            Rgba::WHITE,
        );
        centered(
            ctx,
            &doc.profile.designation,
            caption_y + 55.0,
            &TextStyle::serif(400, 24.0),
            OLD_GOLD,
        );
        centered(
            ctx,
            "Welcome to the Team",
            CENTER.y - 220.0,
            &TextStyle::serif(300, 28.0).italic(),
            SOFT_WHITE.fade(0.8),
        );
        draw_website(ctx, &doc.website, Rgba::WHITE);
    }
}

fn centered(ctx: &mut ComposeContext<'_>, text: &str, y: f32, style: &TextStyle, color: Rgba) {
    ctx.text(TextCommand::new(CENTER.x, y, text, style, color).with_align(TextAlign::Center));
}

/// Logo at the top-left and the two-line "WELCOME / TO THE TEAM." heading.
fn draw_welcome_header(ctx: &mut ComposeContext<'_>) {
    if let ImageStatus::Loaded(info) = ctx.logo() {
        let width = 150.0;
        let aspect = info.width.max(1) as f32 / info.height.max(1) as f32;
        ctx.scene
            .image(ImageSlot::Logo, RectF::new(40.0, 40.0, width, width / aspect));
    }
    centered(
        ctx,
        "WELCOME",
        200.0,
        &TextStyle::sans(900, 64.0),
        Rgba::WHITE,
    );
    centered(
        ctx,
        "TO THE TEAM.",
        260.0,
        &TextStyle::sans(500, 42.0),
        Rgba::WHITE,
    );
}

/// White ring, side arcs, yellow backing disc, and the circular photo.
fn draw_ring_frame(ctx: &mut ComposeContext<'_>, profile: &WelcomeProfile) {
    ctx.scene.stroke(
        Shape::Circle {
            center: CENTER,
            radius: RING_RADIUS,
        },
        Rgba::WHITE,
        6.0,
    );
    for (start, end) in [(0.75, 1.25), (1.75, 0.25)] {
        ctx.scene.stroke(
            arc_shape(CENTER, RING_RADIUS + 20.0, PI * start, PI * end),
            translucent_white(0.9),
            4.0,
        );
    }
    ctx.scene.fill(
        Shape::Circle {
            center: CENTER,
            radius: RING_RADIUS - 3.0,
        },
        GOLD,
    );

    let photo_radius = RING_RADIUS - 4.0;
    match ctx.photo_size(profile.image.is_some()) {
        Some(size) => {
            let frame = RectF::new(
                CENTER.x - photo_radius,
                CENTER.y - photo_radius,
                photo_radius * 2.0,
                photo_radius * 2.0,
            );
            draw_cover(
                ctx.scene,
                ImageSlot::Photo,
                size,
                Shape::Circle {
                    center: CENTER,
                    radius: photo_radius,
                },
                frame,
                ctx.image_position,
            );
        }
        None => centered(
            ctx,
            "Upload an image",
            CENTER.y,
            &TextStyle::sans(400, 16.0),
            Rgba::BLACK.with_alpha(0.3),
        ),
    }
}

/// Uppercased name and the designation pill sized to its measured text.
fn draw_badge_caption(ctx: &mut ComposeContext<'_>, profile: &WelcomeProfile) {
    centered(
        ctx,
        &profile.name.to_uppercase(),
        CENTER.y + RING_RADIUS + 100.0,
        &TextStyle::sans(900, 60.0),
        GOLD,
    );

    let style = TextStyle::sans(700, 20.0);
    let designation = profile.designation.to_uppercase();
    let text_width = ctx.measure(&designation, &style);
    let pill_height = 36.0;
    let pill_y = CENTER.y + RING_RADIUS + 140.0;
    let pill = RectF::new(
        CENTER.x - text_width / 2.0 - 20.0,
        pill_y,
        text_width + 40.0,
        pill_height,
    );
    ctx.scene.fill(
        Shape::RoundedRect {
            rect: pill,
            radius: pill_height / 2.0,
        },
        Rgba::WHITE,
    );
    centered(ctx, &designation, pill_y + 24.0, &style, NAVY);
}

fn draw_website(ctx: &mut ComposeContext<'_>, website: &str, color: Rgba) {
    let y = ctx.page_height() - 60.0;
    centered(ctx, website, y, &TextStyle::sans(500, 20.0), color);
}

/// Two mirrored quadratic petals from `origin`, rotated by `degrees`.
fn corner_flourish(origin: PointF, degrees: f32) -> Shape {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let at = |x: f32, y: f32| PointF::new(origin.x + x * cos - y * sin, origin.y + x * sin + y * cos);
    Shape::Path(vec![
        PathSegment::MoveTo(origin),
        PathSegment::QuadTo {
            ctrl: at(10.0, 10.0),
            to: at(0.0, 20.0),
        },
        PathSegment::MoveTo(origin),
        PathSegment::QuadTo {
            ctrl: at(-10.0, 10.0),
            to: at(0.0, 20.0),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flourish_rotates_about_corner() {
        let Shape::Path(segments) = corner_flourish(PointF::new(585.0, 205.0), 90.0) else {
            panic!("expected path");
        };
        let PathSegment::QuadTo { to, .. } = segments[1] else {
            panic!("expected quad");
        };
        // (0, 20) rotated 90 degrees points left.
        assert!((to.x - 565.0).abs() < 1e-3);
        assert!((to.y - 205.0).abs() < 1e-3);
    }
}
