//! Background and decoration painters.
//!
//! Each painter is a pure function of the scene size and, where the design
//! calls for scatter, an injected RNG.

use core::f32::consts::PI;

use brandify::JobBackground;
use rand::{Rng, RngCore};

use crate::render_ir::{Paint, PathSegment, PointF, RectF, Rgba, Scene, Shape};

pub const STAR_COUNT: usize = 150;
pub const SPECKLE_COUNT: usize = 150;
/// Stars stay within the top `1 / 2.5` of the page.
pub const STAR_BAND_FRACTION: f32 = 1.0 / 2.5;

fn page(scene: &Scene) -> (f32, f32) {
    (scene.width as f32, scene.height as f32)
}

fn full_rect(scene: &Scene) -> Shape {
    Shape::Rect(scene.bounds())
}

/// Closed circle sub-path usable inside a larger path.
pub fn circle_subpath(center: PointF, radius: f32, out: &mut Vec<PathSegment>) {
    out.push(PathSegment::MoveTo(PointF::new(center.x + radius, center.y)));
    out.push(PathSegment::Arc {
        center,
        radius,
        start_angle: 0.0,
        end_angle: 2.0 * PI,
    });
    out.push(PathSegment::Close);
}

/// Grid of dots starting at the origin, one path for the whole grid.
pub fn dot_grid(scene: &mut Scene, spacing: f32, radius: f32, color: Rgba) {
    let (width, height) = page(scene);
    if spacing <= 0.0 {
        return;
    }
    let mut segments = Vec::new();
    let mut x = 0.0;
    while x < width {
        let mut y = 0.0;
        while y < height {
            circle_subpath(PointF::new(x, y), radius, &mut segments);
            y += spacing;
        }
        x += spacing;
    }
    scene.fill(Shape::Path(segments), color);
}

/// Light diagonal gradient behind hiring posts, dotted on request.
pub fn job_background(scene: &mut Scene, background: JobBackground) {
    let (width, height) = page(scene);
    scene.fill(
        full_rect(scene),
        Paint::linear(
            PointF::new(0.0, 0.0),
            PointF::new(width, height),
            Rgba::hex(0xebebeb),
            Rgba::hex(0xf5f5f5),
        ),
    );
    if background == JobBackground::Dotted {
        dot_grid(scene, 10.0, 2.0, Rgba::BLACK.with_alpha(0.05));
    }
}

/// Purple-to-navy gradient with faint diagonal hatching.
pub fn corporate_background(scene: &mut Scene) {
    let (width, height) = page(scene);
    scene.fill(
        full_rect(scene),
        Paint::linear(
            PointF::new(0.0, 0.0),
            PointF::new(width, height),
            Rgba::hex(0x701a75),
            Rgba::hex(0x172554),
        ),
    );
    let mut segments = Vec::new();
    let mut x = -width;
    while x < width * 1.5 {
        segments.push(PathSegment::MoveTo(PointF::new(x, 0.0)));
        segments.push(PathSegment::LineTo(PointF::new(x + 400.0, height)));
        x += 30.0;
    }
    scene.stroke(Shape::Path(segments), Rgba::WHITE.with_alpha(0.05), 0.7);
}

/// Five-point star outline; vertices alternate between `radius` and `radius / 2`.
pub fn star_path(center: PointF, radius: f32, points: usize) -> Vec<PathSegment> {
    let inner = radius / 2.0;
    let mut segments = Vec::with_capacity(points * 2 + 1);
    for j in 0..points * 2 {
        let angle = PI / points as f32 * j as f32;
        let r = if j % 2 == 0 { radius } else { inner };
        let p = PointF::new(center.x + r * angle.sin(), center.y + r * angle.cos());
        segments.push(if j == 0 {
            PathSegment::MoveTo(p)
        } else {
            PathSegment::LineTo(p)
        });
    }
    segments.push(PathSegment::Close);
    segments
}

/// Gold stars scattered across the upper band of the page.
pub fn corporate_stars(scene: &mut Scene, rng: &mut dyn RngCore) {
    let (width, height) = page(scene);
    let band = height * STAR_BAND_FRACTION;
    let gold = Rgba::hex(0xfacc15);
    for _ in 0..STAR_COUNT {
        let center = PointF::new(rng.gen::<f32>() * width, rng.gen::<f32>() * band);
        let radius = rng.gen::<f32>() * 2.5 + 1.0;
        scene.fill(Shape::Path(star_path(center, radius, 5)), gold);
    }
}

/// Teal-to-indigo gradient with two translucent side blobs.
pub fn creative_background(scene: &mut Scene) {
    let (width, height) = page(scene);
    scene.fill(
        full_rect(scene),
        Paint::linear(
            PointF::new(0.0, height),
            PointF::new(width, 0.0),
            Rgba::hex(0x0d9488),
            Rgba::hex(0x312e81),
        ),
    );
    let blob = Rgba::WHITE.with_alpha(0.08);
    scene.fill(
        Shape::Path(vec![
            PathSegment::MoveTo(PointF::new(0.0, 200.0)),
            PathSegment::CubicTo {
                ctrl1: PointF::new(150.0, 50.0),
                ctrl2: PointF::new(350.0, 450.0),
                to: PointF::new(0.0, height),
            },
            PathSegment::Close,
        ]),
        blob,
    );
    scene.fill(
        Shape::Path(vec![
            PathSegment::MoveTo(PointF::new(width, 100.0)),
            PathSegment::CubicTo {
                ctrl1: PointF::new(width - 300.0, 300.0),
                ctrl2: PointF::new(width, 500.0),
                to: PointF::new(width, height),
            },
            PathSegment::Close,
        ]),
        blob,
    );
}

/// Dark gray field with faint gold speckles.
pub fn modern_background(scene: &mut Scene, rng: &mut dyn RngCore) {
    let (width, height) = page(scene);
    scene.fill(full_rect(scene), Rgba::hex(0x262626));
    let speck = Rgba::rgb(255, 215, 0).with_alpha(0.5);
    for _ in 0..SPECKLE_COUNT {
        let center = PointF::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
        let radius = rng.gen::<f32>() * 0.8;
        scene.fill(Shape::Circle { center, radius }, speck);
    }
}

/// Charcoal field with a sparse 2x2 checker texture.
pub fn elegant_background(scene: &mut Scene) {
    scene.fill(full_rect(scene), Rgba::hex(0x1c1c1c));
    let mut segments = Vec::new();
    for i in (0..scene.width).step_by(4) {
        for j in (0..scene.height).step_by(4) {
            if (i + j) % 8 == 0 {
                push_rect(&mut segments, RectF::new(i as f32, j as f32, 2.0, 2.0));
            }
        }
    }
    scene.fill(Shape::Path(segments), Rgba::WHITE.with_alpha(0.02));
}

fn push_rect(out: &mut Vec<PathSegment>, rect: RectF) {
    out.push(PathSegment::MoveTo(PointF::new(rect.x, rect.y)));
    out.push(PathSegment::LineTo(PointF::new(rect.right(), rect.y)));
    out.push(PathSegment::LineTo(PointF::new(rect.right(), rect.bottom())));
    out.push(PathSegment::LineTo(PointF::new(rect.x, rect.bottom())));
    out.push(PathSegment::Close);
}

/// Navy field, translucent gradient overlay, and a gold corner triangle.
pub fn milestone_background(scene: &mut Scene) {
    let (width, height) = page(scene);
    scene.fill(full_rect(scene), Rgba::hex(0x0d1d34));
    scene.fill(
        full_rect(scene),
        Paint::linear(
            PointF::new(0.0, 0.0),
            PointF::new(width, height),
            Rgba::rgb(29, 42, 68).with_alpha(0.8),
            Rgba::rgb(13, 29, 52).with_alpha(0.8),
        ),
    );
    scene.fill(
        Shape::Path(vec![
            PathSegment::MoveTo(PointF::new(0.0, height)),
            PathSegment::LineTo(PointF::new(0.0, height - 500.0)),
            PathSegment::LineTo(PointF::new(600.0, height)),
            PathSegment::Close,
        ]),
        Rgba::rgb(212, 175, 55).with_alpha(0.05),
    );
}

/// Two mirrored gold bezier strokes and the bottom-right dot block.
pub fn milestone_flourishes(scene: &mut Scene) {
    let (width, height) = page(scene);
    let gold = Rgba::hex(0xd4af37).fade(0.5);
    scene.stroke(
        Shape::Path(vec![
            PathSegment::MoveTo(PointF::new(70.0, 180.0)),
            PathSegment::CubicTo {
                ctrl1: PointF::new(150.0, 280.0),
                ctrl2: PointF::new(250.0, 130.0),
                to: PointF::new(380.0, 210.0),
            },
        ]),
        gold,
        2.0,
    );
    scene.stroke(
        Shape::Path(vec![
            PathSegment::MoveTo(PointF::new(width - 70.0, 130.0)),
            PathSegment::CubicTo {
                ctrl1: PointF::new(width - 150.0, 230.0),
                ctrl2: PointF::new(width - 250.0, 80.0),
                to: PointF::new(width - 380.0, 160.0),
            },
        ]),
        gold,
        2.0,
    );

    let mut dots = Vec::new();
    for i in 0..8 {
        for j in 0..15 {
            circle_subpath(
                PointF::new(width - 100.0 + i as f32 * 10.0, height - 200.0 + j as f32 * 10.0),
                1.5,
                &mut dots,
            );
        }
    }
    scene.fill(Shape::Path(dots), Rgba::WHITE.with_alpha(0.2));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_ir::DrawCommand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> Scene {
        Scene::new(800, 1000, 2.0, Rgba::WHITE)
    }

    #[test]
    fn stars_stay_in_upper_band() {
        let mut scene = scene();
        let mut rng = StdRng::seed_from_u64(7);
        corporate_stars(&mut scene, &mut rng);
        let stars: Vec<_> = scene
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill { shape, .. } => Some(shape.bounds()),
                _ => None,
            })
            .collect();
        assert_eq!(stars.len(), STAR_COUNT);
        for bounds in stars {
            // Outer radius is at most 3.5.
            assert!(bounds.x >= -3.5 && bounds.right() <= 803.5);
            assert!(bounds.y >= -3.5 && bounds.bottom() <= 400.0 + 3.5);
        }
    }

    #[test]
    fn speckles_are_tiny_and_on_page() {
        let mut scene = scene();
        let mut rng = StdRng::seed_from_u64(42);
        modern_background(&mut scene, &mut rng);
        let mut count = 0;
        for cmd in &scene.commands {
            if let DrawCommand::Fill {
                shape: Shape::Circle { center, radius },
                ..
            } = cmd
            {
                count += 1;
                assert!(*radius < 0.8);
                assert!((0.0..800.0).contains(&center.x));
                assert!((0.0..1000.0).contains(&center.y));
            }
        }
        assert_eq!(count, SPECKLE_COUNT);
    }

    #[test]
    fn same_seed_same_scatter() {
        let mut a = scene();
        let mut b = scene();
        corporate_stars(&mut a, &mut StdRng::seed_from_u64(3));
        corporate_stars(&mut b, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn star_vertices_alternate_radii() {
        let path = star_path(PointF::new(0.0, 0.0), 2.0, 5);
        assert_eq!(path.len(), 11);
        assert_eq!(path[0], PathSegment::MoveTo(PointF::new(0.0, 2.0)));
        if let PathSegment::LineTo(p) = path[1] {
            assert!(((p.x * p.x + p.y * p.y).sqrt() - 1.0).abs() < 1e-4);
        } else {
            panic!("expected LineTo");
        }
    }

    #[test]
    fn dotted_job_background_adds_dot_grid() {
        let mut classic = scene();
        job_background(&mut classic, JobBackground::Classic);
        let mut dotted = scene();
        job_background(&mut dotted, JobBackground::Dotted);
        assert_eq!(classic.commands.len() + 1, dotted.commands.len());
        let Some(DrawCommand::Fill {
            shape: Shape::Path(segments),
            ..
        }) = dotted.commands.last()
        else {
            panic!("expected dot path");
        };
        // 80 columns x 100 rows, three segments per dot.
        assert_eq!(segments.len(), 80 * 100 * 3);
    }
}
