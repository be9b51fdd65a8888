use core::fmt;

use serde::Serialize;

/// Logical-space point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Logical-space rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> PointF {
        PointF::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// `true` when `other` lies fully inside `self` (edges inclusive, small epsilon).
    pub fn contains_rect(&self, other: &RectF) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Straight RGBA color; alpha is part of the color, never a separate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Same color with alpha given as a 0..=1 fraction.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Multiply the existing alpha by a 0..=1 fraction.
    pub fn fade(self, alpha: f32) -> Self {
        let a = f32::from(self.a) * alpha.clamp(0.0, 1.0);
        Self {
            a: a.round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// One gradient color stop, `offset` in 0..=1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Fill source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Paint {
    Solid(Rgba),
    LinearGradient {
        start: PointF,
        end: PointF,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Two-stop linear gradient.
    pub fn linear(start: PointF, end: PointF, from: Rgba, to: Rgba) -> Self {
        Self::LinearGradient {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }
}

impl From<Rgba> for Paint {
    fn from(value: Rgba) -> Self {
        Self::Solid(value)
    }
}

/// Path building block. Arcs follow canvas conventions: angles in radians,
/// clockwise in y-down space from `start_angle` to `end_angle`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PathSegment {
    MoveTo(PointF),
    LineTo(PointF),
    QuadTo {
        ctrl: PointF,
        to: PointF,
    },
    CubicTo {
        ctrl1: PointF,
        ctrl2: PointF,
        to: PointF,
    },
    Arc {
        center: PointF,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

/// Geometry for fill, stroke, and clip commands.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Shape {
    Rect(RectF),
    RoundedRect { rect: RectF, radius: f32 },
    Circle { center: PointF, radius: f32 },
    Path(Vec<PathSegment>),
}

impl Shape {
    /// Conservative logical-space bounds, used by tests and clip bookkeeping.
    pub fn bounds(&self) -> RectF {
        match self {
            Self::Rect(rect) | Self::RoundedRect { rect, .. } => *rect,
            Self::Circle { center, radius } => RectF::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            Self::Path(segments) => path_bounds(segments),
        }
    }
}

fn path_bounds(segments: &[PathSegment]) -> RectF {
    let mut min = PointF::new(f32::INFINITY, f32::INFINITY);
    let mut max = PointF::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    let mut include = |p: PointF| {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    };
    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => include(p),
            PathSegment::QuadTo { ctrl, to } => {
                include(ctrl);
                include(to);
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                include(ctrl1);
                include(ctrl2);
                include(to);
            }
            PathSegment::Arc { center, radius, .. } => {
                include(PointF::new(center.x - radius, center.y - radius));
                include(PointF::new(center.x + radius, center.y + radius));
            }
            PathSegment::Close => {}
        }
    }
    if min.x > max.x || min.y > max.y {
        return RectF::default();
    }
    RectF::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

/// Resolved text style. The same style drives measurement and drawing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
    pub size_px: f32,
}

impl TextStyle {
    pub fn sans(weight: u16, size_px: f32) -> Self {
        Self {
            family: "sans-serif".to_string(),
            weight,
            italic: false,
            size_px,
        }
    }

    pub fn serif(weight: u16, size_px: f32) -> Self {
        Self {
            family: "serif".to_string(),
            weight,
            italic: false,
            size_px,
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Top,
}

/// Positioned single-line text run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextCommand {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
    pub color: Rgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextCommand {
    /// Left-aligned, alphabetic-baseline text.
    pub fn new(x: f32, y: f32, text: impl Into<String>, style: &TextStyle, color: Rgba) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            style: style.clone(),
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Externally loaded image a command can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ImageSlot {
    Logo,
    Photo,
}

/// Draw a whole image scaled into `dest`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageCommand {
    pub slot: ImageSlot,
    pub dest: RectF,
}

/// Backend-agnostic drawing operation in logical coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Reset the surface to a solid color.
    Clear(Rgba),
    Fill {
        shape: Shape,
        paint: Paint,
    },
    Stroke {
        shape: Shape,
        color: Rgba,
        width: f32,
    },
    Text(TextCommand),
    Image(ImageCommand),
    /// Push clip state.
    Save,
    /// Pop clip state.
    Restore,
    /// Intersect the current clip with a shape.
    Clip(Shape),
}

/// One composed image as draw commands.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Device pixels per logical unit.
    pub scale: f32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    const INITIAL_COMMAND_CAPACITY: usize = 64;

    /// Create a scene whose first command clears the surface.
    pub fn new(width: u32, height: u32, scale: f32, clear: Rgba) -> Self {
        let mut commands = Vec::with_capacity(Self::INITIAL_COMMAND_CAPACITY);
        commands.push(DrawCommand::Clear(clear));
        Self {
            width,
            height,
            scale,
            commands,
        }
    }

    /// Device width after scaling.
    pub fn device_width(&self) -> u32 {
        (self.width as f32 * self.scale).round() as u32
    }

    /// Device height after scaling.
    pub fn device_height(&self) -> u32 {
        (self.height as f32 * self.scale).round() as u32
    }

    pub fn bounds(&self) -> RectF {
        RectF::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    pub fn fill(&mut self, shape: Shape, paint: impl Into<Paint>) {
        self.push(DrawCommand::Fill {
            shape,
            paint: paint.into(),
        });
    }

    pub fn stroke(&mut self, shape: Shape, color: Rgba, width: f32) {
        self.push(DrawCommand::Stroke {
            shape,
            color,
            width,
        });
    }

    pub fn text(&mut self, cmd: TextCommand) {
        self.push(DrawCommand::Text(cmd));
    }

    pub fn image(&mut self, slot: ImageSlot, dest: RectF) {
        self.push(DrawCommand::Image(ImageCommand { slot, dest }));
    }

    /// Run `body` between a balanced `Save`/`Restore` pair with `clip` applied.
    pub fn scoped<F>(&mut self, clip: Shape, body: F)
    where
        F: FnOnce(&mut Scene),
    {
        self.push(DrawCommand::Save);
        self.push(DrawCommand::Clip(clip));
        body(self);
        self.push(DrawCommand::Restore);
    }

    /// Text commands in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    /// First text command whose content equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&TextCommand> {
        self.texts().find(|t| t.text == needle)
    }

    /// Net save depth after all commands; zero for a well-formed scene.
    pub fn save_depth(&self) -> isize {
        self.commands.iter().fold(0isize, |depth, cmd| match cmd {
            DrawCommand::Save => depth + 1,
            DrawCommand::Restore => depth - 1,
            _ => depth,
        })
    }

    /// Pretty JSON dump for debugging layouts.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
