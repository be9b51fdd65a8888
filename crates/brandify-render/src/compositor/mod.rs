//! Per-template compositors.
//!
//! Each template is one [`Compositor`] implementation. Stages inside a
//! compositor thread an explicit [`Cursor`]: a stage takes the running y and
//! returns the next one, and a stage with nothing to draw returns it as is.

use brandify::{ImagePosition, JobDocument, JobLayout, WelcomeDocument, WelcomeTemplate};
use rand::RngCore;

use crate::render_engine::{ImageStatus, RenderImages, RenderOptions};
use crate::render_ir::{PathSegment, PointF, Rgba, Scene, Shape, TextCommand, TextStyle};
use crate::text_layout::{wrap_text, TextMeasurer};

mod job;
mod milestone;
mod welcome;

pub use job::{MultipleOpeningsCompositor, SinglePostingCompositor};
pub use milestone::{ordinal_suffix, ordinal_suffix_for, MilestoneCompositor, MilestoneKind};
pub use welcome::{CorporateCompositor, CreativeCompositor, ElegantCompositor, ModernCompositor};

/// Everything a compositor draws with.
pub struct ComposeContext<'a> {
    pub scene: &'a mut Scene,
    pub measurer: &'a dyn TextMeasurer,
    pub rng: &'a mut dyn RngCore,
    pub images: &'a RenderImages,
    pub image_position: ImagePosition,
    pub options: &'a RenderOptions,
}

impl ComposeContext<'_> {
    pub fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        self.measurer.measure_text_px(text, style)
    }

    pub fn wrap(&self, text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
        wrap_text(self.measurer, style, text, max_width)
    }

    pub fn text(&mut self, cmd: TextCommand) {
        self.scene.text(cmd);
    }

    /// Logical page width.
    pub fn page_width(&self) -> f32 {
        self.scene.width as f32
    }

    pub fn page_height(&self) -> f32 {
        self.scene.height as f32
    }

    /// Source size of the photo when the profile declares one and it has loaded.
    pub fn photo_size(&self, declared: bool) -> Option<(u32, u32)> {
        if !declared {
            return None;
        }
        match self.images.photo {
            ImageStatus::Loaded(info) => Some((info.width, info.height)),
            ImageStatus::Pending | ImageStatus::Failed => None,
        }
    }

    pub fn logo(&self) -> ImageStatus {
        self.images.logo
    }
}

/// Running vertical position between layout stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub y: f32,
}

impl Cursor {
    pub const fn at(y: f32) -> Self {
        Self { y }
    }

    #[must_use]
    pub fn advance(self, dy: f32) -> Self {
        Self { y: self.y + dy }
    }
}

/// Draws one template variant into the context's scene.
pub trait Compositor: Sync {
    type Input;

    /// Stable template name for diagnostics.
    fn name(&self) -> &'static str;

    fn compose(&self, input: &Self::Input, ctx: &mut ComposeContext<'_>);
}

static SINGLE_POSTING: SinglePostingCompositor = SinglePostingCompositor;
static MULTIPLE_OPENINGS: MultipleOpeningsCompositor = MultipleOpeningsCompositor;
static CORPORATE: CorporateCompositor = CorporateCompositor;
static CREATIVE: CreativeCompositor = CreativeCompositor;
static MODERN: ModernCompositor = ModernCompositor;
static ELEGANT: ElegantCompositor = ElegantCompositor;
static PROBATION: MilestoneCompositor = MilestoneCompositor::new(MilestoneKind::Probation);
static ANNIVERSARY: MilestoneCompositor = MilestoneCompositor::new(MilestoneKind::Anniversary);
static PROMOTION: MilestoneCompositor = MilestoneCompositor::new(MilestoneKind::Promotion);

/// Compositor for a hiring post layout.
pub fn job_compositor(layout: JobLayout) -> &'static dyn Compositor<Input = JobDocument> {
    match layout {
        JobLayout::Single => &SINGLE_POSTING,
        JobLayout::Multiple => &MULTIPLE_OPENINGS,
    }
}

/// Compositor for a welcome or milestone template.
pub fn welcome_compositor(
    template: WelcomeTemplate,
) -> &'static dyn Compositor<Input = WelcomeDocument> {
    match template {
        WelcomeTemplate::Corporate => &CORPORATE,
        WelcomeTemplate::Creative => &CREATIVE,
        WelcomeTemplate::Modern => &MODERN,
        WelcomeTemplate::Elegant => &ELEGANT,
        WelcomeTemplate::Probation => &PROBATION,
        WelcomeTemplate::Anniversary => &ANNIVERSARY,
        WelcomeTemplate::Promotion => &PROMOTION,
    }
}

/// Open arc (no chord) as a strokable path.
pub(crate) fn arc_shape(center: PointF, radius: f32, start_angle: f32, end_angle: f32) -> Shape {
    Shape::Path(vec![
        PathSegment::MoveTo(PointF::new(
            center.x + radius * start_angle.cos(),
            center.y + radius * start_angle.sin(),
        )),
        PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        },
    ])
}

/// Straight line as a strokable path.
pub(crate) fn line_shape(from: PointF, to: PointF) -> Shape {
    Shape::Path(vec![PathSegment::MoveTo(from), PathSegment::LineTo(to)])
}

pub(crate) fn translucent_white(alpha: f32) -> Rgba {
    Rgba::WHITE.with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_covers_every_template() {
        assert_eq!(job_compositor(JobLayout::Single).name(), "single");
        assert_eq!(job_compositor(JobLayout::Multiple).name(), "multiple");
        for template in WelcomeTemplate::ALL {
            assert_eq!(welcome_compositor(template).name(), template.as_str());
        }
    }

    #[test]
    fn cursor_advances_by_value() {
        let start = Cursor::at(245.0);
        let next = start.advance(40.0);
        assert_eq!(start.y, 245.0);
        assert_eq!(next.y, 285.0);
    }
}
