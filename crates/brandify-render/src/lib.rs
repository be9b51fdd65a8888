//! Scene IR, text and list layout, and template compositors for `brandify`.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod compositor;
mod cover;
pub mod decor;
mod list_layout;
mod render_engine;
mod render_ir;
mod text_layout;

pub use compositor::{
    job_compositor, ordinal_suffix, ordinal_suffix_for, welcome_compositor, ComposeContext,
    Compositor, Cursor, MilestoneKind,
};
pub use cover::{cover_rect, draw_cover};
pub use list_layout::{
    layout_list, layout_list_report, ColumnWidth, ListLayoutReport, ListOptions, ListOrientation,
    SubtitleOptions, HORIZONTAL_COLUMNS,
};
pub use render_engine::{
    ImageInfo, ImageStatus, RenderImages, RenderOptions, RenderReadiness, RenderRequest,
    TemplateEngine,
};
pub use render_ir::{
    DrawCommand, GradientStop, ImageCommand, ImageSlot, Paint, PathSegment, PointF, RectF, Rgba,
    Scene, Shape, TextAlign, TextBaseline, TextCommand, TextStyle,
};
pub use text_layout::{wrap_text, HeuristicTextMeasurer, TextMeasurer};
