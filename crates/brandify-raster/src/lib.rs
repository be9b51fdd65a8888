//! tiny-skia raster backend for `brandify-render` scenes.

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

mod canvas;
mod error;
mod font;
mod images;
mod renderer;
mod session;

pub use canvas::Canvas;
pub use error::RasterError;
pub use font::{FontSelection, GlyphRun, MonoFontBackend, MonoTextMeasurer};
pub use images::{ImageRegistry, ImageRegistryLimits};
pub use renderer::{RasterConfig, RasterRenderer};
pub use session::{RenderOutcome, RenderSession};
