use std::sync::Arc;

use brandify::{ImagePosition, RenderDocument};
use rand::RngCore;

use crate::compositor::{job_compositor, welcome_compositor, ComposeContext};
use crate::list_layout::ColumnWidth;
use crate::render_ir::{Rgba, Scene};
use crate::text_layout::{HeuristicTextMeasurer, TextMeasurer};

/// Page geometry and brand strings shared by every template.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Logical page width.
    pub page_width: u32,
    /// Logical page height.
    pub page_height: u32,
    /// Device pixels per logical unit.
    pub scale: f32,
    /// Column sizing for horizontal benefit lists.
    pub benefit_columns: ColumnWidth,
    /// Wordmark drawn beside the logo on milestone templates.
    pub brand_name: String,
    /// Footer text on milestone templates.
    pub milestone_website: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width: 800,
            page_height: 1000,
            scale: 2.0,
            benefit_columns: ColumnWidth::Even,
            brand_name: "Office Field".to_string(),
            milestone_website: "www.officefield.com".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_benefit_columns(mut self, columns: ColumnWidth) -> Self {
        self.benefit_columns = columns;
        self
    }
}

/// Intrinsic pixel size of a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Load state of an external image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageStatus {
    /// Not loaded yet; a ready event will follow.
    #[default]
    Pending,
    Loaded(ImageInfo),
    /// Load failed or no source was given; templates draw their placeholder.
    Failed,
}

impl ImageStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Load state of the logo and photo slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderImages {
    pub logo: ImageStatus,
    pub photo: ImageStatus,
}

/// One render: the document, image load states, and the photo offset.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub document: RenderDocument,
    pub images: RenderImages,
    pub image_position: ImagePosition,
}

impl RenderRequest {
    pub fn new(document: RenderDocument) -> Self {
        Self {
            document,
            images: RenderImages::default(),
            image_position: ImagePosition::default(),
        }
    }

    pub fn with_images(mut self, images: RenderImages) -> Self {
        self.images = images;
        self
    }

    pub fn with_image_position(mut self, position: ImagePosition) -> Self {
        self.image_position = position;
        self
    }
}

/// Whether every image a document needs has settled (loaded or failed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReadiness {
    pub logo_ready: bool,
    pub photo_ready: bool,
}

impl RenderReadiness {
    pub fn evaluate(images: &RenderImages, document: &RenderDocument) -> Self {
        let photo_declared = match document {
            RenderDocument::Welcome(doc) => doc.profile.image.is_some(),
            RenderDocument::Job(_) => false,
        };
        Self {
            logo_ready: !images.logo.is_pending(),
            photo_ready: !photo_declared || !images.photo.is_pending(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.logo_ready && self.photo_ready
    }
}

/// Dispatches a document to its template compositor and returns the scene.
///
/// Every call builds a fresh scene that starts by clearing the surface, so
/// re-rendering after an image-ready event fully replaces the old output.
pub struct TemplateEngine {
    options: RenderOptions,
    measurer: Arc<dyn TextMeasurer>,
}

impl TemplateEngine {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            measurer: HeuristicTextMeasurer::shared(),
        }
    }

    /// Use backend-consistent text measurement for wrapping and sizing.
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn measurer(&self) -> &Arc<dyn TextMeasurer> {
        &self.measurer
    }

    /// Compose `request` with an injected RNG for decorative scatter.
    pub fn render(&self, request: &RenderRequest, rng: &mut dyn RngCore) -> Scene {
        let mut scene = Scene::new(
            self.options.page_width,
            self.options.page_height,
            self.options.scale,
            Rgba::rgba(0, 0, 0, 0),
        );
        let mut ctx = ComposeContext {
            scene: &mut scene,
            measurer: self.measurer.as_ref(),
            rng,
            images: &request.images,
            image_position: request.image_position,
            options: &self.options,
        };
        match &request.document {
            RenderDocument::Job(doc) => {
                let compositor = job_compositor(doc.layout);
                log::debug!("rendering job template '{}'", compositor.name());
                compositor.compose(doc, &mut ctx);
            }
            RenderDocument::Welcome(doc) => {
                let compositor = welcome_compositor(doc.template);
                log::debug!("rendering welcome template '{}'", compositor.name());
                compositor.compose(doc, &mut ctx);
            }
        }
        if scene.save_depth() != 0 {
            log::warn!(
                "scene finished with unbalanced save depth {}",
                scene.save_depth()
            );
        }
        scene
    }

    /// Compose `request` with thread-local entropy.
    pub fn render_default_rng(&self, request: &RenderRequest) -> Scene {
        self.render(request, &mut rand::thread_rng())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
