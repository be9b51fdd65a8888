use brandify::{ImagePosition, RenderDocument};
use brandify_render::{
    ImageSlot, RenderOptions, RenderReadiness, RenderRequest, Scene, TemplateEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::error::RasterError;
use crate::font::MonoTextMeasurer;
use crate::images::ImageRegistry;
use crate::renderer::{RasterConfig, RasterRenderer};

/// Result of a render attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The canvas now holds a full render of the current document.
    Rendered,
    /// A required image is still pending; the canvas was left untouched.
    Waiting(RenderReadiness),
    /// No document has been set.
    NoDocument,
}

/// Owns the document, its images and the canvas, and re-renders on change.
///
/// Every render recomposes the whole scene, so an image-ready event simply
/// triggers another full render.
pub struct RenderSession {
    engine: TemplateEngine,
    renderer: RasterRenderer,
    images: ImageRegistry,
    canvas: Canvas,
    document: Option<RenderDocument>,
    image_position: ImagePosition,
    seed: Option<u64>,
    last_scene: Option<Scene>,
}

impl RenderSession {
    pub fn new(options: RenderOptions, config: RasterConfig) -> Result<Self, RasterError> {
        let width = (options.page_width as f32 * options.scale).round() as u32;
        let height = (options.page_height as f32 * options.scale).round() as u32;
        let canvas = Canvas::new(width, height, options.scale)?;
        let engine = TemplateEngine::new(options).with_text_measurer(MonoTextMeasurer::shared());
        Ok(Self {
            engine,
            renderer: RasterRenderer::new(config),
            images: ImageRegistry::new(),
            canvas,
            document: None,
            image_position: ImagePosition::default(),
            seed: None,
            last_scene: None,
        })
    }

    /// Seed decorative scatter so repeated renders produce identical pixels.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_image_registry(mut self, images: ImageRegistry) -> Self {
        self.images = images;
        self
    }

    pub fn set_document(&mut self, document: RenderDocument) {
        self.document = Some(document);
    }

    pub fn document(&self) -> Option<&RenderDocument> {
        self.document.as_ref()
    }

    pub fn set_image_position(&mut self, position: ImagePosition) {
        self.image_position = position;
    }

    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    /// Register encoded bytes for `slot`, then render if everything is ready.
    ///
    /// A decode failure marks the slot failed and is returned; the next
    /// [`RenderSession::render`] then draws the placeholder.
    pub fn image_ready(
        &mut self,
        slot: ImageSlot,
        bytes: &[u8],
    ) -> Result<RenderOutcome, RasterError> {
        self.images.register_encoded(slot, bytes)?;
        self.render()
    }

    /// Record that `slot` will not load, then render if everything is ready.
    pub fn image_failed(&mut self, slot: ImageSlot) -> Result<RenderOutcome, RasterError> {
        self.images.mark_failed(slot);
        self.render()
    }

    /// Render the current document when its images have settled.
    pub fn render(&mut self) -> Result<RenderOutcome, RasterError> {
        let Some(document) = self.document.as_ref() else {
            return Ok(RenderOutcome::NoDocument);
        };
        let images = self.images.render_images();
        let readiness = RenderReadiness::evaluate(&images, document);
        if !readiness.is_ready() {
            log::debug!("render deferred: {:?}", readiness);
            return Ok(RenderOutcome::Waiting(readiness));
        }

        let request = RenderRequest::new(document.clone())
            .with_images(images)
            .with_image_position(self.image_position);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = self.engine.render(&request, &mut rng);
        self.renderer
            .render_scene(&scene, &self.images, &mut self.canvas)?;
        self.last_scene = Some(scene);
        Ok(RenderOutcome::Rendered)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Scene of the most recent successful render.
    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.canvas.encode_png()
    }

    /// Export file name for the current document.
    pub fn output_file_name(&self) -> Option<String> {
        self.document.as_ref().map(RenderDocument::output_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandify::JobDocument;

    #[test]
    fn render_waits_for_logo() {
        let mut session =
            RenderSession::new(RenderOptions::default(), RasterConfig::default()).expect("session");
        assert_eq!(session.render(), Ok(RenderOutcome::NoDocument));
        session.set_document(RenderDocument::Job(JobDocument::default()));
        assert!(matches!(session.render(), Ok(RenderOutcome::Waiting(_))));
        assert!(session.last_scene().is_none());
        assert_eq!(
            session.image_failed(ImageSlot::Logo),
            Ok(RenderOutcome::Rendered)
        );
        assert!(session.last_scene().is_some());
        assert_eq!(
            session.output_file_name().as_deref(),
            Some("AI_Engineer_hiring_post.png")
        );
    }
}
