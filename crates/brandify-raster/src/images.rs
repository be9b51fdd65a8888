use brandify_render::{ImageInfo, ImageSlot, ImageStatus, RenderImages};
use tiny_skia::{IntSize, Pixmap};

use crate::error::RasterError;

/// Pixel budget for decoded images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageRegistryLimits {
    /// Maximum pixel count of a single decoded image.
    pub max_image_pixels: usize,
}

impl Default for ImageRegistryLimits {
    fn default() -> Self {
        Self {
            max_image_pixels: 40_000_000,
        }
    }
}

#[derive(Clone, Debug, Default)]
enum SlotState {
    #[default]
    Pending,
    Ready(Pixmap),
    Failed,
}

impl SlotState {
    fn status(&self) -> ImageStatus {
        match self {
            Self::Pending => ImageStatus::Pending,
            Self::Ready(pixmap) => {
                ImageStatus::Loaded(ImageInfo::new(pixmap.width(), pixmap.height()))
            }
            Self::Failed => ImageStatus::Failed,
        }
    }
}

/// Decoded logo and photo pixels, premultiplied and ready to composite.
#[derive(Clone, Debug, Default)]
pub struct ImageRegistry {
    limits: ImageRegistryLimits,
    logo: SlotState,
    photo: SlotState,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ImageRegistryLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> ImageRegistryLimits {
        self.limits
    }

    fn slot_mut(&mut self, slot: ImageSlot) -> &mut SlotState {
        match slot {
            ImageSlot::Logo => &mut self.logo,
            ImageSlot::Photo => &mut self.photo,
        }
    }

    fn slot(&self, slot: ImageSlot) -> &SlotState {
        match slot {
            ImageSlot::Logo => &self.logo,
            ImageSlot::Photo => &self.photo,
        }
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF, WebP) into `slot`.
    ///
    /// A failed decode marks the slot failed so templates draw placeholders.
    pub fn register_encoded(
        &mut self,
        slot: ImageSlot,
        bytes: &[u8],
    ) -> Result<ImageInfo, RasterError> {
        let decoded = match image::load_from_memory(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::warn!("failed to decode {:?} image: {}", slot, err);
                self.mark_failed(slot);
                return Err(RasterError::ImageDecode {
                    slot,
                    message: err.to_string(),
                });
            }
        };
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        self.register_rgba(slot, width, height, rgba.into_raw())
    }

    /// Store straight-alpha RGBA8 pixels in `slot`.
    pub fn register_rgba(
        &mut self,
        slot: ImageSlot,
        width: u32,
        height: u32,
        mut rgba: Vec<u8>,
    ) -> Result<ImageInfo, RasterError> {
        let pixels = width as usize * height as usize;
        if pixels > self.limits.max_image_pixels {
            self.mark_failed(slot);
            return Err(RasterError::ImageTooLarge {
                slot,
                pixels,
                max_pixels: self.limits.max_image_pixels,
            });
        }
        let invalid = || RasterError::ImageDecode {
            slot,
            message: format!("invalid {}x{} pixel buffer", width, height),
        };
        if rgba.len() != pixels * 4 {
            self.mark_failed(slot);
            return Err(invalid());
        }
        premultiply_in_place(&mut rgba);
        let Some(pixmap) = IntSize::from_wh(width, height).and_then(|size| Pixmap::from_vec(rgba, size))
        else {
            self.mark_failed(slot);
            return Err(invalid());
        };
        log::debug!("registered {:?} image {}x{}", slot, width, height);
        *self.slot_mut(slot) = SlotState::Ready(pixmap);
        Ok(ImageInfo::new(width, height))
    }

    /// Record that `slot` will never load.
    pub fn mark_failed(&mut self, slot: ImageSlot) {
        *self.slot_mut(slot) = SlotState::Failed;
    }

    /// Forget `slot`, returning it to pending.
    pub fn clear(&mut self, slot: ImageSlot) {
        *self.slot_mut(slot) = SlotState::Pending;
    }

    pub fn status(&self, slot: ImageSlot) -> ImageStatus {
        self.slot(slot).status()
    }

    /// Load states in the shape a render request takes.
    pub fn render_images(&self) -> RenderImages {
        RenderImages {
            logo: self.status(ImageSlot::Logo),
            photo: self.status(ImageSlot::Photo),
        }
    }

    pub fn pixmap(&self, slot: ImageSlot) -> Option<&Pixmap> {
        match self.slot(slot) {
            SlotState::Ready(pixmap) => Some(pixmap),
            SlotState::Pending | SlotState::Failed => None,
        }
    }
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let alpha = u16::from(px[3]);
        if alpha == 255 {
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
}
