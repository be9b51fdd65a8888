use core::fmt;

use brandify_render::ImageSlot;

/// Failure while rasterizing or exporting a scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// The device surface could not be allocated (zero or oversized dimensions).
    CanvasAllocation { width: u32, height: u32 },
    /// Image bytes could not be decoded.
    ImageDecode { slot: ImageSlot, message: String },
    /// Decoded image exceeds the registry pixel budget.
    ImageTooLarge {
        slot: ImageSlot,
        pixels: usize,
        max_pixels: usize,
    },
    /// PNG encoding of the surface failed.
    PngEncode(String),
}

impl RasterError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CanvasAllocation { .. } => "CANVAS_ALLOC",
            Self::ImageDecode { .. } => "IMAGE_DECODE",
            Self::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            Self::PngEncode(_) => "PNG_ENCODE",
        }
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CanvasAllocation { width, height } => {
                write!(f, "{}: cannot allocate {}x{} canvas", self.code(), width, height)
            }
            Self::ImageDecode { slot, message } => {
                write!(f, "{}: {:?} image: {}", self.code(), slot, message)
            }
            Self::ImageTooLarge {
                slot,
                pixels,
                max_pixels,
            } => write!(
                f,
                "{}: {:?} image has {} pixels (max {})",
                self.code(),
                slot,
                pixels,
                max_pixels
            ),
            Self::PngEncode(message) => write!(f, "{}: {}", self.code(), message),
        }
    }
}

impl std::error::Error for RasterError {}
