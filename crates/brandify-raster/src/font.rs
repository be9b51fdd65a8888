use std::borrow::Cow;
use std::sync::Arc;

use brandify_render::{TextMeasurer, TextStyle};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_8X13_ITALIC, FONT_9X18_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

/// Weight at which text switches to the bold face.
const BOLD_WEIGHT: u16 = 600;

/// Resolved mono face and the factor that scales it to the requested size.
#[derive(Clone, Copy, Debug)]
pub struct FontSelection {
    pub font: &'static MonoFont<'static>,
    /// Logical units per font pixel.
    pub scale: f32,
}

impl FontSelection {
    /// Horizontal advance per character in logical units.
    pub fn advance(&self) -> f32 {
        (self.font.character_size.width + self.font.character_spacing) as f32 * self.scale
    }

    /// Line height in logical units.
    pub fn height(&self) -> f32 {
        self.font.character_size.height as f32 * self.scale
    }

    /// Distance from the glyph top to the alphabetic baseline in logical units.
    pub fn ascent(&self) -> f32 {
        self.font.baseline as f32 * self.scale
    }
}

/// Text rasterized at the font's native size.
#[derive(Clone, Debug)]
pub struct GlyphRun {
    pub pixmap: Pixmap,
    pub selection: FontSelection,
}

/// embedded-graphics mono fonts scaled to arbitrary pixel sizes.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFontBackend;

impl MonoFontBackend {
    pub fn select(&self, style: &TextStyle) -> FontSelection {
        let font: &'static MonoFont<'static> = if style.weight >= BOLD_WEIGHT {
            &FONT_9X18_BOLD
        } else if style.italic {
            &FONT_8X13_ITALIC
        } else {
            &FONT_10X20
        };
        let native = font.character_size.height.max(1) as f32;
        FontSelection {
            font,
            scale: style.size_px.max(0.0) / native,
        }
    }

    /// Logical width of `text` in `style`.
    pub fn measure(&self, text: &str, style: &TextStyle) -> f32 {
        let chars = normalize_text_for_mono(text).chars().count();
        chars as f32 * self.select(style).advance()
    }

    /// Rasterize `text` in `color` into a native-size glyph pixmap.
    ///
    /// Returns `None` for empty text or a zero-alpha color.
    pub fn rasterize(&self, text: &str, style: &TextStyle, color: ColorU8) -> Option<GlyphRun> {
        if color.alpha() == 0 {
            return None;
        }
        let normalized = normalize_text_for_mono(text);
        let chars = normalized.chars().count() as u32;
        if chars == 0 {
            return None;
        }
        let selection = self.select(style);
        let font = selection.font;
        let width = chars * (font.character_size.width + font.character_spacing);
        let height = font.character_size.height;
        let mut pixmap = Pixmap::new(width, height)?;

        let mut target = GlyphTarget {
            pixmap: &mut pixmap,
            color: color.premultiply(),
        };
        let text_style = MonoTextStyle::new(font, BinaryColor::On);
        let drawn = Text::with_baseline(normalized.as_ref(), Point::zero(), text_style, Baseline::Top)
            .draw(&mut target);
        if drawn.is_err() {
            return None;
        }
        Some(GlyphRun { pixmap, selection })
    }
}

/// Paints `On` pixels of a mono text run into an RGBA pixmap.
struct GlyphTarget<'a> {
    pixmap: &'a mut Pixmap,
    color: PremultipliedColorU8,
}

impl OriginDimensions for GlyphTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }
}

impl DrawTarget for GlyphTarget<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;
        let data = self.pixmap.pixels_mut();
        for Pixel(point, color) in pixels {
            if color != BinaryColor::On {
                continue;
            }
            if point.x < 0 || point.y < 0 || point.x >= width || point.y >= height {
                continue;
            }
            data[(point.y * width + point.x) as usize] = self.color;
        }
        Ok(())
    }
}

/// `TextMeasurer` using the same metrics the raster backend draws with.
#[derive(Clone, Debug, Default)]
pub struct MonoTextMeasurer {
    backend: MonoFontBackend,
}

impl MonoTextMeasurer {
    pub fn new() -> Self {
        Self {
            backend: MonoFontBackend,
        }
    }

    /// Shared measurer for `TemplateEngine::with_text_measurer`.
    pub fn shared() -> Arc<dyn TextMeasurer> {
        Arc::new(Self::new())
    }
}

impl TextMeasurer for MonoTextMeasurer {
    fn measure_text_px(&self, text: &str, style: &TextStyle) -> f32 {
        self.backend.measure(text, style)
    }
}

/// Map punctuation outside the ASCII mono glyph set to ASCII look-alikes.
fn normalize_text_for_mono(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00A0}' => out.push(' '),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
