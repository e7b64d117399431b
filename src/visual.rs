/*
 * Visual Module
 *
 * A Visual is the source the particles are sampled from: a decoded image
 * placed in the middle of the surface, or a string laid out as wrapped
 * text. Rasterizing one produces the complete PixelBuffer the Sampler
 * reads.
 */

use std::path::Path;

use nannou::image::{self, RgbaImage};
use nannou::text::Font;

use crate::error::Result;
use crate::sampler::PixelBuffer;
use crate::text::{self, TextStyle};

pub struct TextVisual {
    pub content: String,
    pub font: Font,
    pub style: TextStyle,
}

pub enum Visual {
    Image(RgbaImage),
    Text(TextVisual),
}

impl Visual {
    /// Decode an image file with nannou's image loader
    pub fn open_image(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Ok(Visual::Image(image))
    }

    pub fn text(content: impl Into<String>, font: Font, style: TextStyle) -> Self {
        Visual::Text(TextVisual {
            content: content.into(),
            font,
            style,
        })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Visual::Text(_))
    }

    /// Current text content, if this is a text visual
    pub fn content(&self) -> Option<&str> {
        match self {
            Visual::Text(text) => Some(&text.content),
            Visual::Image(_) => None,
        }
    }

    /// Replace the text content. Returns false for image visuals, which
    /// have no text to change.
    pub fn set_text(&mut self, content: impl Into<String>) -> bool {
        match self {
            Visual::Text(text) => {
                text.content = content.into();
                true
            }
            Visual::Image(_) => false,
        }
    }

    /// Draw the visual into a fresh transparent buffer of the surface size
    pub fn rasterize(&self, width: u32, height: u32) -> PixelBuffer {
        match self {
            Visual::Image(image) => {
                let mut buffer = PixelBuffer::new(width, height);
                buffer.blit_centered(image);
                buffer
            }
            Visual::Text(visual) => {
                text::rasterize_text(&visual.content, &visual.font, &visual.style, width, height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::image::Rgba;

    #[test]
    fn image_is_centered() {
        let visual = Visual::Image(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let buffer = visual.rasterize(6, 4);

        assert_eq!(buffer.pixel(2, 1), [1, 2, 3, 255]);
        assert_eq!(buffer.pixel(3, 2), [1, 2, 3, 255]);
        assert_eq!(buffer.pixel(1, 1)[3], 0);
        assert_eq!(buffer.pixel(4, 2)[3], 0);
    }

    #[test]
    fn image_visual_ignores_text_changes() {
        let mut visual = Visual::Image(RgbaImage::new(1, 1));
        assert!(!visual.set_text("hello"));
        assert_eq!(visual.content(), None);
    }

    #[test]
    fn text_visual_accepts_text_changes() {
        let mut visual = Visual::text("a", text::default_font(), TextStyle::default());
        assert!(visual.set_text("b"));
        assert_eq!(visual.content(), Some("b"));
    }

    #[test]
    fn missing_image_is_an_error() {
        assert!(Visual::open_image("/no/such/image.png").is_err());
    }
}
