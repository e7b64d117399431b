/*
 * Text Module
 *
 * Rasterizes a string into a PixelBuffer the way the text variant of the
 * effect paints it before sampling:
 * - words are packed greedily into lines no wider than a fraction of the
 *   surface, measured in the active font
 * - lines are centered horizontally and the block is centered vertically,
 *   each line anchored on its middle rather than its baseline
 * - glyphs are filled with a diagonal red/purple/blue gradient and outlined
 *   in white
 *
 * Glyph coverage comes from nannou's text module.
 */

use std::fs;
use std::path::Path;

use nannou::text::rt::point;
use nannou::text::{Font, Scale};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampler::PixelBuffer;

// Coverage at or above this counts as inside a glyph for outlining
const INSIDE_COVERAGE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: f32,
    pub line_height: f32,
    /// Maximum line width as a fraction of the surface width
    pub max_width_ratio: f32,
    /// Outline thickness in pixels, 0 disables the outline
    pub stroke_width: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 80.0,
            line_height: 80.0,
            max_width_ratio: 0.8,
            stroke_width: 2.0,
        }
    }
}

impl TextStyle {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.font_size) || !positive(self.line_height) {
            return Err(Error::InvalidParams(
                "font size and line height must be positive".into(),
            ));
        }
        if !(positive(self.max_width_ratio) && self.max_width_ratio <= 1.0) {
            return Err(Error::InvalidParams(format!(
                "max width ratio must lie in (0, 1], got {}",
                self.max_width_ratio
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(Error::InvalidParams("stroke width must not be negative".into()));
        }
        Ok(())
    }
}

/// Load a TrueType/OpenType font from disk
pub fn load_font(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    Font::from_bytes(bytes).map_err(|_| Error::Font(path.display().to_string()))
}

/// Font bundled with nannou
pub fn default_font() -> Font {
    nannou::text::font::default_notosans()
}

/// Pack space-separated words into lines. Every line keeps the trailing
/// space it was measured with. A word wider than `max_width` still gets a
/// line of its own.
pub fn wrap_text<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = format!("{line}{word} ");
        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, format!("{word} ")));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Advance width of `text` laid out on one line
pub fn measure(font: &Font, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Linear gradient running from the top-left to the bottom-right corner
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    width: f32,
    height: f32,
    stops: Vec<(f32, [u8; 3])>,
}

impl Gradient {
    pub fn diagonal(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            stops: vec![
                (0.3, [255, 0, 0]),
                (0.5, [128, 0, 128]),
                (0.7, [0, 0, 255]),
            ],
        }
    }

    // Projection of (x, y) onto the diagonal, 0 at the top-left corner
    fn offset(&self, x: f32, y: f32) -> f32 {
        let length_sq = self.width * self.width + self.height * self.height;
        if length_sq == 0.0 {
            return 0.0;
        }
        (x * self.width + y * self.height) / length_sq
    }

    pub fn color_at(&self, x: f32, y: f32) -> [u8; 3] {
        let t = self.offset(x, y);
        let (first, last) = (self.stops[0], self.stops[self.stops.len() - 1]);
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        for pair in self.stops.windows(2) {
            let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
            if t <= t1 {
                let f = (t - t0) / (t1 - t0);
                let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
                return [lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2])];
            }
        }
        last.1
    }
}

/// Glyph coverage per surface pixel, in [0, 1]
struct Coverage {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl Coverage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as usize,
            height: height as usize,
            values: vec![0.0; width as usize * height as usize],
        }
    }

    fn get(&self, x: i64, y: i64) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.values[y as usize * self.width + x as usize]
    }

    fn add(&mut self, x: i64, y: i64, value: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let slot = &mut self.values[y as usize * self.width + x as usize];
        *slot = slot.max(value);
    }

    // A pixel is on the outline when its neighbourhood holds both inside
    // and outside pixels
    fn on_edge(&self, x: i64, y: i64, radius: i64) -> bool {
        let mut inside = false;
        let mut outside = false;
        for ny in y - radius..=y + radius {
            for nx in x - radius..=x + radius {
                if self.get(nx, ny) >= INSIDE_COVERAGE {
                    inside = true;
                } else {
                    outside = true;
                }
                if inside && outside {
                    return true;
                }
            }
        }
        false
    }
}

/// Paint wrapped, centered text into a transparent buffer of the surface size
pub fn rasterize_text(
    text: &str,
    font: &Font,
    style: &TextStyle,
    width: u32,
    height: u32,
) -> PixelBuffer {
    let scale = Scale::uniform(style.font_size);
    let max_width = width as f32 * style.max_width_ratio;
    let lines = wrap_text(text, max_width, |s| measure(font, scale, s));

    let mut coverage = Coverage::new(width, height);
    let v_metrics = font.v_metrics(scale);
    // Baseline sits this far below the vertical middle of the em box
    let middle_to_baseline = (v_metrics.ascent + v_metrics.descent) / 2.0;
    let block_height = style.line_height * lines.len().saturating_sub(1) as f32;
    let first_line_y = height as f32 / 2.0 - block_height / 2.0;

    for (index, line) in lines.iter().enumerate() {
        let line_y = first_line_y + index as f32 * style.line_height;
        let line_x = width as f32 / 2.0 - measure(font, scale, line) / 2.0;
        let origin = point(line_x, line_y + middle_to_baseline);

        for glyph in font.layout(line, scale, origin) {
            if let Some(bounds) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, value| {
                    coverage.add(
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        value,
                    );
                });
            }
        }
    }

    let gradient = Gradient::diagonal(width, height);
    let stroke_radius = (style.stroke_width / 2.0).ceil() as i64;
    let mut buffer = PixelBuffer::new(width, height);

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            if stroke_radius > 0 && coverage.on_edge(x, y, stroke_radius) {
                buffer.put_pixel(x, y, [255, 255, 255, 255]);
                continue;
            }
            let value = coverage.get(x, y);
            if value > 0.0 {
                let [r, g, b] = gradient.color_at(x as f32, y as f32);
                let alpha = (value * 255.0).round().clamp(1.0, 255.0) as u8;
                buffer.put_pixel(x, y, [r, g, b, alpha]);
            }
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sampler;
    use pretty_assertions::assert_eq;

    // Every character is 10 units wide
    fn fixed_width(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn short_text_fits_on_one_line() {
        let lines = wrap_text("This is Cool", 1000.0, fixed_width);
        assert_eq!(lines, vec!["This is Cool ".to_string()]);
    }

    #[test]
    fn words_wrap_greedily() {
        // "aaa bbb " is 80 wide, adding "ccc " would make 120
        let lines = wrap_text("aaa bbb ccc dd", 100.0, fixed_width);
        assert_eq!(lines, vec!["aaa bbb ".to_string(), "ccc dd ".to_string()]);
        for line in &lines {
            assert!(fixed_width(line) <= 100.0);
        }
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_text("a enormousword b", 50.0, fixed_width);
        assert_eq!(
            lines,
            vec!["a ".to_string(), "enormousword ".to_string(), "b ".to_string()]
        );
    }

    #[test]
    fn oversized_first_word_does_not_leave_an_empty_line() {
        let lines = wrap_text("enormousword", 50.0, fixed_width);
        assert_eq!(lines, vec!["enormousword ".to_string()]);
    }

    #[test]
    fn gradient_stops() {
        let gradient = Gradient::diagonal(100, 100);
        assert_eq!(gradient.color_at(0.0, 0.0), [255, 0, 0]);
        assert_eq!(gradient.color_at(50.0, 50.0), [128, 0, 128]);
        assert_eq!(gradient.color_at(100.0, 100.0), [0, 0, 255]);
        assert_eq!(gradient.color_at(40.0, 40.0), [192, 0, 64]);
    }

    #[test]
    fn empty_text_rasterizes_to_nothing() {
        let buffer = rasterize_text("", &default_font(), &TextStyle::default(), 200, 100);
        assert!(Sampler::new(1).sample(&buffer).is_empty());
    }

    #[test]
    fn text_rasterizes_near_the_center() {
        let buffer = rasterize_text("Hi", &default_font(), &TextStyle::default(), 400, 200);
        let samples = Sampler::new(1).sample(&buffer);
        assert!(!samples.is_empty());

        let mean_x = samples.iter().map(|s| s.x as f64).sum::<f64>() / samples.len() as f64;
        let mean_y = samples.iter().map(|s| s.y as f64).sum::<f64>() / samples.len() as f64;
        assert!((mean_x - 200.0).abs() < 40.0, "mean x {mean_x}");
        assert!((mean_y - 100.0).abs() < 40.0, "mean y {mean_y}");
    }

    #[test]
    fn outline_is_white() {
        let buffer = rasterize_text("O", &default_font(), &TextStyle::default(), 200, 200);
        let samples = Sampler::new(1).sample(&buffer);
        assert!(samples.iter().any(|s| s.color == nannou::color::rgb(255, 255, 255)));
        assert!(samples.iter().any(|s| s.color != nannou::color::rgb(255, 255, 255)));
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        let err = load_font("/definitely/not/a/font.ttf").err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn unreadable_font_bytes_are_a_font_error() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let err = load_font(file.path()).err().unwrap();
        assert!(matches!(err, Error::Font(_)));
    }
}
