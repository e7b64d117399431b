/*
 * Sampler Module
 *
 * A PixelBuffer is the rasterized visual, one RGBA byte quad per surface
 * pixel. The Sampler walks it on a regular grid and keeps every grid point
 * whose alpha is non-zero, which is what makes the particles trace the
 * silhouette of the image or glyphs instead of filling a rectangle.
 *
 * Sampling takes a finished buffer by reference, so it can only run after
 * the visual has been drawn into it.
 */

use nannou::image::RgbaImage;
use nannou::prelude::*;

/// RGBA raster the size of the drawing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite one pixel; out-of-bounds writes are dropped
    pub fn put_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Copy `image` with its top-left corner at (x, y), clipped to the buffer.
    /// The buffer starts transparent, so plain copying equals source-over.
    pub fn blit(&mut self, image: &RgbaImage, x: i64, y: i64) {
        for (ix, iy, pixel) in image.enumerate_pixels() {
            self.put_pixel(x + ix as i64, y + iy as i64, pixel.0);
        }
    }

    /// Copy `image` so that it sits in the middle of the buffer
    pub fn blit_centered(&mut self, image: &RgbaImage) {
        let (iw, ih) = image.dimensions();
        let x = (self.width as f64 / 2.0 - iw as f64 / 2.0).floor() as i64;
        let y = (self.height as f64 / 2.0 - ih as f64 / 2.0).floor() as i64;
        self.blit(image, x, y);
    }
}

/// One grid point of a visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: u32,
    pub y: u32,
    pub color: Rgb<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    gap: u32,
}

impl Sampler {
    // A zero gap would never advance; treat it as 1
    pub fn new(gap: u32) -> Self {
        Self { gap: gap.max(1) }
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Row-major scan, top to bottom and left to right, skipping pixels
    /// with zero alpha
    pub fn sample(&self, buffer: &PixelBuffer) -> Vec<Sample> {
        let step = self.gap as usize;
        let mut samples = Vec::new();

        for y in (0..buffer.height()).step_by(step) {
            for x in (0..buffer.width()).step_by(step) {
                let [r, g, b, alpha] = buffer.pixel(x, y);
                if alpha > 0 {
                    samples.push(Sample {
                        x,
                        y,
                        color: rgb(r, g, b),
                    });
                }
            }
        }

        samples
    }
}
