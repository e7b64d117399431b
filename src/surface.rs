/*
 * Surface Module
 *
 * The particle field draws through the Surface trait, an immediate-mode
 * target that only needs to clear itself and fill squares. Coordinates are
 * canvas-style: origin at the top-left corner, y growing downwards.
 *
 * - NannouSurface draws into a nannou `Draw`, converting to nannou's
 *   centered, y-up window coordinates
 * - RecordingSurface keeps the calls in memory for headless runs and tests
 */

use glam::DVec2;
use nannou::prelude::*;

pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Fill an axis-aligned square whose top-left corner is at (x, y).
    /// Squares partly or fully off the surface are simply clipped.
    fn fill_square(&mut self, x: f64, y: f64, size: f64, color: Rgb<u8>);
}

// Convert a nannou window point to surface coordinates
pub fn window_to_surface(point: Vec2, window_rect: Rect) -> DVec2 {
    DVec2::new(
        (point.x - window_rect.left()) as f64,
        (window_rect.top() - point.y) as f64,
    )
}

// Convert a surface point to a nannou window point
pub fn surface_to_window(point: DVec2, window_rect: Rect) -> Vec2 {
    vec2(
        window_rect.left() + point.x as f32,
        window_rect.top() - point.y as f32,
    )
}

pub struct NannouSurface<'a> {
    draw: &'a Draw,
    window_rect: Rect,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, window_rect: Rect) -> Self {
        Self { draw, window_rect }
    }
}

impl Surface for NannouSurface<'_> {
    fn clear(&mut self) {
        self.draw.background().color(BLACK);
    }

    fn fill_square(&mut self, x: f64, y: f64, size: f64, color: Rgb<u8>) {
        // nannou positions rectangles by their center
        let half = size / 2.0;
        let center = surface_to_window(DVec2::new(x + half, y + half), self.window_rect);
        let side = size as f32;

        self.draw
            .rect()
            .xy(center)
            .w_h(side, side)
            .color(color);
    }
}

/// One recorded `fill_square` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledSquare {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb<u8>,
}

/// Surface that remembers what was drawn since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub squares: Vec<FilledSquare>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.squares.clear();
        self.clears += 1;
    }

    fn fill_square(&mut self, x: f64, y: f64, size: f64, color: Rgb<u8>) {
        self.squares.push(FilledSquare { x, y, size, color });
    }
}
