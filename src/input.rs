/*
 * Input Module
 *
 * This module handles window events for the particle effect.
 *
 * Features:
 * - Pointer tracking for the repulsion force
 * - Rebuild on window resize
 * - Warp shortcut (W) for image effects
 * - Forwarding raw events to the control panel
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::surface::window_to_surface;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let point = window_to_surface(pos, app.window_rect());
    model.pointer.record(point.x, point.y);
}

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::W && !model.visual.is_text() {
        model.field.warp();
    }
}

// The rebuild itself waits for the next frame boundary
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.render_loop.request_resize(size.x as f64, size.y as f64);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
