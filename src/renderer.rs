/*
 * Renderer Module
 *
 * This module draws one frame: the particles through the render loop, the
 * optional debug overlay, then the control panel on top.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::surface::NannouSurface;
use crate::ui;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    let mut surface = NannouSurface::new(&draw, window_rect);
    model.render_loop.present(&model.field, &mut surface);

    if model.controls.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("Failed to draw frame: {err:?}");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("Failed to draw controls: {err:?}");
    }
}
