/*
 * UI Module
 *
 * This module contains the control panel built with nannou_egui and the
 * on-screen debug overlay. The panel edits a Controls struct; what changed
 * is reported back as a UiResponse so the app can turn it into field
 * updates or rebuild requests.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::EffectParams;

/// Values edited through the control panel
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub text: String,
    pub gap: u32,
    pub radius: f64,
    pub show_debug: bool,
    // Text the field was last built from
    applied_text: String,
}

/// What the user asked for during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiResponse {
    pub warp: bool,
    pub gap: Option<u32>,
    pub radius: Option<f64>,
    pub text: Option<String>,
}

impl Controls {
    pub fn new(params: &EffectParams, text: Option<&str>) -> Self {
        let text = text.unwrap_or_default().to_string();
        Self {
            applied_text: text.clone(),
            text,
            gap: params.gap,
            radius: params.radius,
            show_debug: false,
        }
    }

    // Compare against the values from before the panel ran. Edits that only
    // touch trailing spaces do not rebuild, a new word has to start first.
    pub fn detect_changes(&mut self, before: &Controls) -> UiResponse {
        let mut response = UiResponse::default();

        if self.gap != before.gap {
            response.gap = Some(self.gap);
        }
        if self.radius != before.radius {
            response.radius = Some(self.radius);
        }
        if self.text.trim_end() != self.applied_text.trim_end() {
            self.applied_text = self.text.clone();
            response.text = Some(self.text.clone());
        }

        response
    }
}

// Update the UI and return the requested changes
pub fn update_ui(
    egui: &mut Egui,
    controls: &mut Controls,
    debug_info: &DebugInfo,
    text_mode: bool,
) -> UiResponse {
    let before = controls.clone();
    let mut warp = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            if text_mode {
                ui.label("Text");
                ui.text_edit_singleline(&mut controls.text);
            } else if ui.button("Warp").clicked() {
                warp = true;
            }

            ui.collapsing("Particle Parameters", |ui| {
                ui.add(egui::Slider::new(&mut controls.gap, EffectParams::get_gap_range()).text("Gap"));
                ui.add(
                    egui::Slider::new(&mut controls.radius, EffectParams::get_radius_range())
                        .text("Pointer Radius"),
                );
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Particles: {}", debug_info.particles));
            ui.checkbox(&mut controls.show_debug, "Show Debug Info");
        });

    let mut response = controls.detect_changes(&before);
    response.warp = warp;
    response
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    // Background panel in the bottom-left corner, clear of the control panel
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines();
    let panel_width = 200.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let top_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = top_y - (i as f32 * line_height);

        // Fixed offset from the left edge, nannou centers text on its position
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
