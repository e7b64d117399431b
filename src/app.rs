/*
 * Application Module
 *
 * This module defines the main application model for the particle effect
 * and wires it into nannou: window creation, the per-frame update and
 * teardown. Window events are handled in the input module, drawing in the
 * renderer module.
 */

use std::sync::Arc;

use nannou::prelude::*;
use nannou_egui::Egui;

use clap::Parser;

use crate::cli::{Cli, Launch};
use crate::debug::DebugInfo;
use crate::field::ParticleField;
use crate::input::{key_pressed, mouse_moved, raw_window_event, resized};
use crate::pointer::PointerTracker;
use crate::render_loop::RenderLoop;
use crate::renderer::view;
use crate::ui::{self, Controls};
use crate::visual::Visual;

// Main model for the application
pub struct Model {
    pub field: ParticleField,
    pub visual: Visual,
    pub render_loop: RenderLoop,
    pub pointer: Arc<PointerTracker>,
    pub egui: Egui,
    pub controls: Controls,
    pub debug_info: DebugInfo,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // nannou only hands `&App` to the model, so the arguments are read here
    let launch = match Cli::parse().into_launch() {
        Ok(launch) => launch,
        Err(err) => {
            log::error!("Failed to prepare the particle effect: {err}");
            app.quit();
            Launch::demo()
        }
    };

    // Window covers 80% of the primary monitor when one is known
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = app
        .new_window()
        .title("Pixel Particles")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(mouse_moved)
        .key_pressed(key_pressed)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window vanished right after creation");
    let egui = Egui::from_window(&window);
    let rect = window.rect();

    let field = ParticleField::new(launch.params.clone(), rect.w() as f64, rect.h() as f64);
    let pointer = field.pointer();
    let controls = Controls::new(&launch.params, launch.visual.content());

    // First build happens at the first frame boundary like any other
    let mut render_loop = RenderLoop::new();
    render_loop.request_rebuild();

    Model {
        field,
        visual: launch.visual,
        render_loop,
        pointer,
        egui,
        controls,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.controls,
        &model.debug_info,
        model.visual.is_text(),
    );

    if response.warp {
        model.field.warp();
    }
    if let Some(radius) = response.radius {
        model.field.set_radius(radius);
    }
    if let Some(gap) = response.gap {
        model.render_loop.request_gap(gap);
    }
    if let Some(text) = response.text {
        model.render_loop.request_text(text);
    }

    model.render_loop.advance(&mut model.field, &mut model.visual);

    model.debug_info.particles = model.field.len();
    model.debug_info.pointer = model.pointer.latest();
    model.debug_info.frames_presented = model.render_loop.frames_presented();
}

// The host is tearing the window down
pub fn exit(_app: &App, mut model: Model) {
    model.render_loop.stop();
    log::info!(
        "Stopped after {} frames with {} particles",
        model.render_loop.frames_presented(),
        model.field.len()
    );
}
