/*
 * Render Loop Module
 *
 * One tick of the effect is: apply any pending rebuild, clear the surface,
 * draw every particle where it is now, then update every particle for the
 * next tick. Ticks never overlap and rebuilds only happen between them.
 *
 * Headless callers use `tick`. nannou splits a frame into an update
 * callback followed by a view callback, so the app drives `advance` from
 * update and `present` from view; `advance` only steps the physics once per
 * presented frame and applies rebuilds after that step, which keeps "draw,
 * then update" ordering for rebuilt particles too.
 */

use std::cell::Cell;

use crate::field::ParticleField;
use crate::surface::Surface;
use crate::visual::Visual;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Rebuild requests gathered between two ticks; later requests of the
/// same kind replace earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingRebuild {
    pub size: Option<(f64, f64)>,
    pub text: Option<String>,
    pub gap: Option<u32>,
}

impl PendingRebuild {
    fn merge(&mut self, other: PendingRebuild) {
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.text.is_some() {
            self.text = other.text;
        }
        if other.gap.is_some() {
            self.gap = other.gap;
        }
    }
}

#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frames_presented: Cell<u64>,
    frames_advanced: u64,
    pending: Option<PendingRebuild>,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames_presented: Cell::new(0),
            frames_advanced: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented.get()
    }

    // Only the host tearing down the window stops the loop
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.pending.is_some()
    }

    fn request(&mut self, rebuild: PendingRebuild) {
        self.pending.get_or_insert_with(PendingRebuild::default).merge(rebuild);
    }

    pub fn request_resize(&mut self, width: f64, height: f64) {
        log::debug!("Resize to {width}x{height} requested");
        self.request(PendingRebuild {
            size: Some((width, height)),
            ..Default::default()
        });
    }

    pub fn request_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("Text change to {text:?} requested");
        self.request(PendingRebuild {
            text: Some(text),
            ..Default::default()
        });
    }

    pub fn request_gap(&mut self, gap: u32) {
        log::debug!("Gap change to {gap} requested");
        self.request(PendingRebuild {
            gap: Some(gap),
            ..Default::default()
        });
    }

    /// Full rebuild from the visual, e.g. on first load
    pub fn request_rebuild(&mut self) {
        self.request(PendingRebuild::default());
    }

    // Apply queued requests; called only between ticks
    fn apply_pending(&mut self, field: &mut ParticleField, visual: &mut Visual) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        if let Some((width, height)) = pending.size {
            field.resize(width, height);
        }
        if let Some(gap) = pending.gap {
            field.set_gap(gap);
        }
        if let Some(text) = pending.text {
            if !visual.set_text(text) {
                log::warn!("Ignoring text change for an image visual");
            }
        }
        field.rebuild(visual);
        true
    }

    /// Clear the surface and draw every particle at its current position
    pub fn present<S: Surface + ?Sized>(&self, field: &ParticleField, surface: &mut S) {
        if self.state == LoopState::Stopped {
            return;
        }
        surface.clear();
        field.draw(surface);
        self.frames_presented.set(self.frames_presented.get() + 1);
    }

    /// Step the physics for the frame that was last presented, then apply
    /// pending rebuilds so new particles are drawn before their first
    /// update. Returns whether the particles were updated.
    pub fn advance(&mut self, field: &mut ParticleField, visual: &mut Visual) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }

        let updated = self.frames_presented.get() > self.frames_advanced;
        if updated {
            field.update();
            self.frames_advanced = self.frames_presented.get();
        }

        // The previous tick is complete, so this is a tick boundary
        self.apply_pending(field, visual);
        updated
    }

    /// One complete tick: pending rebuild, clear, draw, update
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        field: &mut ParticleField,
        visual: &mut Visual,
        surface: &mut S,
    ) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.apply_pending(field, visual);
        self.present(field, surface);
        field.update();
        self.frames_advanced = self.frames_presented.get();
    }
}
