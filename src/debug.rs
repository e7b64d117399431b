/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that holds the metrics shown in
 * the control panel and the on-screen overlay:
 * - FPS (frames per second)
 * - Frame time
 * - Number of particles
 * - Last known pointer position
 */

use std::time::Duration;

use glam::DVec2;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub particles: usize,
    pub pointer: Option<DVec2>,
    pub frames_presented: u64,
}

impl DebugInfo {
    // Lines for the overlay, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let pointer = match self.pointer {
            Some(p) => format!("Pointer: ({:.0}, {:.0})", p.x, p.y),
            None => "Pointer: none".to_string(),
        };
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particles),
            pointer,
            format!("Frames: {}", self.frames_presented),
        ]
    }
}
