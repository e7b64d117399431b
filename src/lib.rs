/*
 * Pixel Particles - Module Definitions
 *
 * This file defines the module structure for the particle effect. The
 * simulation core (particle, field, sampler, pointer, render_loop) does not
 * need a window and can run headless against any Surface; the remaining
 * modules wire it into a nannou window with an egui control panel.
 */

// Re-export key components for easier access
pub use error::{Error, Result};
pub use field::ParticleField;
pub use params::{EffectParams, Motion, Span, Spawn};
pub use particle::Particle;
pub use pointer::PointerTracker;
pub use render_loop::{LoopState, RenderLoop};
pub use sampler::{PixelBuffer, Sample, Sampler};
pub use surface::{NannouSurface, RecordingSurface, Surface};
pub use text::TextStyle;
pub use visual::Visual;

// Define modules
pub mod app;
pub mod cli;
pub mod debug;
pub mod error;
pub mod field;
pub mod input;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod render_loop;
pub mod renderer;
pub mod sampler;
pub mod surface;
pub mod text;
pub mod ui;
pub mod visual;
