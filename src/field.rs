/*
 * Particle Field Module
 *
 * The ParticleField owns every particle of the effect, in the scan order
 * the Sampler produced them, and the constants shared by all of them.
 * It is rebuilt from scratch whenever the visual, the surface size or the
 * grid spacing changes; particles are never added or removed otherwise.
 */

use std::sync::Arc;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::params::{EffectParams, Spawn};
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::sampler::{Sample, Sampler};
use crate::surface::Surface;
use crate::visual::Visual;

pub struct ParticleField {
    particles: Vec<Particle>,
    params: EffectParams,
    width: f64,
    height: f64,
    pointer: Arc<PointerTracker>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(params: EffectParams, width: f64, height: f64) -> Self {
        Self::with_rng(params, width, height, StdRng::from_entropy())
    }

    /// Field with a fixed seed, for reproducible runs
    pub fn with_seed(params: EffectParams, width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(params, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: EffectParams, width: f64, height: f64, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            params,
            width: width.max(0.0),
            height: height.max(0.0),
            pointer: Arc::new(PointerTracker::new()),
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Shared handle the input callbacks write the pointer into
    pub fn pointer(&self) -> Arc<PointerTracker> {
        Arc::clone(&self.pointer)
    }

    /// Takes effect on the next update
    pub fn set_radius(&mut self, radius: f64) {
        self.params.radius = radius;
    }

    /// Takes effect on the next rebuild
    pub fn set_gap(&mut self, gap: u32) {
        self.params.gap = gap.max(1);
    }

    /// Takes effect on the next rebuild
    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("Field resized to {width}x{height}");
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    // Pixel dimensions of the raster the visual is drawn into
    fn raster_size(&self) -> (u32, u32) {
        (self.width.floor() as u32, self.height.floor() as u32)
    }

    fn random_point(&mut self) -> DVec2 {
        DVec2::new(
            self.rng.gen::<f64>() * self.width,
            self.rng.gen::<f64>() * self.height,
        )
    }

    fn spawn_point(&mut self) -> DVec2 {
        match self.params.spawn {
            Spawn::Scatter => self.random_point(),
            Spawn::TopEdge => DVec2::new(self.rng.gen::<f64>() * self.width, 0.0),
        }
    }

    /// Discard every particle and sample the visual again at the current size
    pub fn rebuild(&mut self, visual: &Visual) {
        let (width, height) = self.raster_size();
        let buffer = visual.rasterize(width, height);
        let samples = Sampler::new(self.params.gap).sample(&buffer);
        self.populate(&samples);
        log::info!(
            "Rebuilt field: {} particles on a {width}x{height} surface (gap {})",
            self.particles.len(),
            self.params.gap
        );
    }

    /// Replace every particle with one fresh particle per sample
    pub fn populate(&mut self, samples: &[Sample]) {
        let size = self.params.gap.max(1) as f64;
        let motion = self.params.motion;

        let mut particles = Vec::with_capacity(samples.len());
        for sample in samples {
            let position = self.spawn_point();
            let (friction, ease) = motion.draw(&mut self.rng);
            particles.push(Particle::new(
                position,
                DVec2::new(sample.x as f64, sample.y as f64),
                sample.color,
                size,
                friction,
                ease,
            ));
        }
        self.particles = particles;
    }

    /// Advance every particle one frame
    pub fn update(&mut self) {
        // One pointer read per frame so every particle sees the same position
        let pointer = self.pointer.latest();
        let radius = self.params.radius;

        if self.params.parallel {
            self.particles
                .par_iter_mut()
                .for_each(|particle| particle.update(pointer, radius));
        } else {
            for particle in &mut self.particles {
                particle.update(pointer, radius);
            }
        }
    }

    /// Draw every particle in stored order, later particles on top
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    /// Throw every particle to a random point on the surface; homes stay put
    pub fn warp(&mut self) {
        log::debug!("Warping {} particles", self.particles.len());
        for i in 0..self.particles.len() {
            let position = self.random_point();
            self.particles[i].warp_to(position);
        }
    }
}
