/*
 * Particle Module
 *
 * This module defines the Particle struct, one animated square of the
 * effect. Each particle follows two rules every update:
 * 1. Repulsion: inside the influence radius the pointer pushes it away
 * 2. Homing: a fraction `ease` of the gap to its home is closed
 *
 * The integrator is plain explicit Euler stepped once per frame, with no
 * time-delta normalization, so the motion speed follows the display rate.
 */

use glam::{DVec2, I64Vec2};
use nannou::prelude::*;

use crate::surface::Surface;

/// Floor for the squared distance in the repulsion force. It only keeps a
/// pointer sitting exactly on a particle from dividing by zero; any real
/// sub-pixel distance gets its full `radius / r2` push.
pub const MIN_DISTANCE_SQUARED: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    home: I64Vec2,
    color: Rgb<u8>,
    size: f64,
    friction: f64,
    ease: f64,
}

impl Particle {
    pub fn new(
        position: DVec2,
        home: DVec2,
        color: Rgb<u8>,
        size: f64,
        friction: f64,
        ease: f64,
    ) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            home: home.floor().as_i64vec2(),
            color,
            size,
            friction,
            ease,
        }
    }

    pub fn home(&self) -> I64Vec2 {
        self.home
    }

    pub fn color(&self) -> Rgb<u8> {
        self.color
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn ease(&self) -> f64 {
        self.ease
    }

    pub fn distance_to_home(&self) -> f64 {
        self.position.distance(self.home.as_dvec2())
    }

    // Advance one frame. `radius` is compared against the squared distance
    // to the pointer, so it is an area-like threshold, not a length.
    pub fn update(&mut self, pointer: Option<DVec2>, radius: f64) {
        if let Some(pointer) = pointer {
            let d = pointer - self.position;
            let distance_sq = d.x * d.x + d.y * d.y;

            if distance_sq < radius {
                // d points from the particle to the pointer, the negative
                // force sends the particle the other way
                let force = -radius / distance_sq.max(MIN_DISTANCE_SQUARED);
                let angle = d.y.atan2(d.x);
                self.velocity.x += force * angle.cos();
                self.velocity.y += force * angle.sin();
            }
        }

        self.velocity *= self.friction;
        self.position += self.velocity + (self.home.as_dvec2() - self.position) * self.ease;
    }

    /// Move to a new position without touching anything else
    pub fn warp_to(&mut self, position: DVec2) {
        self.position = position;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_square(self.position.x, self.position.y, self.size, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn particle_at(position: DVec2, home: DVec2) -> Particle {
        Particle::new(position, home, rgb(255, 0, 0), 3.0, 0.7, 0.05)
    }

    #[test]
    fn home_is_floored() {
        let p = particle_at(DVec2::ZERO, DVec2::new(10.9, -2.1));
        assert_eq!(p.home(), I64Vec2::new(10, -3));
    }

    #[test]
    fn settles_without_pointer() {
        let mut p = particle_at(DVec2::new(500.0, 20.0), DVec2::new(40.0, 80.0));
        let mut previous = p.distance_to_home();
        for _ in 0..500 {
            p.update(None, 10_000.0);
            let current = p.distance_to_home();
            assert!(current <= previous + 1e-9);
            previous = current;
        }
        assert!(previous < 1e-6);
    }

    #[test]
    fn first_step_closes_ease_fraction_of_gap() {
        let mut p = particle_at(DVec2::new(100.0, 0.0), DVec2::ZERO);
        p.update(None, 10_000.0);
        assert!((p.position.x - 95.0).abs() < 1e-12);
        assert_eq!(p.position.y, 0.0);
    }

    #[test]
    fn pointer_inside_radius_pushes_away() {
        let mut p = particle_at(DVec2::new(50.0, 50.0), DVec2::new(50.0, 50.0));
        // Pointer to the left of the particle
        p.update(Some(DVec2::new(40.0, 50.0)), 10_000.0);

        // force = -10000 / 100 = -100 along +x after the sign flip, times friction
        assert!((p.velocity.x - 70.0).abs() < 1e-9);
        assert!(p.velocity.y.abs() < 1e-9);
        assert!(p.position.x > 50.0);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let mut with_pointer = particle_at(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0));
        let mut without = with_pointer.clone();

        // 200^2 = 40000 > radius
        with_pointer.update(Some(DVec2::new(200.0, 0.0)), 10_000.0);
        without.update(None, 10_000.0);

        assert_eq!(with_pointer.position, without.position);
        assert_eq!(with_pointer.velocity, DVec2::ZERO);
    }

    #[test]
    fn coincident_pointer_stays_finite() {
        let mut p = particle_at(DVec2::new(5.0, 5.0), DVec2::new(5.0, 5.0));
        p.update(Some(DVec2::new(5.0, 5.0)), 10_000.0);
        assert!(p.position.is_finite());
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn sub_pixel_distance_gets_the_full_force() {
        // r2 = 0.25, so the push is 4 * radius along -x before friction
        let mut p = particle_at(DVec2::ZERO, DVec2::ZERO);
        p.update(Some(DVec2::new(0.5, 0.0)), 100.0);
        assert!((p.velocity.x - -400.0 * 0.7).abs() < 1e-9, "velocity {}", p.velocity);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn warp_only_moves_position() {
        let mut p = particle_at(DVec2::new(1.0, 1.0), DVec2::new(7.0, 8.0));
        p.update(Some(DVec2::new(2.0, 1.0)), 10_000.0);
        let velocity = p.velocity;

        p.warp_to(DVec2::new(300.0, 200.0));

        assert_eq!(p.position, DVec2::new(300.0, 200.0));
        assert_eq!(p.velocity, velocity);
        assert_eq!(p.home(), I64Vec2::new(7, 8));
    }

    #[test]
    fn draws_square_at_position() {
        let p = particle_at(DVec2::new(12.5, 7.25), DVec2::ZERO);
        let mut surface = RecordingSurface::new();
        p.draw(&mut surface);

        assert_eq!(surface.squares.len(), 1);
        let square = surface.squares[0];
        assert_eq!((square.x, square.y, square.size), (12.5, 7.25, 3.0));
        assert_eq!(square.color, rgb(255, 0, 0));
    }
}
