//! Decorative background: drifting particles over a slow gradient sweep.
//!
//! The animation knows nothing about the timetable. The host asks an
//! [`Animator`] for one [`Frame`] per redraw and paints the draw list on
//! whatever surface it has (a canvas, or a terminal via [`ascii`]). There is
//! no stop condition; the loop lives as long as the host does.

pub mod ascii;
mod gradient;

pub use gradient::{gradient_sweep, GradientBand, GradientStop, GRADIENT_COLORS};

use std::f64::consts::TAU;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::Serialize;

/// Pastel particle colors.
pub const PARTICLE_COLORS: [&str; 3] = [
    "rgba(110, 193, 255, 0.4)",
    "rgba(176, 102, 255, 0.4)",
    "rgba(255, 138, 200, 0.4)",
];

/// Translucent fill laid over the previous frame so particles leave trails.
pub const FADE_FILL: &str = "rgba(12, 12, 24, 0.1)";

pub const DEFAULT_PARTICLES: usize = 30;

/// Particles this far outside the surface are recycled.
const EDGE_MARGIN: f64 = 50.0;
const WAVE_STEP: f64 = 0.02;
const LIFE_STEP: f64 = 0.5;
const MAX_OPACITY: f64 = 0.4;
const GLOW_BLUR: f64 = 20.0;

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    fn contains_with_margin(&self, x: f64, y: f64, margin: f64) -> bool {
        x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub color: &'static str,
    pub life: f64,
    pub original_life: f64,
    pub wave_offset: f64,
    pub wave_amplitude: f64,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let life = 200.0 + rng.gen::<f64>() * 200.0;
        Self {
            x: rng.gen::<f64>() * bounds.width,
            y: rng.gen::<f64>() * bounds.height,
            size: rng.gen::<f64>() * 2.0 + 0.5,
            speed_x: (rng.gen::<f64>() - 0.5) * 0.8,
            speed_y: (rng.gen::<f64>() - 0.5) * 0.8,
            color: PARTICLE_COLORS[rng.gen_range(0..PARTICLE_COLORS.len())],
            life,
            original_life: life,
            wave_offset: rng.gen::<f64>() * TAU,
            wave_amplitude: rng.gen::<f64>() * 2.0,
        }
    }

    /// Advance one frame. Returns `true` when the particle was recycled.
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> bool {
        self.wave_offset += WAVE_STEP;
        self.x += self.speed_x + self.wave_offset.sin() * self.wave_amplitude;
        self.y += self.speed_y + self.wave_offset.cos() * self.wave_amplitude;
        self.life -= LIFE_STEP;

        if self.life <= 0.0 || !bounds.contains_with_margin(self.x, self.y, EDGE_MARGIN) {
            *self = Self::spawn(bounds, rng);
            return true;
        }
        false
    }

    /// Fades out over the particle's lifetime.
    pub fn opacity(&self) -> f64 {
        if self.original_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.original_life).clamp(0.0, 1.0) * MAX_OPACITY
    }

    pub fn sprite(&self) -> ParticleSprite {
        ParticleSprite {
            x: self.x,
            y: self.y,
            radius: self.size,
            color: self.color,
            opacity: self.opacity(),
            glow: GLOW_BLUR,
        }
    }
}

/// A fixed-size pool of particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    rng: Mcg128Xsl64,
}

impl ParticleField {
    /// `seed = None` draws from OS entropy.
    pub fn new(count: usize, bounds: Bounds, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        let particles = (0..count).map(|_| Particle::spawn(bounds, &mut rng)).collect();
        Self {
            particles,
            bounds,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// New surface size. Particles left outside are recycled on their next step.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Advance every particle one frame. Returns how many were recycled.
    pub fn step(&mut self) -> usize {
        let mut recycled = 0;
        for particle in &mut self.particles {
            if particle.update(self.bounds, &mut self.rng) {
                recycled += 1;
            }
        }
        recycled
    }
}

/// One particle as it should be painted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleSprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
    pub opacity: f64,
    /// Shadow blur radius for the soft glow.
    pub glow: f64,
}

/// Draw list for one redraw, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub bounds: Bounds,
    pub fade: &'static str,
    pub bands: Vec<GradientBand>,
    pub particles: Vec<ParticleSprite>,
}

/// Produces frames for the background.
#[derive(Debug, Clone)]
pub struct Animator {
    field: ParticleField,
    frames: u64,
}

impl Animator {
    pub fn new(field: ParticleField) -> Self {
        Self { field, frames: 0 }
    }

    pub fn with_defaults(bounds: Bounds) -> Self {
        Self::new(ParticleField::new(DEFAULT_PARTICLES, bounds, None))
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.field.resize(bounds);
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Build the next frame. `now_ms` is wall-clock milliseconds and only
    /// drives the gradient phase.
    pub fn frame(&mut self, now_ms: u64) -> Frame {
        let bounds = self.field.bounds();
        let bands = gradient_sweep(bounds, now_ms);
        self.field.step();
        self.frames += 1;
        Frame {
            bounds,
            fade: FADE_FILL,
            bands,
            particles: self.field.particles().iter().map(Particle::sprite).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    fn still_particle(x: f64, y: f64, life: f64) -> Particle {
        Particle {
            x,
            y,
            size: 1.0,
            speed_x: 0.3,
            speed_y: -0.2,
            color: PARTICLE_COLORS[0],
            life,
            original_life: 300.0,
            wave_offset: 0.0,
            wave_amplitude: 0.0,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(bounds(), &mut rng);
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert!((0.5..2.5).contains(&p.size));
            assert!(p.speed_x.abs() <= 0.4 && p.speed_y.abs() <= 0.4);
            assert!((200.0..400.0).contains(&p.life));
            assert_eq!(p.life, p.original_life);
            assert!((0.0..TAU).contains(&p.wave_offset));
            assert!((0.0..2.0).contains(&p.wave_amplitude));
            assert!(PARTICLE_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn update_moves_by_speed_and_ages() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let mut p = still_particle(100.0, 100.0, 250.0);
        assert!(!p.update(bounds(), &mut rng));
        assert!((p.x - 100.3).abs() < 1e-9);
        assert!((p.y - 99.8).abs() < 1e-9);
        assert_eq!(p.life, 249.5);
        assert!((p.wave_offset - 0.02).abs() < 1e-12);
    }

    #[test]
    fn wobble_follows_the_wave() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let mut p = still_particle(100.0, 100.0, 250.0);
        p.wave_amplitude = 1.5;
        p.update(bounds(), &mut rng);
        let expected_x = 100.0 + 0.3 + 0.02f64.sin() * 1.5;
        let expected_y = 100.0 - 0.2 + 0.02f64.cos() * 1.5;
        assert!((p.x - expected_x).abs() < 1e-9);
        assert!((p.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn expired_particle_is_recycled() {
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        let mut p = still_particle(100.0, 100.0, 0.5);
        assert!(p.update(bounds(), &mut rng));
        assert!(p.life >= 200.0);
    }

    #[test]
    fn particle_outside_margin_is_recycled() {
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        let mut inside_margin = still_particle(-49.0, 300.0, 250.0);
        assert!(!inside_margin.update(bounds(), &mut rng));

        let mut outside = still_particle(851.0, 300.0, 250.0);
        assert!(outside.update(bounds(), &mut rng));
        assert!(outside.x <= 800.0);
    }

    #[test]
    fn opacity_fades_with_life() {
        let p = still_particle(0.0, 0.0, 150.0);
        assert!((p.opacity() - 0.2).abs() < 1e-12);
        assert_eq!(still_particle(0.0, 0.0, 300.0).opacity(), 0.4);
    }

    #[test]
    fn field_keeps_a_fixed_pool() {
        let mut field = ParticleField::new(30, bounds(), Some(42));
        for _ in 0..1_000 {
            field.step();
            assert_eq!(field.particles().len(), 30);
        }
        assert!(field.particles().iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn same_seed_same_frames() {
        let mut a = Animator::new(ParticleField::new(10, bounds(), Some(9)));
        let mut b = Animator::new(ParticleField::new(10, bounds(), Some(9)));
        for t in 0..50 {
            assert_eq!(a.frame(t * 16), b.frame(t * 16));
        }
        assert_eq!(a.frames_drawn(), 50);
    }

    #[test]
    fn shrinking_recycles_stragglers() {
        let mut field = ParticleField::new(30, Bounds::new(2000.0, 2000.0), Some(5));
        field.resize(Bounds::new(100.0, 100.0));
        field.step();
        assert!(field
            .particles()
            .iter()
            .all(|p| p.x <= 150.0 + 2.5 && p.y <= 150.0 + 2.5));
    }
}
