//! Decorative juice bursts spawned when a dish is sliced
//!
//! Particles never affect gameplay. There is no cap on their number; a burst
//! per slice decays in at most a second.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::kinematics::{polar, random_range};
use crate::consts::PARTICLE_GRAVITY;

/// A single burst fragment
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// CSS color of the dish that produced it
    pub color: &'static str,
    /// Remaining life fraction, 1 → 0
    pub life: f32,
    /// Lifespan in seconds
    pub max_life: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

/// Owns every live particle
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
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

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn `count` fragments flying out of `pos`, biased upward
    pub fn emit<R: Rng + ?Sized>(&mut self, pos: Vec2, color: &'static str, count: usize, rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = random_range(rng, 0.0, TAU);
            let speed = random_range(rng, 100.0, 400.0);
            let vel = polar(angle, speed) + Vec2::new(0.0, -100.0);

            self.particles.push(Particle {
                pos,
                vel,
                size: random_range(rng, 4.0, 12.0),
                color,
                life: 1.0,
                max_life: random_range(rng, 0.5, 1.0),
                rotation: random_range(rng, 0.0, TAU),
                rotation_speed: random_range(rng, -10.0, 10.0),
            });
        }
    }

    /// Integrate gravity, age every particle and drop the dead ones
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.vel.y += PARTICLE_GRAVITY * dt;
            particle.pos += particle.vel * dt;
            particle.rotation += particle.rotation_speed * dt;
            particle.life -= dt / particle.max_life;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_count_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ParticleSystem::new();
        system.emit(Vec2::new(10.0, 20.0), "#fff", 50, &mut rng);

        assert_eq!(system.len(), 50);
        for p in system.particles() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.size >= 4.0 && p.size <= 12.0);
            assert!(p.max_life >= 0.5 && p.max_life <= 1.0);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, "#fff");
            // Radial speed 100..400 plus a -100 vertical bias
            let radial = p.vel - Vec2::new(0.0, -100.0);
            assert!(radial.length() >= 99.9 && radial.length() <= 400.1);
        }
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut system = ParticleSystem::new();
        system.emit(Vec2::ZERO, "#fff", 1, &mut rng);
        let before = system.particles()[0].vel;

        system.update(0.1);
        let after = system.particles()[0].vel;
        assert_eq!(after.x, before.x);
        assert!((after.y - before.y - PARTICLE_GRAVITY * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut system = ParticleSystem::new();
        system.emit(Vec2::ZERO, "#fff", 30, &mut rng);

        system.update(0.4);
        assert_eq!(system.len(), 30, "nobody dies before 0.5s");

        for _ in 0..10 {
            system.update(0.1);
        }
        assert!(system.is_empty(), "everybody dies by 1.0s");
    }

    #[test]
    fn test_life_decays_by_max_life() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        system.emit(Vec2::ZERO, "#fff", 1, &mut rng);
        let max_life = system.particles()[0].max_life;

        system.update(0.25);
        let life = system.particles()[0].life;
        assert!((life - (1.0 - 0.25 / max_life)).abs() < 1e-5);
    }
}
