//! Damped spring chain ("rope")
//!
//! A row of point masses joined by Hookean springs and hanging from a
//! draggable first particle. A spring only ever moves its *leading*
//! endpoint (the later particle), pulling it toward its predecessor, so
//! motion cascades down the chain link by link while gravity acts on every
//! particle. The trailing endpoint is left alone by that spring on purpose.
//!
//! Per tick:
//! 1. controls: pin the first particle's x to the anchor value
//! 2. springs in chain order: damp, kick and move the leading particle
//! 3. particles: set the acceleration to the current gravity

use crate::simulation::engine::Simulation;
use crate::simulation::forces::HookeSpring;
use crate::simulation::integrator::{damped_kick, euler_drift};
use crate::simulation::params::{floor_non_negative, floor_positive, MIN_MASS, MIN_STIFFNESS};
use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct SpringParticle {
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3, // gravity, refreshed every tick
    pub mass: f64,
}

impl SpringParticle {
    pub fn new(position: NVec3, mass: f64, gravity: f64) -> Self {
        Self {
            position,
            velocity: NVec3::zeros(),
            acceleration: NVec3::new(0.0, gravity, 0.0),
            mass: floor_positive(mass, MIN_MASS),
        }
    }
}

/// Spring between `leading` (moved) and `trailing` (only read)
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub leading: usize,
    pub trailing: usize,
    pub law: HookeSpring,
}

impl Spring {
    /// Force on the leading particle this tick
    pub fn force(&self, particles: &[SpringParticle]) -> NVec3 {
        self.law.force(&particles[self.leading].position, &particles[self.trailing].position)
    }

    /// Damp the leading particle's velocity, add force/mass and its
    /// acceleration, then move it
    pub fn update(&self, particles: &mut [SpringParticle], damping: f64, dt: f64) {
        let force = self.force(particles);
        let a = &mut particles[self.leading];
        let kick = force / a.mass + a.acceleration;
        damped_kick(&mut a.velocity, kick, damping, dt);
        euler_drift(&mut a.position, &a.velocity, dt);
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub count: usize, // number of particles
    pub k: f64,
    pub rest_length: f64,
    pub spacing: f64, // initial offset between neighbours along x and y
    pub top: f64, // y of the first particle
    pub mass: f64,
    pub gravity: f64,
    pub damping: f64, // per-tick velocity factor of a spring update
    pub anchor_x: f64, // initial x of the first particle
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            count: 10,
            k: 0.01,
            rest_length: 5.0,
            spacing: -95.0,
            top: 95.0,
            mass: 1.0,
            gravity: -0.1,
            damping: 0.9,
            anchor_x: 0.0,
        }
    }
}

/// Values a GUI may change between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainControls {
    pub gravity: f64,
    pub anchor_x: f64,
}

impl From<&ChainConfig> for ChainControls {
    fn from(config: &ChainConfig) -> Self {
        Self {
            gravity: config.gravity,
            anchor_x: config.anchor_x,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpringChain {
    pub particles: Vec<SpringParticle>,
    pub springs: Vec<Spring>,
    pub gravity: f64,
    pub damping: f64,
}

impl SpringChain {
    pub fn new(config: &ChainConfig) -> Self {
        let gravity = if config.gravity.is_finite() { config.gravity } else { 0.0 };

        // particle i starts at (i * spacing, top + i * spacing)
        let particles: Vec<SpringParticle> = (0..config.count)
            .map(|i| {
                let offset = i as f64 * config.spacing;
                SpringParticle::new(NVec3::new(offset, config.top + offset, 0.0), config.mass, gravity)
            })
            .collect();

        let law = HookeSpring {
            k: floor_positive(config.k, MIN_STIFFNESS),
            rest_length: floor_non_negative(config.rest_length),
        };
        let springs = (1..config.count)
            .map(|i| Spring { leading: i, trailing: i - 1, law })
            .collect();

        Self {
            particles,
            springs,
            gravity,
            damping: if config.damping.is_finite() { config.damping.clamp(0.0, 1.0) } else { 1.0 },
        }
    }

    /// First particle, the one the user drags
    pub fn anchor(&self) -> Option<&SpringParticle> {
        self.particles.first()
    }

    /// Last particle of the chain
    pub fn tail(&self) -> Option<&SpringParticle> {
        self.particles.last()
    }

    pub fn apply_controls(&mut self, controls: &ChainControls) {
        if controls.gravity.is_finite() {
            self.gravity = controls.gravity;
        }
        if let Some(first) = self.particles.first_mut() {
            if controls.anchor_x.is_finite() {
                first.position.x = controls.anchor_x;
            }
        }
    }
}

impl Simulation for SpringChain {
    type Input = ChainControls;
    type Config = ChainConfig;

    fn tick(&mut self, dt: f64, controls: &ChainControls) {
        self.apply_controls(controls);

        for spring in &self.springs {
            spring.update(&mut self.particles, self.damping, dt);
        }

        for particle in self.particles.iter_mut() {
            particle.acceleration = NVec3::new(0.0, self.gravity, 0.0);
        }
    }

    fn reset(&mut self, config: &ChainConfig) {
        *self = SpringChain::new(config);
    }
}
