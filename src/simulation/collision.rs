//! Two blocks on a line against a wall
//!
//! The light block sits between the wall and a heavy block sliding toward
//! it. Every block-block and block-wall contact is perfectly elastic and
//! counted. With a mass ratio of 100^(d-1) the final count spells the
//! first d digits of pi, which only works when energy is conserved at a
//! fine time resolution: each frame is split into a fixed number of
//! micro-steps instead of one large step.

use crate::simulation::engine::Simulation;
use crate::simulation::forces::elastic_exchange;
use crate::simulation::params::{floor_positive, MIN_LENGTH, MIN_MASS};

pub const MIN_DIGITS: u32 = 1;
pub const MAX_DIGITS: u32 = 7;

/// Heavy block mass for a requested digit count: 100^(digits - 1)
pub fn mass_for_digits(digits: u32) -> f64 {
    let digits = digits.clamp(MIN_DIGITS, MAX_DIGITS);
    100f64.powi(digits as i32 - 1)
}

/// A block seen as the interval [position - half_width, position + half_width]
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub position: f64,
    pub velocity: f64,
    pub mass: f64,
    pub half_width: f64,
    pub reset_position: f64,
    pub reset_velocity: f64,
}

impl Block {
    /// Block starting at its reset position with its reset velocity
    pub fn new(position: f64, velocity: f64, mass: f64, width: f64) -> Self {
        Self {
            position,
            velocity,
            mass: floor_positive(mass, MIN_MASS),
            half_width: floor_positive(width, MIN_LENGTH) / 2.0,
            reset_position: position,
            reset_velocity: velocity,
        }
    }

    /// True unless the two intervals are strictly separated (touching counts)
    pub fn collide(&self, other: &Block) -> bool {
        !(self.position + self.half_width < other.position - other.half_width
            || self.position - self.half_width > other.position + other.half_width)
    }

    /// Velocity this block leaves a collision with `other` with
    pub fn bounce(&self, other: &Block) -> f64 {
        elastic_exchange(self.mass, self.velocity, other.mass, other.velocity).0
    }

    /// Reflect off a wall on the left; true when contact happened this step
    pub fn hit_wall(&mut self, wall: f64) -> bool {
        if self.position < wall + self.half_width {
            self.velocity = -self.velocity;
            true
        } else {
            false
        }
    }

    pub fn advance(&mut self, h: f64) {
        self.position += self.velocity * h;
    }

    pub fn momentum(&self) -> f64 {
        self.mass * self.velocity
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockConfig {
    pub position: f64,
    pub velocity: f64, // per unit of dt
    pub mass: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct CollisionConfig {
    pub wall: f64, // x of the wall's face
    pub light: BlockConfig,
    pub heavy: BlockConfig, // mass is overridden by mass_digits
    pub mass_digits: u32,
    pub sub_steps: usize, // micro-steps per tick
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            wall: -350.0,
            light: BlockConfig { position: -300.0, velocity: 0.0, mass: 1.0, width: 50.0 },
            heavy: BlockConfig { position: -100.0, velocity: -1.0, mass: 1.0, width: 50.0 },
            mass_digits: 7,
            sub_steps: 10_000,
        }
    }
}

/// Per-frame input: the "mass in powers of 100" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionInput {
    pub mass_digits: u32,
}

#[derive(Debug, Clone)]
pub struct Collision {
    pub light: Block,
    pub heavy: Block,
    pub wall: f64,
    sub_steps: usize,
    collisions: u64,
}

impl Collision {
    pub fn new(config: &CollisionConfig) -> Self {
        let light = Block::new(config.light.position, config.light.velocity, config.light.mass, config.light.width);
        let heavy = Block::new(
            config.heavy.position,
            config.heavy.velocity,
            mass_for_digits(config.mass_digits),
            config.heavy.width,
        );
        Self {
            light,
            heavy,
            wall: config.wall,
            sub_steps: config.sub_steps.max(1),
            collisions: 0,
        }
    }

    /// Contacts counted since the last reset (block-block and block-wall)
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn heavy_mass(&self) -> f64 {
        self.heavy.mass
    }

    pub fn sub_steps(&self) -> usize {
        self.sub_steps
    }

    pub fn momentum(&self) -> f64 {
        self.light.momentum() + self.heavy.momentum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.light.kinetic_energy() + self.heavy.kinetic_energy()
    }

    /// No further contact is possible: the light block moves right and the
    /// heavy block moves away at least as fast
    pub fn is_settled(&self) -> bool {
        self.light.velocity >= 0.0 && self.heavy.velocity >= self.light.velocity
    }

    /// One micro-step of length h: resolve contact, move, check the wall
    pub fn step(&mut self, h: f64) {
        if self.light.collide(&self.heavy) {
            // both from pre-collision velocities
            let v_light = self.light.bounce(&self.heavy);
            let v_heavy = self.heavy.bounce(&self.light);
            self.light.velocity = v_light;
            self.heavy.velocity = v_heavy;
            self.collisions += 1;
        }

        self.light.advance(h);
        self.heavy.advance(h);

        if self.light.hit_wall(self.wall) {
            self.collisions += 1;
        }
    }
}

impl Simulation for Collision {
    type Input = CollisionInput;
    type Config = CollisionConfig;

    /// Runs `sub_steps` micro-steps of length dt / sub_steps, a fixed count
    /// regardless of dt so runs are reproducible at any frame rate
    fn tick(&mut self, dt: f64, input: &CollisionInput) {
        self.heavy.mass = mass_for_digits(input.mass_digits);

        let h = dt / self.sub_steps as f64;
        for _ in 0..self.sub_steps {
            self.step(h);
        }
    }

    fn reset(&mut self, config: &CollisionConfig) {
        *self = Collision::new(config);
    }
}
