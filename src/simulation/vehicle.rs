//! Kinematic car steering
//!
//! A single body driven by four boolean controls. Forward travel is along
//! -z; steering only acts while the car moves and scales with its speed;
//! friction eventually snaps the speed to exactly zero.
//!
//! Pedals, steering and friction act once per tick whatever the frame
//! length, so a coasting car stops within `max_speed / friction` ticks at
//! any `dt`. Only the drift along the heading is scaled by `dt`.

use crate::simulation::engine::Simulation;
use crate::simulation::integrator::euler_drift;
use crate::simulation::params::floor_non_negative;
use crate::simulation::states::{clamp_length, NVec3};

/// Control flags sampled between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct VehicleConfig {
    pub start: NVec3, // starting position
    pub acceleration: f64, // velocity gained per tick while a pedal is held
    pub friction: f64, // friction coefficient (also the snap-to-rest threshold)
    pub min_speed: f64,
    pub max_speed: f64,
    pub steering_rate: f64, // heading change per unit of speed per tick
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            start: NVec3::new(0.0, 50.0, 100.0),
            acceleration: 0.5,
            friction: 0.06,
            min_speed: 0.0,
            max_speed: 20.0,
            steering_rate: 0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub position: NVec3,
    pub velocity: NVec3, // only z carries longitudinal speed
    pub heading: f64, // rotation about y, radians
    pub acceleration: NVec3, // (0, 0, a)
    pub friction: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub steering_rate: f64,
}

impl Vehicle {
    pub fn new(config: &VehicleConfig) -> Self {
        let min_speed = floor_non_negative(config.min_speed);
        Self {
            position: config.start,
            velocity: NVec3::zeros(),
            heading: 0.0,
            acceleration: NVec3::new(0.0, 0.0, floor_non_negative(config.acceleration)),
            friction: floor_non_negative(config.friction),
            min_speed,
            max_speed: floor_non_negative(config.max_speed).max(min_speed),
            steering_rate: if config.steering_rate.is_finite() { config.steering_rate } else { 0.0 },
        }
    }

    /// Current speed (velocity magnitude)
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Unit vector the car drives along for positive `velocity.z`
    pub fn heading_direction(&self) -> NVec3 {
        NVec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    /// Steering sense for the current travel direction:
    /// +1 driving forward (-z), -1 reversing, so left stays left when backing up
    fn steering_sense(&self) -> f64 {
        if self.velocity.z < 0.0 { 1.0 } else { -1.0 }
    }

    fn steer(&mut self, controls: &Controls) {
        if self.velocity.z == 0.0 {
            return;
        }
        // authority shrinks to zero together with the speed
        let delta = self.steering_rate * self.steering_sense() * self.velocity.z.abs();
        if controls.left {
            self.heading += delta;
        }
        if controls.right {
            self.heading -= delta;
        }
    }

    fn apply_friction(&mut self) {
        if self.velocity.z.abs() < self.friction {
            // snap to rest instead of creeping toward it asymptotically
            self.velocity.z = 0.0;
        } else {
            let drag = NVec3::new(self.velocity.x, 0.0, self.velocity.z) * self.friction;
            self.velocity -= drag;
        }
    }
}

impl Simulation for Vehicle {
    type Input = Controls;
    type Config = VehicleConfig;

    fn tick(&mut self, dt: f64, controls: &Controls) {
        if controls.forward {
            self.velocity -= self.acceleration;
        }
        if controls.reverse {
            self.velocity += self.acceleration;
        }

        self.steer(controls);

        // move along the heading by the longitudinal speed
        let travel = self.heading_direction() * self.velocity.z;
        euler_drift(&mut self.position, &travel, dt);

        self.apply_friction();
        self.velocity = clamp_length(&self.velocity, self.min_speed, self.max_speed);
    }

    fn reset(&mut self, config: &VehicleConfig) {
        *self = Vehicle::new(config);
    }
}
