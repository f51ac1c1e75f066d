//! Coupled double pendulum
//!
//! Two point masses on rigid massless rods: the inner node hangs from a
//! fixed pivot, the outer node from the inner one. Angular accelerations
//! come from the closed-form Lagrangian equations of the planar double
//! pendulum. Both are evaluated from the same prior state before either
//! node moves, so the update is tied rather than sequential.
//!
//! Positions are derived, never integrated: every node stores an
//! [`Anchor`] (a fixed point or the index of an earlier node) and
//! [`resolve_positions`] walks the nodes anchor-first.

use std::f64::consts::FRAC_PI_2;

use crate::simulation::engine::Simulation;
use crate::simulation::integrator::damped_kick;
use crate::simulation::params::{floor_positive, MIN_LENGTH, MIN_MASS};
use crate::simulation::states::{NVec3, Trail};

/// Point a node hangs from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Fixed point in world space
    Fixed(NVec3),
    /// Index of an earlier node in the same chain
    Node(usize),
}

#[derive(Debug, Clone)]
pub struct PendulumNode {
    pub length: f64, // rod length
    pub angle: f64, // from the downward vertical, radians
    pub mass: f64,
    pub angular_velocity: f64, // rad per unit time
    pub angular_acceleration: f64, // accumulated for the current tick, cleared after integration
    pub position: NVec3, // derived from angle, length and anchor
    pub anchor: Anchor,
}

impl PendulumNode {
    pub fn new(length: f64, angle: f64, mass: f64, anchor: Anchor) -> Self {
        Self {
            length: floor_positive(length, MIN_LENGTH),
            angle,
            mass: floor_positive(mass, MIN_MASS),
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            position: NVec3::zeros(),
            anchor,
        }
    }

    /// Bob position relative to its anchor: L (sin a, -cos a, 0)
    pub fn offset(&self) -> NVec3 {
        NVec3::new(self.length * self.angle.sin(), -self.length * self.angle.cos(), 0.0)
    }

    /// Accumulate an angular pseudo-force; like a force it is divided by the mass
    pub fn apply_torque(&mut self, torque: f64) {
        self.angular_acceleration += torque / self.mass;
    }

    /// Damp, kick, advance the angle, clear the accumulator
    pub fn integrate(&mut self, damping: f64, dt: f64) {
        damped_kick(&mut self.angular_velocity, self.angular_acceleration, damping, dt);
        self.angle += self.angular_velocity * dt;
        self.angular_acceleration = 0.0;
    }
}

/// Derive every node's position in one anchor-first pass
///
/// A node may only hang from an earlier node. A reference to itself or to a
/// later node cannot be resolved in a single pass and is treated as hanging
/// from the origin
pub fn resolve_positions(nodes: &mut [PendulumNode]) {
    for i in 0..nodes.len() {
        let base = match nodes[i].anchor {
            Anchor::Fixed(p) => p,
            Anchor::Node(j) if j < i => nodes[j].position,
            Anchor::Node(_) => NVec3::zeros(),
        };
        nodes[i].position = base + nodes[i].offset();
    }
}

/// Angular accelerations (inner, outer) of a planar double pendulum
///
/// With d = a0 - a1 and den = 2 m0 + m1 - m1 cos(2d):
///
/// ```text
/// a0'' = (-g (2 m0 + m1) sin a0 - m1 g sin(a0 - 2 a1)
///         - 2 sin d m1 (w1^2 L1 + w0^2 L0 cos d)) / (L0 den)
/// a1'' = 2 sin d (w0^2 L0 (m0 + m1) + g (m0 + m1) cos a0 + w1^2 L1 m1 cos d) / (L1 den)
/// ```
///
/// `den` >= 2 m0 > 0 for positive masses, so both are finite
pub fn angular_accelerations(inner: &PendulumNode, outer: &PendulumNode, g: f64) -> (f64, f64) {
    let (m0, m1) = (inner.mass, outer.mass);
    let (l0, l1) = (inner.length, outer.length);
    let (a0, a1) = (inner.angle, outer.angle);
    let (w0, w1) = (inner.angular_velocity, outer.angular_velocity);

    let d = a0 - a1;
    let (sin_d, cos_d) = d.sin_cos();
    let den = 2.0 * m0 + m1 - m1 * (2.0 * d).cos();

    // inner node
    let gravity_inner = -g * (2.0 * m0 + m1) * a0.sin();
    let coupling_inner = -m1 * g * (a0 - 2.0 * a1).sin();
    let centripetal_inner = -2.0 * sin_d * m1 * (w1 * w1 * l1 + w0 * w0 * l0 * cos_d);
    let acc0 = (gravity_inner + coupling_inner + centripetal_inner) / (l0 * den);

    // outer node
    let swing = w0 * w0 * l0 * (m0 + m1);
    let gravity_outer = g * (m0 + m1) * a0.cos();
    let centripetal_outer = w1 * w1 * l1 * m1 * cos_d;
    let acc1 = 2.0 * sin_d * (swing + gravity_outer + centripetal_outer) / (l1 * den);

    (acc0, acc1)
}

#[derive(Debug, Clone)]
pub struct PendulumConfig {
    pub pivot: NVec3, // fixed anchor of the inner rod
    pub lengths: [f64; 2], // inner, outer
    pub masses: [f64; 2], // inner, outer
    pub gravity: f64,
    pub damping: f64, // per-tick angular velocity factor (< 1 models air resistance)
    pub start_angle: f64, // both nodes start here on reset
    pub trail_capacity: usize,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            pivot: NVec3::new(0.0, 100.0, 0.0),
            lengths: [100.0, 100.0],
            masses: [10.0, 10.0],
            gravity: 5.0,
            damping: 0.999,
            start_angle: FRAC_PI_2,
            trail_capacity: 200,
        }
    }
}

/// Values a GUI may change between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumControls {
    pub lengths: [f64; 2],
    pub masses: [f64; 2],
    pub gravity: f64,
}

impl From<&PendulumConfig> for PendulumControls {
    fn from(config: &PendulumConfig) -> Self {
        Self {
            lengths: config.lengths,
            masses: config.masses,
            gravity: config.gravity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoublePendulum {
    pub nodes: [PendulumNode; 2], // inner, outer
    pub gravity: f64,
    pub damping: f64,
    pub trail: Trail, // outer node positions
}

impl DoublePendulum {
    pub fn new(config: &PendulumConfig) -> Self {
        let inner = PendulumNode::new(config.lengths[0], config.start_angle, config.masses[0], Anchor::Fixed(config.pivot));
        let outer = PendulumNode::new(config.lengths[1], config.start_angle, config.masses[1], Anchor::Node(0));

        let mut pendulum = Self {
            nodes: [inner, outer],
            gravity: if config.gravity.is_finite() { config.gravity } else { 0.0 },
            damping: if config.damping.is_finite() { config.damping.clamp(0.0, 1.0) } else { 1.0 },
            trail: Trail::new(config.trail_capacity),
        };
        resolve_positions(&mut pendulum.nodes);
        pendulum
    }

    pub fn inner(&self) -> &PendulumNode {
        &self.nodes[0]
    }

    pub fn outer(&self) -> &PendulumNode {
        &self.nodes[1]
    }

    /// Copy GUI values in, flooring non-positive lengths and masses
    pub fn apply_controls(&mut self, controls: &PendulumControls) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.length = floor_positive(controls.lengths[i], MIN_LENGTH);
            node.mass = floor_positive(controls.masses[i], MIN_MASS);
        }
        if controls.gravity.is_finite() {
            self.gravity = controls.gravity;
        }
    }
}

impl Simulation for DoublePendulum {
    type Input = PendulumControls;
    type Config = PendulumConfig;

    fn tick(&mut self, dt: f64, controls: &PendulumControls) {
        self.apply_controls(controls);

        // both from the same prior state
        let (acc0, acc1) = angular_accelerations(&self.nodes[0], &self.nodes[1], self.gravity);

        for (node, acc) in self.nodes.iter_mut().zip([acc0, acc1]) {
            node.apply_torque(acc);
            node.integrate(self.damping, dt);
        }

        resolve_positions(&mut self.nodes);
        self.trail.push(self.nodes[1].position);
    }

    fn reset(&mut self, config: &PendulumConfig) {
        *self = DoublePendulum::new(config);
    }
}
