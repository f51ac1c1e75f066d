//! Force laws used by the demos
//!
//! Defines the inverse-square point-mass attraction acting on photons,
//! the Hookean spring force of the rope demo and the 1-D elastic
//! velocity exchange of the block collision demo

use crate::simulation::params::{floor_non_negative, floor_positive, MIN_DISTANCE, MIN_STIFFNESS};
use crate::simulation::states::{direction, NVec3};

/// Inverse-square attraction of a fixed point mass
/// Distance is floored at `min_distance` to keep the force finite
/// when a particle gets arbitrarily close to the center
#[derive(Debug, Clone)]
pub struct PointMassGravity {
    pub center: NVec3, // position of the attracting mass
    pub gm: f64, // g * mass
    pub min_distance: f64, // distance floor
}

impl PointMassGravity {
    /// Acceleration felt at `x`, pointing toward `center`
    /// Returns zero when `x` sits exactly on the center (no direction exists)
    pub fn acceleration_at(&self, x: &NVec3) -> NVec3 {
        // r points from the particle to the attracting mass
        let r = self.center - x;

        // unit direction, None only when r is (numerically) the zero vector
        let Some(dir) = direction(&r) else {
            return NVec3::zeros();
        };

        // floored separation so that g*m / r^2 stays finite
        let dist = r.norm().max(floor_positive(self.min_distance, MIN_DISTANCE));

        // magnitude g*m / r^2 along the unit direction
        dir * (self.gm / (dist * dist))
    }
}

/// Hookean spring between two points
#[derive(Debug, Clone, Copy)]
pub struct HookeSpring {
    pub k: f64, // spring constant
    pub rest_length: f64, // length at which the spring exerts no force
}

impl HookeSpring {
    /// Force on endpoint `a` from a spring attached to `b`
    ///
    /// `-k * (|a - b| - rest) * (a - b) / |a - b|`, i.e. a stretched spring
    /// pulls `a` back toward `b` and a compressed one pushes it away.
    /// Coincident endpoints have no axis and produce no force
    pub fn force(&self, a: &NVec3, b: &NVec3) -> NVec3 {
        let d = a - b;
        let Some(axis) = direction(&d) else {
            return NVec3::zeros();
        };

        let k = floor_positive(self.k, MIN_STIFFNESS);
        let stretch = d.norm() - floor_non_negative(self.rest_length);

        -(k * stretch) * axis
    }
}

/// Post-collision velocities of a 1-D perfectly elastic collision
///
/// Both results are computed from the pre-collision velocities, so the
/// exchange conserves momentum and kinetic energy:
/// v_a' = ((m_a - m_b) v_a + 2 m_b v_b) / (m_a + m_b)
/// v_b' = ((m_b - m_a) v_b + 2 m_a v_a) / (m_a + m_b)
pub fn elastic_exchange(m_a: f64, v_a: f64, m_b: f64, v_b: f64) -> (f64, f64) {
    let total = m_a + m_b;
    let va = ((m_a - m_b) * v_a + 2.0 * m_b * v_b) / total;
    let vb = ((m_b - m_a) * v_b + 2.0 * m_a * v_a) / total;
    (va, vb)
}
