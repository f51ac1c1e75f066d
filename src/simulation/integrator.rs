//! Fixed-step update rules shared by the demos
//!
//! All demos step with explicit, first-order rules at a fixed `dt`:
//! - [`euler_drift`] - position update from the current velocity
//! - [`damped_kick`] - multiplicative damping followed by a velocity kick
//!
//! The kick is generic so the pendulum can apply it to its angular
//! velocity scalar and the rope to a particle velocity vector

use std::ops::{AddAssign, Mul, MulAssign};

use super::states::NVec3;

/// Advance a position by one explicit Euler step: x_n+1 = x_n + dt v_n
#[inline]
pub fn euler_drift(x: &mut NVec3, v: &NVec3, dt: f64) {
    *x += dt * v;
}

/// Damp then kick a velocity-like quantity: v <- damping * v + dt * a
///
/// Damping is per step (not per unit time), matching a frame-driven loop
#[inline]
pub fn damped_kick<T>(v: &mut T, a: T, damping: f64, dt: f64)
where
    T: MulAssign<f64> + AddAssign<T> + Mul<f64, Output = T>,
{
    *v *= damping;
    *v += a * dt;
}
