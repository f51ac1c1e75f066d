//! Core state types shared by every demo.
//!
//! Defines the vector primitive and the small helpers the five
//! simulations build on:
//! - `NVec3` - 3d vector (`nalgebra::Vector3<f64>`)
//! - [`clamp_length`] - clamp a vector's magnitude, keeping its direction
//! - [`Trail`] - bounded history of past positions, oldest evicted first

use std::collections::VecDeque;

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

/// Clamp the magnitude of `v` into `[min, max]` with direction preserved
/// The zero vector has no direction and is returned unchanged
pub fn clamp_length(v: &NVec3, min: f64, max: f64) -> NVec3 {
    let len = v.norm();
    if len == 0.0 || !len.is_finite() {
        return *v;
    }
    // max/min instead of f64::clamp so a min > max pair cannot panic
    let target = len.max(min).min(max);
    v * (target / len)
}

/// Unit vector along `v`, or `None` when `v` has no usable direction
pub fn direction(v: &NVec3) -> Option<NVec3> {
    v.try_normalize(f64::EPSILON)
}

/// Fixed-capacity ring buffer of past positions
/// Purely observational: trails are rendered, never fed back into physics
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec3>, // oldest at the front
    capacity: usize,         // never 0
}

impl Trail {
    /// Create an empty trail holding at most `capacity` points (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a position, evicting the oldest one when full
    pub fn push(&mut self, p: NVec3) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently recorded position
    pub fn latest(&self) -> Option<&NVec3> {
        self.points.back()
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &NVec3> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
