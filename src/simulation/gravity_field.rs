//! Photon deflection near a point mass
//!
//! A fixed massive body attracts many independent test particles
//! ("photons"). The pull changes a photon's direction but never its
//! speed: after every pull the velocity magnitude is clamped to exactly
//! `c`. Photons never interact with each other, so a tick is O(photons).
//!
//! Photons are grouped in sets that are integrated independently:
//! - the row spawned along y
//! - the row spawned along z
//! - photons spawned one at a time at an explicit position

use crate::simulation::engine::Simulation;
use crate::simulation::forces::PointMassGravity;
use crate::simulation::integrator::euler_drift;
use crate::simulation::params::{floor_positive, MIN_DISTANCE, MIN_LENGTH, MIN_MASS};
use crate::simulation::states::{clamp_length, NVec3, Trail};

/// Most photons a single spawned row may hold
pub const MAX_ROW_PHOTONS: usize = 10_000;

/// Axis along which a row of photons is spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnAxis {
    Y,
    Z,
}

/// Requests from the environment, applied at the start of a tick
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRequest {
    SpawnRow(SpawnAxis), // evenly spaced row at the spawn plane
    SpawnAt(NVec3), // a single photon at an explicit position
    Clear, // remove every photon
}

#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub body_position: NVec3,
    pub mass: f64,
    pub g: f64, // gravitational constant
    pub c: f64, // photon speed
    pub min_distance: f64, // distance floor of the inverse-square law
    pub spawn_x: f64, // x of the plane photons are spawned on
    pub span: f64, // rows cover offsets [0, span - radius)
    pub spacing: f64, // distance between photons in a row
    pub trail_capacity: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            body_position: NVec3::new(-200.0, 0.0, 0.0),
            mass: 6500.0,
            g: 5.0,
            c: 30.0,
            min_distance: 1.0,
            spawn_x: 400.0,
            span: 600.0,
            spacing: 30.0,
            trail_capacity: 200,
        }
    }
}

/// Fixed attracting body
/// The radius 2*g*m/c^2 (Schwarzschild-like) is derived from mass, g and c and
/// recomputed whenever one of them changes through a setter
#[derive(Debug, Clone)]
pub struct MassiveBody {
    pub position: NVec3,
    mass: f64,
    g: f64,
    c: f64,
    radius: f64,
    pub min_distance: f64,
}

impl MassiveBody {
    pub fn new(position: NVec3, mass: f64, g: f64, c: f64) -> Self {
        let mut body = Self {
            position,
            mass: floor_positive(mass, MIN_MASS),
            g: floor_positive(g, f64::MIN_POSITIVE),
            c: floor_positive(c, f64::MIN_POSITIVE),
            radius: 0.0,
            min_distance: 1.0,
        };
        body.radius = Self::horizon_radius(body.g, body.mass, body.c);
        body
    }

    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = floor_positive(min_distance, MIN_DISTANCE);
        self
    }

    /// 2 g m / c^2
    pub fn horizon_radius(g: f64, mass: f64, c: f64) -> f64 {
        2.0 * g * mass / (c * c)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = floor_positive(mass, MIN_MASS);
        self.radius = Self::horizon_radius(self.g, self.mass, self.c);
    }

    pub fn set_g(&mut self, g: f64) {
        self.g = floor_positive(g, f64::MIN_POSITIVE);
        self.radius = Self::horizon_radius(self.g, self.mass, self.c);
    }

    pub fn set_c(&mut self, c: f64) {
        self.c = floor_positive(c, f64::MIN_POSITIVE);
        self.radius = Self::horizon_radius(self.g, self.mass, self.c);
    }

    fn field(&self) -> PointMassGravity {
        PointMassGravity {
            center: self.position,
            gm: self.g * self.mass,
            min_distance: self.min_distance,
        }
    }

    /// Bend a photon's velocity toward the body, then restore its speed to c
    ///
    /// The force is added straight to the velocity (one kick per tick).
    /// If the kick cancels the velocity exactly, the previous velocity is kept
    /// because a zero vector cannot be rescaled to length c
    pub fn pull(&self, photon: &mut Photon) {
        let kicked = photon.velocity + self.field().acceleration_at(&photon.position);
        if kicked.norm() > 0.0 {
            photon.velocity = clamp_length(&kicked, self.c, self.c);
        }
    }
}

/// Test particle moving at constant speed c
#[derive(Debug, Clone)]
pub struct Photon {
    pub position: NVec3,
    pub velocity: NVec3,
    pub trail: Trail,
}

impl Photon {
    /// New photon heading toward -x at speed c
    pub fn new(position: NVec3, c: f64, trail_capacity: usize) -> Self {
        Self {
            position,
            velocity: NVec3::new(-c, 0.0, 0.0),
            trail: Trail::new(trail_capacity),
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Record the current position, then drift by velocity * dt
    pub fn advance(&mut self, dt: f64) {
        self.trail.push(self.position);
        euler_drift(&mut self.position, &self.velocity, dt);
    }
}

#[derive(Debug, Clone)]
pub struct GravityField {
    pub body: MassiveBody,
    pub along_y: Vec<Photon>,
    pub along_z: Vec<Photon>,
    pub single: Vec<Photon>,
    config: FieldConfig,
}

impl GravityField {
    pub fn new(config: &FieldConfig) -> Self {
        let body = MassiveBody::new(config.body_position, config.mass, config.g, config.c)
            .with_min_distance(config.min_distance);
        Self {
            body,
            along_y: Vec::new(),
            along_z: Vec::new(),
            single: Vec::new(),
            config: config.clone(),
        }
    }

    /// All photons across every set
    pub fn photons(&self) -> impl Iterator<Item = &Photon> {
        self.along_y.iter().chain(self.along_z.iter()).chain(self.single.iter())
    }

    pub fn photon_count(&self) -> usize {
        self.along_y.len() + self.along_z.len() + self.single.len()
    }

    /// Offsets of a spawned row: 0, spacing, 2*spacing, ... below span - radius,
    /// at most `MAX_ROW_PHOTONS` of them
    fn row_offsets(&self) -> Vec<f64> {
        let end = self.config.span - self.body.radius();
        let spacing = floor_positive(self.config.spacing, MIN_LENGTH);
        (0..MAX_ROW_PHOTONS)
            .map(|k| k as f64 * spacing)
            .take_while(|i| *i < end)
            .collect()
    }

    /// Append an evenly spaced row of photons on the spawn plane
    pub fn spawn_row(&mut self, axis: SpawnAxis) {
        let x = self.config.spawn_x;
        let end = self.config.span - self.body.radius();
        let c = self.body.c();
        let cap = self.config.trail_capacity;

        for i in self.row_offsets() {
            match axis {
                SpawnAxis::Y => self.along_y.push(Photon::new(NVec3::new(x, i, 0.0), c, cap)),
                SpawnAxis::Z => self.along_z.push(Photon::new(NVec3::new(x, 0.0, i - end), c, cap)),
            }
        }
    }

    pub fn spawn_at(&mut self, position: NVec3) {
        let photon = Photon::new(position, self.body.c(), self.config.trail_capacity);
        self.single.push(photon);
    }

    pub fn clear(&mut self) {
        self.along_y.clear();
        self.along_z.clear();
        self.single.clear();
    }

    fn apply(&mut self, request: &FieldRequest) {
        match request {
            FieldRequest::SpawnRow(axis) => self.spawn_row(*axis),
            FieldRequest::SpawnAt(p) => self.spawn_at(*p),
            FieldRequest::Clear => self.clear(),
        }
    }
}

impl Simulation for GravityField {
    type Input = [FieldRequest];
    type Config = FieldConfig;

    fn tick(&mut self, dt: f64, requests: &[FieldRequest]) {
        for request in requests {
            self.apply(request);
        }

        let body = &self.body;
        for set in [&mut self.along_y, &mut self.along_z, &mut self.single] {
            for photon in set.iter_mut() {
                body.pull(photon);
                photon.advance(dt);
            }
        }
    }

    fn reset(&mut self, config: &FieldConfig) {
        *self = GravityField::new(config);
    }
}
