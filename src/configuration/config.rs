//! Configuration types for loading demo scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]   – frame length, frame count and report interval
//! - [`DemoConfig`]     – which demo to run, with its constants and scripted inputs
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every demo setting is optional; anything left out falls back to the
//! default constants of each demo.
//!
//! # YAML format
//! An example gravity-field scenario matching these types:
//!
//! ```yaml
//! engine:
//!   dt: 0.2                 # frame length
//!   frames: 1000            # frames to run
//!   report_every: 100       # summary line interval
//!
//! demo:
//!   kind: gravity_field     # vehicle | gravity_field | collision | pendulum | spring_chain
//!   body_position: [ -200.0, 0.0, 0.0 ]
//!   mass: 6500.0
//!   g: 5.0
//!   c: 30.0
//!   spawn:
//!     rows: [ y, z ]        # evenly spaced rows on the spawn plane
//!     at:                   # single photons
//!       - [ 400.0, 150.0, 0.0 ]
//! ```
//!
//! The scenario builder maps this configuration onto the runtime config
//! structs of each simulation and validates it on the way.

use serde::Deserialize;

/// Frame-loop settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub dt: f64, // frame length handed to every tick
    pub frames: usize, // frames to run
    pub report_every: usize, // print a summary every n frames, 0 = only at the end
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            frames: 600,
            report_every: 60,
        }
    }
}

/// Which demo to run; the `kind` key selects the variant
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemoConfig {
    Vehicle(VehicleSettings),
    GravityField(FieldSettings),
    Collision(CollisionSettings),
    Pendulum(PendulumSettings),
    SpringChain(ChainSettings),
}

/// A stretch of frames during which the same keys are held
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ControlSegment {
    pub frames: usize,
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct VehicleSettings {
    pub start: Option<Vec<f64>>, // starting position [x, y, z]
    pub acceleration: Option<f64>,
    pub friction: Option<f64>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub steering_rate: Option<f64>,
    pub script: Vec<ControlSegment>, // played in order, then no keys held
}

/// Axis of a spawned photon row
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisSetting {
    Y,
    Z,
}

/// Spawn requests issued on the first frame
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SpawnSettings {
    pub rows: Vec<AxisSetting>,
    pub at: Vec<Vec<f64>>, // explicit photon positions
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FieldSettings {
    pub body_position: Option<Vec<f64>>,
    pub mass: Option<f64>,
    pub g: Option<f64>,
    pub c: Option<f64>,
    pub min_distance: Option<f64>, // floor of the inverse-square distance
    pub spawn_x: Option<f64>,
    pub span: Option<f64>,
    pub spacing: Option<f64>,
    pub trail_capacity: Option<usize>,
    pub spawn: SpawnSettings,
}

/// Initial state of one block
#[derive(Deserialize, Debug, Clone)]
pub struct BlockSettings {
    pub position: f64,
    pub velocity: f64, // per frame
    pub mass: f64, // ignored for the heavy block, see `mass_digits`
    pub width: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CollisionSettings {
    pub wall: Option<f64>,
    pub light: Option<BlockSettings>,
    pub heavy: Option<BlockSettings>,
    pub mass_digits: Option<u32>, // heavy mass = 100^(digits - 1), 1..=7
    pub sub_steps: Option<usize>, // micro-steps per frame
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PendulumSettings {
    pub pivot: Option<Vec<f64>>,
    pub lengths: Option<[f64; 2]>,
    pub masses: Option<[f64; 2]>,
    pub gravity: Option<f64>,
    pub damping: Option<f64>,
    pub start_angle: Option<f64>, // radians
    pub trail_capacity: Option<usize>,
}

/// Drag the first particle back and forth: x = anchor_x + amplitude * sin(2 pi frame / period)
#[derive(Deserialize, Debug, Clone)]
pub struct SweepSettings {
    pub amplitude: f64,
    pub period_frames: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ChainSettings {
    pub count: Option<usize>,
    pub k: Option<f64>,
    pub rest_length: Option<f64>,
    pub spacing: Option<f64>,
    pub top: Option<f64>,
    pub mass: Option<f64>,
    pub gravity: Option<f64>,
    pub damping: Option<f64>,
    pub anchor_x: Option<f64>,
    pub sweep: Option<SweepSettings>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // frame-loop configuration
    pub demo: DemoConfig, // the demo and its settings
}
