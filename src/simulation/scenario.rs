//! Build fully-initialized demo scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - one demo simulation in its initial state
//! - the scripted inputs that stand in for keyboard and GUI controls
//!
//! A driver calls [`Scenario::step`] once per frame; the scenario feeds the
//! right inputs for the current frame into the simulation's `tick`.

use std::f64::consts::TAU;

use crate::configuration::config::{
    AxisSetting, BlockSettings, ChainSettings, CollisionSettings, ControlSegment, DemoConfig, FieldSettings,
    PendulumSettings, ScenarioConfig, SweepSettings, VehicleSettings,
};
use crate::configuration::error::ConfigError;
use crate::simulation::collision::{BlockConfig, Collision, CollisionConfig, CollisionInput, MAX_DIGITS, MIN_DIGITS};
use crate::simulation::engine::{Engine, Simulation};
use crate::simulation::gravity_field::{FieldConfig, FieldRequest, GravityField, SpawnAxis};
use crate::simulation::pendulum::{DoublePendulum, PendulumConfig, PendulumControls};
use crate::simulation::spring_chain::{ChainConfig, ChainControls, SpringChain};
use crate::simulation::states::NVec3;
use crate::simulation::vehicle::{Controls, Vehicle, VehicleConfig};

/// Map an optional `[x, y, z]` list onto a vector
fn vec3(field: &'static str, values: &Option<Vec<f64>>, fallback: NVec3) -> Result<NVec3, ConfigError> {
    match values {
        None => Ok(fallback),
        Some(v) if v.len() == 3 => Ok(NVec3::new(v[0], v[1], v[2])),
        Some(v) => Err(ConfigError::VectorLength {
            field,
            expected: 3,
            got: v.len(),
        }),
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Keys held frame by frame, from a list of segments
#[derive(Debug, Clone, Default)]
pub struct ControlScript {
    segments: Vec<(usize, Controls)>, // (frames, keys held)
}

impl ControlScript {
    pub fn new(segments: &[ControlSegment]) -> Self {
        Self {
            segments: segments
                .iter()
                .map(|s| {
                    let keys = Controls {
                        forward: s.forward,
                        reverse: s.reverse,
                        left: s.left,
                        right: s.right,
                    };
                    (s.frames, keys)
                })
                .collect(),
        }
    }

    /// Keys held at `frame`; nothing is held once the script has run out
    pub fn controls_at(&self, frame: usize) -> Controls {
        let mut start: usize = 0;
        for (frames, keys) in &self.segments {
            let end = start.saturating_add(*frames);
            if frame < end {
                return *keys;
            }
            start = end;
        }
        Controls::default()
    }

    pub fn len(&self) -> usize {
        self.segments.iter().fold(0, |total: usize, (frames, _)| total.saturating_add(*frames))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Periodic drag of the rope's first particle
#[derive(Debug, Clone)]
pub struct AnchorSweep {
    pub center: f64,
    pub amplitude: f64,
    pub period_frames: f64,
}

impl AnchorSweep {
    pub fn anchor_at(&self, frame: usize) -> f64 {
        self.center + self.amplitude * (TAU * frame as f64 / self.period_frames).sin()
    }
}

/// One of the five demos together with the inputs it is driven by
#[derive(Debug, Clone)]
pub enum Demo {
    Vehicle {
        sim: Vehicle,
        config: VehicleConfig,
        script: ControlScript,
    },
    GravityField {
        sim: GravityField,
        config: FieldConfig,
        spawn: Vec<FieldRequest>, // issued on the first frame
    },
    Collision {
        sim: Collision,
        config: CollisionConfig,
        input: CollisionInput,
    },
    Pendulum {
        sim: DoublePendulum,
        config: PendulumConfig,
        controls: PendulumControls,
    },
    SpringChain {
        sim: SpringChain,
        config: ChainConfig,
        controls: ChainControls,
        sweep: Option<AnchorSweep>,
    },
}

/// Runtime bundle built from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub demo: Demo,
    frame: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        // Engine (runtime) from EngineConfig
        let engine = Engine {
            dt: positive("engine.dt", cfg.engine.dt)?,
            frames: cfg.engine.frames,
            report_every: cfg.engine.report_every,
        };

        let demo = match cfg.demo {
            DemoConfig::Vehicle(s) => build_vehicle(&s)?,
            DemoConfig::GravityField(s) => build_gravity_field(&s)?,
            DemoConfig::Collision(s) => build_collision(&s)?,
            DemoConfig::Pendulum(s) => build_pendulum(&s)?,
            DemoConfig::SpringChain(s) => build_spring_chain(&s)?,
        };

        Ok(Self { engine, demo, frame: 0 })
    }

    /// Frames stepped since construction or the last reset
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn name(&self) -> &'static str {
        match &self.demo {
            Demo::Vehicle { .. } => "vehicle",
            Demo::GravityField { .. } => "gravity_field",
            Demo::Collision { .. } => "collision",
            Demo::Pendulum { .. } => "pendulum",
            Demo::SpringChain { .. } => "spring_chain",
        }
    }

    /// Advance one frame, feeding this frame's scripted inputs
    pub fn step(&mut self) {
        let dt = self.engine.dt;
        let frame = self.frame;

        match &mut self.demo {
            Demo::Vehicle { sim, script, .. } => {
                let keys = script.controls_at(frame);
                sim.tick(dt, &keys);
            }
            Demo::GravityField { sim, spawn, .. } => {
                let requests: &[FieldRequest] = if frame == 0 { spawn.as_slice() } else { &[] };
                sim.tick(dt, requests);
            }
            Demo::Collision { sim, input, .. } => sim.tick(dt, input),
            Demo::Pendulum { sim, controls, .. } => sim.tick(dt, controls),
            Demo::SpringChain { sim, controls, sweep, .. } => {
                if let Some(sweep) = sweep {
                    controls.anchor_x = sweep.anchor_at(frame);
                }
                sim.tick(dt, controls);
            }
        }

        self.frame += 1;
    }

    /// Step `frames` frames, calling `on_frame` after each one
    /// Stops early once the demo reports it is finished
    pub fn run<F>(&mut self, frames: usize, mut on_frame: F)
    where
        F: FnMut(&Scenario),
    {
        for _ in 0..frames {
            self.step();
            on_frame(self);
            if self.is_finished() {
                break;
            }
        }
    }

    /// True when nothing observable can change any more
    /// (only the collision demo ever finishes: no contact is possible)
    pub fn is_finished(&self) -> bool {
        match &self.demo {
            Demo::Collision { sim, .. } => sim.is_settled(),
            _ => false,
        }
    }

    /// Restore the demo's declared initial state and rewind the script
    pub fn reset(&mut self) {
        match &mut self.demo {
            Demo::Vehicle { sim, config, .. } => sim.reset(config),
            Demo::GravityField { sim, config, .. } => sim.reset(config),
            Demo::Collision { sim, config, .. } => sim.reset(config),
            Demo::Pendulum { sim, config, .. } => sim.reset(config),
            Demo::SpringChain { sim, config, .. } => sim.reset(config),
        }
        self.frame = 0;
    }

    /// One line describing the observable state
    pub fn summary(&self) -> String {
        let frame = self.frame;
        match &self.demo {
            Demo::Vehicle { sim, .. } => format!(
                "frame {frame:6}  position = ({:9.2}, {:9.2}, {:9.2})  heading = {:7.3}  speed = {:6.3}",
                sim.position.x, sim.position.y, sim.position.z, sim.heading, sim.speed()
            ),
            Demo::GravityField { sim, .. } => {
                let n = sim.photon_count();
                let (mut closest, mut slowest, mut fastest) = (f64::INFINITY, f64::INFINITY, 0.0f64);
                for p in sim.photons() {
                    closest = closest.min((p.position - sim.body.position).norm());
                    slowest = slowest.min(p.speed());
                    fastest = fastest.max(p.speed());
                }
                if n == 0 {
                    format!("frame {frame:6}  photons = 0")
                } else {
                    format!(
                        "frame {frame:6}  photons = {n:4}  closest = {closest:9.3}  speed = [{slowest:.6}, {fastest:.6}]  radius = {:.3}",
                        sim.body.radius()
                    )
                }
            }
            Demo::Collision { sim, .. } => format!(
                "frame {frame:6}  collisions = {:8}  heavy mass = {:e}  v = ({:+.6e}, {:+.6e})",
                sim.collisions(),
                sim.heavy_mass(),
                sim.light.velocity,
                sim.heavy.velocity
            ),
            Demo::Pendulum { sim, .. } => {
                let (inner, outer) = (sim.inner(), sim.outer());
                format!(
                    "frame {frame:6}  angles = ({:+8.4}, {:+8.4})  omega = ({:+.5}, {:+.5})  tip = ({:8.2}, {:8.2})",
                    inner.angle, outer.angle, inner.angular_velocity, outer.angular_velocity, outer.position.x, outer.position.y
                )
            }
            Demo::SpringChain { sim, .. } => match (sim.anchor(), sim.tail()) {
                (Some(anchor), Some(tail)) => format!(
                    "frame {frame:6}  anchor x = {:8.2}  tail = ({:9.2}, {:9.2})  particles = {}",
                    anchor.position.x,
                    tail.position.x,
                    tail.position.y,
                    sim.particles.len()
                ),
                _ => format!("frame {frame:6}  particles = 0"),
            },
        }
    }
}

// =========================================================================================
// per-demo builders
// =========================================================================================

fn build_vehicle(s: &VehicleSettings) -> Result<Demo, ConfigError> {
    let d = VehicleConfig::default();
    let config = VehicleConfig {
        start: vec3("start", &s.start, d.start)?,
        acceleration: s.acceleration.unwrap_or(d.acceleration),
        friction: s.friction.unwrap_or(d.friction),
        min_speed: s.min_speed.unwrap_or(d.min_speed),
        max_speed: s.max_speed.unwrap_or(d.max_speed),
        steering_rate: s.steering_rate.unwrap_or(d.steering_rate),
    };
    Ok(Demo::Vehicle {
        sim: Vehicle::new(&config),
        config,
        script: ControlScript::new(&s.script),
    })
}

fn build_gravity_field(s: &FieldSettings) -> Result<Demo, ConfigError> {
    let d = FieldConfig::default();
    let config = FieldConfig {
        body_position: vec3("body_position", &s.body_position, d.body_position)?,
        mass: s.mass.unwrap_or(d.mass),
        g: s.g.unwrap_or(d.g),
        c: positive("c", s.c.unwrap_or(d.c))?,
        min_distance: s.min_distance.unwrap_or(d.min_distance),
        spawn_x: s.spawn_x.unwrap_or(d.spawn_x),
        span: s.span.unwrap_or(d.span),
        spacing: positive("spacing", s.spacing.unwrap_or(d.spacing))?,
        trail_capacity: s.trail_capacity.unwrap_or(d.trail_capacity),
    };

    // Spawn requests: rows first, then single photons
    let mut spawn: Vec<FieldRequest> = s
        .spawn
        .rows
        .iter()
        .map(|axis| match axis {
            AxisSetting::Y => FieldRequest::SpawnRow(SpawnAxis::Y),
            AxisSetting::Z => FieldRequest::SpawnRow(SpawnAxis::Z),
        })
        .collect();
    for p in &s.spawn.at {
        let position = vec3("spawn.at", &Some(p.clone()), NVec3::zeros())?;
        spawn.push(FieldRequest::SpawnAt(position));
    }

    Ok(Demo::GravityField {
        sim: GravityField::new(&config),
        config,
        spawn,
    })
}

fn block(b: &Option<BlockSettings>, fallback: BlockConfig) -> BlockConfig {
    match b {
        Some(b) => BlockConfig {
            position: b.position,
            velocity: b.velocity,
            mass: b.mass,
            width: b.width,
        },
        None => fallback,
    }
}

fn build_collision(s: &CollisionSettings) -> Result<Demo, ConfigError> {
    let d = CollisionConfig::default();
    let mass_digits = s.mass_digits.unwrap_or(d.mass_digits);
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&mass_digits) {
        return Err(ConfigError::DigitsOutOfRange {
            min: MIN_DIGITS,
            max: MAX_DIGITS,
            got: mass_digits,
        });
    }

    let config = CollisionConfig {
        wall: s.wall.unwrap_or(d.wall),
        light: block(&s.light, d.light),
        heavy: block(&s.heavy, d.heavy),
        mass_digits,
        sub_steps: s.sub_steps.unwrap_or(d.sub_steps),
    };
    Ok(Demo::Collision {
        sim: Collision::new(&config),
        input: CollisionInput { mass_digits },
        config,
    })
}

fn build_pendulum(s: &PendulumSettings) -> Result<Demo, ConfigError> {
    let d = PendulumConfig::default();
    let config = PendulumConfig {
        pivot: vec3("pivot", &s.pivot, d.pivot)?,
        lengths: s.lengths.unwrap_or(d.lengths),
        masses: s.masses.unwrap_or(d.masses),
        gravity: s.gravity.unwrap_or(d.gravity),
        damping: s.damping.unwrap_or(d.damping),
        start_angle: s.start_angle.unwrap_or(d.start_angle),
        trail_capacity: s.trail_capacity.unwrap_or(d.trail_capacity),
    };
    Ok(Demo::Pendulum {
        sim: DoublePendulum::new(&config),
        controls: PendulumControls::from(&config),
        config,
    })
}

fn build_spring_chain(s: &ChainSettings) -> Result<Demo, ConfigError> {
    let d = ChainConfig::default();
    let config = ChainConfig {
        count: s.count.unwrap_or(d.count),
        k: s.k.unwrap_or(d.k),
        rest_length: s.rest_length.unwrap_or(d.rest_length),
        spacing: s.spacing.unwrap_or(d.spacing),
        top: s.top.unwrap_or(d.top),
        mass: s.mass.unwrap_or(d.mass),
        gravity: s.gravity.unwrap_or(d.gravity),
        damping: s.damping.unwrap_or(d.damping),
        anchor_x: s.anchor_x.unwrap_or(d.anchor_x),
    };

    let sweep = match &s.sweep {
        Some(SweepSettings { amplitude, period_frames }) => Some(AnchorSweep {
            center: config.anchor_x,
            amplitude: *amplitude,
            period_frames: positive("sweep.period_frames", *period_frames)?,
        }),
        None => None,
    };

    Ok(Demo::SpringChain {
        sim: SpringChain::new(&config),
        controls: ChainControls::from(&config),
        config,
        sweep,
    })
}
