pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{clamp_length, NVec3, Trail};
pub use simulation::engine::{Engine, Simulation};
pub use simulation::forces::{elastic_exchange, HookeSpring, PointMassGravity};
pub use simulation::vehicle::{Controls, Vehicle, VehicleConfig};
pub use simulation::gravity_field::{FieldConfig, FieldRequest, GravityField, MassiveBody, Photon, SpawnAxis};
pub use simulation::collision::{mass_for_digits, Block, Collision, CollisionConfig, CollisionInput};
pub use simulation::pendulum::{Anchor, DoublePendulum, PendulumConfig, PendulumControls, PendulumNode};
pub use simulation::spring_chain::{ChainConfig, ChainControls, Spring, SpringChain, SpringParticle};
pub use simulation::scenario::{Demo, Scenario};

pub use configuration::config::{DemoConfig, EngineConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use benchmark::benchmark::{bench_collision, bench_gravity_field};
