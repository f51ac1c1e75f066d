pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod vehicle;
pub mod gravity_field;
pub mod collision;
pub mod pendulum;
pub mod spring_chain;
pub mod scenario;
