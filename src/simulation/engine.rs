//! High-level runtime engine settings and the common simulation surface
//!
//! Every demo implements [`Simulation`]: one `tick` per rendered frame and
//! a `reset` that rebuilds the declared initial state. `Engine` holds the
//! frame-loop settings a driver uses when running a `Scenario`

/// Common per-frame surface shared by the five demos
pub trait Simulation {
    /// External inputs sampled by the render loop between ticks
    type Input: ?Sized;
    /// Declared initial state and tunable constants
    type Config;

    /// Advance the state by one frame of length `dt`
    fn tick(&mut self, dt: f64, input: &Self::Input);

    /// Restore the declared initial state from `config`
    /// The whole state is replaced at once, so no partial reset is observable
    fn reset(&mut self, config: &Self::Config);
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub dt: f64, // frame length handed to every tick
    pub frames: usize, // number of frames a driver runs
    pub report_every: usize, // print a summary line every n frames (0 = only at the end)
}
