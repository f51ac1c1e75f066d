//! Errors raised while turning a scenario file into a runnable scenario.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A vector setting with the wrong number of components.
    #[error("`{field}` must have {expected} components, got {got}")]
    VectorLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    /// Digit count outside what the collision demo supports.
    #[error("mass_digits must be within {min}..={max}, got {got}")]
    DigitsOutOfRange { min: u32, max: u32, got: u32 },

    /// A setting that has to be finite and strictly positive.
    #[error("`{field}` must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}
