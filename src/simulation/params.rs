//! Safety floors for externally supplied physical parameters
//!
//! Masses, lengths, spring constants and buffer sizes arrive from GUI-like
//! controls or scenario files. Anything non-positive or non-finite is
//! replaced by a small positive floor so the state never turns into NaN:
//! - `MIN_MASS`, `MIN_LENGTH`, `MIN_STIFFNESS`, `MIN_DISTANCE`
//! - [`floor_positive`] applies a floor to a single value

pub const MIN_MASS: f64 = 1.0e-6; // smallest accepted mass
pub const MIN_LENGTH: f64 = 1.0e-3; // smallest accepted rod/rest length or half-width
pub const MIN_STIFFNESS: f64 = 1.0e-9; // smallest accepted spring constant
pub const MIN_DISTANCE: f64 = 1.0e-6; // smallest accepted gravity distance floor

/// Return `value` if it is finite and at least `floor`, else `floor`
#[inline]
pub fn floor_positive(value: f64, floor: f64) -> f64 {
    if value.is_finite() && value >= floor {
        value
    } else {
        floor
    }
}

/// Like [`floor_positive`] but for values that may legitimately be zero
/// (rest lengths, speed bounds); negatives and NaN become 0
#[inline]
pub fn floor_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
