//! Client-input errors raised by the zone core.

use thiserror::Error;

/// Every way a caller can hand the zone core bad input.
///
/// None of these are fatal; the HTTP layer maps all of them to 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// A level field is missing or not a finite number.
    #[error("Provide numeric GREEN/YELLOW/RED/MAX.")]
    InvalidInput,

    /// Levels are numeric but not ordered.
    #[error("Order must be GREEN < YELLOW < RED ≤ MAX.")]
    InvalidOrdering,

    /// The zone label is not one of the four known zones.
    #[error("Invalid label.")]
    InvalidLabel,

    /// A measurement payload carried neither `db` nor `rms`.
    #[error("Provide numeric db or rms.")]
    InvalidMeasurement,
}
