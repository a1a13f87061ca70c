//! Engine error type.
//!
//! Every variant is local and non-fatal: the offending request is rejected and
//! the rest of the fleet state is left untouched.  Sub-crates wrap `LiftError`
//! as one variant of their own error enums.

use thiserror::Error;

use crate::UnitId;

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiftError {
    /// A floor outside `[0, num_floors)` was requested.
    #[error("floor {floor} is outside the building (valid floors: 0..{num_floors})")]
    InvalidFloor { floor: i64, num_floors: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
