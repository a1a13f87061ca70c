//! `lift-core` — foundational types for the `liftsim` elevator fleet simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UnitId`, `Floor`                                     |
//! | [`time`]        | `Tick`, `TimeScale`                                   |
//! | [`config`]      | `FleetConfig`, `SimConfig`                            |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time, and config.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FleetConfig, SimConfig};
pub use error::{LiftError, LiftResult};
pub use ids::{Floor, UnitId};
pub use rng::SimRng;
pub use time::{Tick, TimeScale};
