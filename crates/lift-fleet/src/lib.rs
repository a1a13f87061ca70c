//! `lift-fleet` — the dispatch-and-movement scheduling engine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`state`]      | `UnitState`, `Leg` (countdown / progress)                  |
//! | [`unit`]       | `Unit` state machine, `UnitSignal`                         |
//! | [`dispatcher`] | `Dispatcher` (fleet + pending calls), `Assignment`         |
//! | [`event`]      | `FleetEvent`, `FleetObserver`, `NoopObserver`, `EventRecorder` |
//!
//! # Reaction model
//!
//! Three triggers change state: a call arriving
//! ([`Dispatcher::handle_call`]), an arrival timer firing, and a dwell timer
//! firing (both via [`Dispatcher::on_timer`]).  Each trigger runs its whole
//! cascade synchronously before returning:
//!
//! ```text
//! handle_call ─▶ assign_next ─▶ Unit::enqueue ─▶ process_next ─▶ move_to ─▶ clock.after(travel)
//! arrival     ─▶ Unit::on_arrival_timer ─▶ Dwelling ─▶ clock.after(dwell)
//! dwell end   ─▶ Unit::on_dwell_timer ─▶ process_next ─┬▶ next leg
//!                                                      └▶ Idle ─▶ assign_next
//! ```
//!
//! Units never touch each other or the pending queue; they only signal the
//! dispatcher through [`UnitSignal`].

pub mod dispatcher;
pub mod event;
pub mod state;
pub mod unit;

#[cfg(test)]
mod tests;

pub use dispatcher::{Assignment, Dispatcher};
pub use event::{EventRecorder, FleetEvent, FleetObserver, NoopObserver};
pub use state::{Leg, UnitState};
pub use unit::{Unit, UnitSignal};
