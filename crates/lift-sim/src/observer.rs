//! Simulation observer trait for presentation adapters and data collection.

use lift_core::{LiftError, Tick};
use lift_fleet::{Dispatcher, EventRecorder, FleetObserver, NoopObserver};

/// Callbacks invoked by [`Sim`][crate::Sim] on top of the fleet event stream.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — arrival announcer
///
/// ```rust,ignore
/// struct Announcer;
///
/// impl FleetObserver for Announcer {
///     fn on_event(&mut self, tick: Tick, event: &FleetEvent) {
///         if let FleetEvent::UnitArrived { unit, floor } = event {
///             println!("{tick}: {unit} arrived at {floor}");
///         }
///     }
/// }
/// impl SimObserver for Announcer {}
/// ```
pub trait SimObserver: FleetObserver {
    /// A call was refused.  The engine state is unchanged; surfacing the
    /// rejection to the passenger is up to the adapter.
    fn on_call_rejected(&mut self, _tick: Tick, _floor: i64, _error: &LiftError) {}

    /// Called once every tick after all timers and calls for that tick have
    /// been processed.
    ///
    /// Gives read-only access to the whole fleet so adapters can render
    /// positions and countdowns (see [`lift_fleet::Unit::remaining_ticks`]).
    fn on_tick_end(&mut self, _tick: Tick, _fleet: &Dispatcher) {}

    /// Called once after [`Sim::run`][crate::Sim::run] completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _fleet: &Dispatcher) {}
}

impl SimObserver for NoopObserver {}

impl SimObserver for EventRecorder {}
