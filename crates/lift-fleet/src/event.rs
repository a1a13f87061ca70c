//! The one-way event stream published to presentation adapters.

use lift_core::{Floor, Tick, UnitId};

use crate::UnitState;

/// Something observable happened in the fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FleetEvent {
    /// A validated call entered the pending queue.
    CallQueued { floor: Floor },

    /// The head pending call was handed to `unit`.
    CallAssigned { floor: Floor, unit: UnitId },

    /// `unit` entered `state` while at `floor`.
    UnitStateChanged { unit: UnitId, floor: Floor, state: UnitState },

    /// `unit` started a leg that will take `duration_ms` of wall time.
    UnitMovementStarted { unit: UnitId, from: Floor, to: Floor, duration_ms: u64 },

    /// `unit` reached `floor` and opened its doors.
    UnitArrived { unit: UnitId, floor: Floor },
}

impl FleetEvent {
    /// Short snake_case name used in output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            FleetEvent::CallQueued { .. }          => "call_queued",
            FleetEvent::CallAssigned { .. }        => "call_assigned",
            FleetEvent::UnitStateChanged { .. }    => "unit_state_changed",
            FleetEvent::UnitMovementStarted { .. } => "unit_movement_started",
            FleetEvent::UnitArrived { .. }         => "unit_arrived",
        }
    }

    /// The unit this event concerns, if any.
    pub fn unit(&self) -> Option<UnitId> {
        match *self {
            FleetEvent::CallQueued { .. } => None,
            FleetEvent::CallAssigned { unit, .. }
            | FleetEvent::UnitStateChanged { unit, .. }
            | FleetEvent::UnitMovementStarted { unit, .. }
            | FleetEvent::UnitArrived { unit, .. } => Some(unit),
        }
    }
}

/// Sink for [`FleetEvent`]s.
///
/// Delivery is synchronous and infallible: the engine never depends on what
/// an observer does with an event.
pub trait FleetObserver {
    fn on_event(&mut self, _tick: Tick, _event: &FleetEvent) {}
}

/// A [`FleetObserver`] that discards everything.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}

/// A [`FleetObserver`] that keeps every event in memory.
#[derive(Default, Debug)]
pub struct EventRecorder {
    pub events: Vec<(Tick, FleetEvent)>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(tick, unit, floor)` for every arrival, in order.
    pub fn arrivals(&self) -> Vec<(Tick, UnitId, Floor)> {
        self.events
            .iter()
            .filter_map(|(tick, e)| match *e {
                FleetEvent::UnitArrived { unit, floor } => Some((*tick, unit, floor)),
                _ => None,
            })
            .collect()
    }

    /// `(floor, unit)` for every assignment, in order.
    pub fn assignments(&self) -> Vec<(Floor, UnitId)> {
        self.events
            .iter()
            .filter_map(|(_, e)| match *e {
                FleetEvent::CallAssigned { floor, unit } => Some((floor, unit)),
                _ => None,
            })
            .collect()
    }

    /// `(tick, state)` for every state change of `unit`, in order.
    pub fn states_of(&self, unit: UnitId) -> Vec<(Tick, UnitState)> {
        self.events
            .iter()
            .filter_map(|(tick, e)| match *e {
                FleetEvent::UnitStateChanged { unit: u, state, .. } if u == unit => {
                    Some((*tick, state))
                }
                _ => None,
            })
            .collect()
    }
}

impl FleetObserver for EventRecorder {
    fn on_event(&mut self, tick: Tick, event: &FleetEvent) {
        self.events.push((tick, event.clone()));
    }
}
