//! Plain data row types written by output backends.

use lift_core::{LiftError, Tick};
use lift_fleet::{FleetEvent, Unit, UnitState};

/// One fleet event, flattened.  Columns that do not apply to `kind` are
/// `None` (empty in CSV, `NULL` in SQLite).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:        u64,
    /// [`FleetEvent::kind`], or `"call_rejected"`.
    pub kind:        &'static str,
    pub unit_id:     Option<u32>,
    /// The floor the event concerns.  For rejected calls this is the raw
    /// requested value, which may be negative.
    pub floor:       Option<i64>,
    pub state:       Option<&'static str>,
    pub from_floor:  Option<u32>,
    pub to_floor:    Option<u32>,
    pub duration_ms: Option<u64>,
    /// Error message for rejected calls.
    pub detail:      Option<String>,
}

impl EventRow {
    fn empty(tick: Tick, kind: &'static str) -> Self {
        Self {
            tick:        tick.0,
            kind,
            unit_id:     None,
            floor:       None,
            state:       None,
            from_floor:  None,
            to_floor:    None,
            duration_ms: None,
            detail:      None,
        }
    }

    pub fn from_event(tick: Tick, event: &FleetEvent) -> Self {
        let mut row = Self::empty(tick, event.kind());
        row.unit_id = event.unit().map(|u| u.0);
        match *event {
            FleetEvent::CallQueued { floor }
            | FleetEvent::CallAssigned { floor, .. }
            | FleetEvent::UnitArrived { floor, .. } => {
                row.floor = Some(floor.0 as i64);
            }
            FleetEvent::UnitStateChanged { floor, state, .. } => {
                row.floor = Some(floor.0 as i64);
                row.state = Some(state.as_str());
            }
            FleetEvent::UnitMovementStarted { from, to, duration_ms, .. } => {
                row.from_floor = Some(from.0);
                row.to_floor = Some(to.0);
                row.duration_ms = Some(duration_ms);
            }
        }
        row
    }

    pub fn call_rejected(tick: Tick, floor: i64, error: &LiftError) -> Self {
        let mut row = Self::empty(tick, "call_rejected");
        row.floor = Some(floor);
        row.detail = Some(error.to_string());
        row
    }
}

/// A snapshot of one unit at a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSnapshotRow {
    pub tick:            u64,
    pub unit_id:         u32,
    /// Current floor; the departure floor while moving.
    pub floor:           u32,
    pub state:           &'static str,
    /// Destination while moving.
    pub target_floor:    Option<u32>,
    /// Countdown to arrival; 0 when not moving.
    pub remaining_ticks: u64,
    /// Floors still queued on the unit, `;`-separated in visiting order.
    pub queued_floors:   String,
}

impl UnitSnapshotRow {
    pub fn from_unit(tick: Tick, unit: &Unit) -> Self {
        let queued_floors = unit
            .queue()
            .iter()
            .map(|f| f.0.to_string())
            .collect::<Vec<_>>()
            .join(";");
        Self {
            tick:            tick.0,
            unit_id:         unit.id().0,
            floor:           unit.current_floor().0,
            state:           unit.state().as_str(),
            target_floor:    unit.target_floor().map(|f| f.0),
            remaining_ticks: unit.remaining_ticks(tick),
            queued_floors,
        }
    }
}

/// Fleet-wide counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub pending_calls:  u32,
    pub idle_units:     u32,
    pub moving_units:   u32,
    pub dwelling_units: u32,
}

impl TickSummaryRow {
    pub fn from_fleet(tick: Tick, fleet: &lift_fleet::Dispatcher) -> Self {
        let count = |state| fleet.count_in(state) as u32;
        Self {
            tick:           tick.0,
            pending_calls:  fleet.pending_calls().len() as u32,
            idle_units:     count(UnitState::Idle),
            moving_units:   count(UnitState::Moving),
            dwelling_units: count(UnitState::Dwelling),
        }
    }
}
