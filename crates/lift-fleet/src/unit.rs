//! The per-car state machine.

use std::collections::VecDeque;

use log::{debug, warn};

use lift_clock::{Clock, Timer};
use lift_core::{FleetConfig, Floor, LiftError, LiftResult, Tick, UnitId};

use crate::{FleetEvent, FleetObserver, Leg, UnitState};

/// What the dispatcher must do after a unit reacted to a trigger.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitSignal {
    /// The unit is (still) working; nothing to do.
    Busy,
    /// The unit ran out of queued floors and is available again.  The
    /// dispatcher retries assignment of its pending calls.
    BecameIdle,
}

/// One simulated elevator car.
///
/// A unit serves its private queue strictly in insertion order: floors are
/// never re-sorted by distance.  Every transition is reported to the
/// [`FleetObserver`] passed into the triggering call.
///
/// ```text
/// Idle ──enqueue──▶ Moving ──arrival timer──▶ Dwelling ──dwell timer──┐
///  ▲                  ▲                                               │
///  └── queue empty ───┴────────────── queue non-empty ────────────────┘
/// ```
#[derive(Debug)]
pub struct Unit {
    id:            UnitId,
    current_floor: Floor,
    state:         UnitState,
    queue:         VecDeque<Floor>,
    /// The current or most recent leg; `None` until the first movement.
    leg:           Option<Leg>,
    config:        FleetConfig,
}

impl Unit {
    /// A unit idle at the ground floor with an empty queue.
    pub fn new(id: UnitId, config: &FleetConfig) -> Self {
        Self {
            id,
            current_floor: Floor::GROUND,
            state:         UnitState::Idle,
            queue:         VecDeque::new(),
            leg:           None,
            config:        config.clone(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// The floor the unit occupies (its departure floor while moving).
    #[inline]
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    #[inline]
    pub fn state(&self) -> UnitState {
        self.state
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == UnitState::Idle
    }

    /// Floors waiting to be visited, in visitation order.
    pub fn queue(&self) -> &VecDeque<Floor> {
        &self.queue
    }

    /// The leg in progress while `Moving`; `None` otherwise.
    pub fn leg(&self) -> Option<&Leg> {
        match self.state {
            UnitState::Moving => self.leg.as_ref(),
            _ => None,
        }
    }

    /// The floor the unit is heading to, if moving.
    pub fn target_floor(&self) -> Option<Floor> {
        self.leg().map(|leg| leg.to)
    }

    /// Countdown to arrival at `now`; 0 when not moving.
    pub fn remaining_ticks(&self, now: Tick) -> u64 {
        self.leg().map_or(0, |leg| leg.remaining_ticks(now))
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Append `floor` to the queue.  An idle unit starts moving immediately;
    /// a busy unit picks it up after everything queued before it.
    ///
    /// # Errors
    ///
    /// [`LiftError::InvalidFloor`] if `floor` is outside the building.  The
    /// queue is left untouched.
    pub fn enqueue(
        &mut self,
        floor:    Floor,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> LiftResult<UnitSignal> {
        if floor.0 >= self.config.num_floors {
            return Err(LiftError::InvalidFloor {
                floor:      floor.0 as i64,
                num_floors: self.config.num_floors,
            });
        }
        self.queue.push_back(floor);
        debug!("{} queued {} (queue: {:?})", self.id, floor, self.queue);

        if self.state == UnitState::Idle {
            Ok(self.process_next(clock, observer))
        } else {
            Ok(UnitSignal::Busy)
        }
    }

    /// Start the next queued leg, or go idle if there is none.
    pub fn process_next(
        &mut self,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> UnitSignal {
        match self.queue.pop_front() {
            None => {
                self.set_state(UnitState::Idle, clock.now(), observer);
                UnitSignal::BecameIdle
            }
            Some(floor) => {
                self.set_state(UnitState::Moving, clock.now(), observer);
                self.move_to(floor, clock, observer);
                UnitSignal::Busy
            }
        }
    }

    /// React to the arrival timer of the current leg.
    pub fn on_arrival_timer(
        &mut self,
        floor:    Floor,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) {
        if self.state != UnitState::Moving {
            warn!("{} ignored arrival at {} while {}", self.id, floor, self.state);
            return;
        }
        let now = clock.now();
        self.current_floor = floor;
        self.set_state(UnitState::Dwelling, now, observer);
        observer.on_event(now, &FleetEvent::UnitArrived { unit: self.id, floor });
        clock.after(self.config.dwell_ticks, Timer::dwell_end(self.id));
    }

    /// React to the end of the dwell at the current floor.
    pub fn on_dwell_timer(
        &mut self,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> UnitSignal {
        if self.state != UnitState::Dwelling {
            warn!("{} ignored dwell end while {}", self.id, self.state);
            return UnitSignal::Busy;
        }
        self.process_next(clock, observer)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn move_to(&mut self, floor: Floor, clock: &mut dyn Clock, observer: &mut dyn FleetObserver) {
        let now = clock.now();
        let ticks = self.config.travel_ticks(self.current_floor, floor);
        let leg = Leg {
            from:           self.current_floor,
            to:             floor,
            departure_tick: now,
            arrival_tick:   now + ticks,
        };
        self.leg = Some(leg);

        observer.on_event(now, &FleetEvent::UnitMovementStarted {
            unit:        self.id,
            from:        leg.from,
            to:          leg.to,
            duration_ms: self.config.time_scale().ms_for_ticks(ticks),
        });
        clock.after(ticks, Timer::arrival(self.id, floor));
    }

    fn set_state(&mut self, state: UnitState, now: Tick, observer: &mut dyn FleetObserver) {
        if self.state == state {
            return;
        }
        debug!("{} {} → {} at {} ({})", self.id, self.state, state, self.current_floor, now);
        self.state = state;
        observer.on_event(now, &FleetEvent::UnitStateChanged {
            unit:  self.id,
            floor: self.current_floor,
            state,
        });
    }
}
