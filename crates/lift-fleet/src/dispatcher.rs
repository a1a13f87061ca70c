//! The fleet-wide scheduler.

use std::collections::VecDeque;

use log::{debug, warn};

use lift_clock::{Clock, Timer, TimerKind};
use lift_core::{FleetConfig, Floor, LiftError, LiftResult, UnitId};

use crate::{FleetEvent, FleetObserver, Unit, UnitSignal, UnitState};

/// A call handed from the pending queue to a unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub floor: Floor,
    pub unit:  UnitId,
}

/// Owns the fleet and the global pending-call queue.
///
/// # Assignment policy
///
/// Only the **head** of the pending queue is ever considered.  It goes to the
/// idle unit nearest to its floor, ties broken by lowest unit id.  If no unit
/// is idle the head stays put and later calls wait behind it, even ones a
/// unit could serve.  Assignment is retried whenever a call arrives or a unit
/// becomes idle, and at most one call is assigned per attempt.
///
/// Calls are not deduplicated: the same floor requested twice is served
/// twice.
///
/// Every operation runs to completion synchronously; the only suspension
/// points are the timers left on the [`Clock`].
#[derive(Debug)]
pub struct Dispatcher {
    config:  FleetConfig,
    units:   Vec<Unit>,
    pending: VecDeque<Floor>,
}

impl Dispatcher {
    /// Build a fleet of `config.num_units` idle units at the ground floor.
    ///
    /// # Errors
    ///
    /// [`LiftError::InvalidConfiguration`] if the fleet has no units or the
    /// building has no floors.
    pub fn new(config: FleetConfig) -> LiftResult<Self> {
        config.validate()?;
        let units = (0..config.num_units)
            .map(|slot| Unit::new(UnitId::from_slot(slot), &config))
            .collect();
        Ok(Self {
            config,
            units,
            pending: VecDeque::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// All units in id order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.slot()?)
    }

    /// Calls accepted but not yet assigned, oldest first.
    pub fn pending_calls(&self) -> &VecDeque<Floor> {
        &self.pending
    }

    /// Number of units currently in `state`.
    pub fn count_in(&self, state: UnitState) -> usize {
        self.units.iter().filter(|u| u.state() == state).count()
    }

    /// `true` when no call is pending and every unit is idle.
    pub fn is_quiescent(&self) -> bool {
        self.pending.is_empty() && self.units.iter().all(Unit::is_idle)
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Accept a call for `floor` and try to assign the head pending call.
    ///
    /// Returns the assignment made during this call, which concerns the
    /// oldest pending call and so not necessarily `floor`.
    ///
    /// # Errors
    ///
    /// [`LiftError::InvalidFloor`] if `floor` is outside `[0, num_floors)`.
    /// Nothing is queued and no state changes.
    pub fn handle_call(
        &mut self,
        floor:    i64,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> LiftResult<Option<Assignment>> {
        let floor = self.config.check_floor(floor)?;
        self.pending.push_back(floor);
        debug!("call for {} queued (pending: {:?})", floor, self.pending);
        observer.on_event(clock.now(), &FleetEvent::CallQueued { floor });
        Ok(self.assign_next(clock, observer))
    }

    /// Try to hand the head pending call to the nearest idle unit.
    ///
    /// No-op when nothing is pending or no unit is idle.
    pub fn assign_next(
        &mut self,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> Option<Assignment> {
        let floor = *self.pending.front()?;
        let Some(unit_id) = self.select_unit(floor) else {
            debug!("no idle unit for {}; {} call(s) waiting", floor, self.pending.len());
            return None;
        };
        let slot = unit_id.slot()?;

        debug!("assigning {} to {}", floor, unit_id);
        observer.on_event(clock.now(), &FleetEvent::CallAssigned { floor, unit: unit_id });

        // The call leaves the pending queue only once the unit has taken it.
        match self.units[slot].enqueue(floor, clock, observer) {
            Ok(signal) => {
                debug_assert_eq!(signal, UnitSignal::Busy, "idle unit must start moving");
                self.pending.pop_front();
                Some(Assignment { floor, unit: unit_id })
            }
            Err(e) => {
                warn!("{} refused {}: {}; call stays pending", unit_id, floor, e);
                None
            }
        }
    }

    /// The idle unit nearest to `floor`, ties broken by lowest id.
    pub fn select_unit(&self, floor: Floor) -> Option<UnitId> {
        let mut best: Option<(u32, UnitId)> = None;
        for unit in self.units.iter().filter(|u| u.is_idle()) {
            let distance = unit.current_floor().distance(floor);
            // Strict `<` keeps the first (lowest-id) unit on ties.
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, unit.id()));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Deliver a fired timer to its unit, then retry assignment if the unit
    /// became idle.
    ///
    /// # Errors
    ///
    /// [`LiftError::UnitNotFound`] if the timer names a unit outside the
    /// fleet.
    pub fn on_timer(
        &mut self,
        timer:    Timer,
        clock:    &mut dyn Clock,
        observer: &mut dyn FleetObserver,
    ) -> LiftResult<()> {
        let unit = timer
            .unit
            .slot()
            .and_then(|slot| self.units.get_mut(slot))
            .ok_or(LiftError::UnitNotFound(timer.unit))?;

        let signal = match timer.kind {
            TimerKind::Arrival(floor) => {
                unit.on_arrival_timer(floor, clock, observer);
                UnitSignal::Busy
            }
            TimerKind::DwellEnd => unit.on_dwell_timer(clock, observer),
        };

        if signal == UnitSignal::BecameIdle {
            self.assign_next(clock, observer);
        }
        Ok(())
    }
}
