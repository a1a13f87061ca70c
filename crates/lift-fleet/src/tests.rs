//! Unit tests for lift-fleet.

use lift_clock::{Clock, TimerKind, VirtualClock};
use lift_core::{FleetConfig, Floor, LiftError, Tick, UnitId};

use crate::{Dispatcher, EventRecorder, FleetEvent, Unit, UnitState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Every non-idle unit owns exactly one outstanding timer; idle units none.
fn assert_timer_invariant(d: &Dispatcher, clock: &VirtualClock) {
    for unit in d.units() {
        let expected = usize::from(!unit.is_idle());
        assert_eq!(
            clock.pending_for(unit.id()),
            expected,
            "{} is {} with {} timers",
            unit.id(),
            unit.state(),
            clock.pending_for(unit.id()),
        );
    }
}

/// Fire every timer due up to and including `until`, then park the clock there.
fn run_until(d: &mut Dispatcher, clock: &mut VirtualClock, obs: &mut EventRecorder, until: Tick) {
    while let Some((_, timer)) = clock.pop_due(until) {
        d.on_timer(timer, clock, obs).unwrap();
        assert_timer_invariant(d, clock);
    }
    clock.advance_to(until);
}

/// Drive a lone unit (no dispatcher) up to `until`.
fn drive_unit(unit: &mut Unit, clock: &mut VirtualClock, obs: &mut EventRecorder, until: Tick) {
    while let Some((_, timer)) = clock.pop_due(until) {
        match timer.kind {
            TimerKind::Arrival(floor) => unit.on_arrival_timer(floor, clock, obs),
            TimerKind::DwellEnd => {
                let _ = unit.on_dwell_timer(clock, obs);
            }
        }
    }
    clock.advance_to(until);
}

fn fleet(units: usize, floors: u32) -> (Dispatcher, VirtualClock, EventRecorder) {
    let d = Dispatcher::new(FleetConfig::new(units, floors)).unwrap();
    (d, VirtualClock::new(), EventRecorder::new())
}

// ── Leg ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod leg {
    use crate::Leg;

    use super::*;

    fn leg() -> Leg {
        Leg { from: Floor(0), to: Floor(4), departure_tick: Tick(10), arrival_tick: Tick(22) }
    }

    #[test]
    fn remaining_counts_down() {
        let l = leg();
        assert_eq!(l.duration_ticks(), 12);
        assert_eq!(l.remaining_ticks(Tick(10)), 12);
        assert_eq!(l.remaining_ticks(Tick(19)), 3);
        assert_eq!(l.remaining_ticks(Tick(30)), 0);
    }

    #[test]
    fn progress_is_clamped() {
        let l = leg();
        assert_eq!(l.progress(Tick(10)), 0.0);
        assert_eq!(l.progress(Tick(16)), 0.5);
        assert_eq!(l.progress(Tick(40)), 1.0);
    }

    #[test]
    fn zero_length_leg_is_complete() {
        let l = Leg { from: Floor(3), to: Floor(3), departure_tick: Tick(5), arrival_tick: Tick(5) };
        assert_eq!(l.progress(Tick(5)), 1.0);
        assert_eq!(l.remaining_ticks(Tick(5)), 0);
    }
}

// ── Unit state machine ────────────────────────────────────────────────────────

#[cfg(test)]
mod unit {
    use crate::UnitSignal;

    use super::*;

    fn lone_unit() -> (Unit, VirtualClock, EventRecorder) {
        (Unit::new(UnitId(1), &FleetConfig::default()), VirtualClock::new(), EventRecorder::new())
    }

    #[test]
    fn starts_idle_at_ground() {
        let (unit, _, _) = lone_unit();
        assert_eq!(unit.state(), UnitState::Idle);
        assert_eq!(unit.current_floor(), Floor(0));
        assert!(unit.queue().is_empty());
        assert!(unit.leg().is_none());
    }

    #[test]
    fn enqueue_on_idle_starts_moving() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let signal = unit.enqueue(Floor(4), &mut clock, &mut obs).unwrap();
        assert_eq!(signal, UnitSignal::Busy);
        assert_eq!(unit.state(), UnitState::Moving);
        assert_eq!(unit.target_floor(), Some(Floor(4)));
        assert!(unit.queue().is_empty(), "head is consumed when leaving Idle");
        assert_eq!(clock.next_due(), Some(Tick(12)));
    }

    #[test]
    fn huge_travel_time_saturates() {
        let config = FleetConfig { per_floor_ticks: u64::MAX, ..FleetConfig::default() };
        let mut unit = Unit::new(UnitId(1), &config);
        let mut clock = VirtualClock::starting_at(Tick(10));
        let mut obs = EventRecorder::new();

        let _ = unit.enqueue(Floor(9), &mut clock, &mut obs).unwrap();
        assert_eq!(clock.next_due(), Some(Tick(u64::MAX)));
        assert_eq!(unit.remaining_ticks(Tick(10)), u64::MAX - 10);
        assert!(obs.events.iter().any(|(_, e)| matches!(
            e,
            FleetEvent::UnitMovementStarted { duration_ms: u64::MAX, .. }
        )));
    }

    #[test]
    fn travel_then_dwell_timing() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let _ = unit.enqueue(Floor(4), &mut clock, &mut obs).unwrap();

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(11));
        assert_eq!(unit.state(), UnitState::Moving);
        assert_eq!(unit.current_floor(), Floor(0));
        assert_eq!(unit.remaining_ticks(Tick(11)), 1);

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(12));
        assert_eq!(unit.state(), UnitState::Dwelling);
        assert_eq!(unit.current_floor(), Floor(4));

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(13));
        assert_eq!(unit.state(), UnitState::Dwelling);

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(14));
        assert_eq!(unit.state(), UnitState::Idle);

        assert_eq!(
            obs.states_of(UnitId(1)),
            vec![
                (Tick(0), UnitState::Moving),
                (Tick(12), UnitState::Dwelling),
                (Tick(14), UnitState::Idle),
            ]
        );
        assert_eq!(obs.arrivals(), vec![(Tick(12), UnitId(1), Floor(4))]);
    }

    #[test]
    fn movement_started_reports_wall_duration() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let _ = unit.enqueue(Floor(7), &mut clock, &mut obs).unwrap();
        assert!(obs.events.contains(&(
            Tick(0),
            FleetEvent::UnitMovementStarted {
                unit:        UnitId(1),
                from:        Floor(0),
                to:          Floor(7),
                duration_ms: 21_000,
            }
        )));
    }

    #[test]
    fn fifo_regardless_of_distance() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        for f in [5, 2, 8] {
            let _ = unit.enqueue(Floor(f), &mut clock, &mut obs).unwrap();
        }
        assert_eq!(unit.queue().iter().copied().collect::<Vec<_>>(), vec![Floor(2), Floor(8)]);

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(100));
        // 0→5: 15, dwell to 17; 5→2: 9 → 26, dwell to 28; 2→8: 18 → 46.
        assert_eq!(
            obs.arrivals(),
            vec![
                (Tick(15), UnitId(1), Floor(5)),
                (Tick(26), UnitId(1), Floor(2)),
                (Tick(46), UnitId(1), Floor(8)),
            ]
        );
        assert_eq!(unit.state(), UnitState::Idle);
    }

    #[test]
    fn zero_distance_arrives_immediately() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let _ = unit.enqueue(Floor(0), &mut clock, &mut obs).unwrap();
        assert_eq!(unit.state(), UnitState::Moving);
        assert_eq!(clock.next_due(), Some(Tick(0)));

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(0));
        assert_eq!(unit.state(), UnitState::Dwelling);
        assert_eq!(obs.arrivals(), vec![(Tick(0), UnitId(1), Floor(0))]);

        drive_unit(&mut unit, &mut clock, &mut obs, Tick(2));
        assert_eq!(unit.state(), UnitState::Idle);
    }

    #[test]
    fn enqueue_while_busy_only_queues() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let _ = unit.enqueue(Floor(3), &mut clock, &mut obs).unwrap();
        let signal = unit.enqueue(Floor(6), &mut clock, &mut obs).unwrap();
        assert_eq!(signal, UnitSignal::Busy);
        assert_eq!(unit.target_floor(), Some(Floor(3)));
        assert_eq!(unit.queue().len(), 1);
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn invalid_floor_rejected_without_mutation() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        let err = unit.enqueue(Floor(10), &mut clock, &mut obs).unwrap_err();
        assert_eq!(err, LiftError::InvalidFloor { floor: 10, num_floors: 10 });
        assert_eq!(unit.state(), UnitState::Idle);
        assert!(unit.queue().is_empty());
        assert!(obs.events.is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn empty_queue_signals_idle() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        assert_eq!(unit.process_next(&mut clock, &mut obs), UnitSignal::BecameIdle);
        assert_eq!(unit.state(), UnitState::Idle);
    }

    #[test]
    fn stray_timers_are_ignored() {
        let (mut unit, mut clock, mut obs) = lone_unit();
        unit.on_arrival_timer(Floor(5), &mut clock, &mut obs);
        assert_eq!(unit.on_dwell_timer(&mut clock, &mut obs), UnitSignal::Busy);
        assert_eq!(unit.state(), UnitState::Idle);
        assert_eq!(unit.current_floor(), Floor(0));
        assert!(obs.events.is_empty());
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatcher {
    use lift_clock::Timer;

    use crate::Assignment;

    use super::*;

    #[test]
    fn initialize_builds_idle_fleet() {
        let (d, _, _) = fleet(5, 10);
        let ids: Vec<UnitId> = d.units().iter().map(Unit::id).collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(2), UnitId(3), UnitId(4), UnitId(5)]);
        assert!(d.units().iter().all(|u| u.is_idle() && u.current_floor() == Floor(0)));
        assert!(d.pending_calls().is_empty());
        assert!(d.is_quiescent());
    }

    #[test]
    fn initialize_rejects_empty_fleet_or_building() {
        assert!(matches!(
            Dispatcher::new(FleetConfig::new(0, 10)),
            Err(LiftError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Dispatcher::new(FleetConfig::new(3, 0)),
            Err(LiftError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unit_lookup_by_id() {
        let (d, _, _) = fleet(3, 10);
        assert_eq!(d.unit(UnitId(3)).map(Unit::id), Some(UnitId(3)));
        assert!(d.unit(UnitId(4)).is_none());
        assert!(d.unit(UnitId(0)).is_none());
    }

    #[test]
    fn end_to_end_five_by_ten() {
        let (mut d, mut clock, mut obs) = fleet(5, 10);

        let first = d.handle_call(7, &mut clock, &mut obs).unwrap();
        assert_eq!(first, Some(Assignment { floor: Floor(7), unit: UnitId(1) }));

        run_until(&mut d, &mut clock, &mut obs, Tick(1));
        assert_eq!(d.unit(UnitId(1)).unwrap().state(), UnitState::Moving);

        let second = d.handle_call(2, &mut clock, &mut obs).unwrap();
        assert_eq!(second, Some(Assignment { floor: Floor(2), unit: UnitId(2) }));
        assert!(d.pending_calls().is_empty());
        assert_timer_invariant(&d, &clock);
    }

    #[test]
    fn call_emits_events_in_order() {
        let (mut d, mut clock, mut obs) = fleet(2, 10);
        d.handle_call(7, &mut clock, &mut obs).unwrap();
        let kinds: Vec<&str> = obs.events.iter().map(|(_, e)| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["call_queued", "call_assigned", "unit_state_changed", "unit_movement_started"]
        );
    }

    #[test]
    fn tie_break_prefers_lowest_id_at_ground() {
        let (d, _, _) = fleet(4, 10);
        for floor in 0..10 {
            assert_eq!(d.select_unit(Floor(floor)), Some(UnitId(1)));
        }
    }

    #[test]
    fn tie_break_prefers_lowest_id_off_ground() {
        let (mut d, mut clock, mut obs) = fleet(3, 10);
        d.handle_call(2, &mut clock, &mut obs).unwrap(); // unit 1: idle at 2 by T8
        d.handle_call(6, &mut clock, &mut obs).unwrap(); // unit 2: idle at 6 by T20
        run_until(&mut d, &mut clock, &mut obs, Tick(20));
        assert!(d.is_quiescent());

        // Units 1 and 2 are both two floors from 4; unit 3 is four away.
        let a = d.handle_call(4, &mut clock, &mut obs).unwrap();
        assert_eq!(a, Some(Assignment { floor: Floor(4), unit: UnitId(1) }));
    }

    #[test]
    fn nearest_idle_unit_wins_over_lower_id() {
        let (mut d, mut clock, mut obs) = fleet(2, 10);
        d.handle_call(8, &mut clock, &mut obs).unwrap(); // unit 1 → 8, idle by T26
        run_until(&mut d, &mut clock, &mut obs, Tick(26));

        let a = d.handle_call(7, &mut clock, &mut obs).unwrap();
        assert_eq!(a.map(|a| a.unit), Some(UnitId(1)));
        let b = d.handle_call(1, &mut clock, &mut obs).unwrap();
        assert_eq!(b.map(|a| a.unit), Some(UnitId(2)));
    }

    #[test]
    fn busy_fleet_leaves_call_pending() {
        let (mut d, mut clock, mut obs) = fleet(1, 10);
        d.handle_call(3, &mut clock, &mut obs).unwrap();
        let a = d.handle_call(5, &mut clock, &mut obs).unwrap();
        assert_eq!(a, None);
        assert_eq!(d.pending_calls().iter().copied().collect::<Vec<_>>(), vec![Floor(5)]);
    }

    #[test]
    fn one_assignment_per_attempt() {
        let (mut d, mut clock, mut obs) = fleet(1, 10);
        d.handle_call(3, &mut clock, &mut obs).unwrap();
        d.handle_call(5, &mut clock, &mut obs).unwrap();
        d.handle_call(1, &mut clock, &mut obs).unwrap();

        // 0→3 arrives T9, idle T11: only the head (5) is handed over.
        run_until(&mut d, &mut clock, &mut obs, Tick(11));
        assert_eq!(d.unit(UnitId(1)).unwrap().target_floor(), Some(Floor(5)));
        assert_eq!(d.pending_calls().iter().copied().collect::<Vec<_>>(), vec![Floor(1)]);
        assert!(d.unit(UnitId(1)).unwrap().queue().is_empty());
    }

    #[test]
    fn assigned_call_leaves_queue_after_unit_takes_it() {
        let (mut d, mut clock, mut obs) = fleet(1, 10);
        let assignment = d.handle_call(6, &mut clock, &mut obs).unwrap();

        assert_eq!(assignment, Some(Assignment { floor: Floor(6), unit: UnitId(1) }));
        assert!(d.pending_calls().is_empty());
        assert_eq!(d.unit(UnitId(1)).unwrap().target_floor(), Some(Floor(6)));
        assert_eq!(obs.assignments(), vec![(Floor(6), UnitId(1))]);
        assert_eq!(clock.pending_for(UnitId(1)), 1);
    }

    #[test]
    fn head_only_assignment() {
        let (mut d, mut clock, mut obs) = fleet(2, 10);
        d.handle_call(9, &mut clock, &mut obs).unwrap(); // unit 1: arrives T27, idle T29
        d.handle_call(3, &mut clock, &mut obs).unwrap(); // unit 2: arrives T9, idle T11
        d.handle_call(7, &mut clock, &mut obs).unwrap();
        d.handle_call(2, &mut clock, &mut obs).unwrap();
        assert_eq!(d.pending_calls().len(), 2);

        // Unit 2 frees up at floor 3: one floor from 2, four from 7.  It still
        // takes the head call.
        run_until(&mut d, &mut clock, &mut obs, Tick(11));
        assert_eq!(d.unit(UnitId(2)).unwrap().target_floor(), Some(Floor(7)));
        assert_eq!(d.pending_calls().iter().copied().collect::<Vec<_>>(), vec![Floor(2)]);

        // 3→7 arrives T23, idle T25; floor 2 waits until then.
        run_until(&mut d, &mut clock, &mut obs, Tick(24));
        assert_eq!(d.pending_calls().len(), 1);
        run_until(&mut d, &mut clock, &mut obs, Tick(25));
        assert!(d.pending_calls().is_empty());
        assert_eq!(
            obs.assignments(),
            vec![
                (Floor(9), UnitId(1)),
                (Floor(3), UnitId(2)),
                (Floor(7), UnitId(2)),
                (Floor(2), UnitId(2)),
            ]
        );
    }

    #[test]
    fn invalid_calls_do_not_mutate() {
        let (mut d, mut clock, mut obs) = fleet(5, 10);
        for raw in [-1, 10, i64::MIN, i64::MAX] {
            let err = d.handle_call(raw, &mut clock, &mut obs).unwrap_err();
            assert_eq!(err, LiftError::InvalidFloor { floor: raw, num_floors: 10 });
        }
        assert!(d.pending_calls().is_empty());
        assert!(d.is_quiescent());
        assert!(obs.events.is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn duplicate_calls_are_served_twice() {
        let (mut d, mut clock, mut obs) = fleet(1, 10);
        d.handle_call(4, &mut clock, &mut obs).unwrap();
        d.handle_call(4, &mut clock, &mut obs).unwrap();
        assert_eq!(d.pending_calls().len(), 1);

        run_until(&mut d, &mut clock, &mut obs, Tick(50));
        // Second visit is a zero-length leg starting when the unit idles at T14.
        assert_eq!(
            obs.arrivals(),
            vec![(Tick(12), UnitId(1), Floor(4)), (Tick(14), UnitId(1), Floor(4))]
        );
        assert!(d.is_quiescent());
    }

    #[test]
    fn selected_unit_was_idle() {
        let (mut d, mut clock, mut obs) = fleet(3, 10);
        for raw in [5, 1, 9, 2, 7, 0, 3] {
            d.handle_call(raw, &mut clock, &mut obs).unwrap();
        }
        run_until(&mut d, &mut clock, &mut obs, Tick(500));
        assert!(d.is_quiescent());

        // Walk the stream: every CallAssigned must target a unit whose last
        // reported state was Idle.
        let mut states = [UnitState::Idle; 3];
        for (_, event) in &obs.events {
            match *event {
                FleetEvent::CallAssigned { unit, .. } => {
                    assert_eq!(states[unit.slot().unwrap()], UnitState::Idle);
                }
                FleetEvent::UnitStateChanged { unit, state, .. } => {
                    states[unit.slot().unwrap()] = state;
                }
                _ => {}
            }
        }
        assert_eq!(obs.assignments().len(), 7);
    }

    #[test]
    fn timer_for_unknown_unit_errors() {
        let (mut d, mut clock, mut obs) = fleet(2, 10);
        let err = d.on_timer(Timer::dwell_end(UnitId(9)), &mut clock, &mut obs).unwrap_err();
        assert_eq!(err, LiftError::UnitNotFound(UnitId(9)));
    }

    #[test]
    fn state_counts() {
        let (mut d, mut clock, mut obs) = fleet(3, 10);
        d.handle_call(1, &mut clock, &mut obs).unwrap();
        assert_eq!(d.count_in(UnitState::Moving), 1);
        assert_eq!(d.count_in(UnitState::Idle), 2);
        run_until(&mut d, &mut clock, &mut obs, Tick(3));
        assert_eq!(d.count_in(UnitState::Dwelling), 1);
    }
}
