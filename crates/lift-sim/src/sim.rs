//! The `Sim` struct and its tick loop.

use log::{debug, info, warn};

use lift_clock::Clock;
use lift_core::{LiftResult, SimConfig, Tick};
use lift_fleet::{Assignment, Dispatcher};

use crate::{CallScript, RandomTraffic, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<C>` owns the fleet and the clock and drives them one tick at a time.
/// Within tick `t`:
///
/// 1. **Timers**: every timer due at or before `t` fires, in due order and
///    then scheduling order.  Timers created while firing (a zero-length leg
///    arriving immediately) fire in the same pass.
/// 2. **Scripted calls** placed at `t`, in script order.
/// 3. **Random traffic**: at most one generated call.
/// 4. **Timers** again, for zero-delay timers scheduled by the calls above.
/// 5. [`SimObserver::on_tick_end`].
///
/// Rejected calls are reported through [`SimObserver::on_call_rejected`]
/// and never stop the run.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C: Clock> {
    /// Global configuration (fleet shape, total ticks, seed, …).
    pub config: SimConfig,

    /// Time source and timer queue.  A [`lift_clock::VirtualClock`] runs
    /// as fast as possible; a [`lift_clock::RealTimeClock`] paces each tick
    /// against the wall clock.
    pub clock: C,

    /// The fleet and its pending-call queue.
    pub dispatcher: Dispatcher,

    /// Calls still to be placed.
    pub script: CallScript,

    /// Optional generated calls on top of the script.
    pub traffic: Option<RandomTraffic>,

    /// The next tick to process.
    next_tick: Tick,
}

impl<C: Clock> Sim<C> {
    pub(crate) fn new(
        config:     SimConfig,
        clock:      C,
        dispatcher: Dispatcher,
        script:     CallScript,
        traffic:    Option<RandomTraffic>,
    ) -> Self {
        let next_tick = clock.now();
        Self { config, clock, dispatcher, script, traffic, next_tick }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// The next tick [`run_ticks`][Self::run_ticks] will process.
    pub fn next_tick(&self) -> Tick {
        self.next_tick
    }

    /// Place a call right now, outside the script.
    ///
    /// Runs the whole cascade at the current tick: a unit already at the
    /// requested floor arrives before this returns.
    ///
    /// # Errors
    ///
    /// [`lift_core::LiftError::InvalidFloor`] if `floor` is outside the
    /// building.  The rejection is also reported to the observer.
    pub fn call<O: SimObserver>(
        &mut self,
        floor:    i64,
        observer: &mut O,
    ) -> LiftResult<Option<Assignment>> {
        let now = self.clock.now();
        match self.dispatcher.handle_call(floor, &mut self.clock, observer) {
            Ok(assignment) => {
                self.fire_due(now, observer)?;
                Ok(assignment)
            }
            Err(e) => {
                observer.on_call_rejected(now, floor, &e);
                Err(e)
            }
        }
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Use [`NoopObserver`][lift_fleet::NoopObserver] if you don't need
    /// callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        info!(
            "running {} unit(s) over {} floor(s) from {} to {}",
            self.config.fleet.num_units, self.config.fleet.num_floors, self.next_tick, end
        );
        while self.next_tick < end {
            self.step(observer)?;
        }
        info!(
            "finished at {}: {} call(s) pending, {} timer(s) outstanding",
            self.next_tick,
            self.dispatcher.pending_calls().len(),
            self.clock.pending()
        );
        observer.on_sim_end(self.next_tick, &self.dispatcher);
        Ok(())
    }

    /// Process every tick up to and including `tick`.
    pub fn run_until<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) -> SimResult<()> {
        while self.next_tick <= tick {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run until the fleet is at rest with nothing left to do, or until
    /// `max_ticks` ticks have been processed.
    ///
    /// Returns `true` if the fleet settled.  Random traffic is not consulted
    /// when deciding whether work remains, but still places calls while
    /// stepping.
    pub fn settle<O: SimObserver>(&mut self, max_ticks: u64, observer: &mut O) -> SimResult<bool> {
        for _ in 0..max_ticks {
            if self.is_settled() {
                return Ok(true);
            }
            self.step(observer)?;
        }
        Ok(self.is_settled())
    }

    /// `true` when no timer is outstanding, the script is exhausted, and the
    /// dispatcher has nothing pending with every unit idle.
    pub fn is_settled(&self) -> bool {
        self.clock.pending() == 0 && self.script.is_empty() && self.dispatcher.is_quiescent()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.next_tick;
        self.clock.advance_to(now);

        self.fire_due(now, observer)?;

        while let Some(call) = self.script.pop_due(now) {
            self.place(now, call.floor, observer);
        }
        let generated = self
            .traffic
            .as_mut()
            .and_then(|t| t.next_call(self.config.fleet.num_floors));
        if let Some(floor) = generated {
            debug!("{now}: generated call for floor {floor}");
            self.place(now, floor, observer);
        }

        self.fire_due(now, observer)?;

        observer.on_tick_end(now, &self.dispatcher);
        self.next_tick = now + 1;
        Ok(())
    }

    /// Fire every timer due at or before `now`, including ones scheduled by
    /// the timers being fired.
    fn fire_due<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> LiftResult<()> {
        while let Some((_, timer)) = self.clock.pop_due(now) {
            self.dispatcher.on_timer(timer, &mut self.clock, observer)?;
        }
        Ok(())
    }

    fn place<O: SimObserver>(&mut self, now: Tick, floor: i64, observer: &mut O) {
        if let Err(e) = self.dispatcher.handle_call(floor, &mut self.clock, observer) {
            warn!("{now}: call rejected: {e}");
            observer.on_call_rejected(now, floor, &e);
        }
    }
}
