//! lobby — console front end for the liftsim elevator fleet simulator.
//!
//! ```text
//! lobby [--realtime] [config.json] [calls.csv]
//! ```
//!
//! Without a call script, passengers press call buttons at random.  Every
//! arrival is announced with a chime, rejected calls are reported, and each
//! tick with a car in motion prints a countdown line.  The full event log is
//! written to `output/lobby/` as CSV.
//!
//! `--realtime` paces the run against the wall clock (one tick per
//! `tick_duration_ms`); otherwise it completes instantly.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use lift_clock::{Clock, RealTimeClock, VirtualClock};
use lift_core::{LiftError, SimConfig, Tick, TimeScale};
use lift_fleet::{Dispatcher, FleetEvent, FleetObserver};
use lift_output::{CsvWriter, OutputWriter, SimOutputObserver};
use lift_sim::{Sim, SimBuilder, SimObserver, load_calls_csv};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:       &str = "output/lobby";
const DEMO_TOTAL_TICKS: u64  = 120;
const CALL_PROBABILITY: f64  = 0.15;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Args {
    realtime: bool,
    config:   Option<PathBuf>,
    calls:    Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            args.realtime = true;
        } else if arg.ends_with(".json") && args.config.is_none() {
            args.config = Some(arg.into());
        } else if arg.ends_with(".csv") && args.calls.is_none() {
            args.calls = Some(arg.into());
        } else {
            bail!("unexpected argument {arg:?}\nusage: lobby [--realtime] [config.json] [calls.csv]");
        }
    }
    Ok(args)
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        None => Ok(SimConfig { total_ticks: DEMO_TOTAL_TICKS, ..SimConfig::default() }),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
        }
    }
}

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints the lobby view and forwards everything to the CSV log.
struct LobbyObserver<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    scale:    TimeScale,
    arrivals: usize,
    rejected: usize,
}

impl<W: OutputWriter> LobbyObserver<W> {
    fn new(inner: SimOutputObserver<W>, scale: TimeScale) -> Self {
        Self { inner, scale, arrivals: 0, rejected: 0 }
    }

    /// `"1 min 4 sec."`, or `"9 sec."` under a minute.
    fn countdown(&self, ticks: u64) -> String {
        match self.scale.min_sec(ticks) {
            (0, sec) => format!("{sec} sec."),
            (min, sec) => format!("{min} min {sec} sec."),
        }
    }
}

impl<W: OutputWriter> FleetObserver for LobbyObserver<W> {
    fn on_event(&mut self, tick: Tick, event: &FleetEvent) {
        if let FleetEvent::UnitArrived { unit, floor } = event {
            self.arrivals += 1;
            println!("T{:<5}  ♪ ding  car {} arrived at floor {}", tick.0, unit.0, floor.0);
        }
        self.inner.on_event(tick, event);
    }
}

impl<W: OutputWriter> SimObserver for LobbyObserver<W> {
    fn on_call_rejected(&mut self, tick: Tick, floor: i64, error: &LiftError) {
        self.rejected += 1;
        println!("T{:<5}  call for floor {floor} rejected: {error}", tick.0);
        self.inner.on_call_rejected(tick, floor, error);
    }

    fn on_tick_end(&mut self, tick: Tick, fleet: &Dispatcher) {
        let moving: Vec<String> = fleet
            .units()
            .iter()
            .filter_map(|unit| {
                let target = unit.target_floor()?;
                let remaining = unit.remaining_ticks(tick);
                Some(format!("car {}→{} {}", unit.id().0, target.0, self.countdown(remaining)))
            })
            .collect();
        if !moving.is_empty() {
            println!(
                "T{:<5}  {}  | waiting: {}",
                tick.0,
                moving.join("  "),
                fleet.pending_calls().len()
            );
        }
        self.inner.on_tick_end(tick, fleet);
    }

    fn on_sim_end(&mut self, final_tick: Tick, fleet: &Dispatcher) {
        self.inner.on_sim_end(final_tick, fleet);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;

    println!("=== lobby — liftsim ===");
    println!(
        "Units: {}  |  Floors: {}  |  Ticks: {}  |  Tick: {} ms  |  Seed: {}",
        config.fleet.num_units,
        config.fleet.num_floors,
        config.total_ticks,
        config.fleet.tick_duration_ms,
        config.seed
    );

    let scale = config.fleet.time_scale();
    if args.realtime {
        let builder = SimBuilder::new(config.clone(), RealTimeClock::new(scale));
        run(with_traffic(builder, args.calls.as_deref())?.build()?, &config)
    } else {
        let builder = SimBuilder::new(config.clone(), VirtualClock::new());
        run(with_traffic(builder, args.calls.as_deref())?.build()?, &config)
    }
}

/// Attach the call script, or random traffic when there is none.
fn with_traffic<C: Clock>(builder: SimBuilder<C>, calls: Option<&Path>) -> Result<SimBuilder<C>> {
    Ok(match calls {
        Some(path) => {
            let script = load_calls_csv(path)
                .with_context(|| format!("loading {}", path.display()))?;
            println!("Call script: {} call(s) from {}", script.len(), path.display());
            builder.script(script)
        }
        None => {
            println!("Random traffic: p = {CALL_PROBABILITY} per tick");
            builder.random_traffic(CALL_PROBABILITY)
        }
    })
}

fn run<C: Clock>(mut sim: Sim<C>, config: &SimConfig) -> Result<()> {
    println!();

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = LobbyObserver::new(SimOutputObserver::new(writer, config), config.fleet.time_scale());

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    info!("run took {:.3} s", t0.elapsed().as_secs_f64());

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!(
        "Done: {} arrival(s), {} rejected call(s), {} still waiting",
        obs.arrivals,
        obs.rejected,
        sim.dispatcher.pending_calls().len()
    );
    println!("Event log written to {OUTPUT_DIR}/");
    println!();

    println!("{:<10} {:<8} {:<10}", "Unit", "Floor", "State");
    println!("{}", "-".repeat(28));
    for unit in sim.dispatcher.units() {
        println!(
            "{:<10} {:<8} {:<10}",
            unit.id().0,
            unit.current_floor().0,
            unit.state().as_str()
        );
    }

    Ok(())
}
