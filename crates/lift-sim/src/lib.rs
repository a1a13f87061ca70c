//! `lift-sim` — tick loop driver for the liftsim elevator fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in start..config.total_ticks:
//!   ① Timers   — pop every timer due at `tick` off the clock and hand it
//!                to the dispatcher (arrivals, dwell ends, reassignment).
//!   ② Calls    — place scripted calls for `tick`, then at most one
//!                generated call.  Invalid floors go to on_call_rejected.
//!   ③ Timers   — fire zero-delay timers scheduled by ②.
//!   ④ Observe  — SimObserver::on_tick_end(tick, &Dispatcher).
//! ```
//!
//! The loop is the only thing that ever waits: with a
//! [`RealTimeClock`][lift_clock::RealTimeClock] each tick starts at its
//! wall-clock instant, with a [`VirtualClock`][lift_clock::VirtualClock] the
//! whole run completes as fast as the CPU allows.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_clock::VirtualClock;
//! use lift_core::SimConfig;
//! use lift_fleet::NoopObserver;
//! use lift_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), VirtualClock::new())
//!     .random_traffic(0.2)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod script;
pub mod sim;
pub mod traffic;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::SimObserver;
pub use script::{load_calls_csv, load_calls_reader, CallScript, ScheduledCall};
pub use sim::Sim;
pub use traffic::RandomTraffic;
