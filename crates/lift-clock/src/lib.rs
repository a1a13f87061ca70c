//! `lift-clock` — timers and the clock capability that drives them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`timer`]       | `Timer`, `TimerKind`                                      |
//! | [`timer_queue`] | `TimerQueue` (`BTreeMap<Tick, VecDeque<Timer>>`)          |
//! | [`clock`]       | `Clock` trait, `VirtualClock`, `RealTimeClock`            |
//!
//! # Timing model (summary)
//!
//! ```text
//! unit starts a leg      → clock.after(travel_ticks, Arrival(floor))
//! arrival timer fires    → clock.after(dwell_ticks, DwellEnd)
//! dwell timer fires      → next leg, or idle
//! ```
//!
//! Timers due at the same tick fire in scheduling order.

pub mod clock;
pub mod timer;
pub mod timer_queue;


pub use clock::{Clock, RealTimeClock, VirtualClock};
pub use timer::{Timer, TimerKind};
pub use timer_queue::TimerQueue;
