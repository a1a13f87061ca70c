//! Fluent builder for constructing a [`Sim`].

use lift_clock::Clock;
use lift_core::SimConfig;
use lift_fleet::Dispatcher;

use crate::{CallScript, RandomTraffic, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<C>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: fleet shape, total ticks, seed, …
/// - `C: Clock`: [`lift_clock::VirtualClock`] for tests and batch runs,
///   [`lift_clock::RealTimeClock`] for live presentation
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default            |
/// |------------------------|--------------------|
/// | `.script(s)`           | No scripted calls  |
/// | `.random_traffic(p)`   | No generated calls |
///
/// # Example
///
/// ```rust,ignore
/// let script = load_calls_csv(Path::new("calls.csv"))?;
/// let mut sim = SimBuilder::new(config, VirtualClock::new())
///     .script(script)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<C: Clock> {
    config:           SimConfig,
    clock:            C,
    script:           Option<CallScript>,
    call_probability: Option<f64>,
}

impl<C: Clock> SimBuilder<C> {
    pub fn new(config: SimConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            script:           None,
            call_probability: None,
        }
    }

    /// Supply calls to place at fixed ticks.
    pub fn script(mut self, script: CallScript) -> Self {
        self.script = Some(script);
        self
    }

    /// Generate one call per tick with probability `call_probability`,
    /// seeded from `config.seed`.
    pub fn random_traffic(mut self, call_probability: f64) -> Self {
        self.call_probability = Some(call_probability);
        self
    }

    /// Validate inputs, build the fleet, and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Lift`] wrapping `InvalidConfiguration` for an unusable
    ///   fleet shape.
    /// - [`SimError::Config`] for a traffic probability outside `[0, 1]`.
    pub fn build(self) -> SimResult<Sim<C>> {
        self.config.validate()?;

        let traffic = match self.call_probability {
            Some(p) if !(0.0..=1.0).contains(&p) => {
                return Err(SimError::Config(format!(
                    "call probability {p} is outside [0, 1]"
                )));
            }
            Some(p) => Some(RandomTraffic::new(p, self.config.seed)),
            None => None,
        };

        let dispatcher = Dispatcher::new(self.config.fleet.clone())?;
        let script = self.script.unwrap_or_default();

        Ok(Sim::new(self.config, self.clock, dispatcher, script, traffic))
    }
}
