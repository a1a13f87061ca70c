//! Generated passenger traffic.

use lift_core::SimRng;

/// Seed offset separating the traffic stream from other uses of the run seed.
const TRAFFIC_STREAM: u64 = 0x7261_6666;

/// Passengers pressing call buttons at random.
///
/// Each tick, with probability `call_probability`, one call is placed at a
/// floor drawn uniformly from `[0, num_floors)`.  The stream depends only on
/// the seed, so two runs with the same [`SimConfig::seed`] see the same calls.
///
/// [`SimConfig::seed`]: lift_core::SimConfig::seed
pub struct RandomTraffic {
    call_probability: f64,
    rng:              SimRng,
}

impl RandomTraffic {
    /// `call_probability` is clamped to `[0, 1]` when drawing and NaN is
    /// treated as 0; use
    /// [`SimBuilder::random_traffic`][crate::SimBuilder::random_traffic] to
    /// have it validated instead.
    pub fn new(call_probability: f64, seed: u64) -> Self {
        let mut root = SimRng::new(seed);
        Self {
            call_probability: if call_probability.is_nan() { 0.0 } else { call_probability },
            rng:              root.child(TRAFFIC_STREAM),
        }
    }

    /// The call placed this tick, if any.
    pub fn next_call(&mut self, num_floors: u32) -> Option<i64> {
        if num_floors == 0 || !self.rng.gen_bool(self.call_probability) {
            return None;
        }
        Some(self.rng.gen_range(0..num_floors) as i64)
    }
}
