//! Feedback-based curve correction
//!
//! Proportional correction of the price-derived heating-curve command
//! using a recent indoor-temperature reading. Without a fresh reading the
//! command passes through unchanged.

use chrono::{DateTime, Utc};

use crate::setpoints::HeatingCommand;

/// Readings this old or older are ignored
pub const MAX_READING_AGE_SECS: i64 = 3600;

/// Fixed reference temperature for the parallel-offset mapping
const PARALLEL_BASELINE_C: f64 = 20.0;

/// Indoor temperature reported by the cloud sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Measured temperature in degrees Celsius
    pub value: f64,

    /// When the sensor observed the value
    pub observed_at: DateTime<Utc>,
}

impl TemperatureReading {
    /// Whether the reading is fresh enough to act on
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        (now - self.observed_at).num_seconds() < MAX_READING_AGE_SECS
    }
}

/// Apply the proportional correction to a curve command
///
/// The parallel offset is recomputed from the optimal temperature against
/// the fixed 20 C baseline (overwriting the price-derived value); the
/// curve gains a term proportional to the measured shortfall (additive).
pub fn correct(
    command: HeatingCommand,
    optimal_temp: f64,
    reading: Option<&TemperatureReading>,
    now: DateTime<Utc>,
) -> HeatingCommand {
    let Some(reading) = reading else {
        return command;
    };
    if !reading.is_fresh(now) {
        return command;
    }

    let diff = optimal_temp - reading.value;
    HeatingCommand {
        curve: command.curve + (10.0 * diff) as i32,
        parallel: ((optimal_temp - PARALLEL_BASELINE_C) * 10.0) as i32,
    }
}
