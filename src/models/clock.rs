//! Simulated clock mapping co-simulation time to wall-clock instants

use chrono::{DateTime, TimeDelta, Utc};

use crate::{RdtError, Result};

/// Start instant plus the elapsed simulated seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    start: DateTime<Utc>,
    offset_seconds: f64,
}

impl SimulatedClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            offset_seconds: 0.0,
        }
    }

    /// Anchor the clock at "now + start_time", as the host does when it sets up an experiment
    pub fn for_experiment(start_time_seconds: f64) -> Result<Self> {
        let start = shift(Utc::now(), start_time_seconds)?;
        Ok(Self::new(start))
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn offset_seconds(&self) -> f64 {
        self.offset_seconds
    }

    /// Wall-clock instant at the end of a step
    pub fn target(&self, current_offset: f64, step_size: f64) -> Result<DateTime<Utc>> {
        shift(self.start, current_offset + step_size)
    }

    /// Move the offset to the end of a step and return that instant
    pub fn advance(&mut self, current_offset: f64, step_size: f64) -> Result<DateTime<Utc>> {
        let target = self.target(current_offset, step_size)?;
        self.offset_seconds = current_offset + step_size;
        Ok(target)
    }
}

fn shift(instant: DateTime<Utc>, seconds: f64) -> Result<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(RdtError::forecast(format!("simulated offset {seconds} is not finite")));
    }
    let millis = (seconds * 1000.0).round();
    // f64 -> i64 saturates, which keeps out-of-range offsets on the error path below
    let delta = TimeDelta::try_milliseconds(millis as i64)
        .ok_or_else(|| RdtError::forecast(format!("simulated offset {seconds}s is out of range")))?;
    instant
        .checked_add_signed(delta)
        .ok_or_else(|| RdtError::forecast(format!("simulated offset {seconds}s overflows {instant}")))
}
