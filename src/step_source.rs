//! Forecast-backed co-simulation step source
//!
//! Translates simulation steps into forecast temperatures. The host drives
//! it as: configure the location, set up the experiment clock, initialize
//! (one fetch), then call `advance` once per step.

use serde::Serialize;
use tracing::{debug, info_span};

use crate::Result;
use crate::models::{ForecastQuery, LookupOutcome, SimulatedClock};
use crate::weather::{ForecastFetcher, ForecastProvider};

/// Temperature reported for steps without data; a policy value, not a measurement
pub const NOT_FOUND_TEMPERATURE: f64 = 0.0;

/// Output of one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepReading {
    pub temperature: f64,
    pub found: bool,
}

impl StepReading {
    const NOT_FOUND: Self = Self {
        temperature: NOT_FOUND_TEMPERATURE,
        found: false,
    };

    /// The host-facing `notFound` output variable
    #[must_use]
    pub fn not_found(&self) -> bool {
        !self.found
    }
}

pub struct ForecastStepSource {
    fetcher: ForecastFetcher,
    clock: SimulatedClock,
    outputs: StepReading,
}

impl ForecastStepSource {
    /// Fetch the forecast for `query` and prime the outputs with `advance(0, 0)`.
    ///
    /// A failed fetch is returned as is; without a series no step can run.
    pub async fn initialize<P: ForecastProvider + ?Sized>(
        provider: &P,
        query: ForecastQuery,
        clock: SimulatedClock,
    ) -> Result<Self> {
        let fetcher = ForecastFetcher::fetch(provider, query).await?;
        Ok(Self::with_fetcher(fetcher, clock))
    }

    /// Build from an already fetched series
    #[must_use]
    pub fn with_fetcher(fetcher: ForecastFetcher, clock: SimulatedClock) -> Self {
        let mut source = Self {
            fetcher,
            clock,
            outputs: StepReading::NOT_FOUND,
        };
        source.advance(0.0, 0.0);
        source
    }

    /// Read the forecast at `start + current_offset + step_size`.
    ///
    /// Never fails: absent data and lookup errors both yield `(0.0, false)`,
    /// the latter is also logged. Each call is an independent lookup.
    pub fn advance(&mut self, current_offset: f64, step_size: f64) -> StepReading {
        let _step = info_span!("step", current_offset, step_size).entered();
        let outcome = match self.clock.advance(current_offset, step_size) {
            Ok(target) => {
                let outcome = self.fetcher.lookup(target);
                debug!(%target, ?outcome, "step lookup");
                outcome
            }
            Err(e) => LookupOutcome::TransientError(e.to_string()),
        };

        self.outputs = match outcome.logged() {
            LookupOutcome::Found(reading) => StepReading {
                temperature: reading.air_temperature,
                found: true,
            },
            LookupOutcome::NotFound | LookupOutcome::TransientError(_) => StepReading::NOT_FOUND,
        };
        self.outputs
    }

    /// Outputs of the most recent step
    #[must_use]
    pub fn outputs(&self) -> StepReading {
        self.outputs
    }

    #[must_use]
    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    #[must_use]
    pub fn fetcher(&self) -> &ForecastFetcher {
        &self.fetcher
    }
}
