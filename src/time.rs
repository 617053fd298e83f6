//! Jittered timestamp generator.
//!
//! The underlying clock advances by a fixed increment. Every emitted value
//! after the first is the clock plus a bounded random jitter, so emitted
//! values may overlap while the clock itself stays monotonic.

use crate::config::{JitterDirection, TimeConfig};
use crate::error::Result;
use crate::rng::{is_reproducible, round_to, seeded_rng};
use crate::stats::{TimeStats, TimeStatsSnapshot};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;

/// Rounding unit applied to the jitter before truncating to milliseconds.
const JITTER_ROUNDING: f64 = 0.000_000_000_5;

/// Monotonic clock with jitter.
#[derive(Debug, Clone)]
pub struct TimeGenerator {
    config: TimeConfig,
    rng: StdRng,
    clock: DateTime<Utc>,
    first: bool,
    v: DateTime<Utc>,
    stats: TimeStats,
}

impl TimeGenerator {
    /// Validate `config`, seed the random source and emit the start time.
    pub fn new(config: TimeConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "time generator '{}': start {}, +{}ms, jitter {}ms {:?}, reproducible={}",
            config.id,
            config.start,
            config.increment_ms,
            config.variance_ms,
            config.direction,
            is_reproducible(config.seed)
        );

        let mut generator = Self {
            rng: seeded_rng(config.seed),
            clock: config.start,
            first: true,
            v: config.start,
            stats: TimeStats::new(&config.id),
            config,
        };
        generator.advance();
        Ok(generator)
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn advance(&mut self) {
        let a: f64 = self.rng.gen();

        if self.first {
            self.first = false;
            self.v = self.clock;
        } else {
            // The clock holds at the last representable instant.
            if let Some(next) = offset(self.clock, self.config.increment_ms) {
                self.clock = next;
            }
            self.v = offset(self.clock, self.jitter_ms(a)).unwrap_or(self.clock);
        }

        if self.config.keep_stats {
            self.stats.record(self.v);
        }
    }

    /// Jitter in milliseconds for the draw `a`.
    fn jitter_ms(&self, a: f64) -> i64 {
        let scaled = self.config.variance_ms as f64 * a;
        let sign = match self.config.direction {
            JitterDirection::Negative => -1.0,
            JitterDirection::Positive => 1.0,
            JitterDirection::Either if scaled.fract() > 0.5 => 1.0,
            JitterDirection::Either => -1.0,
        };
        (round_to(scaled, JITTER_ROUNDING) * sign) as i64
    }

    /// Current timestamp.
    pub fn time(&self) -> DateTime<Utc> {
        self.v
    }

    /// Underlying clock without jitter.
    pub fn clock(&self) -> DateTime<Utc> {
        self.clock
    }

    /// Read the current value then advance, `count` times.
    pub fn times(&mut self, count: usize) -> Vec<DateTime<Utc>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.time());
            self.advance();
        }
        out
    }

    pub fn stats_snapshot(&mut self) -> TimeStatsSnapshot {
        self.stats.snapshot()
    }
}

/// `time` shifted by `ms` milliseconds, `None` when out of range.
fn offset(time: DateTime<Utc>, ms: i64) -> Option<DateTime<Utc>> {
    Duration::try_milliseconds(ms).and_then(|d| time.checked_add_signed(d))
}
