//! Probabilistic good/bad generator.

use crate::config::RandomConfig;
use crate::error::Result;
use crate::rng::{is_reproducible, seeded_rng};
use crate::stats::{RatioStats, RatioStatsSnapshot};
use rand::rngs::StdRng;
use rand::Rng;

/// Good with probability `pct_good` on every step.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    config: RandomConfig,
    rng: StdRng,
    v: bool,
    stats: RatioStats,
}

impl RandomGenerator {
    /// Validate `config`, seed the random source and produce the first value.
    pub fn new(config: RandomConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "random generator '{}': p(good)={}, reproducible={}",
            config.id,
            config.pct_good,
            is_reproducible(config.seed)
        );

        let mut generator = Self {
            rng: seeded_rng(config.seed),
            stats: RatioStats::new(&config.id),
            config,
            v: false,
        };
        generator.advance();
        Ok(generator)
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn advance(&mut self) {
        self.v = self.rng.gen::<f64>() < self.config.pct_good;
        if self.config.keep_stats {
            self.stats.record(self.v);
        }
    }

    pub fn good(&self) -> bool {
        self.v
    }

    pub fn bad(&self) -> bool {
        !self.v
    }

    /// Read the current value then advance, `count` times.
    pub fn values(&mut self, count: usize) -> Vec<bool> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.good());
            self.advance();
        }
        out
    }

    pub fn stats_snapshot(&mut self) -> RatioStatsSnapshot {
        self.stats.snapshot()
    }
}
