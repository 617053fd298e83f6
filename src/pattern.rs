//! Boolean cadence generator: `good` true values followed by `bad` false
//! values, repeated.

use crate::config::PatternConfig;
use crate::error::Result;
use crate::stats::{RatioStats, RatioStatsSnapshot};

/// Repeating good/bad pattern.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    config: PatternConfig,
    i: i64,
    v: bool,
    stats: RatioStats,
}

impl PatternGenerator {
    /// Validate `config` and produce the first value.
    pub fn new(config: PatternConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "pattern generator '{}': {} good / {} bad",
            config.id,
            config.good,
            config.bad
        );

        let mut generator = Self {
            stats: RatioStats::new(&config.id),
            config,
            i: 0,
            v: false,
        };
        generator.advance();
        Ok(generator)
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn advance(&mut self) {
        self.i += 1;
        let cycle = self.config.good + self.config.bad;
        let pos = self.i % cycle;
        self.v = self.config.bad == 0 || (pos != 0 && pos <= self.config.good);

        if self.config.keep_stats {
            self.stats.record(self.v);
        }
    }

    /// Whether the current value is good.
    pub fn good(&self) -> bool {
        self.v
    }

    /// Whether the current value is bad.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_good_one_bad() {
        let mut p = PatternGenerator::new(PatternConfig::new("p", 2, 1)).unwrap();
        assert_eq!(
            p.values(10),
            vec![true, true, false, true, true, false, true, true, false, true]
        );
    }

    #[test]
    fn test_current_value_is_stable() {
        let p = PatternGenerator::new(PatternConfig::new("p", 3, 1)).unwrap();
        for _ in 0..10 {
            assert!(p.good());
            assert!(!p.bad());
        }
    }

    #[test]
    fn test_all_good_and_all_bad() {
        let mut good = PatternGenerator::new(PatternConfig::new("g", 4, 0)).unwrap();
        assert!(good.values(20).into_iter().all(|v| v));

        let mut bad = PatternGenerator::new(PatternConfig::new("b", 0, 3)).unwrap();
        assert!(bad.values(20).into_iter().all(|v| !v));
    }

    #[test]
    fn test_twenty_three_good_one_bad() {
        let mut p = PatternGenerator::new(PatternConfig::new("p", 23, 1)).unwrap();
        let values = p.values(48);
        let bad: Vec<usize> = (0..48).filter(|&i| !values[i]).collect();
        assert_eq!(bad, vec![23, 47]);
    }

    #[test]
    fn test_stats() {
        let mut p = PatternGenerator::new(PatternConfig::new("p", 2, 1).with_stats()).unwrap();
        p.values(5);
        // construction plus five advances: T T F T T F
        let snap = p.stats_snapshot();
        assert_eq!(snap.cumulative.total, 6);
        assert_eq!(snap.cumulative.good_count, 4);
        assert_eq!(snap.cumulative.bad_count, 2);
    }

    #[test]
    fn test_rejects_empty_pattern() {
        assert!(PatternGenerator::new(PatternConfig::new("p", 0, 0)).is_err());
    }
}
