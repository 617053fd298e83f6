//! Shared generator contract.
//!
//! All four generators advance one step at a time, expose their current
//! value, produce batches and hand out statistics snapshots. [`Generator`]
//! captures that contract with the native value type; [`AnyGenerator`] wraps
//! the four kinds behind [`Value`] so a driver can treat columns uniformly.

use crate::config::ColumnConfig;
use crate::data::DataGenerator;
use crate::error::Result;
use crate::pattern::PatternGenerator;
use crate::random::RandomGenerator;
use crate::stats::StatsSnapshot;
use crate::time::TimeGenerator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Common capabilities of every generator.
///
/// Implementations are not synchronized; confine each instance to one
/// caller at a time.
pub trait Generator {
    /// Native value type.
    type Output;

    /// Identifier from the configuration.
    fn id(&self) -> &str;

    /// Compute and commit the next value.
    fn advance(&mut self);

    /// Most recently generated value.
    fn current(&self) -> Self::Output;

    /// Read the current value then advance, `count` times.
    fn produce_batch(&mut self, count: usize) -> Vec<Self::Output> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.current());
            self.advance();
        }
        out
    }

    /// Summarize statistics and reset the since-last-snapshot horizon.
    fn stats_snapshot(&mut self) -> StatsSnapshot;
}

impl Generator for DataGenerator {
    type Output = f64;

    fn id(&self) -> &str {
        DataGenerator::id(self)
    }

    fn advance(&mut self) {
        DataGenerator::advance(self)
    }

    fn current(&self) -> f64 {
        self.value()
    }

    fn stats_snapshot(&mut self) -> StatsSnapshot {
        DataGenerator::stats_snapshot(self).into()
    }
}

impl Generator for PatternGenerator {
    type Output = bool;

    fn id(&self) -> &str {
        PatternGenerator::id(self)
    }

    fn advance(&mut self) {
        PatternGenerator::advance(self)
    }

    fn current(&self) -> bool {
        self.good()
    }

    fn stats_snapshot(&mut self) -> StatsSnapshot {
        PatternGenerator::stats_snapshot(self).into()
    }
}

impl Generator for RandomGenerator {
    type Output = bool;

    fn id(&self) -> &str {
        RandomGenerator::id(self)
    }

    fn advance(&mut self) {
        RandomGenerator::advance(self)
    }

    fn current(&self) -> bool {
        self.good()
    }

    fn stats_snapshot(&mut self) -> StatsSnapshot {
        RandomGenerator::stats_snapshot(self).into()
    }
}

impl Generator for TimeGenerator {
    type Output = DateTime<Utc>;

    fn id(&self) -> &str {
        TimeGenerator::id(self)
    }

    fn advance(&mut self) {
        TimeGenerator::advance(self)
    }

    fn current(&self) -> DateTime<Utc> {
        self.time()
    }

    fn stats_snapshot(&mut self) -> StatsSnapshot {
        TimeGenerator::stats_snapshot(self).into()
    }
}

/// A value produced by any generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Time(DateTime<Utc>),
    Float(f64),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Any of the four generators.
#[derive(Debug, Clone)]
pub enum AnyGenerator {
    Data(DataGenerator),
    Pattern(PatternGenerator),
    Random(RandomGenerator),
    Time(TimeGenerator),
}

impl AnyGenerator {
    /// Build the generator a column describes.
    pub fn from_config(config: ColumnConfig) -> Result<Self> {
        Ok(match config {
            ColumnConfig::Data(c) => AnyGenerator::Data(DataGenerator::new(c)?),
            ColumnConfig::Pattern(c) => AnyGenerator::Pattern(PatternGenerator::new(c)?),
            ColumnConfig::Random(c) => AnyGenerator::Random(RandomGenerator::new(c)?),
            ColumnConfig::Time(c) => AnyGenerator::Time(TimeGenerator::new(c)?),
        })
    }
}

impl Generator for AnyGenerator {
    type Output = Value;

    fn id(&self) -> &str {
        match self {
            AnyGenerator::Data(g) => Generator::id(g),
            AnyGenerator::Pattern(g) => Generator::id(g),
            AnyGenerator::Random(g) => Generator::id(g),
            AnyGenerator::Time(g) => Generator::id(g),
        }
    }

    fn advance(&mut self) {
        match self {
            AnyGenerator::Data(g) => Generator::advance(g),
            AnyGenerator::Pattern(g) => Generator::advance(g),
            AnyGenerator::Random(g) => Generator::advance(g),
            AnyGenerator::Time(g) => Generator::advance(g),
        }
    }

    fn current(&self) -> Value {
        match self {
            AnyGenerator::Data(g) => Value::Float(g.current()),
            AnyGenerator::Pattern(g) => Value::Bool(g.current()),
            AnyGenerator::Random(g) => Value::Bool(g.current()),
            AnyGenerator::Time(g) => Value::Time(g.current()),
        }
    }

    fn stats_snapshot(&mut self) -> StatsSnapshot {
        match self {
            AnyGenerator::Data(g) => Generator::stats_snapshot(g),
            AnyGenerator::Pattern(g) => Generator::stats_snapshot(g),
            AnyGenerator::Random(g) => Generator::stats_snapshot(g),
            AnyGenerator::Time(g) => Generator::stats_snapshot(g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataConfig, PatternConfig, TimeConfig};

    #[test]
    fn test_batch_is_read_then_advance() {
        let mut p = PatternGenerator::new(PatternConfig::new("p", 1, 1)).unwrap();
        let first = Generator::current(&p);
        let batch = p.produce_batch(4);
        assert_eq!(batch[0], first);
        assert_eq!(batch, vec![true, false, true, false]);
        assert!(Generator::current(&p));
    }

    #[test]
    fn test_any_generator_values() {
        let mut d = AnyGenerator::from_config(ColumnConfig::Data(DataConfig::new(
            "cpu", 10, 0.0, 10.0,
        )))
        .unwrap();
        assert_eq!(d.id(), "cpu");
        assert_eq!(d.current(), Value::Float(5.0));
        assert_eq!(d.produce_batch(2), vec![Value::Float(5.0); 2]);

        let blank = AnyGenerator::from_config(ColumnConfig::Time(TimeConfig::default()));
        assert!(blank.is_err(), "blank id must be rejected");
    }

    #[test]
    fn test_any_generator_snapshot_kind() {
        let mut p =
            AnyGenerator::from_config(ColumnConfig::Pattern(PatternConfig::new("p", 1, 0)))
                .unwrap();
        assert!(matches!(p.stats_snapshot(), StatsSnapshot::Ratio(_)));
    }

    #[test]
    fn test_value_accessors_and_display() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Float(1.5).as_bool(), None);
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert!(Value::Bool(false).as_time().is_none());
    }
}
