//! Running statistics kept by generators.
//!
//! Every tracker keeps two horizons: the lifetime of the generator and the
//! slot since the last snapshot. Taking a snapshot returns both and then
//! clears the slot; the lifetime horizon is never reset.

use crate::regression::RegressionAccumulator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one accounting horizon of a numeric generator.
#[derive(Debug, Clone, Default)]
struct NumericHorizon {
    total: u64,
    min: Option<f64>,
    max: Option<f64>,
    hit_min_at: Option<u64>,
    hit_max_at: Option<u64>,
    below_lower: u64,
    at_lower: u64,
    at_upper: u64,
    above_upper: u64,
    regression: RegressionAccumulator,
}

impl NumericHorizon {
    fn record(&mut self, value: f64, from: f64, to: f64) {
        self.regression.push(self.total as f64, value);
        self.total += 1;

        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        if self.hit_min_at.is_none() && value <= from {
            self.hit_min_at = Some(self.total);
        }
        if self.hit_max_at.is_none() && value >= to {
            self.hit_max_at = Some(self.total);
        }

        if value < from {
            self.below_lower += 1;
        }
        if value == from {
            self.at_lower += 1;
        }
        if value == to {
            self.at_upper += 1;
        }
        if value > to {
            self.above_upper += 1;
        }
    }

    fn summary(&self) -> NumericSummary {
        NumericSummary {
            total: self.total,
            minimum: self.min,
            maximum: self.max,
            hit_minimum_at: self.hit_min_at,
            hit_maximum_at: self.hit_max_at,
            points_below_lower_limit: self.below_lower,
            points_at_lower_limit: self.at_lower,
            points_at_upper_limit: self.at_upper,
            points_above_upper_limit: self.above_upper,
            slope: self.regression.slope(),
        }
    }
}

/// Serialized view of one numeric horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of values recorded.
    pub total: u64,
    /// Smallest value recorded.
    pub minimum: Option<f64>,
    /// Largest value recorded.
    pub maximum: Option<f64>,
    /// 1-based position of the first value at or below `from`.
    pub hit_minimum_at: Option<u64>,
    /// 1-based position of the first value at or above `to`.
    pub hit_maximum_at: Option<u64>,
    pub points_below_lower_limit: u64,
    pub points_at_lower_limit: u64,
    pub points_at_upper_limit: u64,
    pub points_above_upper_limit: u64,
    /// Least-squares slope of the recorded values against their position.
    pub slope: f64,
}

/// Statistics snapshot of a numeric generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStatsSnapshot {
    pub id: String,
    pub from: f64,
    pub to: f64,
    pub seed: i64,
    pub cumulative: NumericSummary,
    pub slot: NumericSummary,
}

/// Lifetime and slot statistics for a numeric generator.
#[derive(Debug, Clone)]
pub struct DataStats {
    id: String,
    from: f64,
    to: f64,
    seed: i64,
    cumulative: NumericHorizon,
    slot: NumericHorizon,
}

impl DataStats {
    /// Create an empty tracker for a generator bounded by `[from, to]`.
    pub fn new(id: &str, from: f64, to: f64, seed: i64) -> Self {
        Self {
            id: id.to_string(),
            from,
            to,
            seed,
            cumulative: NumericHorizon::default(),
            slot: NumericHorizon::default(),
        }
    }

    /// Add a value to both horizons.
    pub fn record(&mut self, value: f64) {
        self.cumulative.record(value, self.from, self.to);
        self.slot.record(value, self.from, self.to);
    }

    /// Summarize both horizons, then clear the slot.
    pub fn snapshot(&mut self) -> DataStatsSnapshot {
        let out = self.peek();
        self.slot = NumericHorizon::default();
        log::trace!("stats snapshot for '{}' taken, slot reset", self.id);
        out
    }

    /// Summarize both horizons without resetting anything.
    pub fn peek(&self) -> DataStatsSnapshot {
        DataStatsSnapshot {
            id: self.id.clone(),
            from: self.from,
            to: self.to,
            seed: self.seed,
            cumulative: self.cumulative.summary(),
            slot: self.slot.summary(),
        }
    }

    /// Lifetime number of recorded values.
    pub fn total(&self) -> u64 {
        self.cumulative.total
    }
}

/// Good/bad tallies for one horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSummary {
    pub total: u64,
    pub good_count: u64,
    pub bad_count: u64,
    /// Share of good values, 0 when nothing was recorded.
    pub good_ratio: f64,
}

impl RatioSummary {
    fn record(&mut self, good: bool) {
        self.total += 1;
        if good {
            self.good_count += 1;
        } else {
            self.bad_count += 1;
        }
        self.good_ratio = self.good_count as f64 / self.total as f64;
    }
}

/// Statistics snapshot of a boolean generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioStatsSnapshot {
    pub id: String,
    pub cumulative: RatioSummary,
    pub slot: RatioSummary,
}

/// Lifetime and slot good/bad statistics for pattern and random generators.
#[derive(Debug, Clone)]
pub struct RatioStats {
    id: String,
    cumulative: RatioSummary,
    slot: RatioSummary,
}

impl RatioStats {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            cumulative: RatioSummary::default(),
            slot: RatioSummary::default(),
        }
    }

    pub fn record(&mut self, good: bool) {
        self.cumulative.record(good);
        self.slot.record(good);
    }

    pub fn snapshot(&mut self) -> RatioStatsSnapshot {
        let out = RatioStatsSnapshot {
            id: self.id.clone(),
            cumulative: self.cumulative,
            slot: self.slot,
        };
        self.slot = RatioSummary::default();
        out
    }
}

/// Timestamp range for one horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSummary {
    pub total: u64,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

impl TimeSummary {
    fn record(&mut self, ts: DateTime<Utc>) {
        self.total += 1;
        self.latest = Some(ts);
        if self.earliest.is_none() {
            self.earliest = Some(ts);
        }
    }
}

/// Statistics snapshot of a time generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStatsSnapshot {
    pub id: String,
    pub cumulative: TimeSummary,
    pub slot: TimeSummary,
}

/// Lifetime and slot statistics for a time generator.
///
/// `earliest` is the first timestamp recorded in the horizon and `latest`
/// the last one; with jitter they are not necessarily the extremes.
#[derive(Debug, Clone)]
pub struct TimeStats {
    id: String,
    cumulative: TimeSummary,
    slot: TimeSummary,
}

impl TimeStats {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            cumulative: TimeSummary::default(),
            slot: TimeSummary::default(),
        }
    }

    pub fn record(&mut self, ts: DateTime<Utc>) {
        self.cumulative.record(ts);
        self.slot.record(ts);
    }

    pub fn snapshot(&mut self) -> TimeStatsSnapshot {
        let out = TimeStatsSnapshot {
            id: self.id.clone(),
            cumulative: self.cumulative,
            slot: self.slot,
        };
        self.slot = TimeSummary::default();
        out
    }
}

/// Statistics snapshot of any generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsSnapshot {
    Data(DataStatsSnapshot),
    Ratio(RatioStatsSnapshot),
    Time(TimeStatsSnapshot),
}

impl StatsSnapshot {
    /// Identifier of the generator the snapshot belongs to.
    pub fn id(&self) -> &str {
        match self {
            StatsSnapshot::Data(s) => &s.id,
            StatsSnapshot::Ratio(s) => &s.id,
            StatsSnapshot::Time(s) => &s.id,
        }
    }

    /// Render as indented JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<DataStatsSnapshot> for StatsSnapshot {
    fn from(s: DataStatsSnapshot) -> Self {
        StatsSnapshot::Data(s)
    }
}

impl From<RatioStatsSnapshot> for StatsSnapshot {
    fn from(s: RatioStatsSnapshot) -> Self {
        StatsSnapshot::Ratio(s)
    }
}

impl From<TimeStatsSnapshot> for StatsSnapshot {
    fn from(s: TimeStatsSnapshot) -> Self {
        StatsSnapshot::Time(s)
    }
}
