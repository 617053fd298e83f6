//! Generator and series configuration.
//!
//! Every config deserializes from JSON with missing fields taken from
//! `Default`, and offers chained `with_*` setters for use from code.
//! Validation happens once, when a generator is constructed.

use crate::error::ConfigError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum number of seasonality waves composed by the numeric generator.
pub const MAX_WAVES: usize = 5;

/// A wave period of 1 disables that wave.
pub const DISABLED_WAVE: i64 = 1;

fn check_id(id: &str, kind: &'static str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::BlankId { kind });
    }
    Ok(())
}

fn check_non_negative(id: &str, field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value < 0 {
        return Err(ConfigError::Negative {
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

fn check_unit_interval(id: &str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            id: id.to_string(),
            field,
            min: 0.0,
            max: 1.0,
            value,
        });
    }
    Ok(())
}

/// Numeric series shaping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Generator identifier.
    pub id: String,
    /// Number of samples the stretch interpolation and walk scaling span.
    pub samples: i64,

    /// Stretch multiplier at the first sample.
    pub stretch_start: f64,
    /// Stretch multiplier after `samples` samples.
    pub stretch_end: f64,
    /// Added per step.
    pub slope: f64,
    /// Constant offset.
    pub bump: f64,
    /// Lower bound.
    pub from: f64,
    /// Upper bound.
    pub to: f64,
    /// Clamp values above `to`.
    pub limit_upper: bool,
    /// Clamp values below `from`.
    pub limit_lower: bool,

    /// Step at which the permanent level shift starts. 0 disables it.
    pub perma_bump_at: i64,
    /// Level shift as a percentage of `to`. May be negative.
    pub perma_bump_by: f64,
    /// Steps taken to ease into the level shift. 0 disables it.
    pub perma_bump_smoother: i64,

    /// Use a biased random walk as baseline instead of the midpoint.
    pub use_random: bool,
    /// Random seed; negative seeds are not reproducible.
    pub seed: i64,
    /// Walk bias in `[0, 1]`.
    pub bias: f64,

    /// Inject periodic spikes.
    pub spike: bool,
    /// Spike period in steps.
    pub spike_every: i64,
    /// Plateau length in steps.
    pub spike_sustain: i64,
    /// Spike target as a percentage of `to`.
    pub spike_to: f64,
    /// Vary the plateau below the target.
    pub spike_wobble: bool,
    /// Larger factors give a flatter plateau; negative factors wobble upward.
    pub spike_wobble_factor: i64,
    /// Onset and decay ramp length in steps.
    pub spike_smoother: i64,

    /// Add sine seasonality.
    pub seasonality: bool,
    /// Wave periods in steps, at most [`MAX_WAVES`]. Missing waves are disabled.
    pub seasonality_waves: Vec<i64>,

    /// Track running statistics.
    pub keep_stats: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            samples: 100,
            stretch_start: 1.0,
            stretch_end: 1.0,
            slope: 0.0,
            bump: 0.0,
            from: 0.0,
            to: 100.0,
            limit_upper: false,
            limit_lower: false,
            perma_bump_at: 0,
            perma_bump_by: 0.0,
            perma_bump_smoother: 0,
            use_random: false,
            seed: 0,
            bias: 0.5,
            spike: false,
            spike_every: 0,
            spike_sustain: 0,
            spike_to: 100.0,
            spike_wobble: false,
            spike_wobble_factor: 1,
            spike_smoother: 0,
            seasonality: false,
            seasonality_waves: Vec::new(),
            keep_stats: false,
        }
    }
}

impl DataConfig {
    /// Create a config producing `samples` values between `from` and `to`.
    pub fn new(id: &str, samples: i64, from: f64, to: f64) -> Self {
        Self {
            id: id.to_string(),
            samples,
            from,
            to,
            ..Self::default()
        }
    }

    /// Set stretch multipliers at the start and end of the run.
    pub fn with_stretch(mut self, start: f64, end: f64) -> Self {
        self.stretch_start = start;
        self.stretch_end = end;
        self
    }

    /// Set the per-step trend.
    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    /// Set the constant offset.
    pub fn with_bump(mut self, bump: f64) -> Self {
        self.bump = bump;
        self
    }

    /// Clamp values to the bounds.
    pub fn with_limits(mut self, lower: bool, upper: bool) -> Self {
        self.limit_lower = lower;
        self.limit_upper = upper;
        self
    }

    /// Add a permanent level shift starting at `at`.
    pub fn with_permanent_bump(mut self, at: i64, by_percent: f64, smoother: i64) -> Self {
        self.perma_bump_at = at;
        self.perma_bump_by = by_percent;
        self.perma_bump_smoother = smoother;
        self
    }

    /// Use a random walk baseline.
    pub fn with_random_walk(mut self, seed: i64, bias: f64) -> Self {
        self.use_random = true;
        self.seed = seed;
        self.bias = bias;
        self
    }

    /// Set the seed without enabling the random walk.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Inject spikes.
    pub fn with_spikes(mut self, every: i64, sustain: i64, to_percent: f64, smoother: i64) -> Self {
        self.spike = true;
        self.spike_every = every;
        self.spike_sustain = sustain;
        self.spike_to = to_percent;
        self.spike_smoother = smoother;
        self
    }

    /// Wobble along the spike plateau.
    pub fn with_wobble(mut self, factor: i64) -> Self {
        self.spike_wobble = true;
        self.spike_wobble_factor = factor;
        self
    }

    /// Add seasonality from up to [`MAX_WAVES`] wave periods.
    pub fn with_seasonality(mut self, waves: &[i64]) -> Self {
        self.seasonality = true;
        self.seasonality_waves = waves.to_vec();
        self
    }

    /// Track statistics.
    pub fn with_stats(mut self) -> Self {
        self.keep_stats = true;
        self
    }

    /// Wave periods padded to [`MAX_WAVES`] with disabled waves.
    pub fn waves(&self) -> [i64; MAX_WAVES] {
        let mut out = [DISABLED_WAVE; MAX_WAVES];
        for (slot, &period) in out.iter_mut().zip(&self.seasonality_waves) {
            *slot = period;
        }
        out
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_id(&self.id, "data")?;
        if self.samples <= 0 {
            return Err(ConfigError::NonPositiveSamples {
                id: self.id.clone(),
                samples: self.samples,
            });
        }
        if self.from > self.to {
            return Err(ConfigError::InvertedBounds {
                id: self.id.clone(),
                from: self.from,
                to: self.to,
            });
        }
        check_unit_interval(&self.id, "Bias", self.bias)?;
        check_non_negative(&self.id, "Permanent bump start", self.perma_bump_at)?;
        check_non_negative(&self.id, "Permanent bump smoother", self.perma_bump_smoother)?;
        check_non_negative(&self.id, "Spike period", self.spike_every)?;
        check_non_negative(&self.id, "Spike sustain", self.spike_sustain)?;
        check_non_negative(&self.id, "Spike smoother", self.spike_smoother)?;

        if self.seasonality_waves.len() > MAX_WAVES {
            return Err(ConfigError::TooManyWaves {
                id: self.id.clone(),
                count: self.seasonality_waves.len(),
                max: MAX_WAVES,
            });
        }
        if let Some(&period) = self.seasonality_waves.iter().find(|&&p| p <= 0) {
            return Err(ConfigError::InvalidWavePeriod {
                id: self.id.clone(),
                period,
            });
        }
        Ok(())
    }
}

/// Repeating good/bad cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub id: String,
    /// Good samples per cycle.
    pub good: i64,
    /// Bad samples per cycle.
    pub bad: i64,
    pub keep_stats: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            good: 1,
            bad: 0,
            keep_stats: false,
        }
    }
}

impl PatternConfig {
    pub fn new(id: &str, good: i64, bad: i64) -> Self {
        Self {
            id: id.to_string(),
            good,
            bad,
            keep_stats: false,
        }
    }

    pub fn with_stats(mut self) -> Self {
        self.keep_stats = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_id(&self.id, "pattern")?;
        check_non_negative(&self.id, "Good", self.good)?;
        check_non_negative(&self.id, "Bad", self.bad)?;
        if self.good == 0 && self.bad == 0 {
            return Err(ConfigError::EmptyPattern {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Bernoulli good/bad draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub id: String,
    pub seed: i64,
    /// Probability of a good value, in `[0, 1]`.
    pub pct_good: f64,
    pub keep_stats: bool,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            seed: 0,
            pct_good: 1.0,
            keep_stats: false,
        }
    }
}

impl RandomConfig {
    pub fn new(id: &str, seed: i64, pct_good: f64) -> Self {
        Self {
            id: id.to_string(),
            seed,
            pct_good,
            keep_stats: false,
        }
    }

    pub fn with_stats(mut self) -> Self {
        self.keep_stats = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_id(&self.id, "random")?;
        check_unit_interval(&self.id, "Percentage good", self.pct_good)
    }
}

/// Sign of the jitter applied to generated timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitterDirection {
    /// Always earlier than the clock.
    Negative,
    /// Earlier or later at random.
    #[default]
    Either,
    /// Always later than the clock.
    Positive,
}

impl JitterDirection {
    /// Map a signed direction: below zero negative, above zero positive.
    pub fn from_sign(direction: i64) -> Self {
        match direction.signum() {
            -1 => JitterDirection::Negative,
            1 => JitterDirection::Positive,
            _ => JitterDirection::Either,
        }
    }
}

/// Jittered monotonic clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    pub id: String,
    /// First generated timestamp, emitted without jitter.
    pub start: DateTime<Utc>,
    /// Clock advance per step, in milliseconds.
    pub increment_ms: i64,
    /// Maximum jitter, in milliseconds.
    pub variance_ms: i64,
    pub direction: JitterDirection,
    pub seed: i64,
    pub keep_stats: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            // 2024-02-01 00:00:00 UTC
            start: Utc
                .timestamp_millis_opt(1_706_745_600_000)
                .single()
                .unwrap_or_default(),
            increment_ms: 60_000,
            variance_ms: 0,
            direction: JitterDirection::Either,
            seed: 0,
            keep_stats: false,
        }
    }
}

impl TimeConfig {
    pub fn new(id: &str, start: DateTime<Utc>, increment_ms: i64) -> Self {
        Self {
            id: id.to_string(),
            start,
            increment_ms,
            ..Self::default()
        }
    }

    /// Jitter every timestamp after the first by up to `variance_ms`.
    pub fn with_jitter(mut self, variance_ms: i64, direction: JitterDirection) -> Self {
        self.variance_ms = variance_ms;
        self.direction = direction;
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_stats(mut self) -> Self {
        self.keep_stats = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_id(&self.id, "time")?;
        check_non_negative(&self.id, "Increment", self.increment_ms)?;
        check_non_negative(&self.id, "Variance", self.variance_ms)
    }
}

/// One column of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnConfig {
    Data(DataConfig),
    Pattern(PatternConfig),
    Random(RandomConfig),
    Time(TimeConfig),
}

impl ColumnConfig {
    pub fn id(&self) -> &str {
        match self {
            ColumnConfig::Data(c) => &c.id,
            ColumnConfig::Pattern(c) => &c.id,
            ColumnConfig::Random(c) => &c.id,
            ColumnConfig::Time(c) => &c.id,
        }
    }

    /// Whether the column produces booleans.
    pub fn is_boolean(&self) -> bool {
        matches!(self, ColumnConfig::Pattern(_) | ColumnConfig::Random(_))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ColumnConfig::Data(c) => c.validate(),
            ColumnConfig::Pattern(c) => c.validate(),
            ColumnConfig::Random(c) => c.validate(),
            ColumnConfig::Time(c) => c.validate(),
        }
    }
}

/// Columns generated side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Columns in output order.
    pub columns: Vec<ColumnConfig>,
    /// Boolean columns OR-ed together to decide whether a row is good.
    /// No gates means every row is good.
    pub gates: Vec<String>,
}

impl SeriesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn add_column(mut self, column: ColumnConfig) -> Self {
        self.columns.push(column);
        self
    }

    /// Gate rows on a boolean column.
    pub fn with_gate(mut self, id: &str) -> Self {
        self.gates.push(id.to_string());
        self
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check every column, id uniqueness and gate references.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            column.validate()?;
            if !seen.insert(column.id()) {
                return Err(ConfigError::DuplicateColumn(column.id().to_string()));
            }
        }
        for gate in &self.gates {
            match self.columns.iter().find(|c| c.id() == gate) {
                None => return Err(ConfigError::UnknownGate(gate.clone())),
                Some(c) if !c.is_boolean() => {
                    return Err(ConfigError::GateNotBoolean(gate.clone()))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_config_defaults() {
        let config = DataConfig::default();
        assert_eq!(config.samples, 100);
        assert_eq!(config.stretch_start, 1.0);
        assert_eq!(config.waves(), [1; MAX_WAVES]);
    }

    #[test]
    fn test_data_config_builder() {
        let config = DataConfig::new("cpu", 500, 0.0, 100.0)
            .with_random_walk(7, 0.4)
            .with_spikes(50, 5, 90.0, 3)
            .with_seasonality(&[24, 168])
            .with_limits(true, true)
            .with_stats();

        assert!(config.use_random);
        assert_eq!(config.seed, 7);
        assert_eq!(config.spike_every, 50);
        assert_eq!(config.waves(), [24, 168, 1, 1, 1]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_data_config_rejections() {
        let base = DataConfig::new("cpu", 10, 0.0, 100.0);

        let mut c = base.clone();
        c.id = "  ".to_string();
        assert_eq!(c.validate(), Err(ConfigError::BlankId { kind: "data" }));

        let mut c = base.clone();
        c.samples = 0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositiveSamples { samples: 0, .. })
        ));

        let c = DataConfig::new("cpu", 10, 50.0, 10.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvertedBounds { .. })
        ));

        let c = base.clone().with_random_walk(1, 1.5);
        assert!(matches!(c.validate(), Err(ConfigError::OutOfRange { .. })));

        let c = base.clone().with_spikes(-1, 0, 100.0, 0);
        assert!(matches!(c.validate(), Err(ConfigError::Negative { .. })));

        let c = base.clone().with_seasonality(&[2, 3, 4, 5, 6, 7]);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::TooManyWaves { count: 6, .. })
        ));

        let c = base.with_seasonality(&[0]);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidWavePeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_pattern_config_validation() {
        assert!(PatternConfig::new("p", 2, 1).validate().is_ok());
        assert!(PatternConfig::new("p", 0, 1).validate().is_ok());
        assert!(matches!(
            PatternConfig::new("p", 0, 0).validate(),
            Err(ConfigError::EmptyPattern { .. })
        ));
        assert!(matches!(
            PatternConfig::new("p", -1, 2).validate(),
            Err(ConfigError::Negative { .. })
        ));
        assert!(matches!(
            PatternConfig::new("", 1, 1).validate(),
            Err(ConfigError::BlankId { kind: "pattern" })
        ));
    }

    #[test]
    fn test_random_config_validation() {
        assert!(RandomConfig::new("r", 1, 0.0).validate().is_ok());
        assert!(RandomConfig::new("r", 1, 1.0).validate().is_ok());
        assert!(RandomConfig::new("r", 1, 1.01).validate().is_err());
        assert!(RandomConfig::new("r", 1, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_jitter_direction_from_sign() {
        assert_eq!(JitterDirection::from_sign(-5), JitterDirection::Negative);
        assert_eq!(JitterDirection::from_sign(0), JitterDirection::Either);
        assert_eq!(JitterDirection::from_sign(3), JitterDirection::Positive);
    }

    #[test]
    fn test_series_config_from_json() {
        let json = r#"{
            "columns": [
                {"kind": "time", "id": "ts", "increment_ms": 1000},
                {"kind": "pattern", "id": "ok", "good": 23, "bad": 1},
                {"kind": "data", "id": "cpu", "samples": 50, "from": 0, "to": 100}
            ],
            "gates": ["ok"]
        }"#;
        let config = SeriesConfig::from_json(json).unwrap();
        assert_eq!(config.columns.len(), 3);
        assert_eq!(config.columns[2].id(), "cpu");
        match &config.columns[0] {
            ColumnConfig::Time(t) => {
                assert_eq!(t.increment_ms, 1000);
                assert_eq!(t.direction, JitterDirection::Either);
            }
            other => panic!("unexpected column {other:?}"),
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_series_config_rejections() {
        let dup = SeriesConfig::new()
            .add_column(ColumnConfig::Pattern(PatternConfig::new("a", 1, 1)))
            .add_column(ColumnConfig::Pattern(PatternConfig::new("a", 1, 1)));
        assert_eq!(
            dup.validate(),
            Err(ConfigError::DuplicateColumn("a".to_string()))
        );

        let unknown = SeriesConfig::new()
            .add_column(ColumnConfig::Pattern(PatternConfig::new("a", 1, 1)))
            .with_gate("b");
        assert_eq!(
            unknown.validate(),
            Err(ConfigError::UnknownGate("b".to_string()))
        );

        let numeric = SeriesConfig::new()
            .add_column(ColumnConfig::Data(DataConfig::new("d", 10, 0.0, 1.0)))
            .with_gate("d");
        assert_eq!(
            numeric.validate(),
            Err(ConfigError::GateNotBoolean("d".to_string()))
        );
    }
}
