//! # fakeseries - Synthetic time series for testing and demos
//!
//! Generates reproducible, telemetry-shaped data: numeric series with trend,
//! seasonality, spikes and noise, good/bad sample markers and a jittered
//! clock to stamp them with.
//!
//! ## Quick Start
//!
//! ```rust
//! use fakeseries::{DataConfig, DataGenerator};
//!
//! // CPU-like percentage that wanders, spikes every 50 samples and
//! // never leaves [0, 100]
//! let config = DataConfig::new("cpu", 500, 0.0, 100.0)
//!     .with_random_walk(42, 0.5)
//!     .with_spikes(50, 5, 95.0, 3)
//!     .with_limits(true, true)
//!     .with_stats();
//!
//! let mut cpu = DataGenerator::new(config).unwrap();
//! let values = cpu.values(500);
//! assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
//!
//! let stats = cpu.stats_snapshot();
//! assert_eq!(stats.cumulative.total, 501);
//! ```
//!
//! ## Generators
//!
//! - [`DataGenerator`]: numeric series (the core shaping pipeline)
//! - [`PatternGenerator`]: fixed good/bad cadence
//! - [`RandomGenerator`]: good with a fixed probability
//! - [`TimeGenerator`]: monotonic clock with bounded jitter
//!
//! All four implement [`Generator`]. [`Series`] drives several of them side
//! by side, using boolean columns to mark rows as good or bad samples.
//!
//! ## Reproducibility
//!
//! Non-negative seeds replay the same sequence on every run; negative seeds
//! draw fresh entropy.

pub mod config;
pub mod data;
pub mod error;
pub mod pattern;
pub mod random;
pub mod regression;
pub mod rng;
pub mod series;
pub mod stats;
pub mod time;
pub mod value;

// Re-exports for convenient access
pub use config::{
    ColumnConfig, DataConfig, JitterDirection, PatternConfig, RandomConfig, SeriesConfig,
    TimeConfig, MAX_WAVES,
};
pub use data::{DataGenerator, SpikeWindow};
pub use error::{ConfigError, Error, Result};
pub use pattern::PatternGenerator;
pub use random::RandomGenerator;
pub use regression::RegressionAccumulator;
pub use series::{Row, Series};
pub use stats::{
    DataStats, DataStatsSnapshot, NumericSummary, RatioStatsSnapshot, RatioSummary,
    StatsSnapshot, TimeStatsSnapshot, TimeSummary,
};
pub use time::TimeGenerator;
pub use value::{AnyGenerator, Generator, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
