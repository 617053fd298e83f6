//! Numeric series generator.
//!
//! Each step composes, in order: spike window tracking, a baseline (the
//! midpoint of the bounds or a biased random walk), seasonality, a permanent
//! level shift, trend and offset, stretch/squish scaling, spike injection and
//! clamping. One uniform draw is taken per step, so a seeded generator always
//! replays the same sequence.

use crate::config::{DataConfig, MAX_WAVES};
use crate::error::Result;
use crate::rng::{is_reproducible, seeded_rng};
use crate::stats::{DataStats, DataStatsSnapshot};
use rand::rngs::StdRng;
use rand::Rng;
use std::f64::consts::PI;

/// Spike window tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpikeWindow {
    /// Number of window recomputations so far.
    pub cycle: i64,
    /// First step of the current window.
    pub start: i64,
    /// Last step of the current window.
    pub end: i64,
}

impl SpikeWindow {
    /// Place the window for the current cycle, then walk forward until its
    /// start is no longer behind `step`.
    ///
    /// The walk stops early as soon as a candidate start is not positive,
    /// which can leave the window behind `step` for good when the period
    /// does not exceed the onset length.
    ///
    /// Window arithmetic saturates, so huge periods park the window beyond
    /// any reachable step instead of wrapping.
    fn recompute(&mut self, step: i64, every: i64, onset: i64, sustain: i64) {
        let stride = every.saturating_sub(onset);
        let span = onset.saturating_mul(2).saturating_add(sustain);
        self.start = self.cycle.saturating_mul(stride);
        self.end = self.start.saturating_add(span);

        let mut k = self.cycle.saturating_add(1);
        while self.start < step {
            self.start = k.saturating_mul(stride);
            self.end = self.start.saturating_add(span);
            if self.start <= 0 {
                break;
            }
            k = k.saturating_add(1);
        }
    }

    fn contains(&self, step: i64) -> bool {
        step >= self.start && step <= self.end
    }
}

/// Mutable per-step state.
#[derive(Debug, Clone, Default)]
struct RuntimeState {
    /// Steps taken.
    i: i64,
    /// Raw signal of the previous step, before stretching.
    f: f64,
    /// Previous output.
    v: f64,
    /// Random walk accumulator.
    b: f64,
    window: SpikeWindow,
    /// Onset/decay length in use; zero is rewritten to 1 on first use.
    onset: i64,
    /// Wobble factor in use; zero is rewritten to 1 on first use.
    wobble: i64,
}

/// Generates a reproducible numeric series from shaping parameters.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    config: DataConfig,
    waves: [i64; MAX_WAVES],
    stretch_step: f64,
    rng: StdRng,
    state: RuntimeState,
    stats: DataStats,
}

impl DataGenerator {
    /// Validate `config`, seed the random source and produce the first value.
    pub fn new(config: DataConfig) -> Result<Self> {
        config.validate()?;

        let stretch_step = stretch_step(config.stretch_start, config.stretch_end, config.samples);
        let stats = DataStats::new(&config.id, config.from, config.to, config.seed);
        let state = RuntimeState {
            onset: config.spike_smoother,
            wobble: config.spike_wobble_factor,
            ..RuntimeState::default()
        };

        log::debug!(
            "data generator '{}': {} samples in [{}, {}], reproducible={}",
            config.id,
            config.samples,
            config.from,
            config.to,
            is_reproducible(config.seed)
        );

        let mut generator = Self {
            waves: config.waves(),
            rng: seeded_rng(config.seed),
            stretch_step,
            state,
            stats,
            config,
        };
        generator.advance();
        Ok(generator)
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Per-step change of the stretch multiplier.
    pub fn stretch_step(&self) -> f64 {
        self.stretch_step
    }

    /// Number of steps taken, including the one taken at construction.
    pub fn steps(&self) -> i64 {
        self.state.i
    }

    /// Current spike window.
    pub fn spike_window(&self) -> SpikeWindow {
        self.state.window
    }

    /// Most recently generated value.
    pub fn value(&self) -> f64 {
        self.state.v
    }

    /// Read the current value then advance, `count` times.
    pub fn values(&mut self, count: usize) -> Vec<f64> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.value());
            self.advance();
        }
        out
    }

    /// Summarize statistics and reset the slot horizon.
    ///
    /// Without `keep_stats` nothing is ever recorded and the snapshot is
    /// all zeros.
    pub fn stats_snapshot(&mut self) -> DataStatsSnapshot {
        self.stats.snapshot()
    }

    /// Statistics without resetting the slot.
    pub fn stats(&self) -> &DataStats {
        &self.stats
    }

    /// Compute and commit the next value.
    pub fn advance(&mut self) {
        let i = self.state.i;

        if self.config.spike && (i == 0 || i == self.state.window.end) {
            let (every, sustain) = (self.config.spike_every, self.config.spike_sustain);
            self.state.window.cycle += 1;
            self.state.window.recompute(i, every, self.state.onset, sustain);
            log::trace!(
                "'{}' step {}: spike window {}..={}",
                self.config.id,
                i,
                self.state.window.start,
                self.state.window.end
            );
        }

        let spread = self.config.to.abs() + self.config.from.abs();
        let a: f64 = self.rng.gen();

        let mut f = self.baseline(a, spread) + self.seasonal(spread);
        f += self.level_shift();
        f += i as f64 * self.config.slope + self.config.bump;

        let mut v = self.stretch(f);

        if self.config.spike && self.state.window.contains(i) {
            v = self.spike(v, a);
        }

        let c = &self.config;
        if c.limit_lower && v < c.from {
            v = c.from;
        } else if c.limit_upper && v > c.to {
            v = c.to;
        }

        self.state.f = f;
        self.state.i += 1;
        self.state.v = v;

        if self.config.keep_stats {
            self.stats.record(v);
        }
    }

    /// Midpoint of the bounds, or the random walk mapped onto the spread.
    fn baseline(&mut self, a: f64, spread: f64) -> f64 {
        let c = &self.config;
        if !c.use_random {
            return (c.from + c.to) / 2.0;
        }

        if self.state.i == 0 {
            self.state.b = a;
        }

        let nudge = (a - 0.5) * (a - 0.5);
        if c.bias <= 0.0 {
            self.state.b += a;
        } else if c.bias >= 1.0 {
            self.state.b -= a;
        } else if a > c.bias {
            self.state.b -= nudge;
        } else if a < c.bias {
            self.state.b += nudge;
        }

        let scale = walk_scale(c.samples);
        let normalized = (self.state.b + scale) / scale / 2.0;
        normalized * spread - spread
    }

    /// Average of the enabled sine waves, rescaled to the spread and centred.
    fn seasonal(&self, spread: f64) -> f64 {
        if !self.config.seasonality {
            return 0.0;
        }

        let enabled: Vec<i64> = self.waves.iter().copied().filter(|&p| p > 1).collect();
        if enabled.is_empty() {
            return 0.0;
        }

        let sum: f64 = enabled.iter().map(|&p| wave(self.state.i, p)).sum();
        spread * (sum / enabled.len() as f64) - spread / 2.0
    }

    /// Permanent level shift with a quadratic ease-in.
    fn level_shift(&self) -> f64 {
        let c = &self.config;
        let i = self.state.i;
        if c.perma_bump_at <= 0 || c.perma_bump_smoother <= 0 || i < c.perma_bump_at {
            return 0.0;
        }

        let target = c.perma_bump_by / 100.0 * c.to;
        let into = i - c.perma_bump_at;
        if into > c.perma_bump_smoother {
            target
        } else {
            let t = into as f64 / c.perma_bump_smoother as f64;
            target * t * t
        }
    }

    /// Amplify consecutive deltas above 1, scale the signal below 1.
    fn stretch(&self, f: f64) -> f64 {
        let stv = self.config.stretch_start + self.state.i as f64 * self.stretch_step;
        let prev_f = self.state.f;

        if stv > 1.0 {
            if f > prev_f {
                f + (f - prev_f) * stv
            } else if f < prev_f {
                f - (prev_f - f) * stv
            } else {
                self.state.v
            }
        } else if stv < 1.0 {
            f * stv
        } else {
            f
        }
    }

    /// Ease toward the spike target on the ramps, hold it on the plateau.
    fn spike(&mut self, v: f64, a: f64) -> f64 {
        let c = &self.config;
        let i = self.state.i;
        let target = c.spike_to / 100.0 * c.to;

        if self.state.wobble == 0 {
            self.state.wobble = 1;
        }
        if self.state.onset == 0 {
            self.state.onset = 1;
        }
        let onset = self.state.onset;
        let wobble = self.state.wobble;
        let SpikeWindow { start, end, .. } = self.state.window;

        let position = if i < start.saturating_add(onset) {
            i.saturating_sub(start).saturating_add(1)
        } else if i > end.saturating_sub(onset) {
            end.saturating_sub(i).saturating_add(1)
        } else {
            0
        };

        if position == 0 {
            if !c.spike_wobble {
                target
            } else if wobble > 0 {
                target - a * target / wobble as f64
            } else {
                target + a * target / wobble as f64
            }
        } else {
            let ease = (1.0 - (1.0 / position as f64).abs()) * (1.0 + 1.0 / onset as f64);
            v + ease * ease * (target - v)
        }
    }
}

/// Linear stretch increment over `samples` steps.
pub fn stretch_step(start: f64, end: f64, samples: i64) -> f64 {
    let step = (end.abs() - start.abs()).abs() / samples as f64;
    if end < start {
        -step
    } else {
        step
    }
}

/// Logarithmic normalization of the random walk, `ln(samples) / ln(2.5)`.
///
/// A single-sample run would divide by zero and uses 1 instead.
fn walk_scale(samples: i64) -> f64 {
    let scale = (samples as f64).ln() / 2.5f64.ln();
    if scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Sine of one wave at `step`, shifted to `[0, 1]`.
fn wave(step: i64, period: i64) -> f64 {
    let phase = step.rem_euclid(period) as f64 / period as f64;
    (2.0 * PI * phase).sin() / 2.0 + 0.5
}
