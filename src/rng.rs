//! Random source construction and small numeric helpers.
//!
//! Every generator owns its random source. A non-negative seed gives a fully
//! reproducible sequence; a negative seed draws one from the operating
//! system and the sequence differs on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create the random source for a generator seed.
pub fn seeded_rng(seed: i64) -> StdRng {
    if seed < 0 {
        StdRng::from_entropy()
    } else {
        StdRng::seed_from_u64(seed as u64)
    }
}

/// Whether `seed` yields a reproducible sequence.
pub fn is_reproducible(seed: i64) -> bool {
    seed >= 0
}

/// Pick an integer in `[min, max)` from the caller's random source.
///
/// Returns `min` when the range is empty.
pub fn rand_between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Round `x` to the nearest multiple of `unit`, halves away from zero for
/// positive inputs.
pub fn round_to(x: f64, unit: f64) -> f64 {
    ((x / unit + 0.5) as i64) as f64 * unit
}
