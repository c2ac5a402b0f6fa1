//! Random sources for the synthetic generator and the forecaster.
//!
//! Generator logic never calls a global RNG; it draws from a [`RandomSource`]
//! handed in by the caller. Production code wraps a `rand` generator, tests
//! use [`SequenceSource`] to pin every draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next sample from `U[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Symmetric jitter: `(U[0,1) - 0.5) * range`, i.e. within `±range / 2`.
    fn jitter(&mut self, range: f64) -> f64 {
        (self.next_unit() - 0.5) * range
    }
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed sequence of samples, wrapping around at the end.
///
/// Values are returned verbatim, so a test can pass `0.5` to get zero jitter
/// or `0.0` / `0.999` to hit the edges of a range.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceSource needs at least one value");
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same sample.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
