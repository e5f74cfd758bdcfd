/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use blastest_utils::Element;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// The seed every stream starts from unless configured otherwise.
pub const DEFAULT_SEED: u64 = 69069;

/// A caller-owned pseudo-random stream.
///
/// Test cases own their stream and reset it at a known point to get bit-reproducible
/// content across runs.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: u64,
    rng: StdRng,
}

impl Default for RandomStream {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomStream {
    /// Create a new stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return the seed this stream returns to on [`reset`](Self::reset).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind the stream to its configured seed.
    pub fn reset(&mut self) {
        debug!(seed = self.seed, "resetting random stream");
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Rewind the stream to `seed` and make `seed` the new configured seed.
    pub fn reset_with(&mut self, seed: u64) {
        self.seed = seed;
        self.reset();
    }

    /// Derive an independent stream from the next draw of this one.
    pub fn fork(&mut self) -> Self {
        Self::new(self.rng.random())
    }

    /// An integer in `[1, 10]`. Complex types draw both parts.
    pub fn random_int<T: Element>(&mut self) -> T {
        let re = self.rng.random_range(1..=10i32);
        let im = if T::IS_COMPLEX {
            self.rng.random_range(1..=10i32)
        } else {
            0
        };
        T::from_parts(f64::from(re), f64::from(im))
    }

    /// An integer in `[-10, -1]`. Complex types draw both parts.
    pub fn random_negative_int<T: Element>(&mut self) -> T {
        let re = self.rng.random_range(-10..=-1i32);
        let im = if T::IS_COMPLEX {
            self.rng.random_range(-10..=-1i32)
        } else {
            0
        };
        T::from_parts(f64::from(re), f64::from(im))
    }

    /// A uniform real in `[-0.5, 0.5]`. Complex types draw both parts.
    pub fn random_hpl<T: Element>(&mut self) -> T {
        let re = self.rng.random_range(-0.5..=0.5);
        let im = if T::IS_COMPLEX {
            self.rng.random_range(-0.5..=0.5)
        } else {
            0.0
        };
        T::from_parts(re, im)
    }

    /// A NaN of the element type.
    pub fn random_nan<T: Element>(&mut self) -> T {
        T::nan_value()
    }
}

///////////
// Tests //
///////////
