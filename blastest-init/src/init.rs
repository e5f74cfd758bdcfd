/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use blastest_utils::{
    views::{MutMatrixView, TryFromErrorLight},
    BatchMut, Element,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::{InitConfig, Initialization},
    fill::{fill_alternating_sign, fill_nan, fill_trigonometric, fill_uniform},
    generator::{Random, Scalars},
    rng::RandomStream,
    shape::Shape,
};

/// Whether a NaN scalar multiplier of the operation under test poisons an operand.
///
/// When `alpha` (or `beta`) is NaN the operation's result must be NaN regardless of the
/// operand, so the operand is filled with NaN instead of regular content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    AlphaSetsNan,
    BetaSetsNan,
    NeverSetNan,
}

/// The scalar multipliers of the operation under test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers<T> {
    pub alpha: T,
    pub beta: T,
}

impl<T: Element> Multipliers<T> {
    pub fn new(alpha: T, beta: T) -> Self {
        Self { alpha, beta }
    }
}

impl NanPolicy {
    /// Return whether the operand should be filled with NaN.
    pub fn triggered<T: Element>(self, multipliers: &Multipliers<T>) -> bool {
        match self {
            Self::AlphaSetsNan => multipliers.alpha.is_nan(),
            Self::BetaSetsNan => multipliers.beta.is_nan(),
            Self::NeverSetNan => false,
        }
    }
}

/// Per-call switches of [`Initializer::init_matrix`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InitOptions {
    /// Rewind the random stream before filling. Trigonometric content uses `cos` when
    /// set and `sin` otherwise.
    pub seed_reset: bool,
    /// Negate entries where `row xor col` is odd.
    pub alternating_sign: bool,
}

impl InitOptions {
    pub fn seed_reset(self) -> Self {
        Self {
            seed_reset: true,
            ..self
        }
    }

    pub fn alternating_sign(self) -> Self {
        Self {
            alternating_sign: true,
            ..self
        }
    }
}

/// Initializes operands according to an [`InitConfig`], owning the random stream of one
/// test case.
#[derive(Debug, Clone)]
pub struct Initializer {
    config: InitConfig,
    stream: RandomStream,
}

impl Default for Initializer {
    fn default() -> Self {
        Self::new(InitConfig::default())
    }
}

impl Initializer {
    pub fn new(config: InitConfig) -> Self {
        let stream = RandomStream::new(config.seed);
        Self { config, stream }
    }

    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    /// The random stream, for the structural transforms of the `layout` module.
    pub fn stream_mut(&mut self) -> &mut RandomStream {
        &mut self.stream
    }

    /// Initialize every batch of `batches`.
    ///
    /// 1. The random stream is rewound if `options.seed_reset` is set.
    /// 2. If `nan_policy` is triggered by `multipliers`, every entry `shape` covers is NaN.
    /// 3. Otherwise the configured [`Initialization`] decides the content. Random content
    ///    goes through [`fill_alternating_sign`] when `options.alternating_sign` is set and
    ///    through [`fill_uniform`] otherwise.
    ///
    /// # Panics
    ///
    /// Panics in the same situations as the fill routine selected.
    pub fn init_matrix<B>(
        &mut self,
        batches: &mut B,
        shape: Shape,
        multipliers: &Multipliers<B::Elem>,
        nan_policy: NanPolicy,
        options: InitOptions,
    ) where
        B: BatchMut + ?Sized,
        B::Elem: Element,
    {
        if options.seed_reset {
            self.stream.reset();
        }

        let par = self.config.parallelism;
        if nan_policy.triggered(multipliers) {
            debug!(?nan_policy, "poisoning operand with NaN");
            fill_nan(batches, shape, par);
            return;
        }

        let scalars = match self.config.initialization {
            Initialization::RandInt => Scalars::Int,
            Initialization::Hpl => Scalars::Hpl,
            Initialization::Trig => {
                fill_trigonometric(batches, shape, options.seed_reset, par);
                return;
            }
        };

        let mut generator = Random::new(&mut self.stream, scalars);
        if options.alternating_sign {
            fill_alternating_sign(batches, shape, &mut generator, par);
        } else {
            fill_uniform(batches, shape, &mut generator, par);
        }
    }

    /// Initialize every batch of the vectors in `batches`.
    ///
    /// Vectors are `1 x n` views, so this is [`init_matrix`](Self::init_matrix) with a
    /// general shape. Alternating signs follow the parity of the vector index.
    pub fn init_vector<B>(
        &mut self,
        batches: &mut B,
        multipliers: &Multipliers<B::Elem>,
        nan_policy: NanPolicy,
        options: InitOptions,
    ) where
        B: BatchMut + ?Sized,
        B::Elem: Element,
    {
        self.init_matrix(batches, Shape::general(), multipliers, nan_policy, options);
    }

    /// Initialize the BLAS vector of length `n` stored in `data` with the signed
    /// increment `inc`.
    ///
    /// A negative increment stores the vector backwards: logical element `j` lives at
    /// `(n - 1 - j) * |inc|`. The logical content (values, signs and trigonometric
    /// arguments) is the one a positive increment of the same magnitude produces.
    ///
    /// Returns an error if `data` is too short for the vector.
    ///
    /// # Panics
    ///
    /// Panics if `inc == 0` and `n > 0`.
    pub fn init_vector_with_increment<T: Element>(
        &mut self,
        data: &mut [T],
        n: usize,
        inc: isize,
        multipliers: &Multipliers<T>,
        nan_policy: NanPolicy,
        options: InitOptions,
    ) -> Result<(), TryFromErrorLight> {
        let mut x = MutMatrixView::vector_mut(data, n, inc.unsigned_abs())
            .map_err(|err| err.as_static())?;
        self.init_vector(&mut x, multipliers, nan_policy, options);
        if inc < 0 {
            x.reverse_columns();
        }
        Ok(())
    }
}

///////////
// Tests //
///////////
