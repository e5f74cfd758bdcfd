/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use rayon::prelude::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::views::{MatrixBase, MutDenseData};

/// Whether per-column work runs on the calling thread or on the rayon global pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    pub fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel)
    }
}

/// Invoke `f(col, column, state)` once for every column of `view`.
///
/// `states` supplies one value per column in column order and is consumed alongside the
/// columns, so the pairing of columns and states does not depend on `par`. Columns beyond
/// the number of states (or states beyond the number of columns) are skipped.
#[inline]
pub fn for_each_column<D, S, F>(par: Parallelism, view: &mut MatrixBase<D>, states: Vec<S>, f: F)
where
    D: MutDenseData,
    D::Elem: Send,
    S: Send,
    F: Fn(usize, &mut [D::Elem], S) + Sync + Send,
{
    match par {
        Parallelism::Sequential => view
            .columns_mut()
            .zip(states)
            .enumerate()
            .for_each(|(col, (column, state))| f(col, column, state)),
        Parallelism::Parallel => view
            .par_columns_mut()
            .zip(states.into_par_iter())
            .enumerate()
            .for_each(|(col, (column, state))| f(col, column, state)),
    }
}

///////////
// Tests //
///////////
