/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::Debug;

use blastest_utils::{Batch, Element};
use thiserror::Error;

use crate::shape::check_same_shape;

/// The first entry at which a candidate differs from its reference.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "batch {batch}, entry ({row}, {col}): expected {expected:?} but found {actual:?}"
)]
pub struct Mismatch<T: Debug> {
    pub batch: usize,
    pub row: usize,
    pub col: usize,
    pub expected: T,
    pub actual: T,
}

/// Compare `candidate` against `reference` entry by entry.
///
/// Batches are visited in order, then columns, then rows, and the first pair that is more
/// than `T::UNIT_CHECK_ULPS` units in the last place apart in any component is returned.
/// Two NaNs compare equal.
///
/// # Panics
///
/// Panics if the two operands do not have the same batch count and shapes.
pub fn unit_check<R, C>(reference: &R, candidate: &C) -> Result<(), Mismatch<R::Elem>>
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    check_same_shape(reference, candidate);
    let ulps = <R::Elem as Element>::UNIT_CHECK_ULPS;
    for batch in 0..reference.batch_count() {
        let (r, c) = (reference.batch(batch), candidate.batch(batch));
        for (col, (rc, cc)) in std::iter::zip(r.columns(), c.columns()).enumerate() {
            for (row, (&expected, &actual)) in std::iter::zip(rc, cc).enumerate() {
                if !expected.within_ulps(actual, ulps) {
                    return Err(Mismatch {
                        batch,
                        row,
                        col,
                        expected,
                        actual,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Like [`unit_check`], but panics with the mismatch.
#[track_caller]
pub fn assert_unit_check<R, C>(reference: &R, candidate: &C)
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    if let Err(mismatch) = unit_check(reference, candidate) {
        panic!("unit check failed: {mismatch}");
    }
}

///////////
// Tests //
///////////
