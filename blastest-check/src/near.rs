/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::Debug;

use blastest_utils::{Batch, Element};
use thiserror::Error;

use crate::shape::check_same_shape;

/// The first entry at which a candidate is farther than the threshold from its reference.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "batch {batch}, entry ({row}, {col}): expected {expected:?} but found {actual:?} \
     (distance {distance} exceeds {threshold})"
)]
pub struct NearMismatch<T: Debug> {
    pub batch: usize,
    pub row: usize,
    pub col: usize,
    pub expected: T,
    pub actual: T,
    pub distance: f64,
    pub threshold: f64,
}

/// Compare `candidate` against `reference` entry by entry with a fixed absolute error.
///
/// The distance between two entries is the modulus of their difference, so errors in the
/// real and imaginary parts of a complex entry cannot offset each other. Equal entries
/// (the same infinity included) and two NaNs match. A NaN on one side only never does. The first offending entry is returned.
///
/// # Panics
///
/// Panics if the two operands do not have the same batch count and shapes.
pub fn near_check<R, C>(
    reference: &R,
    candidate: &C,
    abs_error: f64,
) -> Result<(), NearMismatch<R::Elem>>
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    check_same_shape(reference, candidate);
    for batch in 0..reference.batch_count() {
        let (r, c) = (reference.batch(batch), candidate.batch(batch));
        for (col, (rc, cc)) in std::iter::zip(r.columns(), c.columns()).enumerate() {
            for (row, (&expected, &actual)) in std::iter::zip(rc, cc).enumerate() {
                if expected == actual || (expected.is_nan() && actual.is_nan()) {
                    continue;
                }
                let distance = (expected.re() - actual.re()).hypot(expected.im() - actual.im());
                if distance.is_nan() || distance > abs_error {
                    return Err(NearMismatch {
                        batch,
                        row,
                        col,
                        expected,
                        actual,
                        distance,
                        threshold: abs_error,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Like [`near_check`], but panics with the mismatch.
#[track_caller]
pub fn assert_near_check<R, C>(reference: &R, candidate: &C, abs_error: f64)
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    if let Err(mismatch) = near_check(reference, candidate, abs_error) {
        panic!("near check failed: {mismatch}");
    }
}

///////////
// Tests //
///////////
