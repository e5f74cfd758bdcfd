/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use blastest_utils::{views::MatrixView, Batch, Element};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::shape::check_same_shape;

/// The matrix norm a norm-check measures errors with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormType {
    /// Square root of the sum of squared magnitudes.
    #[default]
    Frobenius,
    /// Largest column sum of magnitudes.
    One,
    /// Largest row sum of magnitudes.
    Infinity,
    /// Largest magnitude.
    MaxAbs,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid norm type (expected one of 'F', 'O', '1', 'I', 'M')")]
pub struct InvalidNormType(pub char);

impl TryFrom<char> for NormType {
    type Error = InvalidNormType;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'F' => Ok(Self::Frobenius),
            'O' | '1' => Ok(Self::One),
            'I' => Ok(Self::Infinity),
            'M' => Ok(Self::MaxAbs),
            _ => Err(InvalidNormType(c)),
        }
    }
}

// `f64::max` drops NaN operands, which would hide a NaN in the candidate.
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

impl NormType {
    /// Compute the norm of the `nrows x ncols` matrix whose magnitudes are given by `f`.
    fn compute<F>(self, nrows: usize, ncols: usize, f: F) -> f64
    where
        F: Fn(usize, usize) -> f64,
    {
        let column_sum = |j: usize| (0..nrows).map(|i| f(i, j)).sum::<f64>();
        let row_sum = |i: usize| (0..ncols).map(|j| f(i, j)).sum::<f64>();
        match self {
            Self::Frobenius => (0..ncols)
                .flat_map(|j| (0..nrows).map(move |i| (i, j)))
                .map(|(i, j)| f(i, j).powi(2))
                .sum::<f64>()
                .sqrt(),
            Self::One => (0..ncols).map(column_sum).fold(0.0, nan_max),
            Self::Infinity => (0..nrows).map(row_sum).fold(0.0, nan_max),
            Self::MaxAbs => (0..ncols)
                .flat_map(|j| (0..nrows).map(move |i| (i, j)))
                .map(|(i, j)| f(i, j))
                .fold(0.0, nan_max),
        }
    }
}

// Pairs that agree exactly (matching infinities included) or are both NaN carry no error.
fn matched<T: Element>(a: T, b: T) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn relative_error<T: Element>(norm: NormType, r: MatrixView<'_, T>, c: MatrixView<'_, T>) -> f64 {
    let (nrows, ncols) = (r.nrows(), r.ncols());
    let reference = norm.compute(nrows, ncols, |i, j| {
        let (x, y) = (r[(i, j)], c[(i, j)]);
        let magnitude = x.magnitude();
        if matched(x, y) && !magnitude.is_finite() {
            0.0
        } else {
            magnitude
        }
    });
    let difference = norm.compute(nrows, ncols, |i, j| {
        let (x, y) = (r[(i, j)], c[(i, j)]);
        if matched(x, y) {
            0.0
        } else {
            (x.re() - y.re()).hypot(x.im() - y.im())
        }
    });

    if reference == 0.0 {
        difference
    } else {
        difference / reference
    }
}

/// Measure the relative error `||reference - candidate|| / ||reference||` of each batch
/// and return the sum over all batches.
///
/// Magnitudes are computed in `f64` on the complex modulus. Entries that are equal (the
/// same infinity included) or NaN on both sides contribute nothing, while a NaN on one
/// side only makes the error NaN. If the
/// reference norm of a batch is zero its absolute error is used instead. Identical
/// operands always give exactly `0`.
///
/// The result is not judged here: compare it against
/// [`error_tolerance`](crate::error_tolerance).
///
/// # Panics
///
/// Panics if the two operands do not have the same batch count and shapes.
pub fn norm_check<R, C>(norm: NormType, reference: &R, candidate: &C) -> f64
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    check_same_shape(reference, candidate);
    let error = (0..reference.batch_count())
        .map(|b| relative_error(norm, reference.batch(b), candidate.batch(b)))
        .sum();
    debug!(?norm, error, "norm check");
    error
}

///////////
// Tests //
///////////
