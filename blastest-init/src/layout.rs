/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Conversions of filled square matrices into the structured storage formats BLAS
//! routines consume: band storage, packed storage and unit-triangular matrices.

use blastest_utils::{Batch, BatchMut, Element};
use tracing::trace;

use crate::rng::RandomStream;

fn check_batch_counts<S, D>(src: &S, dst: &D)
where
    S: Batch + ?Sized,
    D: Batch + ?Sized,
{
    assert_eq!(
        src.batch_count(),
        dst.batch_count(),
        "source and destination batch counts differ"
    );
}

fn check_square(nrows: usize, ncols: usize) {
    assert!(nrows == ncols, "expected a square matrix (got {nrows} x {ncols})");
}

/// Zero every entry of each (square) matrix that lies outside the `bandwidth`
/// super-diagonals (`upper`) or sub-diagonals (otherwise), including the whole opposite
/// triangle.
///
/// # Panics
///
/// Panics if any matrix is not square.
pub fn zero_band<B>(batches: &mut B, bandwidth: usize, upper: bool)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
{
    for b in 0..batches.batch_count() {
        let mut m = batches.batch_mut(b);
        check_square(m.nrows(), m.ncols());
        let n = m.ncols();
        for j in 0..n {
            for i in 0..n {
                let outside = if upper {
                    i > j || j > i + bandwidth
                } else {
                    j > i || i > j + bandwidth
                };
                if outside {
                    m[(i, j)] = <B::Elem as Element>::zero();
                }
            }
        }
    }
}

/// Convert square general matrices into BLAS band storage.
///
/// Column `j` of the band holds the entries of column `j` of `src` that lie within the
/// band: `src[(i, j)]` lands in `dst[(bandwidth + i - j, j)]` for upper storage and in
/// `dst[(i - j, j)]` for lower storage. Every other slot of each `dst` column is filled
/// with random integers so reads outside the band are caught.
///
/// # Panics
///
/// * Panics if the batch counts differ.
/// * Panics if a source matrix is not square.
/// * Panics if a destination has fewer than `bandwidth + 1` rows or does not have as many
///   columns as its source.
pub fn to_banded<S, D>(
    src: &S,
    dst: &mut D,
    bandwidth: usize,
    upper: bool,
    stream: &mut RandomStream,
) where
    S: Batch + ?Sized,
    D: BatchMut<Elem = S::Elem> + ?Sized,
    S::Elem: Element,
{
    check_batch_counts(src, dst);
    trace!(bandwidth, upper, batch_count = src.batch_count(), "to_banded");
    for b in 0..src.batch_count() {
        let a = src.batch(b);
        let mut ab = dst.batch_mut(b);
        check_square(a.nrows(), a.ncols());
        let n = a.ncols();
        assert!(
            ab.nrows() > bandwidth && ab.ncols() == n,
            "band storage for a {n} x {n} matrix with bandwidth {bandwidth} needs at least \
             {} rows and exactly {n} columns (got {} x {})",
            bandwidth + 1,
            ab.nrows(),
            ab.ncols()
        );

        let ldab = ab.nrows();
        for j in 0..n {
            // `band` is the range of `src` rows stored in this column and `start` is the
            // band row the first of them maps to.
            let (band, start) = if upper {
                let first = j.saturating_sub(bandwidth);
                (first..j + 1, bandwidth + first - j)
            } else {
                (j..(j + bandwidth + 1).min(n), 0)
            };

            for r in 0..ldab {
                ab[(r, j)] = if r >= start && r - start < band.len() {
                    a[(band.start + r - start, j)]
                } else {
                    stream.random_int()
                };
            }
        }
    }
}

/// Pack the declared triangle of each square matrix into consecutive storage.
///
/// Columns are packed in order: top to diagonal for `upper`, diagonal to bottom otherwise.
/// The destination is written in column-major logical order, so a `1 x n(n+1)/2` vector
/// and an `n(n+1)/2 x 1` column both receive the canonical packed layout.
///
/// # Panics
///
/// * Panics if the batch counts differ.
/// * Panics if a source matrix is not square.
/// * Panics if a destination has fewer than `n (n + 1) / 2` entries.
pub fn to_packed<S, D>(src: &S, dst: &mut D, upper: bool)
where
    S: Batch + ?Sized,
    D: BatchMut<Elem = S::Elem> + ?Sized,
    S::Elem: Copy,
{
    check_batch_counts(src, dst);
    for b in 0..src.batch_count() {
        let a = src.batch(b);
        let mut ap = dst.batch_mut(b);
        check_square(a.nrows(), a.ncols());
        let n = a.ncols();
        let (rows, cols) = (ap.nrows(), ap.ncols());
        assert!(
            rows * cols >= n * (n + 1) / 2,
            "packed storage for a {n} x {n} matrix needs {} entries (got {})",
            n * (n + 1) / 2,
            rows * cols
        );

        let mut index = 0;
        for j in 0..n {
            let range = if upper { 0..j + 1 } else { j..n };
            for i in range {
                ap[(index % rows, index / rows)] = a[(i, j)];
                index += 1;
            }
        }
    }
}

/// Turn each square matrix into a unit-triangular one.
///
/// The declared triangle is divided by its row's diagonal (lower) or its column's
/// diagonal (upper). The diagonal itself is then overwritten with random integers, since
/// routines operating on unit-triangular matrices must never read it.
///
/// # Panics
///
/// Panics if any matrix is not square.
pub fn normalize_unit_diagonal<B>(batches: &mut B, upper: bool, stream: &mut RandomStream)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
{
    for b in 0..batches.batch_count() {
        let mut m = batches.batch_mut(b);
        check_square(m.nrows(), m.ncols());
        let n = m.ncols();
        for d in 0..n {
            let diag = m[(d, d)];
            for k in 0..d {
                let (i, j) = if upper { (k, d) } else { (d, k) };
                m[(i, j)] = m[(i, j)].divide(diag);
            }
        }
        for d in 0..n {
            m[(d, d)] = stream.random_int();
        }
    }
}

///////////
// Tests //
///////////
