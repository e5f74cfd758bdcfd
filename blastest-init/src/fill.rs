/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Shape-aware fills.
//!
//! Every fill works in two passes. The column pass visits each column once (optionally
//! on the rayon pool) and writes the declared entries from a per-column split generator.
//! The structure pass then runs sequentially and derives the remaining entries (mirrored
//! halves and dominant diagonals) from what the column pass wrote.

use blastest_utils::{
    parallel::for_each_column, views::MutMatrixView, BatchMut, Element, Parallelism,
};
use tracing::trace;

use crate::{
    generator::{Constant, Generator, Trig},
    shape::{FillSide, Opposite, Shape, ShapeClass},
};

/// Multiplier applied to the off-diagonal magnitude sum of diagonally dominant matrices.
const DOMINANCE_FACTOR: f64 = 1.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Keep,
    Alternate,
}

/// Fill every batch of `batches` from `generator` following the rules of `shape`.
///
/// * `General`: every logical entry is written exactly once.
/// * `Symmetric`/`Hermitian`: the declared triangle is generated. The opposite triangle
///   receives the mirrored value (conjugated for Hermitian matrices) or zero, as selected
///   by `shape.opposite`. Hermitian diagonals keep only their real part. `Full` generates
///   the lower triangle and always mirrors it.
/// * `Triangular`: the declared triangle is generated and the other one zeroed.
/// * `DiagonallyDominantTriangular`: as `Triangular`, after which every diagonal entry
///   becomes `1.01` times the magnitude sum of the off-diagonal entries in its row and
///   column (or `1` if that sum is zero).
///
/// # Panics
///
/// * Panics if a symmetric, Hermitian or diagonally dominant shape is applied to a matrix
///   that is not square.
/// * Panics if a triangular shape uses `FillSide::Full`.
pub fn fill_uniform<B, G>(batches: &mut B, shape: Shape, generator: &mut G, par: Parallelism)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
    G: Generator<B::Elem>,
{
    fill(batches, shape, generator, par, Sign::Keep);
}

/// Fill like [`fill_uniform`], negating the generated value wherever `row xor col` is odd.
///
/// A constant `1` produces the checkerboard `[[1, -1], [-1, 1]]`. For a `1 x n` vector the
/// sign follows the parity of the index.
///
/// # Panics
///
/// Panics unless `shape` is `General` or `Triangular`.
pub fn fill_alternating_sign<B, G>(
    batches: &mut B,
    shape: Shape,
    generator: &mut G,
    par: Parallelism,
) where
    B: BatchMut + ?Sized,
    B::Elem: Element,
    G: Generator<B::Elem>,
{
    assert!(
        matches!(shape.class, ShapeClass::General | ShapeClass::Triangular),
        "alternating sign fills do not support {:?} matrices",
        shape.class
    );
    fill(batches, shape, generator, par, Sign::Alternate);
}

/// Fill with `cos` (or `sin`) of each entry's flat offset, including the batch offset of
/// strided batches. Symmetric and Hermitian entries use the offset of their lower
/// triangle position, so `Upper` and `Lower` fills hold the same values.
///
/// # Panics
///
/// Panics for `DiagonallyDominantTriangular` shapes, and in the same situations as
/// [`fill_uniform`].
pub fn fill_trigonometric<B>(batches: &mut B, shape: Shape, use_cosine: bool, par: Parallelism)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
{
    assert!(
        shape.class != ShapeClass::DiagonallyDominantTriangular,
        "trigonometric fills do not support {:?} matrices",
        shape.class
    );
    fill(batches, shape, &mut Trig { use_cosine }, par, Sign::Keep);
}

/// Write NaN to every entry `shape` would generate.
pub fn fill_nan<B>(batches: &mut B, shape: Shape, par: Parallelism)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
{
    let nan = <B::Elem as Element>::nan_value();
    fill(batches, shape, &mut Constant(nan), par, Sign::Keep);
}

fn fill<B, G>(batches: &mut B, shape: Shape, generator: &mut G, par: Parallelism, sign: Sign)
where
    B: BatchMut + ?Sized,
    B::Elem: Element,
    G: Generator<B::Elem>,
{
    trace!(?shape, ?par, ?sign, batch_count = batches.batch_count(), "fill");
    for b in 0..batches.batch_count() {
        let base = batches.batch_offset(b);
        let mut m = batches.batch_mut(b);
        fill_matrix(&mut m, base, shape, generator, par, sign);
    }
}

fn fill_matrix<T, G>(
    m: &mut MutMatrixView<'_, T>,
    base: usize,
    shape: Shape,
    generator: &mut G,
    par: Parallelism,
    sign: Sign,
) where
    T: Element,
    G: Generator<T>,
{
    match shape.class {
        ShapeClass::General => {}
        ShapeClass::Triangular => {
            shape.triangle();
        }
        ShapeClass::Symmetric | ShapeClass::Hermitian => require_square(m, shape),
        ShapeClass::DiagonallyDominantTriangular => {
            shape.triangle();
            require_square(m, shape);
        }
    }

    let ld = m.ld();
    let hermitian = shape.class == ShapeClass::Hermitian;
    let mirrored = matches!(shape.class, ShapeClass::Symmetric | ShapeClass::Hermitian);
    let states: Vec<G::Split> = (0..m.ncols()).map(|_| generator.split()).collect();

    for_each_column(par, m, states, |col, column, mut g| {
        for (row, v) in column.iter_mut().enumerate() {
            *v = if shape.class == ShapeClass::General || shape.declares(row, col) {
                // Mirrored classes key each entry by its lower triangle position, so upper
                // and lower fills of position-based content agree.
                let offset = if mirrored && row < col {
                    base + col + row * ld
                } else {
                    base + row + col * ld
                };
                let value = g.generate(offset);
                let value = if hermitian && row == col {
                    value.real_part()
                } else {
                    value
                };
                if sign == Sign::Alternate && (row ^ col) & 1 == 1 {
                    value.negate()
                } else {
                    value
                }
            } else {
                T::zero()
            };
        }
    });

    match shape.class {
        ShapeClass::Symmetric | ShapeClass::Hermitian
            if shape.opposite == Opposite::Mirror || shape.side == FillSide::Full =>
        {
            mirror(m, shape, hermitian)
        }
        ShapeClass::DiagonallyDominantTriangular => make_diagonally_dominant(m),
        _ => {}
    }
}

fn require_square<T>(m: &MutMatrixView<'_, T>, shape: Shape) {
    assert!(
        m.is_square(),
        "{:?} matrices must be square (got {} x {})",
        shape.class,
        m.nrows(),
        m.ncols()
    );
}

/// Copy the declared triangle onto the opposite one.
fn mirror<T: Element>(m: &mut MutMatrixView<'_, T>, shape: Shape, conjugate: bool) {
    let n = m.ncols();
    for col in 0..n {
        for row in 0..n {
            if row != col && shape.declares(row, col) {
                let value = m[(row, col)];
                m[(col, row)] = if conjugate { value.conjugate() } else { value };
            }
        }
    }
}

/// Replace each diagonal entry with `1.01` times the magnitude sum of the rest of its row
/// and column.
fn make_diagonally_dominant<T: Element>(m: &mut MutMatrixView<'_, T>) {
    let n = m.ncols();
    for i in 0..n {
        let sum: f64 = (0..n)
            .filter(|&k| k != i)
            .map(|k| m[(i, k)].magnitude() + m[(k, i)].magnitude())
            .sum();
        m[(i, i)] = if sum == 0.0 {
            T::one()
        } else {
            T::from_f64(DOMINANCE_FACTOR * sum)
        };
    }
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use blastest_utils::{
        strided::StridedBatch,
        views::{Matrix, MutMatrixView},
        Batch,
    };
    use num_complex::Complex64;
    use rstest::rstest;

    use super::*;
    use crate::{
        generator::{Init, Random, Scalars},
        rng::RandomStream,
    };

    fn counting() -> Init<impl FnMut(usize) -> f64 + Clone + Send> {
        Init(|offset: usize| offset as f64 + 1.0)
    }

    #[rstest]
    fn general_fill_writes_every_entry(
        #[values(Parallelism::Sequential, Parallelism::Parallel)] par: Parallelism,
    ) {
        let mut m = Matrix::new(-1.0f64, 3, 4, 5);
        fill_uniform(&mut m, Shape::general(), &mut counting(), par);
        for j in 0..4 {
            for i in 0..3 {
                assert_eq!(m[(i, j)], (i + 5 * j) as f64 + 1.0);
            }
        }
        // Padding rows are never written.
        assert_eq!(m.as_slice()[3], -1.0);
        assert_eq!(m.as_slice()[4], -1.0);
    }

    #[test]
    fn parallel_fill_matches_sequential() {
        let fill_with = |par| {
            let mut stream = RandomStream::default();
            let mut batches = StridedBatch::new(0.0f32, 3, 17, 13, 19, 300);
            let mut g = Random::new(&mut stream, Scalars::Hpl);
            fill_uniform(&mut batches, Shape::general(), &mut g, par);
            batches
        };
        let sequential = fill_with(Parallelism::Sequential);
        let parallel = fill_with(Parallelism::Parallel);
        assert_eq!(sequential.as_slice(), parallel.as_slice());
    }

    #[rstest]
    fn symmetric_fills_mirror(
        #[values(FillSide::Upper, FillSide::Lower, FillSide::Full)] side: FillSide,
    ) {
        let mut stream = RandomStream::default();
        let mut m = Matrix::new(0.0f64, 6, 6, 8);
        let mut g = Random::new(&mut stream, Scalars::Int);
        fill_uniform(&mut m, Shape::symmetric(side), &mut g, Parallelism::Sequential);
        for j in 0..6 {
            for i in 0..6 {
                assert_eq!(m[(i, j)], m[(j, i)]);
                assert!(m[(i, j)] >= 1.0);
            }
        }
    }

    #[rstest]
    fn hermitian_fills_conjugate(
        #[values(FillSide::Upper, FillSide::Lower, FillSide::Full)] side: FillSide,
    ) {
        let mut stream = RandomStream::default();
        let mut m = Matrix::new(Complex64::default(), 5, 5, 5);
        let mut g = Random::new(&mut stream, Scalars::Hpl);
        fill_uniform(&mut m, Shape::hermitian(side), &mut g, Parallelism::Parallel);
        for j in 0..5 {
            assert_eq!(m[(j, j)].im, 0.0);
            for i in 0..5 {
                assert_eq!(m[(i, j)], m[(j, i)].conj());
            }
        }
    }

    #[test]
    fn disjoint_storage_zeroes_the_opposite_half() {
        let mut m = Matrix::new(-1.0f32, 4, 4, 4);
        let shape = Shape::symmetric(FillSide::Upper).with_opposite(Opposite::Zero);
        fill_uniform(&mut m, shape, &mut Constant(3.0), Parallelism::Sequential);
        for j in 0..4 {
            for i in 0..4 {
                let expected = if i <= j { 3.0 } else { 0.0 };
                assert_eq!(m[(i, j)], expected, "i = {i}, j = {j}");
            }
        }
    }

    #[rstest]
    #[case(FillSide::Upper)]
    #[case(FillSide::Lower)]
    fn hermitian_disjoint_storage(#[case] side: FillSide) {
        let mut m = Matrix::new(Complex64::new(-1.0, -1.0), 5, 5, 6);
        let shape = Shape::hermitian(side).with_opposite(Opposite::Zero);
        let mut g = Random::seeded(11, Scalars::Int);
        fill_uniform(&mut m, shape, &mut g, Parallelism::Parallel);
        for j in 0..5 {
            for i in 0..5 {
                let declared = match side {
                    FillSide::Upper => i <= j,
                    _ => i >= j,
                };
                let v = m[(i, j)];
                if !declared {
                    assert_eq!(v, Complex64::new(0.0, 0.0), "i = {i}, j = {j}");
                } else if i == j {
                    assert!((1.0..=10.0).contains(&v.re));
                    assert_eq!(v.im, 0.0);
                } else {
                    assert!((1.0..=10.0).contains(&v.re), "i = {i}, j = {j}");
                    assert!((1.0..=10.0).contains(&v.im), "i = {i}, j = {j}");
                }
            }
        }
    }

    #[test]
    fn hermitian_full_side_always_mirrors() {
        let mut m = Matrix::new(Complex64::new(0.0, 0.0), 4, 4, 4);
        let shape = Shape::hermitian(FillSide::Full).with_opposite(Opposite::Zero);
        let mut g = Random::seeded(5, Scalars::Int);
        fill_uniform(&mut m, shape, &mut g, Parallelism::Sequential);
        for j in 0..4 {
            assert_eq!(m[(j, j)].im, 0.0);
            for i in 0..4 {
                assert_eq!(m[(i, j)], m[(j, i)].conj());
                assert_ne!(m[(i, j)].re, 0.0);
            }
        }
    }

    #[rstest]
    #[case(FillSide::Upper)]
    #[case(FillSide::Lower)]
    fn triangular_fills_zero_the_other_side(#[case] side: FillSide) {
        let mut m = Matrix::new(-1.0f64, 4, 6, 4);
        fill_uniform(
            &mut m,
            Shape::triangular(side),
            &mut Constant(2.0),
            Parallelism::Sequential,
        );
        for j in 0..6 {
            for i in 0..4 {
                let declared = match side {
                    FillSide::Upper => j >= i,
                    _ => j <= i,
                };
                assert_eq!(m[(i, j)], if declared { 2.0 } else { 0.0 });
            }
        }
    }

    #[rstest]
    fn diagonal_dominance(#[values(FillSide::Upper, FillSide::Lower)] side: FillSide) {
        let mut stream = RandomStream::default();
        let mut m = Matrix::new(0.0f64, 7, 7, 9);
        let mut g = Random::new(&mut stream, Scalars::Hpl);
        fill_uniform(
            &mut m,
            Shape::diagonally_dominant(side),
            &mut g,
            Parallelism::Sequential,
        );
        for i in 0..7 {
            let off: f64 = (0..7)
                .filter(|&k| k != i)
                .map(|k| m[(i, k)].abs() + m[(k, i)].abs())
                .sum();
            if off == 0.0 {
                assert_eq!(m[(i, i)], 1.0);
            } else {
                assert!(m[(i, i)].abs() > off);
                approx::assert_relative_eq!(m[(i, i)], 1.01 * off);
            }
        }
    }

    #[test]
    fn diagonal_dominance_of_zero_matrix_is_identity() {
        let mut m = Matrix::new(5.0f32, 3, 3, 3);
        fill_uniform(
            &mut m,
            Shape::diagonally_dominant(FillSide::Lower),
            &mut Constant(0.0),
            Parallelism::Sequential,
        );
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn checkerboard() {
        let mut m = Matrix::new(0.0f64, 4, 4, 4);
        fill_alternating_sign(
            &mut m,
            Shape::general(),
            &mut Constant(1.0),
            Parallelism::Sequential,
        );
        for j in 0..4 {
            for i in 0..4 {
                let expected = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                assert_eq!(m[(i, j)], expected);
            }
        }
    }

    #[test]
    fn alternating_sign_vectors_follow_index_parity() {
        let mut data = vec![0.0f32; 9];
        let mut v = MutMatrixView::vector_mut(&mut data, 5, 2).unwrap();
        fill_alternating_sign(
            &mut v,
            Shape::general(),
            &mut Constant(2.0),
            Parallelism::Parallel,
        );
        assert_eq!(data, [2.0, 0.0, -2.0, 0.0, 2.0, 0.0, -2.0, 0.0, 2.0]);
    }

    #[test]
    fn alternating_sign_triangular() {
        let mut m = Matrix::new(9.0f64, 3, 3, 3);
        fill_alternating_sign(
            &mut m,
            Shape::triangular(FillSide::Lower),
            &mut Constant(1.0),
            Parallelism::Sequential,
        );
        assert_eq!(m.column(0), &[1.0, -1.0, 1.0]);
        assert_eq!(m.column(1), &[0.0, 1.0, -1.0]);
        assert_eq!(m.column(2), &[0.0, 0.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "alternating sign fills do not support Symmetric matrices")]
    fn alternating_sign_rejects_symmetric() {
        let mut m = Matrix::new(0.0f64, 2, 2, 2);
        fill_alternating_sign(
            &mut m,
            Shape::symmetric(FillSide::Upper),
            &mut Constant(1.0),
            Parallelism::Sequential,
        );
    }

    #[test]
    fn trigonometric_fill_uses_batch_offsets() {
        let mut batches = StridedBatch::new(0.0f64, 2, 2, 2, 3, 10);
        fill_trigonometric(&mut batches, Shape::general(), false, Parallelism::Sequential);
        for b in 0..2 {
            let m = Batch::batch(&batches, b);
            for j in 0..2 {
                for i in 0..2 {
                    let offset = i + 3 * j + 10 * b;
                    assert_eq!(m[(i, j)], (offset as f64).sin());
                }
            }
        }
    }

    #[test]
    fn trigonometric_symmetric() {
        let mut m = Matrix::new(0.0f32, 3, 3, 3);
        fill_trigonometric(
            &mut m,
            Shape::symmetric(FillSide::Lower),
            true,
            Parallelism::Sequential,
        );
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(0, 2)], m[(2, 0)]);
        assert_eq!(m[(2, 0)], 2.0f64.cos() as f32);
    }

    #[rstest]
    fn trigonometric_sides_agree(
        #[values(ShapeClass::Symmetric, ShapeClass::Hermitian)] class: ShapeClass,
    ) {
        let fill_side = |side| {
            let mut m = Matrix::new(Complex64::new(0.0, 0.0), 4, 4, 5);
            let shape = Shape::new(class, side).with_opposite(Opposite::Zero);
            fill_trigonometric(&mut m, shape, false, Parallelism::Sequential);
            m
        };
        let upper = fill_side(FillSide::Upper);
        let lower = fill_side(FillSide::Lower);
        for j in 0..4 {
            for i in j..4 {
                // Both sides hold the value of the lower position `i + 5 j`.
                let expected = Complex64::new(((i + 5 * j) as f64).sin(), 0.0);
                assert_eq!(lower[(i, j)], expected, "i = {i}, j = {j}");
                assert_eq!(upper[(j, i)], expected, "i = {i}, j = {j}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "trigonometric fills do not support DiagonallyDominantTriangular")]
    fn trigonometric_rejects_diagonally_dominant() {
        let mut m = Matrix::new(0.0f64, 2, 2, 2);
        fill_trigonometric(
            &mut m,
            Shape::diagonally_dominant(FillSide::Upper),
            true,
            Parallelism::Sequential,
        );
    }

    #[test]
    fn nan_fill() {
        let mut batches = vec![Matrix::new(0.0f64, 2, 2, 2), Matrix::new(0.0f64, 3, 1, 3)];
        fill_nan(&mut batches, Shape::general(), Parallelism::Sequential);
        assert!(batches.iter().all(|m| m.as_slice().iter().all(|v| v.is_nan())));

        let mut m = Matrix::new(1.0f64, 2, 2, 2);
        fill_nan(&mut m, Shape::triangular(FillSide::Upper), Parallelism::Sequential);
        assert!(m[(0, 1)].is_nan());
        assert_eq!(m[(1, 0)], 0.0);
    }

    #[test]
    #[should_panic(expected = "Symmetric matrices must be square (got 2 x 3)")]
    fn symmetric_requires_square() {
        let mut m = Matrix::new(0.0f64, 2, 3, 2);
        fill_uniform(
            &mut m,
            Shape::symmetric(FillSide::Upper),
            &mut Constant(1.0),
            Parallelism::Sequential,
        );
    }

    #[test]
    #[should_panic(expected = "Triangular matrices require an upper or lower fill side")]
    fn triangular_full_panics() {
        let mut m = Matrix::new(0.0f64, 2, 2, 2);
        fill_uniform(
            &mut m,
            Shape::triangular(FillSide::Full),
            &mut Constant(1.0),
            Parallelism::Sequential,
        );
    }
}
