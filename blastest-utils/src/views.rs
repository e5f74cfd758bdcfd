/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};
use thiserror::Error;

/// Various view types (types such as [`MatrixView`] that add semantic meaning to blobs
/// of data) need both immutable and mutable variants.
///
/// This trait can be implemented by wrappers for immutable and mutable slice references,
/// allowing for a common code path for immutable and mutable view types.
///
/// # Safety
///
/// This trait is unsafe because it requires `as_slice` to be idempotent (and unsafe code
/// relies on this).
///
/// In other words: `as_slice` must **always** return the same slice with the same length.
pub unsafe trait DenseData {
    type Elem;

    /// Return the underlying data as a slice.
    fn as_slice(&self) -> &[Self::Elem];
}

/// A mutable companion to `DenseData`.
///
/// # Safety
///
/// This trait is unsafe because it requires `as_slice` to be idempotent (and unsafe code
/// relies on this).
///
/// Additionally, the returned slice must span the exact same memory as `as_slice`.
pub unsafe trait MutDenseData: DenseData {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for &[T] {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for &mut [T] {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement and returns a slice spanning the same
// range as `as_slice`.
unsafe impl<T> MutDenseData for &mut [T] {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for Box<[T]> {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement and returns a slice spanning the same
// memory as `as_slice`.
unsafe impl<T> MutDenseData for Box<[T]> {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem] {
        self
    }
}

/// Return the number of elements spanned by a column-major matrix with the given shape.
///
/// The last column only needs `nrows` entries, so this is tighter than `ncols * ld`.
/// Matrices with zero rows or columns span nothing.
pub fn linear_length(nrows: usize, ncols: usize, ld: usize) -> usize {
    if nrows == 0 || ncols == 0 {
        0
    } else {
        (ncols - 1) * ld + nrows
    }
}

////////////
// Matrix //
////////////

/// A view over a chunk of memory interpreted as a column-major matrix.
///
/// ```text
///            |<---- ncols ---->|
///            +-----------------+  ^
///            | a0  b0  c0  d0  |  |
///            | a1  b1  c1  d1  | nrows
///            | a2  b2  c2  d2  |  |
///            +-----------------+  v   ^
///              a3  b3  c3            ld
///              a4  b4  c4             v
/// ```
///
/// Entry `(row, col)` lives at offset `row + col * ld`. The rows between `nrows` and `ld`
/// belong to the underlying buffer but are never touched through the view.
///
/// When this class views immutable memory, it is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixBase<T>
where
    T: DenseData,
{
    data: T,
    nrows: usize,
    ncols: usize,
    // The distance between the starts of consecutive columns. Always at least `nrows`.
    ld: usize,
}

#[derive(Debug, Error)]
#[non_exhaustive]
#[error(
    "tried to construct a {nrows}x{ncols} matrix with leading dimension {ld} over a slice \
     of length {len} (expected at least {})",
    linear_length(self.nrows, self.ncols, self.ld)
)]
pub struct TryFromErrorLight {
    len: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
}

#[derive(Error)]
#[non_exhaustive]
#[error(
    "tried to construct a {nrows}x{ncols} matrix with leading dimension {ld} over a slice \
     of length {} (expected at least {})",
    data.as_slice().len(),
    linear_length(self.nrows, self.ncols, self.ld)
)]
pub struct TryFromError<T: DenseData> {
    data: T,
    nrows: usize,
    ncols: usize,
    ld: usize,
}

// Manually implement `fmt::Debug` so we don't require `T::Debug`.
impl<T: DenseData> fmt::Debug for TryFromError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFromError")
            .field("data_len", &self.data.as_slice().len())
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("ld", &self.ld)
            .finish()
    }
}

impl<T: DenseData> TryFromError<T> {
    /// Consume the error and return the base data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Return a variation of `Self` that is guaranteed to be `'static` by removing the
    /// data that was passed to the original constructor.
    pub fn as_static(&self) -> TryFromErrorLight {
        TryFromErrorLight {
            len: self.data.as_slice().len(),
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
        }
    }
}

fn check_leading_dimension(nrows: usize, ld: usize) {
    assert!(
        ld >= nrows,
        "leading dimension {ld} must be greater than or equal to the number of rows {nrows}"
    );
}

impl<T: Clone> MatrixBase<Box<[T]>> {
    /// Allocate a new `nrows x ncols` matrix with leading dimension `ld`, setting every
    /// element of the allocation (including the padding rows) to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `ld < nrows`.
    pub fn new(value: T, nrows: usize, ncols: usize, ld: usize) -> Self {
        check_leading_dimension(nrows, ld);
        let data: Box<[T]> = vec![value; linear_length(nrows, ncols, ld)].into();
        Self {
            data,
            nrows,
            ncols,
            ld,
        }
    }

    /// Allocate a dense `nrows x ncols` matrix (leading dimension `nrows`) filled with
    /// `value`.
    pub fn dense(value: T, nrows: usize, ncols: usize) -> Self {
        Self::new(value, nrows, ncols, nrows)
    }
}

impl<'a, T> MatrixBase<&'a [T]> {
    /// Construct a view over the BLAS vector of length `n` with increment `inc`.
    ///
    /// The vector is represented as a `1 x n` matrix whose leading dimension is `inc`.
    ///
    /// # Panics
    ///
    /// Panics if `inc == 0` and `n > 0`.
    pub fn vector(data: &'a [T], n: usize, inc: usize) -> Result<Self, TryFromError<&'a [T]>> {
        assert!(n == 0 || inc != 0, "vector increment cannot be zero");
        Self::try_from(data, 1, n, inc)
    }
}

impl<'a, T> MatrixBase<&'a mut [T]> {
    /// Construct a mutable view over the BLAS vector of length `n` with increment `inc`.
    ///
    /// # Panics
    ///
    /// Panics if `inc == 0` and `n > 0`.
    pub fn vector_mut(
        data: &'a mut [T],
        n: usize,
        inc: usize,
    ) -> Result<Self, TryFromError<&'a mut [T]>> {
        assert!(n == 0 || inc != 0, "vector increment cannot be zero");
        Self::try_from(data, 1, n, inc)
    }
}

impl<'a, T> MatrixBase<&'a [T]> {
    /// Try to construct a view over `data`, shrinking the slice to the span of the matrix.
    ///
    /// Returns an error if `data` is shorter than [`linear_length`].
    ///
    /// # Panics
    ///
    /// Panics if `ld < nrows`.
    pub fn try_from(
        data: &'a [T],
        nrows: usize,
        ncols: usize,
        ld: usize,
    ) -> Result<Self, TryFromError<&'a [T]>> {
        check_leading_dimension(nrows, ld);
        match data.get(..linear_length(nrows, ncols, ld)) {
            Some(data) => Ok(Self {
                data,
                nrows,
                ncols,
                ld,
            }),
            None => Err(TryFromError {
                data,
                nrows,
                ncols,
                ld,
            }),
        }
    }
}

impl<'a, T> MatrixBase<&'a mut [T]> {
    /// Try to construct a mutable view over `data`, shrinking the slice to the span of the
    /// matrix.
    ///
    /// Returns an error if `data` is shorter than [`linear_length`].
    ///
    /// # Panics
    ///
    /// Panics if `ld < nrows`.
    pub fn try_from(
        data: &'a mut [T],
        nrows: usize,
        ncols: usize,
        ld: usize,
    ) -> Result<Self, TryFromError<&'a mut [T]>> {
        check_leading_dimension(nrows, ld);
        let required = linear_length(nrows, ncols, ld);
        if data.len() >= required {
            Ok(Self {
                data: &mut data[..required],
                nrows,
                ncols,
                ld,
            })
        } else {
            Err(TryFromError {
                data,
                nrows,
                ncols,
                ld,
            })
        }
    }
}

impl<T> MatrixBase<Box<[T]>> {
    /// Try to take ownership of `data` as a matrix. The allocation must span exactly
    /// [`linear_length`] elements.
    ///
    /// # Panics
    ///
    /// Panics if `ld < nrows`.
    pub fn try_from_boxed(
        data: Box<[T]>,
        nrows: usize,
        ncols: usize,
        ld: usize,
    ) -> Result<Self, TryFromError<Box<[T]>>> {
        check_leading_dimension(nrows, ld);
        if data.len() == linear_length(nrows, ncols, ld) {
            Ok(Self {
                data,
                nrows,
                ncols,
                ld,
            })
        } else {
            Err(TryFromError {
                data,
                nrows,
                ncols,
                ld,
            })
        }
    }
}

impl<T> MatrixBase<T>
where
    T: DenseData,
{
    /// Construct a matrix over `data` whose length the caller has already validated.
    pub(crate) fn from_validated(data: T, nrows: usize, ncols: usize, ld: usize) -> Self {
        debug_assert!(ld >= nrows);
        debug_assert_eq!(data.as_slice().len(), linear_length(nrows, ncols, ld));
        Self {
            data,
            nrows,
            ncols,
            ld,
        }
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the leading dimension of the matrix.
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Return whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Return the flat offset of entry `(row, col)`.
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row + col * self.ld
    }

    /// Return the underlying data as a slice.
    ///
    /// # Note
    ///
    /// The slice includes the padding rows between `nrows` and `ld`.
    pub fn as_slice(&self) -> &[T::Elem] {
        self.data.as_slice()
    }

    /// Return the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        self.data.as_mut_slice()
    }

    /// Return the logical entries of column `col` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `col >= self.ncols()`.
    pub fn column(&self, col: usize) -> &[T::Elem] {
        assert!(
            col < self.ncols(),
            "tried to access column {col} of a matrix with {} columns",
            self.ncols()
        );
        let start = col * self.ld;
        &self.as_slice()[start..start + self.nrows]
    }

    /// Return the logical entries of column `col` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `col >= self.ncols()`.
    pub fn column_mut(&mut self, col: usize) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        assert!(
            col < self.ncols(),
            "tried to access column {col} of a matrix with {} columns",
            self.ncols()
        );
        let start = col * self.ld;
        let nrows = self.nrows;
        &mut self.as_mut_slice()[start..start + nrows]
    }

    /// Return an iterator over the logical entries of each column.
    ///
    /// Columns are yielded in order beginning with column 0. Nothing is yielded if the
    /// matrix has no rows.
    pub fn columns(&self) -> impl Iterator<Item = &[T::Elem]> {
        let nrows = self.nrows;
        self.as_slice()
            .chunks(self.ld.max(1))
            .map(move |c| &c[..nrows])
    }

    /// Return a mutable iterator over the logical entries of each column.
    ///
    /// Columns are yielded in order beginning with column 0. Nothing is yielded if the
    /// matrix has no rows.
    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut [T::Elem]>
    where
        T: MutDenseData,
    {
        let nrows = self.nrows;
        let ld = self.ld.max(1);
        self.as_mut_slice()
            .chunks_mut(ld)
            .map(move |c| &mut c[..nrows])
    }

    /// Return a parallel iterator over the logical entries of each column.
    ///
    /// Columns never overlap, so workers can fill them without synchronization.
    pub fn par_columns_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [T::Elem]>
    where
        T: MutDenseData,
        T::Elem: Send,
    {
        let nrows = self.nrows;
        let ld = self.ld.max(1);
        self.as_mut_slice()
            .par_chunks_mut(ld)
            .map(move |c| &mut c[..nrows])
    }

    /// Reverse the order of the columns in place, leaving padding rows untouched.
    ///
    /// A BLAS vector with a negative increment stores logical element `j` where the
    /// positive increment would store element `n - 1 - j`, so reversing a `1 x n` vector
    /// view converts between the two layouts.
    pub fn reverse_columns(&mut self)
    where
        T: MutDenseData,
    {
        let (nrows, ncols, ld) = (self.nrows, self.ncols, self.ld);
        let data = self.as_mut_slice();
        for col in 0..ncols / 2 {
            let other = ncols - 1 - col;
            for row in 0..nrows {
                data.swap(row + col * ld, row + other * ld);
            }
        }
    }

    /// Consume the matrix, returning the inner representation.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Return a view over the matrix.
    pub fn as_view(&self) -> MatrixView<'_, T::Elem> {
        MatrixBase {
            data: self.as_slice(),
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
        }
    }

    /// Return a mutable view over the matrix.
    pub fn as_mut_view(&mut self) -> MutMatrixView<'_, T::Elem>
    where
        T: MutDenseData,
    {
        let nrows = self.nrows;
        let ncols = self.ncols;
        let ld = self.ld;
        MatrixBase {
            data: self.as_mut_slice(),
            nrows,
            ncols,
            ld,
        }
    }

    /// Returns a reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> &T::Elem {
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: The caller guarantees `(row, col)` is in-bounds, and our constructors
        // guarantee the slice spans `linear_length(nrows, ncols, ld)` elements.
        unsafe { self.as_slice().get_unchecked(row + col * self.ld) }
    }

    /// Returns a mutable reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn get_unchecked_mut(&mut self, row: usize, col: usize) -> &mut T::Elem
    where
        T: MutDenseData,
    {
        let ld = self.ld;
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: See `get_unchecked`.
        unsafe { self.as_mut_slice().get_unchecked_mut(row + col * ld) }
    }

    /// Copy the matrix into a new owning allocation with the same leading dimension.
    pub fn to_owned(&self) -> Matrix<T::Elem>
    where
        T::Elem: Clone,
    {
        Matrix {
            data: self.data.as_slice().into(),
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
        }
    }
}

/// An owning column-major matrix.
pub type Matrix<T> = MatrixBase<Box<[T]>>;

/// A non-owning column-major matrix.
pub type MatrixView<'a, T> = MatrixBase<&'a [T]>;

/// A mutable non-owning column-major matrix.
pub type MutMatrixView<'a, T> = MatrixBase<&'a mut [T]>;

/// Return a reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> Index<(usize, usize)> for MatrixBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );

        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.get_unchecked(row, col) }
    }
}

/// Return a mutable reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> IndexMut<(usize, usize)> for MatrixBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );

        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.get_unchecked_mut(row, col) }
    }
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use super::*;

    /// This function is only callable with copyable types.
    fn is_copyable<T: Copy>(_x: T) -> bool {
        true
    }

    // A 3x4 matrix with leading dimension 5 where entry `(i, j)` holds `10 * i + j`. The
    // padding rows hold `usize::MAX`.
    fn make_test_buffer() -> Vec<usize> {
        let mut data = vec![usize::MAX; linear_length(3, 4, 5)];
        for j in 0..4 {
            for i in 0..3 {
                data[i + j * 5] = 10 * i + j;
            }
        }
        data
    }

    fn test_basic_indexing<T>(m: &MatrixBase<T>)
    where
        T: DenseData<Elem = usize>,
    {
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                assert_eq!(m[(i, j)], 10 * i + j, "i = {i}, j = {j}");
            }
        }

        for j in 0..m.ncols() {
            assert_eq!(m.column(j), &[j, 10 + j, 20 + j]);
        }

        let columns: Vec<&[usize]> = m.columns().collect();
        assert_eq!(columns.len(), 4);
        for (j, c) in columns.iter().enumerate() {
            assert_eq!(*c, m.column(j));
        }
    }

    #[test]
    fn test_linear_length() {
        assert_eq!(linear_length(0, 5, 5), 0);
        assert_eq!(linear_length(5, 0, 5), 0);
        assert_eq!(linear_length(1, 1, 1), 1);

        // Dense matrices span exactly `nrows * ncols`.
        for nrows in 1..8 {
            for ncols in 1..8 {
                assert_eq!(linear_length(nrows, ncols, nrows), nrows * ncols);
            }
        }

        // Padding is only required between columns.
        assert_eq!(linear_length(3, 4, 5), 3 * 5 + 3);
        assert_eq!(linear_length(2, 1, 100), 2);
    }

    #[test]
    fn matrix_view_happy_path() {
        let data = make_test_buffer();
        let m = MatrixView::try_from(data.as_slice(), 3, 4, 5).unwrap();
        assert!(is_copyable(m));
        assert_eq!(m.ld(), 5);
        assert_eq!(m.offset(2, 3), 17);
        test_basic_indexing(&m);

        let owned = m.to_owned();
        assert_eq!(owned.as_slice(), m.as_slice());
        test_basic_indexing(&owned);
    }

    #[test]
    fn matrix_view_shrinks_longer_slices() {
        let mut data = make_test_buffer();
        data.extend([1, 2, 3]);
        let m = MatrixView::try_from(data.as_slice(), 3, 4, 5).unwrap();
        assert_eq!(m.as_slice().len(), linear_length(3, 4, 5));
        test_basic_indexing(&m);
    }

    #[test]
    fn matrix_try_from_error() {
        let data = make_test_buffer();
        let err = MatrixView::try_from(&data[..10], 3, 4, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "tried to construct a 3x4 matrix with leading dimension 5 over a slice of \
             length 10 (expected at least 18)"
        );
        assert_eq!(err.as_static().len, 10);
        assert_eq!(err.into_inner().len(), 10);

        let debug = format!(
            "{:?}",
            MatrixView::try_from(&data[..1], 3, 4, 5).unwrap_err()
        );
        assert!(debug.contains("data_len: 1"));
        assert!(debug.contains("ld: 5"));
    }

    #[test]
    #[should_panic(
        expected = "leading dimension 2 must be greater than or equal to the number of rows 3"
    )]
    fn matrix_leading_dimension_panics() {
        let data = vec![0usize; 100];
        let _ = MatrixView::try_from(data.as_slice(), 3, 4, 2);
    }

    #[test]
    fn matrix_mut_view() {
        let mut m = Matrix::<usize>::new(usize::MAX, 3, 4, 5);
        {
            let mut view = m.as_mut_view();
            for j in 0..4 {
                for i in 0..3 {
                    view[(i, j)] = 10 * i + j;
                }
            }
        }
        test_basic_indexing(&m);

        // Padding is untouched.
        assert_eq!(m.as_slice()[3], usize::MAX);
        assert_eq!(m.as_slice()[4], usize::MAX);
    }

    #[test]
    fn matrix_column_mut() {
        let mut m = Matrix::<usize>::new(usize::MAX, 3, 4, 5);
        for j in 0..4 {
            let column = m.column_mut(j);
            assert_eq!(column.len(), 3);
            for (i, v) in column.iter_mut().enumerate() {
                *v = 10 * i + j;
            }
        }
        test_basic_indexing(&m);
    }

    #[test]
    #[should_panic(expected = "tried to access column 4 of a matrix with 4 columns")]
    fn matrix_column_mut_panics() {
        let mut m = Matrix::<usize>::new(0, 3, 4, 5);
        m.column_mut(4);
    }

    #[test]
    fn reverse_columns() {
        let mut m = MatrixView::try_from(make_test_buffer().as_slice(), 3, 4, 5)
            .unwrap()
            .to_owned();
        m.reverse_columns();
        for j in 0..4 {
            assert_eq!(m.column(j), &[3 - j, 13 - j, 23 - j]);
        }
        assert_eq!(m.as_slice()[3], usize::MAX);

        // Odd column counts keep the middle column in place.
        let mut data = vec![1, 0, 2, 0, 3];
        let mut v = MutMatrixView::vector_mut(&mut data, 3, 2).unwrap();
        v.reverse_columns();
        assert_eq!(data, [3, 0, 2, 0, 1]);
    }

    #[test]
    fn matrix_columns_mut() {
        let mut m = Matrix::<usize>::new(usize::MAX, 3, 4, 5);
        m.columns_mut().enumerate().for_each(|(j, column)| {
            assert_eq!(column.len(), 3);
            column
                .iter_mut()
                .enumerate()
                .for_each(|(i, v)| *v = 10 * i + j);
        });
        test_basic_indexing(&m);
    }

    #[cfg(not(miri))]
    #[test]
    fn matrix_par_columns_mut() {
        let mut m = Matrix::<usize>::new(usize::MAX, 3, 4, 5);
        m.par_columns_mut().enumerate().for_each(|(j, column)| {
            column
                .iter_mut()
                .enumerate()
                .for_each(|(i, v)| *v = 10 * i + j);
        });
        test_basic_indexing(&m);
        assert_eq!(m.as_slice()[3], usize::MAX);
    }

    #[test]
    fn vector_views() {
        let data: Vec<usize> = (0..10).collect();
        let v = MatrixView::vector(data.as_slice(), 4, 3).unwrap();
        assert_eq!(v.nrows(), 1);
        assert_eq!(v.ncols(), 4);
        let values: Vec<usize> = (0..4).map(|j| v[(0, j)]).collect();
        assert_eq!(values, [0, 3, 6, 9]);

        assert!(MatrixView::vector(data.as_slice(), 5, 3).is_err());

        let mut data = vec![0usize; 5];
        let mut v = MutMatrixView::vector_mut(data.as_mut_slice(), 3, 2).unwrap();
        v[(0, 2)] = 7;
        assert_eq!(data, [0, 0, 0, 0, 7]);
    }

    #[test]
    #[should_panic(expected = "vector increment cannot be zero")]
    fn vector_zero_increment_panics() {
        let data = vec![0usize; 5];
        let _ = MatrixView::vector(data.as_slice(), 3, 0);
    }

    #[test]
    fn matrix_zero_sizes() {
        let data: Vec<usize> = vec![];
        let m = MatrixView::try_from(data.as_slice(), 0, 10, 0).unwrap();
        assert_eq!(m.columns().count(), 0);

        let m = MatrixView::try_from(data.as_slice(), 3, 0, 3).unwrap();
        assert_eq!(m.ncols(), 0);
        assert_eq!(m.columns().count(), 0);
    }

    #[test]
    fn boxed_construction() {
        let data: Box<[usize]> = make_test_buffer().into();
        let m = Matrix::try_from_boxed(data, 3, 4, 5).unwrap();
        test_basic_indexing(&m);

        let data: Box<[usize]> = vec![0; 17].into();
        assert!(Matrix::try_from_boxed(data, 3, 4, 5).is_err());
    }

    #[test]
    #[should_panic(expected = "row 3 is out of bounds (max: 3)")]
    fn test_index_panics_row() {
        let m = Matrix::<usize>::dense(0, 3, 7);
        let _ = m[(3, 2)];
    }

    #[test]
    #[should_panic(expected = "col 7 is out of bounds (max: 7)")]
    fn test_index_mut_panics_col() {
        let mut m = Matrix::<usize>::dense(0, 3, 7);
        m[(2, 7)] = 1;
    }

    #[test]
    #[should_panic(expected = "tried to access column 7 of a matrix with 7 columns")]
    fn test_column_panics() {
        let m = Matrix::<usize>::dense(0, 3, 7);
        m.column(7);
    }
}
