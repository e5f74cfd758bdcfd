/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt;

use thiserror::Error;

use crate::views::{self, DenseData, MatrixBase, MatrixView, MutDenseData, MutMatrixView};

/// A strided batch of column-major matrices with identical shape.
///
/// ```text
///             |<-------------- stride -------------->|
///             +---------------------+                +---------------------+
/// buffer ->   |       batch 0       |    (unused)    |       batch 1       | ...
///             +---------------------+                +---------------------+
///             |<-- linear_length -->|
/// ```
///
/// Entry `(row, col)` of batch `b` lives at offset `row + col * ld + b * stride`.
#[derive(Debug, Clone, Copy)]
pub struct StridedBatchBase<T>
where
    T: DenseData,
{
    data: T,
    batch_count: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
    // The distance between the starts of consecutive batches.
    stride: usize,
}

/// Return the linear length of a slice underlying a `StridedBatchBase` with the given
/// parameters.
pub fn linear_length(
    batch_count: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
    stride: usize,
) -> usize {
    if batch_count == 0 {
        0
    } else {
        (batch_count - 1) * stride + views::linear_length(nrows, ncols, ld)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
#[error(
    "tried to construct a batch of {batch_count} {nrows}x{ncols} matrices with leading \
     dimension {ld} and stride {stride} over a slice of length {} (expected at least {})",
     len,
     linear_length(self.batch_count, self.nrows, self.ncols, self.ld, self.stride)
)]
pub struct TryFromErrorLight {
    len: usize,
    batch_count: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
    stride: usize,
}

#[derive(Error)]
#[non_exhaustive]
#[error(
    "tried to construct a batch of {batch_count} {nrows}x{ncols} matrices with leading \
     dimension {ld} and stride {stride} over a slice of length {} (expected at least {})",
     data.as_slice().len(),
     linear_length(self.batch_count, self.nrows, self.ncols, self.ld, self.stride)
)]
pub struct TryFromError<T: DenseData> {
    data: T,
    batch_count: usize,
    nrows: usize,
    ncols: usize,
    ld: usize,
    stride: usize,
}

// Manually implement `fmt::Debug` so we don't require `T::Debug`.
impl<T: DenseData> fmt::Debug for TryFromError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryFromError")
            .field("data_len", &self.data.as_slice().len())
            .field("batch_count", &self.batch_count)
            .field("nrows", &self.nrows)
            .field("ncols", &self.ncols)
            .field("ld", &self.ld)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T: DenseData> TryFromError<T> {
    /// Consume the error and return the base data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Drop the data portion of the error and return an equivalent error that is guaranteed
    /// to be `'static`.
    pub fn as_static(&self) -> TryFromErrorLight {
        TryFromErrorLight {
            len: self.data.as_slice().len(),
            batch_count: self.batch_count,
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
            stride: self.stride,
        }
    }
}

fn check_layout(batch_count: usize, nrows: usize, ncols: usize, ld: usize, stride: usize) {
    assert!(
        ld >= nrows,
        "leading dimension {ld} must be greater than or equal to the number of rows {nrows}"
    );
    if batch_count > 1 {
        let span = views::linear_length(nrows, ncols, ld);
        assert!(
            stride >= span,
            "stride {stride} would alias consecutive batches spanning {span} elements each"
        );
    }
}

impl<'a, T> StridedBatchBase<&'a [T]> {
    /// Construct a strided batch over `data`, shrinking the slice as needed.
    ///
    /// Returns an error if `data` is shorter than the value returned by `linear_length`.
    ///
    /// # Panics
    ///
    /// * Panics if `ld < nrows`.
    /// * Panics if `batch_count > 1` and `stride` is smaller than the span of one matrix.
    pub fn try_from(
        data: &'a [T],
        batch_count: usize,
        nrows: usize,
        ncols: usize,
        ld: usize,
        stride: usize,
    ) -> Result<Self, TryFromError<&'a [T]>> {
        check_layout(batch_count, nrows, ncols, ld, stride);
        let required_length = linear_length(batch_count, nrows, ncols, ld, stride);
        match data.get(..required_length) {
            Some(data) => Ok(Self {
                data,
                batch_count,
                nrows,
                ncols,
                ld,
                stride,
            }),
            None => Err(TryFromError {
                data,
                batch_count,
                nrows,
                ncols,
                ld,
                stride,
            }),
        }
    }
}

impl<'a, T> StridedBatchBase<&'a mut [T]> {
    /// Construct a mutable strided batch over `data`, shrinking the slice as needed.
    ///
    /// Returns an error if `data` is shorter than the value returned by `linear_length`.
    ///
    /// # Panics
    ///
    /// * Panics if `ld < nrows`.
    /// * Panics if `batch_count > 1` and `stride` is smaller than the span of one matrix.
    pub fn try_from(
        data: &'a mut [T],
        batch_count: usize,
        nrows: usize,
        ncols: usize,
        ld: usize,
        stride: usize,
    ) -> Result<Self, TryFromError<&'a mut [T]>> {
        check_layout(batch_count, nrows, ncols, ld, stride);
        let required_length = linear_length(batch_count, nrows, ncols, ld, stride);
        if data.len() >= required_length {
            Ok(Self {
                data: &mut data[..required_length],
                batch_count,
                nrows,
                ncols,
                ld,
                stride,
            })
        } else {
            Err(TryFromError {
                data,
                batch_count,
                nrows,
                ncols,
                ld,
                stride,
            })
        }
    }
}

impl<T: Clone> StridedBatchBase<Box<[T]>> {
    /// Allocate a new strided batch with every element set to `value`.
    ///
    /// # Panics
    ///
    /// * Panics if `ld < nrows`.
    /// * Panics if `batch_count > 1` and `stride` is smaller than the span of one matrix.
    pub fn new(
        value: T,
        batch_count: usize,
        nrows: usize,
        ncols: usize,
        ld: usize,
        stride: usize,
    ) -> Self {
        check_layout(batch_count, nrows, ncols, ld, stride);
        let len = linear_length(batch_count, nrows, ncols, ld, stride);
        Self {
            data: vec![value; len].into(),
            batch_count,
            nrows,
            ncols,
            ld,
            stride,
        }
    }
}

impl<T> StridedBatchBase<T>
where
    T: DenseData,
{
    /// Return the number of matrices in the batch.
    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    /// Return the number of rows of each matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the number of columns of each matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the leading dimension of each matrix.
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Return the count of elements between the start of each batch.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Return the underlying data as a slice.
    ///
    /// # Note
    ///
    /// The underlying representation for a strided batch is not necessarily dense.
    pub fn as_slice(&self) -> &[T::Elem] {
        self.data.as_slice()
    }

    fn span(&self, batch: usize) -> std::ops::Range<usize> {
        assert!(
            batch < self.batch_count,
            "tried to access batch {batch} of a batch with {} entries",
            self.batch_count
        );
        let start = batch * self.stride;
        start..start + views::linear_length(self.nrows, self.ncols, self.ld)
    }

    /// Return the matrix at index `batch`.
    ///
    /// # Panics
    ///
    /// Panics if `batch >= self.batch_count()`.
    pub fn batch(&self, batch: usize) -> MatrixView<'_, T::Elem> {
        let span = self.span(batch);
        MatrixBase::from_validated(&self.as_slice()[span], self.nrows, self.ncols, self.ld)
    }

    /// Return the matrix at index `batch` as a mutable view.
    ///
    /// # Panics
    ///
    /// Panics if `batch >= self.batch_count()`.
    pub fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, T::Elem>
    where
        T: MutDenseData,
    {
        let span = self.span(batch);
        let (nrows, ncols, ld) = (self.nrows, self.ncols, self.ld);
        MatrixBase::from_validated(&mut self.data.as_mut_slice()[span], nrows, ncols, ld)
    }

    /// Return a view over the batch.
    pub fn as_view(&self) -> StridedBatchView<'_, T::Elem> {
        StridedBatchBase {
            data: self.as_slice(),
            batch_count: self.batch_count,
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
            stride: self.stride,
        }
    }

    /// Return a mutable view over the batch.
    pub fn as_mut_view(&mut self) -> MutStridedBatchView<'_, T::Elem>
    where
        T: MutDenseData,
    {
        StridedBatchBase {
            batch_count: self.batch_count,
            nrows: self.nrows,
            ncols: self.ncols,
            ld: self.ld,
            stride: self.stride,
            data: self.data.as_mut_slice(),
        }
    }
}

/// An owning strided batch.
pub type StridedBatch<T> = StridedBatchBase<Box<[T]>>;

/// A non-owning strided batch.
pub type StridedBatchView<'a, T> = StridedBatchBase<&'a [T]>;

/// A mutable non-owning strided batch.
pub type MutStridedBatchView<'a, T> = StridedBatchBase<&'a mut [T]>;

///////////
// Tests //
///////////
