/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Uniform access to the three matrix layouts the harness works with.
//!
//! * A single matrix is a batch of one.
//! * A [`StridedBatchBase`] holds several matrices in one allocation.
//! * A slice of [`MatrixBase`] holds independently allocated matrices.

use crate::{
    strided::StridedBatchBase,
    views::{DenseData, MatrixBase, MatrixView, MutDenseData, MutMatrixView},
};

/// Read access to a sequence of column-major matrices.
pub trait Batch {
    type Elem;

    /// Return the number of matrices.
    fn batch_count(&self) -> usize;

    /// Return the matrix at index `batch`.
    ///
    /// # Panics
    ///
    /// Panics if `batch >= self.batch_count()`.
    fn batch(&self, batch: usize) -> MatrixView<'_, Self::Elem>;

    /// Return the flat offset of the first element of `batch` within its allocation.
    fn batch_offset(&self, _batch: usize) -> usize {
        0
    }
}

/// Write access to a sequence of column-major matrices.
pub trait BatchMut: Batch {
    /// Return the matrix at index `batch` as a mutable view.
    ///
    /// # Panics
    ///
    /// Panics if `batch >= self.batch_count()`.
    fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, Self::Elem>;
}

fn check_single(batch: usize) {
    assert!(batch == 0, "tried to access batch {batch} of a single matrix");
}

impl<T: DenseData> Batch for MatrixBase<T> {
    type Elem = T::Elem;

    fn batch_count(&self) -> usize {
        1
    }

    fn batch(&self, batch: usize) -> MatrixView<'_, T::Elem> {
        check_single(batch);
        self.as_view()
    }
}

impl<T: MutDenseData> BatchMut for MatrixBase<T> {
    fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, T::Elem> {
        check_single(batch);
        self.as_mut_view()
    }
}

impl<T: DenseData> Batch for StridedBatchBase<T> {
    type Elem = T::Elem;

    fn batch_count(&self) -> usize {
        StridedBatchBase::batch_count(self)
    }

    fn batch(&self, batch: usize) -> MatrixView<'_, T::Elem> {
        StridedBatchBase::batch(self, batch)
    }

    fn batch_offset(&self, batch: usize) -> usize {
        batch * self.stride()
    }
}

impl<T: MutDenseData> BatchMut for StridedBatchBase<T> {
    fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, T::Elem> {
        StridedBatchBase::batch_mut(self, batch)
    }
}

impl<T: DenseData> Batch for [MatrixBase<T>] {
    type Elem = T::Elem;

    fn batch_count(&self) -> usize {
        self.len()
    }

    fn batch(&self, batch: usize) -> MatrixView<'_, T::Elem> {
        self[batch].as_view()
    }
}

impl<T: MutDenseData> BatchMut for [MatrixBase<T>] {
    fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, T::Elem> {
        self[batch].as_mut_view()
    }
}

impl<T: DenseData> Batch for Vec<MatrixBase<T>> {
    type Elem = T::Elem;

    fn batch_count(&self) -> usize {
        self.len()
    }

    fn batch(&self, batch: usize) -> MatrixView<'_, T::Elem> {
        self[batch].as_view()
    }
}

impl<T: MutDenseData> BatchMut for Vec<MatrixBase<T>> {
    fn batch_mut(&mut self, batch: usize) -> MutMatrixView<'_, T::Elem> {
        self[batch].as_mut_view()
    }
}

///////////
// Tests //
///////////
