/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use blastest_utils::Batch;

/// Assert that `reference` and `candidate` hold the same number of identically shaped
/// matrices.
pub(crate) fn check_same_shape<R, C>(reference: &R, candidate: &C)
where
    R: Batch + ?Sized,
    C: Batch + ?Sized,
{
    assert_eq!(
        reference.batch_count(),
        candidate.batch_count(),
        "reference and candidate batch counts differ"
    );
    for b in 0..reference.batch_count() {
        let (r, c) = (reference.batch(b), candidate.batch(b));
        assert!(
            r.nrows() == c.nrows() && r.ncols() == c.ncols(),
            "batch {b}: reference is {} x {} but candidate is {} x {}",
            r.nrows(),
            r.ncols(),
            c.nrows(),
            c.ncols()
        );
    }
}
