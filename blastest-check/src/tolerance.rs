/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use blastest_utils::Element;

/// The largest norm-check error accepted for results of element type `T`.
///
/// This is `0` for types whose results are expected to be exact and `6.1035e-5` (the
/// smallest positive normal `f16`) for half precision.
pub fn error_tolerance<T: Element>() -> f64 {
    T::ERROR_TOLERANCE
}

/// Return whether a norm-check `error` is acceptable for element type `T`.
///
/// NaN errors are never acceptable.
pub fn within_tolerance<T: Element>(error: f64) -> bool {
    error <= error_tolerance::<T>()
}
