/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Comparison of candidate results against CPU references.
//!
//! All checks accept any [`blastest_utils::Batch`], so single matrices, strided batches
//! and arrays of matrices are compared the same way. Mismatches are returned as data.

mod shape;

pub mod near;
pub mod norm;
pub mod report;
pub mod tolerance;
pub mod unit;

pub use near::{assert_near_check, near_check, NearMismatch};
pub use norm::{norm_check, InvalidNormType, NormType};
pub use report::{check, CheckConfig, CheckReport};
pub use tolerance::{error_tolerance, within_tolerance};
pub use unit::{assert_unit_check, unit_check, Mismatch};
