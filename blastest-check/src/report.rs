/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::Debug;

use blastest_utils::{Batch, Element};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    norm::{norm_check, NormType},
    tolerance::within_tolerance,
    unit::{unit_check, Mismatch},
};

fn default_unit_check() -> bool {
    true
}

/// Which comparisons to run on a candidate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Compare every entry up to a few units in the last place.
    #[serde(default = "default_unit_check")]
    pub unit_check: bool,
    /// Measure the relative error norm and compare it against the element tolerance.
    #[serde(default)]
    pub norm_check: bool,
    #[serde(default)]
    pub norm: NormType,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            unit_check: default_unit_check(),
            norm_check: false,
            norm: NormType::default(),
        }
    }
}

/// The outcome of [`check`]. Comparisons that were not requested are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport<T: Debug> {
    pub unit: Option<Result<(), Mismatch<T>>>,
    pub norm_error: Option<f64>,
}

impl<T: Element> CheckReport<T> {
    /// Return whether every requested comparison succeeded.
    pub fn passed(&self) -> bool {
        let unit = self.unit.as_ref().is_none_or(|r| r.is_ok());
        let norm = self.norm_error.is_none_or(within_tolerance::<T>);
        unit && norm
    }
}

/// Run the comparisons selected by `config` on `candidate`.
///
/// Failures are data: they are logged and recorded in the report, leaving it to the
/// caller to decide whether the test fails.
///
/// # Panics
///
/// Panics if the two operands do not have the same batch count and shapes.
pub fn check<R, C>(config: &CheckConfig, reference: &R, candidate: &C) -> CheckReport<R::Elem>
where
    R: Batch + ?Sized,
    C: Batch<Elem = R::Elem> + ?Sized,
    R::Elem: Element,
{
    let unit = config.unit_check.then(|| unit_check(reference, candidate));
    if let Some(Err(mismatch)) = &unit {
        warn!(%mismatch, "unit check failed");
    }

    let norm_error = config
        .norm_check
        .then(|| norm_check(config.norm, reference, candidate));
    if let Some(error) = norm_error {
        if within_tolerance::<R::Elem>(error) {
            info!(norm = ?config.norm, error, "norm check");
        } else {
            warn!(
                norm = ?config.norm,
                error,
                tolerance = <R::Elem as Element>::ERROR_TOLERANCE,
                "norm check error exceeds tolerance"
            );
        }
    }

    CheckReport { unit, norm_error }
}

///////////
// Tests //
///////////
