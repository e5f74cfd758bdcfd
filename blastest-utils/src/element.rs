/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Per-type numeric capabilities used by the generator and the comparator.
//!
//! Every element type the harness can fill or compare implements [`Element`]. The trait
//! captures exactly the operations whose behavior differs between real and complex types
//! (conjugation, real-part extraction, NaN encoding) so generic fill and check loops never
//! have to branch on a type tag.

use std::fmt::Debug;

use half::{bf16, f16};
use num_complex::{Complex, Complex32, Complex64};
use num_traits::{One, Zero};

/// A scalar component of an element (the whole element for real types, the real or
/// imaginary half of a complex type).
///
/// The only job of this trait is to provide a total "units in the last place" ordering
/// so components can be compared with a ULP bound.
pub trait Component: Copy {
    /// Map the bit pattern to an unsigned integer that is monotonic in the float value.
    ///
    /// Positive and negative zero map to the same integer.
    fn to_ordered(self) -> u64;

    /// Return `true` if the component is NaN.
    fn is_nan_component(self) -> bool;

    /// Return whether `self` and `other` are at most `ulps` representable values apart.
    ///
    /// Two NaNs compare equal. A NaN never matches a non-NaN.
    fn within_ulps(self, other: Self, ulps: u32) -> bool {
        match (self.is_nan_component(), other.is_nan_component()) {
            (true, true) => true,
            (false, false) => self.to_ordered().abs_diff(other.to_ordered()) <= u64::from(ulps),
            _ => false,
        }
    }
}

macro_rules! component {
    ($T:ty, $bits:ty) => {
        impl Component for $T {
            #[inline]
            fn to_ordered(self) -> u64 {
                const SIGN: $bits = 1 << (<$bits>::BITS - 1);
                let bits = self.to_bits();
                let biased = if bits & SIGN != 0 {
                    (!bits).wrapping_add(1)
                } else {
                    bits | SIGN
                };
                u64::from(biased)
            }

            #[inline]
            fn is_nan_component(self) -> bool {
                self.is_nan()
            }
        }
    };
}

component!(f32, u32);
component!(f64, u64);
component!(f16, u16);
component!(bf16, u16);

/// The capability interface for element types.
///
/// # Constants
///
/// * `IS_COMPLEX`: Whether the element has an imaginary part.
/// * `UNIT_CHECK_ULPS`: The per-component ULP bound applied by unit-checks.
/// * `ERROR_TOLERANCE`: The relative error below which a norm-check is considered to
///   pass. This is `0` for every type except half precision.
pub trait Element: Copy + PartialEq + Debug + Send + Sync + 'static {
    const IS_COMPLEX: bool;
    const UNIT_CHECK_ULPS: u32;
    const ERROR_TOLERANCE: f64;

    fn zero() -> Self;
    fn one() -> Self;

    /// Construct an element whose real part is `x` and imaginary part (if any) is zero.
    fn from_f64(x: f64) -> Self;

    /// Construct an element from its real and imaginary parts. Real types drop `im`.
    fn from_parts(re: f64, im: f64) -> Self;

    /// The real part, widened to `f64`.
    fn re(self) -> f64;

    /// The imaginary part, widened to `f64`. Always `0` for real types.
    fn im(self) -> f64;

    /// The complex conjugate. The identity for real types.
    fn conjugate(self) -> Self;

    /// Keep only the real part.
    fn real_part(self) -> Self;

    fn negate(self) -> Self;

    /// A NaN encoding for this type. For complex types both parts are NaN.
    fn nan_value() -> Self;

    /// Return `true` if any component is NaN.
    fn is_nan(self) -> bool;

    /// The absolute value (modulus for complex types) as `f64`.
    fn magnitude(self) -> f64;

    fn multiply(self, other: Self) -> Self;
    fn divide(self, other: Self) -> Self;

    /// Return whether every component of `self` is within `ulps` of the corresponding
    /// component of `other`.
    fn within_ulps(self, other: Self, ulps: u32) -> bool;
}

macro_rules! real_element {
    ($T:ty, ulps = $ulps:expr, tolerance = $tol:expr, $from:expr, $to:expr) => {
        impl Element for $T {
            const IS_COMPLEX: bool = false;
            const UNIT_CHECK_ULPS: u32 = $ulps;
            const ERROR_TOLERANCE: f64 = $tol;

            #[inline]
            fn zero() -> Self {
                Zero::zero()
            }

            #[inline]
            fn one() -> Self {
                One::one()
            }

            #[inline]
            fn from_f64(x: f64) -> Self {
                $from(x)
            }

            #[inline]
            fn from_parts(re: f64, _im: f64) -> Self {
                $from(re)
            }

            #[inline]
            fn re(self) -> f64 {
                $to(self)
            }

            #[inline]
            fn im(self) -> f64 {
                0.0
            }

            #[inline]
            fn conjugate(self) -> Self {
                self
            }

            #[inline]
            fn real_part(self) -> Self {
                self
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }

            #[inline]
            fn nan_value() -> Self {
                <$T>::NAN
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$T>::is_nan(self)
            }

            #[inline]
            fn magnitude(self) -> f64 {
                $to(self).abs()
            }

            #[inline]
            fn multiply(self, other: Self) -> Self {
                self * other
            }

            #[inline]
            fn divide(self, other: Self) -> Self {
                self / other
            }

            #[inline]
            fn within_ulps(self, other: Self, ulps: u32) -> bool {
                Component::within_ulps(self, other, ulps)
            }
        }
    };
}

real_element!(f32, ulps = 4, tolerance = 0.0, |x: f64| x as f32, |x: f32| x as f64);
real_element!(f64, ulps = 4, tolerance = 0.0, |x: f64| x, |x: f64| x);
// 2^-14: the smallest positive normal half precision value.
real_element!(
    f16,
    ulps = 0,
    tolerance = 0.000061035,
    f16::from_f64,
    f16::to_f64
);
real_element!(bf16, ulps = 0, tolerance = 0.0, bf16::from_f64, bf16::to_f64);

macro_rules! complex_element {
    ($T:ty, $R:ty, ulps = $ulps:expr) => {
        impl Element for $T {
            const IS_COMPLEX: bool = true;
            const UNIT_CHECK_ULPS: u32 = $ulps;
            const ERROR_TOLERANCE: f64 = 0.0;

            #[inline]
            fn zero() -> Self {
                Zero::zero()
            }

            #[inline]
            fn one() -> Self {
                One::one()
            }

            #[inline]
            fn from_f64(x: f64) -> Self {
                Complex::new(x as $R, 0.0)
            }

            #[inline]
            fn from_parts(re: f64, im: f64) -> Self {
                Complex::new(re as $R, im as $R)
            }

            #[inline]
            fn re(self) -> f64 {
                self.re as f64
            }

            #[inline]
            fn im(self) -> f64 {
                self.im as f64
            }

            #[inline]
            fn conjugate(self) -> Self {
                self.conj()
            }

            #[inline]
            fn real_part(self) -> Self {
                Complex::new(self.re, 0.0)
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }

            #[inline]
            fn nan_value() -> Self {
                Complex::new(<$R>::NAN, <$R>::NAN)
            }

            #[inline]
            fn is_nan(self) -> bool {
                self.re.is_nan() || self.im.is_nan()
            }

            #[inline]
            fn magnitude(self) -> f64 {
                (self.re as f64).hypot(self.im as f64)
            }

            #[inline]
            fn multiply(self, other: Self) -> Self {
                self * other
            }

            #[inline]
            fn divide(self, other: Self) -> Self {
                self / other
            }

            #[inline]
            fn within_ulps(self, other: Self, ulps: u32) -> bool {
                Component::within_ulps(self.re, other.re, ulps)
                    && Component::within_ulps(self.im, other.im, ulps)
            }
        }
    };
}

complex_element!(Complex32, f32, ulps = 4);
complex_element!(Complex64, f64, ulps = 4);

///////////
// Tests //
///////////
