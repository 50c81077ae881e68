//! Scalar element types that can live in a pack.

use std::fmt::Debug;

use num_traits::{Float, PrimInt};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A floating-point scalar with a packed representation.
///
/// Implemented for `f32` and `f64` only. Besides the `num_traits::Float`
/// surface used by the emulated math tier, it exposes raw bit access (masks
/// and `select` work on bit patterns) and the special functions the standard
/// library does not provide.
pub trait SimdScalar:
    sealed::Sealed + Float + Default + Debug + bytemuck::Pod + Send + Sync + 'static
{
    /// Unsigned integer with the same width as the scalar.
    type Bits: PrimInt + Debug;

    /// Short type name, e.g. `"f32"`.
    const NAME: &'static str;

    /// Accepted distance, in units in the last place, between two math tiers.
    const ULP_TOLERANCE: u64;

    fn to_raw_bits(self) -> Self::Bits;

    fn from_raw_bits(bits: Self::Bits) -> Self;

    /// Maps the bit pattern onto a signed integer line so that adjacent
    /// floats differ by one. `+0.0` and `-0.0` both map to zero.
    fn ordered_bits(self) -> i64;

    fn erf(self) -> Self;

    fn erfc(self) -> Self;

    fn lgamma(self) -> Self;

    fn tgamma(self) -> Self;
}

impl SimdScalar for f32 {
    type Bits = u32;

    const NAME: &'static str = "f32";
    const ULP_TOLERANCE: u64 = 4;

    #[inline]
    fn to_raw_bits(self) -> u32 {
        self.to_bits()
    }

    #[inline]
    fn from_raw_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    #[inline]
    fn ordered_bits(self) -> i64 {
        let i = self.to_bits() as i32;
        if i < 0 {
            i64::from(i32::MIN) - i64::from(i)
        } else {
            i64::from(i)
        }
    }

    #[inline]
    fn erf(self) -> Self {
        libm::erff(self)
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfcf(self)
    }

    #[inline]
    fn lgamma(self) -> Self {
        libm::lgammaf(self)
    }

    #[inline]
    fn tgamma(self) -> Self {
        libm::tgammaf(self)
    }
}

impl SimdScalar for f64 {
    type Bits = u64;

    const NAME: &'static str = "f64";
    const ULP_TOLERANCE: u64 = 2;

    #[inline]
    fn to_raw_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    #[inline]
    fn ordered_bits(self) -> i64 {
        let i = self.to_bits() as i64;
        if i < 0 { i64::MIN - i } else { i }
    }

    #[inline]
    fn erf(self) -> Self {
        libm::erf(self)
    }

    #[inline]
    fn erfc(self) -> Self {
        libm::erfc(self)
    }

    #[inline]
    fn lgamma(self) -> Self {
        libm::lgamma(self)
    }

    #[inline]
    fn tgamma(self) -> Self {
        libm::tgamma(self)
    }
}

/// Distance between `a` and `b` in units in the last place.
///
/// Two NaNs are considered equal; a NaN against a number is `u64::MAX`.
pub fn ulp_distance<T: SimdScalar>(a: T, b: T) -> u64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => return 0,
        (true, false) | (false, true) => return u64::MAX,
        _ => {}
    }
    let diff = i128::from(a.ordered_bits()) - i128::from(b.ordered_bits());
    u64::try_from(diff.unsigned_abs()).unwrap_or(u64::MAX)
}
