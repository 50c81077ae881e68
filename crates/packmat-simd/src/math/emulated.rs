//! Scalar-emulated math: unpack, apply the scalar function per lane, repack.
//!
//! Always compiled so tests and benches can compare any tier against it.
//! Results match the scalar functions of `num_traits::Float` (and `libm` for
//! the special functions) bit for bit.

use num_traits::Float;

use crate::capability::KindFor;
use crate::pack::Pack;
use crate::scalar::SimdScalar;

#[inline]
fn unary<T: SimdScalar, K: KindFor<T>>(a: Pack<T, K>, f: fn(T) -> T) -> Pack<T, K> {
    let mut lanes = a.into_lanes();
    for x in lanes.as_mut() {
        *x = f(*x);
    }
    Pack::from_lanes(lanes)
}

#[inline]
fn binary<T: SimdScalar, K: KindFor<T>>(
    a: Pack<T, K>,
    b: Pack<T, K>,
    f: fn(T, T) -> T,
) -> Pack<T, K> {
    let mut lanes = a.into_lanes();
    for (x, &y) in lanes.as_mut().iter_mut().zip(b.lanes()) {
        *x = f(*x, y);
    }
    Pack::from_lanes(lanes)
}

macro_rules! emulate_unary {
    ($($name:ident => $Tr:ident :: $method:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $name<T: SimdScalar, K: KindFor<T>>(a: Pack<T, K>) -> Pack<T, K> {
                unary(a, <T as $Tr>::$method)
            }
        )*
    };
}

macro_rules! emulate_binary {
    ($($name:ident => $Tr:ident :: $method:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $name<T: SimdScalar, K: KindFor<T>>(a: Pack<T, K>, b: Pack<T, K>) -> Pack<T, K> {
                binary(a, b, <T as $Tr>::$method)
            }
        )*
    };
}

emulate_unary! {
    sqrt => Float::sqrt,
    floor => Float::floor,
    ceil => Float::ceil,
    exp => Float::exp,
    log => Float::ln,
    log10 => Float::log10,
    sin => Float::sin,
    cos => Float::cos,
    tan => Float::tan,
    asin => Float::asin,
    acos => Float::acos,
    atan => Float::atan,
    sinh => Float::sinh,
    cosh => Float::cosh,
    tanh => Float::tanh,
    cbrt => Float::cbrt,
    exp2 => Float::exp2,
    log2 => Float::log2,
    expm1 => Float::exp_m1,
    log1p => Float::ln_1p,
    asinh => Float::asinh,
    acosh => Float::acosh,
    atanh => Float::atanh,
    erf => SimdScalar::erf,
    erfc => SimdScalar::erfc,
    lgamma => SimdScalar::lgamma,
    tgamma => SimdScalar::tgamma,
}

emulate_binary! {
    pow => Float::powf,
    atan2 => Float::atan2,
    hypot => Float::hypot,
}

/// Per-lane `xlogy`, same masking rule as [`crate::math::xlogy`].
#[inline]
pub fn xlogy<T: SimdScalar, K: KindFor<T>>(a: Pack<T, K>, b: Pack<T, K>) -> Pack<T, K> {
    let zero = Pack::zeros();
    a.gt(zero).select(a * log(b), zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Avx, Sse};

    #[test]
    fn unary_matches_scalar_per_lane() {
        let src = [0.25f32, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x = Pack::<f32, Avx>::load(&src);
        let y = exp(x);
        for (i, &v) in src.iter().enumerate() {
            assert_eq!(y[i].to_bits(), v.exp().to_bits());
        }
        let y = log1p(x);
        for (i, &v) in src.iter().enumerate() {
            assert_eq!(y[i].to_bits(), v.ln_1p().to_bits());
        }
    }

    #[test]
    fn binary_keeps_lane_order() {
        let a = Pack::<f64, Sse>::load(&[2.0, 3.0]);
        let b = Pack::<f64, Sse>::load(&[10.0, 2.0]);
        let r = pow(a, b);
        assert_eq!(r[0], 1024.0);
        assert_eq!(r[1], 9.0);
        let r = atan2(a, b);
        assert_eq!(r[0], 2.0f64.atan2(10.0));
    }

    #[test]
    fn special_functions() {
        let x = Pack::<f64, Avx>::load(&[0.0, 1.0, 4.0, 5.0]);
        let g = tgamma(x);
        assert_eq!(g[1], 1.0);
        assert!((g[2] - 6.0).abs() < 1e-12);
        assert!((g[3] - 24.0).abs() < 1e-12);
        let e = erf(x);
        assert_eq!(e[0], 0.0);
        let c = erfc(x);
        assert_eq!(c[0], 1.0);
    }

    #[test]
    fn rounding() {
        let x = Pack::<f32, Sse>::load(&[-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(floor(x).lanes(), &[-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(ceil(x).lanes(), &[-1.0, -0.0, 1.0, 2.0]);
    }

    #[test]
    fn xlogy_masks_non_positive_a() {
        let a = Pack::<f32, Sse>::load(&[1.0, 0.0, -2.0, 3.0]);
        let b = Pack::<f32, Sse>::load(&[5.0, 0.0, -1.0, 1.0]);
        let r = xlogy(a, b);
        assert_eq!(r[0], 5.0f32.ln());
        assert_eq!(r[1], 0.0);
        assert_eq!(r[2], 0.0);
        assert_eq!(r[3], 0.0);
    }
}
