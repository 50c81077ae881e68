//! Single-instruction math: square root and rounding.
//!
//! One module per lane layout; each function exists only when the build
//! enables the instruction set it needs. Without AVX, 256-bit packs are
//! handled as two 128-bit halves.

#![allow(dead_code)]

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! native_lanes {
    (
        $lanes:ident: Pack<$T:ty, $K:ty> as $V:ident;
        $($f:ident => $intr:ident if $feat:tt),* $(,)?
    ) => {
        pub(crate) mod $lanes {
            #![allow(unused_imports)]

            #[cfg(target_arch = "x86")]
            use std::arch::x86::*;
            #[cfg(target_arch = "x86_64")]
            use std::arch::x86_64::*;

            use crate::pack::Pack;

            $(
                #[cfg(target_feature = $feat)]
                #[inline]
                pub(crate) fn $f(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    // SAFETY: lane array and register have the same size and
                    // every bit pattern is valid for both. The instruction set
                    // is enabled for the whole build.
                    unsafe {
                        let v: $V = std::mem::transmute(a.into_lanes());
                        Pack::from_lanes(std::mem::transmute($intr(v)))
                    }
                }
            )*
        }
    };
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
native_lanes! {
    f32x4: Pack<f32, crate::capability::Sse> as __m128;
    sqrt => _mm_sqrt_ps if "sse2",
    floor => _mm_floor_ps if "sse4.1",
    ceil => _mm_ceil_ps if "sse4.1",
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
native_lanes! {
    f64x2: Pack<f64, crate::capability::Sse> as __m128d;
    sqrt => _mm_sqrt_pd if "sse2",
    floor => _mm_floor_pd if "sse4.1",
    ceil => _mm_ceil_pd if "sse4.1",
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
native_lanes! {
    f32x8: Pack<f32, crate::capability::Avx> as __m256;
    sqrt => _mm256_sqrt_ps if "avx",
    floor => _mm256_floor_ps if "avx",
    ceil => _mm256_ceil_ps if "avx",
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx"))]
native_lanes! {
    f64x4: Pack<f64, crate::capability::Avx> as __m256d;
    sqrt => _mm256_sqrt_pd if "avx",
    floor => _mm256_floor_pd if "avx",
    ceil => _mm256_ceil_pd if "avx",
}

/// 256-bit packs on a build without AVX: the 128-bit instruction on each
/// half.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[allow(unused_macros)]
macro_rules! native_halves {
    (
        $lanes:ident: Pack<$T:ty, $K:ty> as $V:ident [$half:literal];
        $($f:ident => $intr:ident if $feat:tt),* $(,)?
    ) => {
        pub(crate) mod $lanes {
            #![allow(unused_imports)]

            #[cfg(target_arch = "x86")]
            use std::arch::x86::*;
            #[cfg(target_arch = "x86_64")]
            use std::arch::x86_64::*;

            use crate::pack::Pack;

            $(
                #[cfg(target_feature = $feat)]
                #[inline]
                pub(crate) fn $f(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    let x = a.into_lanes();
                    let lo: [$T; $half] = std::array::from_fn(|i| x[i]);
                    let hi: [$T; $half] = std::array::from_fn(|i| x[i + $half]);
                    // SAFETY: each half has the size of one register and
                    // every bit pattern is valid for both.
                    let (lo, hi): ([$T; $half], [$T; $half]) = unsafe {
                        (
                            std::mem::transmute($intr(std::mem::transmute::<[$T; $half], $V>(lo))),
                            std::mem::transmute($intr(std::mem::transmute::<[$T; $half], $V>(hi))),
                        )
                    };
                    Pack::from_fn(|i| if i < $half { lo[i] } else { hi[i - $half] })
                }
            )*
        }
    };
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(target_feature = "avx")))]
native_halves! {
    f32x8: Pack<f32, crate::capability::Avx> as __m128 [4];
    sqrt => _mm_sqrt_ps if "sse2",
    floor => _mm_floor_ps if "sse4.1",
    ceil => _mm_ceil_ps if "sse4.1",
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(target_feature = "avx")))]
native_halves! {
    f64x4: Pack<f64, crate::capability::Avx> as __m128d [2];
    sqrt => _mm_sqrt_pd if "sse2",
    floor => _mm_floor_pd if "sse4.1",
    ceil => _mm_ceil_pd if "sse4.1",
}

#[cfg(all(test, any(target_arch = "x86", target_arch = "x86_64")))]
mod tests {
    #![allow(unused_imports)]

    use crate::capability::{Avx, Sse};
    use crate::math::emulated;
    use crate::pack::Pack;

    #[cfg(target_feature = "sse2")]
    #[test]
    fn sse_sqrt_is_exact() {
        let x = Pack::<f32, Sse>::load(&[0.0, 2.0, 9.0, 1e-30]);
        assert_eq!(super::f32x4::sqrt(x), emulated::sqrt(x));
        let x = Pack::<f64, Sse>::load(&[2.0, 1e300]);
        assert_eq!(super::f64x2::sqrt(x), emulated::sqrt(x));
    }

    #[cfg(target_feature = "sse4.1")]
    #[test]
    fn sse_rounding() {
        let x = Pack::<f64, Sse>::load(&[-2.5, 7.25]);
        assert_eq!(super::f64x2::floor(x).lanes(), &[-3.0, 7.0]);
        assert_eq!(super::f64x2::ceil(x).lanes(), &[-2.0, 8.0]);
    }

    #[cfg(target_feature = "sse2")]
    #[test]
    fn avx_width_sqrt_covers_both_halves() {
        let x = Pack::<f32, Avx>::from_fn(|i| (i * i) as f32);
        let r = super::f32x8::sqrt(x);
        for i in 0..8 {
            assert_eq!(r[i], i as f32);
        }
        let x = Pack::<f64, Avx>::load(&[4.0, 9.0, 16.0, 25.0]);
        assert_eq!(super::f64x4::sqrt(x).lanes(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[cfg(target_feature = "sse4.1")]
    #[test]
    fn avx_width_matches_emulation() {
        let x = Pack::<f32, Avx>::from_fn(|i| i as f32 * 1.3 - 4.0);
        assert_eq!(super::f32x8::floor(x), emulated::floor(x));
        assert_eq!(super::f32x8::ceil(x), emulated::ceil(x));
        let y = x.abs();
        assert_eq!(super::f32x8::sqrt(y), emulated::sqrt(y));
        let x = Pack::<f64, Avx>::from_fn(|i| i as f64 * 2.0);
        assert_eq!(super::f64x4::sqrt(x), emulated::sqrt(x));
    }
}
