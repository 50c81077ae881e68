//! Tier binding table.
//!
//! For every group and every (scalar, kind) pair exactly one impl survives
//! `#[cfg]`: native, then vendor, then emulated. If none qualifies the pair
//! has no impl. The gates here mirror the flags on `SimdKind` and
//! `VendorBackend::provides`, which `resolve` reads.

#![allow(unused_imports)]

use super::*;
use crate::capability::{Avx, Sse};

// =============================================================================
// Library groups (vendor or emulated)
// =============================================================================

macro_rules! bind_library_group {
    ($Trait:ident, vendor = $vendor:tt, unary: [$($u:ident),*], binary: [$($b:ident),*]) => {
        bind_library_group!(@pair $Trait, $vendor, f32, Sse, f32x4, [$($u),*], [$($b),*]);
        bind_library_group!(@pair $Trait, $vendor, f64, Sse, f64x2, [$($u),*], [$($b),*]);
        bind_library_group!(@pair $Trait, $vendor, f32, Avx, f32x8, [$($u),*], [$($b),*]);
        bind_library_group!(@pair $Trait, $vendor, f64, Avx, f64x4, [$($u),*], [$($b),*]);
    };

    // Provided by both SVML and AMD LibM.
    (@pair $Trait:ident, any, $T:ty, $K:ty, $lanes:ident, $us:tt, $bs:tt) => {
        #[cfg(all(any(feature = "svml", feature = "amdlibm"), target_arch = "x86_64"))]
        bind_library_group!(@vendor $Trait, $T, $K, $lanes, $us, $bs);

        #[cfg(all(
            feature = "emulate",
            not(all(any(feature = "svml", feature = "amdlibm"), target_arch = "x86_64"))
        ))]
        bind_library_group!(@emulated $Trait, $T, $K, $us, $bs);
    };

    // Provided by SVML only.
    (@pair $Trait:ident, svml, $T:ty, $K:ty, $lanes:ident, $us:tt, $bs:tt) => {
        #[cfg(all(feature = "svml", target_arch = "x86_64"))]
        bind_library_group!(@vendor $Trait, $T, $K, $lanes, $us, $bs);

        #[cfg(all(feature = "emulate", not(all(feature = "svml", target_arch = "x86_64"))))]
        bind_library_group!(@emulated $Trait, $T, $K, $us, $bs);
    };

    // No vendor backend.
    (@pair $Trait:ident, none, $T:ty, $K:ty, $lanes:ident, $us:tt, $bs:tt) => {
        #[cfg(feature = "emulate")]
        bind_library_group!(@emulated $Trait, $T, $K, $us, $bs);
    };

    (@vendor $Trait:ident, $T:ty, $K:ty, $lanes:ident, [$($u:ident),*], [$($b:ident),*]) => {
        impl $Trait<$T> for $K {
            const TIER: Tier = Tier::Vendor;

            $(
                #[inline]
                fn $u(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    vendor::active::$lanes::$u(a)
                }
            )*
            $(
                #[inline]
                fn $b(a: Pack<$T, $K>, b: Pack<$T, $K>) -> Pack<$T, $K> {
                    vendor::active::$lanes::$b(a, b)
                }
            )*
        }
    };

    (@emulated $Trait:ident, $T:ty, $K:ty, [$($u:ident),*], [$($b:ident),*]) => {
        impl $Trait<$T> for $K {
            const TIER: Tier = Tier::Emulated;

            $(
                #[inline]
                fn $u(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    emulated::$u(a)
                }
            )*
            $(
                #[inline]
                fn $b(a: Pack<$T, $K>, b: Pack<$T, $K>) -> Pack<$T, $K> {
                    emulated::$b(a, b)
                }
            )*
        }
    };
}

bind_library_group!(PowMath, vendor = any, unary: [], binary: [pow]);
bind_library_group!(ExpLogMath, vendor = any, unary: [exp, log, log10], binary: []);
bind_library_group!(TrigMath, vendor = any, unary: [sin, cos, tan], binary: []);
bind_library_group!(ExpLog2Math, vendor = any, unary: [exp2, log2], binary: []);
bind_library_group!(ArcTrigMath, vendor = svml, unary: [asin, acos, atan], binary: [atan2]);
bind_library_group!(HyperbMath, vendor = svml, unary: [sinh, cosh, tanh], binary: []);
bind_library_group!(HypotMath, vendor = svml, unary: [], binary: [hypot]);
bind_library_group!(CbrtMath, vendor = svml, unary: [cbrt], binary: []);
bind_library_group!(ExpLogExMath, vendor = svml, unary: [expm1, log1p], binary: []);
bind_library_group!(ArcHyperbMath, vendor = svml, unary: [asinh, acosh, atanh], binary: []);
bind_library_group!(ErfMath, vendor = svml, unary: [erf, erfc], binary: []);
bind_library_group!(GammaMath, vendor = none, unary: [lgamma, tgamma], binary: []);

// =============================================================================
// Instruction groups (native or emulated)
// =============================================================================

// 256-bit packs are native whenever the 128-bit instruction is: without AVX
// they run it on each half (see `native`).

macro_rules! bind_native_group {
    ($Trait:ident, sse = $sse:tt, unary: [$($u:ident),*]) => {
        bind_native_group!(@pair $Trait, f32, Sse, f32x4, $sse, [$($u),*]);
        bind_native_group!(@pair $Trait, f64, Sse, f64x2, $sse, [$($u),*]);
        bind_native_group!(@pair $Trait, f32, Avx, f32x8, $sse, [$($u),*]);
        bind_native_group!(@pair $Trait, f64, Avx, f64x4, $sse, [$($u),*]);
    };

    (@pair $Trait:ident, $T:ty, $K:ty, $lanes:ident, $feat:tt, [$($u:ident),*]) => {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = $feat
        ))]
        impl $Trait<$T> for $K {
            const TIER: Tier = Tier::Native;

            $(
                #[inline]
                fn $u(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    native::$lanes::$u(a)
                }
            )*
        }

        #[cfg(all(
            feature = "emulate",
            not(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = $feat
            ))
        ))]
        impl $Trait<$T> for $K {
            const TIER: Tier = Tier::Emulated;

            $(
                #[inline]
                fn $u(a: Pack<$T, $K>) -> Pack<$T, $K> {
                    emulated::$u(a)
                }
            )*
        }
    };
}

bind_native_group!(SqrtMath, sse = "sse2", unary: [sqrt]);
bind_native_group!(RoundMath, sse = "sse4.1", unary: [floor, ceil]);
