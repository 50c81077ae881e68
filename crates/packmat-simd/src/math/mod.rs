//! Elementwise math on packs with build-time tier selection.
//!
//! Functions are grouped the way vendor libraries ship them. Each group is a
//! trait ([`ExpLogMath`], [`TrigMath`], ...) implemented at most once per
//! (scalar, kind) pair. `bind.rs` picks the implementation with `#[cfg]`:
//!
//! | tier | when |
//! |------|------|
//! | [`Tier::Native`] | the group maps to one instruction compiled in for the kind |
//! | [`Tier::Vendor`] | the `svml` or `amdlibm` feature links routines for the group and kind |
//! | [`Tier::Emulated`] | the `emulate` feature is on: per-lane scalar calls |
//!
//! With none of them the trait is not implemented and calling the function
//! is a compile error. There is no runtime fallback.
//!
//! ```rust
//! use packmat_simd::{Pack, Sse, math};
//!
//! # #[cfg(feature = "emulate")] {
//! let x = Pack::<f64, Sse>::splat(1.0);
//! let y = math::exp(x);
//! assert!((y[0] - std::f64::consts::E).abs() < 1e-15);
//! assert_eq!(x.log(), Pack::zeros());
//! # }
//! ```

mod bind;
pub mod emulated;
mod native;
mod report;
mod vendor;

use std::fmt;

use crate::capability::KindFor;
use crate::config::VendorBackend;
use crate::pack::Pack;
use crate::scalar::SimdScalar;

pub use report::CapabilityReport;

/// Implementation strategy of a math function for one (scalar, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// One hardware instruction over the whole pack.
    Native,
    /// A vendor vector routine taking the register directly.
    Vendor,
    /// Unpack, call the scalar function per lane, repack.
    Emulated,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Native => "native",
            Tier::Vendor => "vendor",
            Tier::Emulated => "emulated",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability groups. A backend provides a group entirely or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FnGroup {
    Sqrt,
    Round,
    Pow,
    ExpLog,
    Trig,
    ArcTrig,
    Hyperb,
    Hypot,
    Cbrt,
    ExpLog2,
    ExpLogEx,
    ArcHyperb,
    Erf,
    Gamma,
}

impl FnGroup {
    /// Groups served by a single instruction rather than a library routine.
    pub const fn is_native(self) -> bool {
        matches!(self, FnGroup::Sqrt | FnGroup::Round)
    }
}

/// Every function the dispatch layer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    Sqrt,
    Floor,
    Ceil,
    Pow,
    Exp,
    Log,
    Log10,
    Xlogy,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Hypot,
    Cbrt,
    Exp2,
    Log2,
    Expm1,
    Log1p,
    Asinh,
    Acosh,
    Atanh,
    Erf,
    Erfc,
    Lgamma,
    Tgamma,
}

impl MathFn {
    pub const ALL: [MathFn; 31] = [
        MathFn::Sqrt,
        MathFn::Floor,
        MathFn::Ceil,
        MathFn::Pow,
        MathFn::Exp,
        MathFn::Log,
        MathFn::Log10,
        MathFn::Xlogy,
        MathFn::Sin,
        MathFn::Cos,
        MathFn::Tan,
        MathFn::Asin,
        MathFn::Acos,
        MathFn::Atan,
        MathFn::Atan2,
        MathFn::Sinh,
        MathFn::Cosh,
        MathFn::Tanh,
        MathFn::Hypot,
        MathFn::Cbrt,
        MathFn::Exp2,
        MathFn::Log2,
        MathFn::Expm1,
        MathFn::Log1p,
        MathFn::Asinh,
        MathFn::Acosh,
        MathFn::Atanh,
        MathFn::Erf,
        MathFn::Erfc,
        MathFn::Lgamma,
        MathFn::Tgamma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MathFn::Sqrt => "sqrt",
            MathFn::Floor => "floor",
            MathFn::Ceil => "ceil",
            MathFn::Pow => "pow",
            MathFn::Exp => "exp",
            MathFn::Log => "log",
            MathFn::Log10 => "log10",
            MathFn::Xlogy => "xlogy",
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
            MathFn::Tan => "tan",
            MathFn::Asin => "asin",
            MathFn::Acos => "acos",
            MathFn::Atan => "atan",
            MathFn::Atan2 => "atan2",
            MathFn::Sinh => "sinh",
            MathFn::Cosh => "cosh",
            MathFn::Tanh => "tanh",
            MathFn::Hypot => "hypot",
            MathFn::Cbrt => "cbrt",
            MathFn::Exp2 => "exp2",
            MathFn::Log2 => "log2",
            MathFn::Expm1 => "expm1",
            MathFn::Log1p => "log1p",
            MathFn::Asinh => "asinh",
            MathFn::Acosh => "acosh",
            MathFn::Atanh => "atanh",
            MathFn::Erf => "erf",
            MathFn::Erfc => "erfc",
            MathFn::Lgamma => "lgamma",
            MathFn::Tgamma => "tgamma",
        }
    }

    /// Number of pack operands.
    pub fn arity(&self) -> usize {
        match self {
            MathFn::Pow | MathFn::Xlogy | MathFn::Atan2 | MathFn::Hypot => 2,
            _ => 1,
        }
    }

    pub fn group(&self) -> FnGroup {
        match self {
            MathFn::Sqrt => FnGroup::Sqrt,
            MathFn::Floor | MathFn::Ceil => FnGroup::Round,
            MathFn::Pow => FnGroup::Pow,
            MathFn::Exp | MathFn::Log | MathFn::Log10 | MathFn::Xlogy => FnGroup::ExpLog,
            MathFn::Sin | MathFn::Cos | MathFn::Tan => FnGroup::Trig,
            MathFn::Asin | MathFn::Acos | MathFn::Atan | MathFn::Atan2 => FnGroup::ArcTrig,
            MathFn::Sinh | MathFn::Cosh | MathFn::Tanh => FnGroup::Hyperb,
            MathFn::Hypot => FnGroup::Hypot,
            MathFn::Cbrt => FnGroup::Cbrt,
            MathFn::Exp2 | MathFn::Log2 => FnGroup::ExpLog2,
            MathFn::Expm1 | MathFn::Log1p => FnGroup::ExpLogEx,
            MathFn::Asinh | MathFn::Acosh | MathFn::Atanh => FnGroup::ArcHyperb,
            MathFn::Erf | MathFn::Erfc => FnGroup::Erf,
            MathFn::Lgamma | MathFn::Tgamma => FnGroup::Gamma,
        }
    }
}

impl fmt::Display for MathFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The tier `f` resolves to for `(T, K)` in this build, or `None` when the
/// function is unavailable.
///
/// Agrees with the `TIER` constant of the group trait impl.
pub fn resolve<T: SimdScalar, K: KindFor<T>>(f: MathFn) -> Option<Tier> {
    let group = f.group();
    let native = match group {
        FnGroup::Sqrt => K::NATIVE_SQRT,
        FnGroup::Round => K::NATIVE_ROUND,
        _ => false,
    };
    if native {
        return Some(Tier::Native);
    }
    if let Some(vendor) = VendorBackend::active() {
        if K::VENDOR_READY && vendor.provides(group) {
            return Some(Tier::Vendor);
        }
    }
    if cfg!(feature = "emulate") {
        Some(Tier::Emulated)
    } else {
        None
    }
}

/// Whether `f` runs on a native or vendor tier for `(T, K)` in this build.
pub fn has_fast_path<T: SimdScalar, K: KindFor<T>>(f: MathFn) -> bool {
    matches!(resolve::<T, K>(f), Some(Tier::Native | Tier::Vendor))
}

macro_rules! math_group {
    (
        $(#[$doc:meta])*
        $Trait:ident {
            unary: [$($u:ident),* $(,)?],
            binary: [$($b:ident),* $(,)?] $(,)?
        }
    ) => {
        $(#[$doc])*
        pub trait $Trait<T: SimdScalar>: KindFor<T> {
            /// Tier this (scalar, kind) pair was bound to.
            const TIER: Tier;

            $( fn $u(a: Pack<T, Self>) -> Pack<T, Self>; )*
            $( fn $b(a: Pack<T, Self>, b: Pack<T, Self>) -> Pack<T, Self>; )*
        }

        $(
            #[inline]
            pub fn $u<T: SimdScalar, K: $Trait<T>>(a: Pack<T, K>) -> Pack<T, K> {
                K::$u(a)
            }
        )*

        $(
            #[inline]
            pub fn $b<T: SimdScalar, K: $Trait<T>>(a: Pack<T, K>, b: Pack<T, K>) -> Pack<T, K> {
                K::$b(a, b)
            }
        )*

        impl<T: SimdScalar, K: $Trait<T>> Pack<T, K> {
            $(
                #[inline]
                pub fn $u(self) -> Self {
                    K::$u(self)
                }
            )*
            $(
                #[inline]
                pub fn $b(self, other: Self) -> Self {
                    K::$b(self, other)
                }
            )*
        }
    };
}

math_group! {
    /// Square root.
    SqrtMath { unary: [sqrt], binary: [] }
}

math_group! {
    /// Rounding toward negative / positive infinity.
    RoundMath { unary: [floor, ceil], binary: [] }
}

math_group! {
    /// `a` raised to `b`.
    PowMath { unary: [], binary: [pow] }
}

math_group! {
    /// Natural exponential and logarithms.
    ExpLogMath { unary: [exp, log, log10], binary: [] }
}

math_group! {
    TrigMath { unary: [sin, cos, tan], binary: [] }
}

math_group! {
    ArcTrigMath { unary: [asin, acos, atan], binary: [atan2] }
}

math_group! {
    HyperbMath { unary: [sinh, cosh, tanh], binary: [] }
}

math_group! {
    /// `sqrt(a² + b²)` without intermediate overflow.
    HypotMath { unary: [], binary: [hypot] }
}

math_group! {
    CbrtMath { unary: [cbrt], binary: [] }
}

math_group! {
    ExpLog2Math { unary: [exp2, log2], binary: [] }
}

math_group! {
    /// `exp(a) - 1` and `log(1 + a)`, accurate near zero.
    ExpLogExMath { unary: [expm1, log1p], binary: [] }
}

math_group! {
    ArcHyperbMath { unary: [asinh, acosh, atanh], binary: [] }
}

math_group! {
    /// Error function and its complement.
    ErfMath { unary: [erf, erfc], binary: [] }
}

math_group! {
    /// Log-gamma and gamma. No vendor backend ships these.
    GammaMath { unary: [lgamma, tgamma], binary: [] }
}

/// `a * log(b)` where `a > 0`, and `0` everywhere else.
///
/// Lanes with `a <= 0` (or NaN) yield exactly zero whatever `b` holds, so a
/// non-positive `b` there never turns into NaN or infinity.
#[inline]
pub fn xlogy<T: SimdScalar, K: ExpLogMath<T>>(a: Pack<T, K>, b: Pack<T, K>) -> Pack<T, K> {
    let zero = Pack::zeros();
    a.gt(zero).select(a * K::log(b), zero)
}

impl<T: SimdScalar, K: ExpLogMath<T>> Pack<T, K> {
    #[inline]
    pub fn xlogy(self, b: Self) -> Self {
        xlogy(self, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Avx, Sse};

    #[test]
    fn every_function_has_a_name_and_group() {
        for f in MathFn::ALL {
            assert!(!f.name().is_empty());
            assert_eq!(f.to_string(), f.name());
            let _ = f.group();
        }
        assert_eq!(MathFn::Atan2.arity(), 2);
        assert_eq!(MathFn::Exp.arity(), 1);
        assert_eq!(MathFn::Xlogy.group(), FnGroup::ExpLog);
    }

    #[test]
    fn native_groups() {
        assert!(FnGroup::Sqrt.is_native());
        assert!(FnGroup::Round.is_native());
        assert!(!FnGroup::Erf.is_native());
    }

    #[test]
    fn resolution_is_monotone_in_kind() {
        for f in MathFn::ALL {
            if resolve::<f32, Sse>(f).is_some() {
                assert!(resolve::<f32, Avx>(f).is_some(), "{} lost on AVX", f);
            }
            if resolve::<f64, Sse>(f).is_some() {
                assert!(resolve::<f64, Avx>(f).is_some(), "{} lost on AVX", f);
            }
        }
    }

    #[cfg(feature = "emulate")]
    #[test]
    fn emulation_covers_everything() {
        for f in MathFn::ALL {
            assert!(resolve::<f32, Sse>(f).is_some());
            assert!(resolve::<f64, Avx>(f).is_some());
        }
    }

    #[test]
    fn fast_path_follows_resolution() {
        for f in MathFn::ALL {
            let fast = has_fast_path::<f64, Avx>(f);
            assert_eq!(fast, resolve::<f64, Avx>(f).is_some_and(|t| t != Tier::Emulated));
        }
        assert!(!has_fast_path::<f32, Sse>(MathFn::Tgamma));
    }

    #[test]
    fn gamma_is_never_vendor() {
        assert_ne!(resolve::<f64, Avx>(MathFn::Tgamma), Some(Tier::Vendor));
        assert_ne!(resolve::<f32, Sse>(MathFn::Lgamma), Some(Tier::Vendor));
    }

    #[allow(unused_macros)]
    macro_rules! assert_tier_matches {
        ($Trait:ident, $f:expr) => {
            assert_eq!(resolve::<f32, Sse>($f), Some(<Sse as $Trait<f32>>::TIER), "{} f32 Sse", $f);
            assert_eq!(resolve::<f64, Sse>($f), Some(<Sse as $Trait<f64>>::TIER), "{} f64 Sse", $f);
            assert_eq!(resolve::<f32, Avx>($f), Some(<Avx as $Trait<f32>>::TIER), "{} f32 Avx", $f);
            assert_eq!(resolve::<f64, Avx>($f), Some(<Avx as $Trait<f64>>::TIER), "{} f64 Avx", $f);
        };
    }

    #[cfg(feature = "emulate")]
    #[test]
    fn resolve_agrees_with_bound_impls() {
        assert_tier_matches!(SqrtMath, MathFn::Sqrt);
        assert_tier_matches!(RoundMath, MathFn::Floor);
        assert_tier_matches!(PowMath, MathFn::Pow);
        assert_tier_matches!(ExpLogMath, MathFn::Exp);
        assert_tier_matches!(ExpLogMath, MathFn::Xlogy);
        assert_tier_matches!(TrigMath, MathFn::Tan);
        assert_tier_matches!(ArcTrigMath, MathFn::Atan2);
        assert_tier_matches!(HyperbMath, MathFn::Tanh);
        assert_tier_matches!(HypotMath, MathFn::Hypot);
        assert_tier_matches!(CbrtMath, MathFn::Cbrt);
        assert_tier_matches!(ExpLog2Math, MathFn::Log2);
        assert_tier_matches!(ExpLogExMath, MathFn::Log1p);
        assert_tier_matches!(ArcHyperbMath, MathFn::Acosh);
        assert_tier_matches!(ErfMath, MathFn::Erfc);
        assert_tier_matches!(GammaMath, MathFn::Lgamma);
    }

    #[cfg(not(feature = "emulate"))]
    #[test]
    fn without_emulation_only_fast_tiers_resolve() {
        for f in MathFn::ALL {
            for tier in [
                resolve::<f32, Sse>(f),
                resolve::<f64, Sse>(f),
                resolve::<f32, Avx>(f),
                resolve::<f64, Avx>(f),
            ] {
                assert_ne!(tier, Some(Tier::Emulated), "{}", f);
            }
        }
        assert_eq!(resolve::<f64, Avx>(MathFn::Tgamma), None);
        assert_eq!(
            resolve::<f32, Sse>(MathFn::Sqrt).is_some(),
            <Sse as crate::capability::SimdKind>::NATIVE_SQRT
        );
        assert_eq!(
            resolve::<f32, Avx>(MathFn::Ceil).is_some(),
            <Avx as crate::capability::SimdKind>::NATIVE_ROUND
        );
    }

    #[cfg(all(
        not(feature = "emulate"),
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2"
    ))]
    #[test]
    fn without_emulation_sqrt_is_native_on_both_kinds() {
        assert_tier_matches!(SqrtMath, MathFn::Sqrt);
        assert_eq!(<Avx as SqrtMath<f64>>::TIER, Tier::Native);

        let x = Pack::<f64, Avx>::load(&[1.0, 4.0, 9.0, 16.0]);
        assert_eq!(x.sqrt().lanes(), &[1.0, 2.0, 3.0, 4.0]);
        let x = Pack::<f32, Sse>::load(&[1.0, 4.0, 9.0, 16.0]);
        assert_eq!(sqrt(x).lanes(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[cfg(all(any(feature = "svml", feature = "amdlibm"), target_arch = "x86_64"))]
    #[test]
    fn shared_vendor_groups_bind_vendor() {
        assert_tier_matches!(PowMath, MathFn::Pow);
        assert_tier_matches!(ExpLogMath, MathFn::Log10);
        assert_tier_matches!(TrigMath, MathFn::Sin);
        assert_tier_matches!(ExpLog2Math, MathFn::Exp2);
        assert_eq!(<Avx as ExpLogMath<f32>>::TIER, Tier::Vendor);
        assert_eq!(<Sse as TrigMath<f64>>::TIER, Tier::Vendor);
    }

    #[cfg(all(feature = "svml", target_arch = "x86_64"))]
    #[test]
    fn svml_only_groups_bind_vendor() {
        assert_tier_matches!(ArcTrigMath, MathFn::Asin);
        assert_tier_matches!(HyperbMath, MathFn::Cosh);
        assert_tier_matches!(HypotMath, MathFn::Hypot);
        assert_tier_matches!(CbrtMath, MathFn::Cbrt);
        assert_tier_matches!(ExpLogExMath, MathFn::Expm1);
        assert_tier_matches!(ArcHyperbMath, MathFn::Asinh);
        assert_tier_matches!(ErfMath, MathFn::Erf);
        assert_eq!(<Avx as ErfMath<f64>>::TIER, Tier::Vendor);
    }

    #[cfg(all(feature = "amdlibm", target_arch = "x86_64"))]
    #[test]
    fn amdlibm_leaves_other_groups_to_emulation() {
        let expected = if cfg!(feature = "emulate") { Some(Tier::Emulated) } else { None };
        assert_eq!(resolve::<f32, Avx>(MathFn::Erf), expected);
        assert_eq!(resolve::<f64, Sse>(MathFn::Atan2), expected);
        assert_eq!(resolve::<f64, Sse>(MathFn::Exp), Some(Tier::Vendor));
    }

    #[cfg(feature = "emulate")]
    #[test]
    fn xlogy_boundary() {
        let a = Pack::<f64, Avx>::load(&[2.0, 0.0, -1.0, f64::NEG_INFINITY]);
        let b = Pack::<f64, Avx>::load(&[3.0, -5.0, 0.0, f64::NAN]);
        let r = xlogy(a, b);
        assert!((r[0] - 2.0 * 3.0f64.ln()).abs() < 1e-15);
        assert_eq!(r[1], 0.0);
        assert_eq!(r[2], 0.0);
        assert_eq!(r[3], 0.0);
        assert_eq!(a.xlogy(b), r);
    }

    #[cfg(feature = "emulate")]
    #[test]
    fn method_and_free_function_agree() {
        let x = Pack::<f32, Sse>::load(&[0.1, 0.5, 1.0, 2.0]);
        assert_eq!(x.sin(), sin(x));
        assert_eq!(x.pow(x), pow(x, x));
        assert_eq!(x.hypot(x), hypot(x, x));
        assert_eq!(x.sqrt(), sqrt(x));
    }
}
