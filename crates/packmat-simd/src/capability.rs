//! Hardware kinds and the (scalar, kind) pack table.
//!
//! Everything here is resolved at build time. [`HardwareKind::detect`] is the
//! one runtime probe, and it exists for reporting: it tells a caller whether
//! the CPU it runs on can execute what was compiled in, it never picks an
//! implementation.

use std::fmt::{self, Debug};
use std::mem::size_of;

use crate::scalar::SimdScalar;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Sse {}
    impl Sealed for super::Avx {}
}

/// Vector register generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HardwareKind {
    /// No vector unit compiled in; packs are plain arrays.
    Portable,
    /// SSE2-class 128-bit registers (4 f32, 2 f64 per pack)
    Sse,
    /// AVX 256-bit registers (8 f32, 4 f64 per pack)
    Avx,
}

impl HardwareKind {
    /// The widest kind enabled by the build's `target_feature` set.
    #[inline]
    pub const fn compiled() -> Self {
        if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "avx"
        )) {
            HardwareKind::Avx
        } else if cfg!(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            target_feature = "sse2"
        )) {
            HardwareKind::Sse
        } else {
            HardwareKind::Portable
        }
    }

    /// Detect the widest kind the running CPU supports.
    #[inline]
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if is_x86_feature_detected!("avx") {
                return HardwareKind::Avx;
            }
            if is_x86_feature_detected!("sse2") {
                return HardwareKind::Sse;
            }
        }
        HardwareKind::Portable
    }

    /// Whether the running CPU can execute code built for [`compiled`](Self::compiled).
    pub fn build_is_supported() -> bool {
        Self::detect() >= Self::compiled()
    }

    /// Register width in bytes; zero for the portable kind.
    pub const fn register_bytes(&self) -> usize {
        match self {
            HardwareKind::Portable => 0,
            HardwareKind::Sse => 16,
            HardwareKind::Avx => 32,
        }
    }

    /// Check if this kind uses vector registers.
    #[inline]
    pub fn is_simd(&self) -> bool {
        !matches!(self, HardwareKind::Portable)
    }

    /// Get a human-readable description of the kind.
    pub fn description(&self) -> &'static str {
        match self {
            HardwareKind::Portable => "Portable (no vector unit)",
            HardwareKind::Sse => "SSE (128-bit)",
            HardwareKind::Avx => "AVX (256-bit)",
        }
    }
}

impl Default for HardwareKind {
    fn default() -> Self {
        Self::compiled()
    }
}

impl fmt::Display for HardwareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Marker for a pack storage width.
///
/// The flags describe what the build can execute natively for this kind.
/// They must agree with the `#[cfg]` gates in `math::bind`.
pub trait SimdKind:
    sealed::Sealed + Copy + Debug + Default + PartialEq + Eq + Send + Sync + 'static
{
    const KIND: HardwareKind;

    /// Total bytes in one pack; also the alignment `load_aligned` expects.
    const PACK_BYTES: usize;

    /// A square-root instruction covers this kind, in one or two steps.
    const NATIVE_SQRT: bool;

    /// Floor/ceil instructions cover this kind, in one or two steps.
    const NATIVE_ROUND: bool;

    /// Vendor vector routines for this register width can be called.
    const VENDOR_READY: bool;
}

/// 128-bit packs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sse;

/// 256-bit packs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Avx;

impl SimdKind for Sse {
    const KIND: HardwareKind = HardwareKind::Sse;
    const PACK_BYTES: usize = 16;
    const NATIVE_SQRT: bool = cfg!(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse2"
    ));
    const NATIVE_ROUND: bool = cfg!(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse4.1"
    ));
    const VENDOR_READY: bool = cfg!(target_arch = "x86_64");
}

impl SimdKind for Avx {
    const KIND: HardwareKind = HardwareKind::Avx;
    const PACK_BYTES: usize = 32;
    // Without AVX the 128-bit instruction runs on each half.
    const NATIVE_SQRT: bool = Sse::NATIVE_SQRT;
    const NATIVE_ROUND: bool = Sse::NATIVE_ROUND;
    const VENDOR_READY: bool = Sse::VENDOR_READY;
}

/// A (scalar, kind) pair that has a pack type.
pub trait KindFor<T: SimdScalar>: SimdKind {
    /// Lane storage, `[T; WIDTH]`.
    type Lanes: Copy + Debug + PartialEq + Send + Sync + AsRef<[T]> + AsMut<[T]> + bytemuck::Pod;

    const WIDTH: usize;

    fn splat_lanes(value: T) -> Self::Lanes;
}

macro_rules! kind_for {
    ($K:ty, $T:ty, $width:literal) => {
        impl KindFor<$T> for $K {
            type Lanes = [$T; $width];

            const WIDTH: usize = $width;

            #[inline]
            fn splat_lanes(value: $T) -> Self::Lanes {
                [value; $width]
            }
        }
    };
}

kind_for!(Sse, f32, 4);
kind_for!(Sse, f64, 2);
kind_for!(Avx, f32, 8);
kind_for!(Avx, f64, 4);

/// The widest kind compiled into this build.
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx"
))]
pub type DefaultKind = Avx;

/// The widest kind compiled into this build.
#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx"
)))]
pub type DefaultKind = Sse;

/// Size facts for a (scalar, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackTraits {
    pub scalar_bytes: usize,
    pub pack_width: usize,
    pub pack_bytes: usize,
    pub pack_nbits: usize,
}

impl PackTraits {
    pub const fn of<T: SimdScalar, K: KindFor<T>>() -> Self {
        Self {
            scalar_bytes: size_of::<T>(),
            pack_width: K::WIDTH,
            pack_bytes: K::PACK_BYTES,
            pack_nbits: K::PACK_BYTES * 8,
        }
    }
}
