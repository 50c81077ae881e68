//! # packmat
//!
//! A portable SIMD compute layer: fixed-width packed values with
//! elementwise math bound at build time, and generators that materialize
//! values into strided column-major storage.
//!
//! ## Quick Start
//!
//! ```rust
//! use packmat::prelude::*;
//!
//! let src: Vec<f64> = (1..=10).map(|k| k as f64).collect();
//! let layout = GridLayout::with_leading_dim(5, 2, 8);
//! let mut dst = vec![0.0; layout.required_len()];
//!
//! packmat::map_into(&src, |p| p * p, &layout, &mut dst);
//! assert_eq!(dst[8], 36.0);
//! ```
//!
//! ## Features
//!
//! - `emulate` (default) - per-lane scalar fallback for math functions
//! - `svml` - link Intel SVML vector routines
//! - `amdlibm` - link AMD LibM vector routines

pub use packmat_core as core;
pub use packmat_simd as simd;

use packmat_core::Dim;

// ============================================================================
// Convenient re-exports
// ============================================================================

pub use packmat_core::{
    Addressing, Const, CopyGen, Dyn, Error as LayoutError, FillGen, GridLayout, MatrixGenerator,
    ZeroGen,
};

pub use packmat_simd::{
    Avx, BuildConfig, CapabilityReport, DefaultKind, Error as PackError, HardwareKind, KindFor,
    Mask, MathFn, Pack, SimdScalar, Sse, Tier, math,
};

// ============================================================================
// Pack -> layout pipeline
// ============================================================================

/// Apply `f` across `src` one [`DefaultKind`] pack at a time, writing to a
/// dense `dst` of the same length.
///
/// A short tail is zero-padded to a full pack; only its live lanes are
/// stored.
pub fn map_slice<T, F>(src: &[T], f: F, dst: &mut [T])
where
    T: SimdScalar,
    DefaultKind: KindFor<T>,
    F: Fn(Pack<T, DefaultKind>) -> Pack<T, DefaultKind>,
{
    assert_eq!(src.len(), dst.len(), "map_slice length mismatch");
    let width = Pack::<T, DefaultKind>::WIDTH;

    let mut src_chunks = src.chunks_exact(width);
    let mut dst_chunks = dst.chunks_exact_mut(width);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        f(Pack::load(s)).store(d);
    }

    let tail = src_chunks.remainder();
    if !tail.is_empty() {
        let padded = Pack::from_fn(|i| tail.get(i).copied().unwrap_or_else(T::zero));
        let out = f(padded);
        dst_chunks
            .into_remainder()
            .copy_from_slice(&out.lanes()[..tail.len()]);
    }
}

/// Apply `f` to the first `layout.nelems()` values of `src` (column-major)
/// and write the results to the elements `layout` addresses in `dst`.
pub fn map_into<T, F, R, C>(src: &[T], f: F, layout: &GridLayout<R, C>, dst: &mut [T])
where
    T: SimdScalar,
    DefaultKind: KindFor<T>,
    F: Fn(Pack<T, DefaultKind>) -> Pack<T, DefaultKind>,
    R: Dim,
    C: Dim,
{
    let n = layout.nelems();
    if n == 0 {
        return;
    }
    let mut scratch = vec![T::zero(); n];
    map_slice(&src[..n], f, &mut scratch);
    CopyGen::new(&scratch).generate_into(layout, dst);
}

/// [`map_into`] with the source length and destination layout checked first.
pub fn try_map_into<T, F, R, C>(
    src: &[T],
    f: F,
    layout: &GridLayout<R, C>,
    dst: &mut [T],
) -> packmat_core::Result<()>
where
    T: SimdScalar,
    DefaultKind: KindFor<T>,
    F: Fn(Pack<T, DefaultKind>) -> Pack<T, DefaultKind>,
    R: Dim,
    C: Dim,
{
    if src.len() < layout.nelems() {
        return Err(LayoutError::BufferTooSmall {
            required: layout.nelems(),
            actual: src.len(),
        });
    }
    layout.validate(dst.len())?;
    map_into(src, f, layout, dst);
    Ok(())
}

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and traits.
///
/// ```rust
/// use packmat::prelude::*;
/// ```
pub mod prelude {
    // Packs
    pub use crate::{Avx, DefaultKind, Mask, Pack, SimdScalar, Sse, math};

    // Layouts and generators
    pub use crate::{CopyGen, FillGen, GridLayout, MatrixGenerator, ZeroGen};

    // Build introspection
    pub use crate::{BuildConfig, CapabilityReport, Tier};

    // Pipeline
    pub use crate::{map_into, map_slice};
}
