//! Bulk memory primitives used by the generators.
//!
//! Callers guarantee the slices are long enough; lengths are checked with
//! `debug_assert!` and slice indexing panics on violation in release.

use bytemuck::Zeroable;

/// Set `dst[..n]` to all-zero bits.
#[inline]
pub fn zero_mem<T: Zeroable>(n: usize, dst: &mut [T]) {
    debug_assert!(dst.len() >= n);
    bytemuck::fill_zeroes(&mut dst[..n]);
}

/// Set `dst[..n]` to `value`.
#[inline]
pub fn fill_mem<T: Copy>(n: usize, value: T, dst: &mut [T]) {
    debug_assert!(dst.len() >= n);
    dst[..n].fill(value);
}

/// Copy `src[..n]` into `dst[..n]`.
#[inline]
pub fn copy_mem<T: Copy>(n: usize, src: &[T], dst: &mut [T]) {
    debug_assert!(src.len() >= n && dst.len() >= n);
    dst[..n].copy_from_slice(&src[..n]);
}

/// Scatter `src[..n]` into `dst` at offsets `0, step, 2 * step, ...`.
#[inline]
pub fn unpack_vec<T: Copy>(n: usize, src: &[T], dst: &mut [T], step: usize) {
    if n == 0 {
        return;
    }
    debug_assert!(src.len() >= n);
    debug_assert!(dst.len() > (n - 1) * step);
    if step == 1 {
        return copy_mem(n, src, dst);
    }
    for (k, &v) in src[..n].iter().enumerate() {
        dst[k * step] = v;
    }
}
