//! Matrix generators: objects that materialize a column-major value stream
//! into a strided destination.
//!
//! Implementors provide [`MatrixGenerator::generate_to`] for unit row stride
//! and [`MatrixGenerator::value_at`] for everything else;
//! [`MatrixGenerator::generate_into`] picks the path from the layout.

use std::marker::PhantomData;

use bytemuck::Zeroable;
use nalgebra::Dim;

use crate::error::Result;
use crate::layout::{Addressing, GridLayout};
use crate::mem_op::{copy_mem, fill_mem, unpack_vec, zero_mem};

pub trait MatrixGenerator<T: Copy> {
    /// Write a `rows x cols` block with unit row stride and column starts
    /// `ldim` apart. Zero extents write nothing.
    fn generate_to(&self, rows: usize, cols: usize, ldim: usize, dst: &mut [T]);

    /// The `k`-th value in column-major order.
    fn value_at(&self, k: usize) -> T;

    /// Write every element addressed by `layout`.
    fn generate_into<R: Dim, C: Dim>(&self, layout: &GridLayout<R, C>, dst: &mut [T])
    where
        Self: Sized,
    {
        let (rows, cols) = (layout.nrows(), layout.ncols());
        match layout.addressing() {
            Addressing::Empty => {}
            Addressing::Contiguous => self.generate_to(rows, cols, rows, dst),
            Addressing::SingleRow => self.generate_to(1, cols, layout.col_stride(), dst),
            Addressing::ColumnPacked => self.generate_to(rows, cols, layout.col_stride(), dst),
            Addressing::Strided => {
                for (k, offset) in layout.offsets().enumerate() {
                    dst[offset] = self.value_at(k);
                }
            }
        }
    }

    /// [`generate_into`](Self::generate_into) after checking the layout
    /// against the buffer.
    fn try_generate_into<R: Dim, C: Dim>(
        &self,
        layout: &GridLayout<R, C>,
        dst: &mut [T],
    ) -> Result<()>
    where
        Self: Sized,
    {
        layout.validate(dst.len())?;
        self.generate_into(layout, dst);
        Ok(())
    }
}

#[inline]
fn check_target(rows: usize, cols: usize, ldim: usize, len: usize) {
    debug_assert!(cols <= 1 || ldim >= rows, "leading dimension {} < rows {}", ldim, rows);
    debug_assert!(
        len >= (cols - 1) * ldim + rows,
        "destination holds {} elements, block needs {}",
        len,
        (cols - 1) * ldim + rows
    );
}

/// Writes zeros.
#[derive(Debug, Clone, Copy)]
pub struct ZeroGen<T> {
    _marker: PhantomData<T>,
}

impl<T> ZeroGen<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for ZeroGen<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Zeroable + Copy> MatrixGenerator<T> for ZeroGen<T> {
    fn generate_to(&self, rows: usize, cols: usize, ldim: usize, dst: &mut [T]) {
        if rows == 0 || cols == 0 {
            return;
        }
        check_target(rows, cols, ldim, dst.len());

        if cols == 1 || ldim == rows {
            zero_mem(rows * cols, dst);
        } else {
            for j in 0..cols {
                zero_mem(rows, &mut dst[j * ldim..]);
            }
        }
    }

    #[inline]
    fn value_at(&self, _k: usize) -> T {
        T::zeroed()
    }
}

/// Writes one value everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillGen<T> {
    value: T,
}

impl<T: Copy> FillGen<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Copy> MatrixGenerator<T> for FillGen<T> {
    fn generate_to(&self, rows: usize, cols: usize, ldim: usize, dst: &mut [T]) {
        if rows == 0 || cols == 0 {
            return;
        }
        check_target(rows, cols, ldim, dst.len());

        if cols == 1 || ldim == rows {
            fill_mem(rows * cols, self.value, dst);
        } else {
            for j in 0..cols {
                fill_mem(rows, self.value, &mut dst[j * ldim..]);
            }
        }
    }

    #[inline]
    fn value_at(&self, _k: usize) -> T {
        self.value
    }
}

/// Copies a dense column-major source.
#[derive(Debug, Clone, Copy)]
pub struct CopyGen<'a, T> {
    src: &'a [T],
}

impl<'a, T: Copy> CopyGen<'a, T> {
    /// `src` holds at least `rows * cols` values of every block generated.
    pub fn new(src: &'a [T]) -> Self {
        Self { src }
    }

    pub fn source(&self) -> &'a [T] {
        self.src
    }
}

impl<T: Copy> MatrixGenerator<T> for CopyGen<'_, T> {
    fn generate_to(&self, rows: usize, cols: usize, ldim: usize, dst: &mut [T]) {
        if rows == 0 || cols == 0 {
            return;
        }
        check_target(rows, cols, ldim, dst.len());
        debug_assert!(self.src.len() >= rows * cols);

        if cols == 1 || ldim == rows {
            copy_mem(rows * cols, self.src, dst);
        } else if rows == 1 {
            unpack_vec(cols, self.src, dst, ldim);
        } else {
            for j in 0..cols {
                copy_mem(rows, &self.src[j * rows..], &mut dst[j * ldim..]);
            }
        }
    }

    #[inline]
    fn value_at(&self, k: usize) -> T {
        self.src[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_single_column() {
        let mut dst = [0.0f64; 3];
        FillGen::new(7.0).generate_to(3, 1, 3, &mut dst);
        assert_eq!(dst, [7.0, 7.0, 7.0]);
    }

    #[test]
    fn copy_single_row_scatters() {
        let src = [1.0f64, 2.0, 3.0, 4.0];
        let mut dst = [-1.0f64; 31];
        CopyGen::new(&src).generate_to(1, 4, 10, &mut dst);
        for (k, v) in dst.iter().enumerate() {
            match k {
                0 => assert_eq!(*v, 1.0),
                10 => assert_eq!(*v, 2.0),
                20 => assert_eq!(*v, 3.0),
                30 => assert_eq!(*v, 4.0),
                _ => assert_eq!(*v, -1.0),
            }
        }
    }

    #[test]
    fn copy_columns_with_padding() {
        let src = [1, 2, 3, 4, 5, 6];
        let mut dst = [0; 8];
        CopyGen::new(&src).generate_to(2, 3, 3, &mut dst);
        assert_eq!(dst, [1, 2, 0, 3, 4, 0, 5, 6]);
    }

    #[test]
    fn zero_columns_with_padding() {
        let mut dst = [5.0f32; 9];
        ZeroGen::<f32>::new().generate_to(2, 3, 3, &mut dst[..]);
        assert_eq!(dst, [0.0, 0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn zero_extents_write_nothing() {
        let mut dst = [1.0f64; 4];
        FillGen::new(2.0).generate_to(0, 4, 1, &mut dst);
        ZeroGen::<f64>::new().generate_to(4, 0, 4, &mut dst);
        CopyGen::new(&[]).generate_to(0, 0, 0, &mut dst);
        assert_eq!(dst, [1.0; 4]);
    }

    #[test]
    fn strided_layout_uses_value_at() {
        let src = [1, 2, 3, 4];
        let layout = GridLayout::dynamic(2, 2, 2, 5);
        let mut dst = [0; 8];
        CopyGen::new(&src).generate_into(&layout, &mut dst);
        assert_eq!(dst, [1, 0, 2, 0, 0, 3, 0, 4]);
    }

    #[test]
    fn try_generate_into_rejects_short_buffer() {
        let layout = GridLayout::with_leading_dim(3, 2, 4);
        let mut dst = [0.0f64; 6];
        assert!(FillGen::new(1.0).try_generate_into(&layout, &mut dst).is_err());
        assert_eq!(dst, [0.0; 6]);

        let mut dst = [0.0f64; 7];
        assert!(FillGen::new(1.0).try_generate_into(&layout, &mut dst).is_ok());
        assert_eq!(dst, [1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn try_generate_into_rejects_aliased_single_row() {
        let layout = GridLayout::with_leading_dim(1, 3, 0);
        let mut dst = [0.0f64; 4];
        assert!(matches!(
            FillGen::new(1.0).try_generate_into(&layout, &mut dst),
            Err(crate::Error::OverlappingColumns { rows: 1, col_stride: 0 })
        ));
        assert_eq!(dst, [0.0; 4]);
    }

    #[test]
    fn zero_gen_default_needs_no_default_scalar() {
        struct Opaque;

        let _generator: ZeroGen<Opaque> = ZeroGen::default();
        assert_eq!(ZeroGen::<f32>::default().value_at(3), 0.0);
    }
}
