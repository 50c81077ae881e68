//! Strided two-dimensional layouts over a flat buffer.
//!
//! Element `(i, j)` lives at `row_stride * i + col_stride * j`. Extents are
//! nalgebra dimensions, so a layout can carry compile-time sizes
//! (`Const<N>`) or runtime sizes (`Dyn`).

use nalgebra::storage::RawStorage;
use nalgebra::{Dim, Dyn, Matrix};

use crate::error::{Error, Result};

/// How a layout's elements sit in memory, from fastest to slowest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// No elements.
    Empty,
    /// One gap-free run of `nelems` values in column-major order.
    Contiguous,
    /// A single row with elements `col_stride` apart.
    SingleRow,
    /// Unit row stride; columns `col_stride` apart with a gap between them.
    ColumnPacked,
    /// Neither stride is unit.
    Strided,
}

/// Shape and strides of a `rows x cols` grid inside a flat buffer.
///
/// Strides count elements, not bytes. Nothing here owns or borrows the
/// buffer; [`validate`](Self::validate) checks one against the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout<R: Dim = Dyn, C: Dim = Dyn> {
    rows: R,
    cols: C,
    row_stride: usize,
    col_stride: usize,
}

impl<R: Dim, C: Dim> GridLayout<R, C> {
    /// Layout with the given extents and element strides. Offsets are not
    /// checked for overflow; see [`try_new`](Self::try_new).
    pub fn new(rows: R, cols: C, row_stride: usize, col_stride: usize) -> Self {
        Self {
            rows,
            cols,
            row_stride,
            col_stride,
        }
    }

    /// Like [`new`](Self::new), but rejects layouts whose largest offset does
    /// not fit in `usize`.
    pub fn try_new(rows: R, cols: C, row_stride: usize, col_stride: usize) -> Result<Self> {
        let layout = Self::new(rows, cols, row_stride, col_stride);
        layout.checked_required_len().ok_or(Error::OffsetOverflow)?;
        Ok(layout)
    }

    /// Layout of a nalgebra matrix or view, relative to its first element.
    pub fn of_matrix<T, S: RawStorage<T, R, C>>(m: &Matrix<T, R, C, S>) -> Self {
        let (rows, cols) = m.shape_generic();
        let (row_stride, col_stride) = m.strides();
        Self::new(rows, cols, row_stride, col_stride)
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.value()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols.value()
    }

    #[inline]
    pub fn nelems(&self) -> usize {
        self.nrows() * self.ncols()
    }

    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    #[inline]
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Column stride, under its BLAS name.
    #[inline]
    pub fn leading_dim(&self) -> usize {
        self.col_stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// Buffer offset of element `(i, j)`.
    #[inline]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nrows() && j < self.ncols());
        self.row_stride * i + self.col_stride * j
    }

    /// Buffer offset of the `k`-th element in column-major order.
    #[inline]
    pub fn offset_of(&self, k: usize) -> usize {
        let rows = self.nrows();
        self.offset(k % rows, k / rows)
    }

    /// Offsets of every element in column-major order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        let rows = self.nrows();
        (0..self.ncols()).flat_map(move |j| (0..rows).map(move |i| self.offset(i, j)))
    }

    pub fn addressing(&self) -> Addressing {
        let (rows, cols) = (self.nrows(), self.ncols());
        if rows == 0 || cols == 0 {
            Addressing::Empty
        } else if (rows == 1 || self.row_stride == 1) && (cols == 1 || self.col_stride == rows) {
            Addressing::Contiguous
        } else if rows == 1 {
            Addressing::SingleRow
        } else if self.row_stride == 1 {
            Addressing::ColumnPacked
        } else {
            Addressing::Strided
        }
    }

    /// Whether the elements form one gap-free column-major run.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        matches!(self.addressing(), Addressing::Empty | Addressing::Contiguous)
    }

    fn checked_required_len(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        let last_row = self.row_stride.checked_mul(self.nrows() - 1)?;
        let last_col = self.col_stride.checked_mul(self.ncols() - 1)?;
        last_row.checked_add(last_col)?.checked_add(1)
    }

    /// Smallest buffer length that holds every element; saturates at
    /// `usize::MAX`.
    pub fn required_len(&self) -> usize {
        self.checked_required_len().unwrap_or(usize::MAX)
    }

    /// Check that a buffer of `len` elements can back this layout.
    ///
    /// Layouts taking a column-block path (unit row stride, or a single
    /// row) must also keep their columns apart (`col_stride >= rows`), or
    /// writing one column clobbers the next.
    pub fn validate(&self, len: usize) -> Result<()> {
        let required = self.checked_required_len().ok_or(Error::OffsetOverflow)?;
        let (rows, cols) = (self.nrows(), self.ncols());
        if cols > 1 && (rows == 1 || self.row_stride == 1) && self.col_stride < rows {
            return Err(Error::OverlappingColumns {
                rows,
                col_stride: self.col_stride,
            });
        }
        if len < required {
            return Err(Error::BufferTooSmall {
                required,
                actual: len,
            });
        }
        Ok(())
    }

    /// Copy the addressed elements out in column-major order.
    pub fn gather<T: Copy>(&self, src: &[T]) -> Vec<T> {
        self.offsets().map(|o| src[o]).collect()
    }
}

impl GridLayout<Dyn, Dyn> {
    /// Runtime-sized layout.
    pub fn dynamic(rows: usize, cols: usize, row_stride: usize, col_stride: usize) -> Self {
        Self::new(Dyn(rows), Dyn(cols), row_stride, col_stride)
    }

    /// Dense column-major layout.
    pub fn col_major(rows: usize, cols: usize) -> Self {
        Self::dynamic(rows, cols, 1, rows)
    }

    /// Column-major layout with `ldim` elements between column starts.
    pub fn with_leading_dim(rows: usize, cols: usize, ldim: usize) -> Self {
        Self::dynamic(rows, cols, 1, ldim)
    }
}
