//! Strided layouts and matrix generators for packmat.
//!
//! A [`GridLayout`] describes where the elements of a two-dimensional block
//! live in a flat buffer. A [`MatrixGenerator`] writes a column-major value
//! stream into such a block, taking a bulk-copy path whenever the layout
//! allows it.

pub mod error;
pub mod generator;
pub mod layout;
pub mod mem_op;

pub use error::{Error, Result};
pub use generator::{CopyGen, FillGen, MatrixGenerator, ZeroGen};
pub use layout::{Addressing, GridLayout};
pub use mem_op::{copy_mem, fill_mem, unpack_vec, zero_mem};

/// Dimension types for [`GridLayout`] extents.
pub use nalgebra::{Const, Dim, Dyn};
