//! Error types for packmat-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("buffer too small: layout addresses {required} elements, buffer holds {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    #[error("columns overlap: column stride {col_stride} is less than {rows} rows")]
    OverlappingColumns { rows: usize, col_stride: usize },

    #[error("layout offsets overflow usize")]
    OffsetOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;
