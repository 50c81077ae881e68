//! Error types for packmat-simd.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("slice too short for pack: expected {expected} lanes, got {actual}")]
    SliceLength { expected: usize, actual: usize },

    #[error("address {addr:#x} is not aligned to {align} bytes")]
    Misaligned { addr: usize, align: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
