//! Kernel error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Lookup table has no entries")]
    IndexOutOfDomain,

    #[error("Input length mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Input vector is empty")]
    EmptyInput,

    #[error("Embedding width {embed_dim} is not divisible into {heads} heads")]
    InvalidHeadSplit { embed_dim: usize, heads: usize },

    #[error("Fixed-point error: {0}")]
    FixedPoint(#[from] rtlgold_fixed_point::FixedPointError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;
