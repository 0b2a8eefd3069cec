//! Harness error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Kernel error: {0}")]
    Kernel(#[from] rtlgold_kernels::KernelError),

    #[error("Fixed-point error: {0}")]
    FixedPoint(#[from] rtlgold_fixed_point::FixedPointError),

    #[error("Length mismatch: hardware trace has {hardware} values, golden has {golden}")]
    LengthMismatch { hardware: usize, golden: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed integer on line {line} of {path}")]
    Parse { path: PathBuf, line: usize },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
