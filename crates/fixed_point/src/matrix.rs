//! Row-major fixed-point matrix for the attention path
//!
//! Elements are i64 because attention accumulates in wide integers end to
//! end; only the documented shifts apply finite-width truncation.

use crate::error::{FixedPointError, Result};

/// A row-major matrix of fixed-point values with a common format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMatrix {
    /// Row-major element storage
    pub data: Vec<i64>,
    /// Number of rows (token positions)
    pub rows: usize,
    /// Number of columns (embedding features)
    pub cols: usize,
    /// Fractional bit count shared by all elements
    pub frac_bits: u8,
}

impl FixedMatrix {
    /// Create a matrix from row-major data
    pub fn from_raw(data: Vec<i64>, rows: usize, cols: usize, frac_bits: u8) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(FixedPointError::DimensionMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            frac_bits,
        })
    }

    /// Build a matrix element-wise from a function of (row, col)
    pub fn from_fn<F: FnMut(usize, usize) -> i64>(
        rows: usize,
        cols: usize,
        frac_bits: u8,
        mut f: F,
    ) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            rows,
            cols,
            frac_bits,
        }
    }

    /// Zero matrix of the given shape
    pub fn zeros(rows: usize, cols: usize, frac_bits: u8) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
            frac_bits,
        }
    }

    /// Element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    /// Mutable element at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Row-major view of all elements, for trace persistence
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }

    /// Element-wise addition of two matrices of the same shape and format
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.frac_bits != other.frac_bits {
            return Err(FixedPointError::FormatMismatch {
                expected: self.frac_bits,
                got: other.frac_bits,
            });
        }
        if self.rows != other.rows || self.cols != other.cols {
            return Err(FixedPointError::DimensionMismatch {
                expected: self.rows * self.cols,
                got: other.rows * other.cols,
            });
        }

        let data: Vec<i64> = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a + b)
            .collect();

        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
            frac_bits: self.frac_bits,
        })
    }
}
