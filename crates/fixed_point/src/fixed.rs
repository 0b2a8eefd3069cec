//! Fixed-point scalar type

use crate::error::{FixedPointError, Result};

/// Fractional bits of the Q8.8 format used by the kernel inputs
pub const Q8_8_FRAC_BITS: u8 = 8;

/// Maximum fractional width (to prevent overflow in intermediate computations)
pub const MAX_FRAC_BITS: u8 = 30;

/// A Qm.n fixed-point number: an i32 carrying an implicit scale of 2^frac_bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fixed {
    /// The raw integer value
    pub raw: i32,
    /// Fractional bit count (value represents raw / 2^frac_bits)
    pub frac_bits: u8,
}

impl Fixed {
    /// Create a fixed-point value from raw integer and fractional width
    pub fn from_raw(raw: i32, frac_bits: u8) -> Result<Self> {
        if frac_bits > MAX_FRAC_BITS {
            return Err(FixedPointError::InvalidFracBits(frac_bits));
        }
        Ok(Self { raw, frac_bits })
    }

    /// Quantize a real number into Qm.n, truncating toward zero.
    ///
    /// Truncation (not round-to-nearest) matches the hardware testbench
    /// quantizer; the result feeds the verified integer path, the f64 does not.
    pub fn quantize(value: f64, frac_bits: u8) -> Result<Self> {
        if frac_bits > MAX_FRAC_BITS {
            return Err(FixedPointError::InvalidFracBits(frac_bits));
        }

        let scaled = value * (1i64 << frac_bits) as f64;
        if scaled >= (i32::MAX as f64) + 1.0 || scaled <= (i32::MIN as f64) - 1.0 {
            return Err(FixedPointError::Overflow { value });
        }

        Ok(Self {
            raw: scaled.trunc() as i32,
            frac_bits,
        })
    }

    /// Convert back to floating point. Display only; never part of the
    /// verified path.
    pub fn to_f64(self) -> f64 {
        self.raw as f64 / (1i64 << self.frac_bits) as f64
    }

    /// Add two values of the same format
    pub fn add(self, other: Self) -> Result<Self> {
        if self.frac_bits != other.frac_bits {
            return Err(FixedPointError::FormatMismatch {
                expected: self.frac_bits,
                got: other.frac_bits,
            });
        }
        Ok(Self {
            raw: self.raw.wrapping_add(other.raw),
            frac_bits: self.frac_bits,
        })
    }

    /// Subtract two values of the same format
    pub fn sub(self, other: Self) -> Result<Self> {
        if self.frac_bits != other.frac_bits {
            return Err(FixedPointError::FormatMismatch {
                expected: self.frac_bits,
                got: other.frac_bits,
            });
        }
        Ok(Self {
            raw: self.raw.wrapping_sub(other.raw),
            frac_bits: self.frac_bits,
        })
    }

    /// Widening multiply: Qm.n * Qm.n produces a Q2m.2n intermediate in i64.
    ///
    /// The caller decides the re-scaling shift; no rounding is applied here.
    pub fn wide_mul(self, other: Self) -> Result<i64> {
        if self.frac_bits != other.frac_bits {
            return Err(FixedPointError::FormatMismatch {
                expected: self.frac_bits,
                got: other.frac_bits,
            });
        }
        Ok(self.raw as i64 * other.raw as i64)
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

/// Floor integer division.
///
/// Rust's `/` truncates toward zero; the mean/variance path requires floor
/// semantics for negative sums, so the adjustment is explicit.
pub fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}
