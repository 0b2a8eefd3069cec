//! Fixed-point softmax kernels
//!
//! Two interchangeable hardware approximations of softmax over a Q8.8
//! score vector. Neither computes a true exponential:
//!
//! - `softmax_pow2` replaces exp(x - max) with 2^(shift+15), where shift is
//!   the integer part of (x - max) clamped to [-15, 0]. Output is Q0.15.
//! - `softmax_lut` reads a 9-entry Q0.16 exponential ROM addressed by the
//!   integer part of (x - max) saturated to [-8, 0], then normalizes with a
//!   floor-divided reciprocal. Output is Q0.16.
//!
//! The clamps model hardware saturation logic and are required behavior.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use rtlgold_fixed_point::{FixedVector, Q8_8_FRAC_BITS};

use crate::error::{KernelError, Result};
use crate::lut::LookupTable;

/// Smallest power-of-two decay step in the pow2 variant
const POW2_SHIFT_MIN: i32 = -15;

/// Fractional bits of the pow2 variant's Q0.15 output
const POW2_OUT_FRAC_BITS: u8 = 15;

/// Fractional bits of the LUT variant's Q0.16 output
const LUT_OUT_FRAC_BITS: u8 = 16;

/// Exponential ROM, Q0.16: exp(i) scaled by 2^16 for integer i in [-8, 0].
/// The entries mirror the accelerator's ROM image and must not be
/// regenerated with different rounding.
static EXP_LUT: Lazy<LookupTable> = Lazy::new(|| {
    LookupTable::build(&[
        (-8, 22),
        (-7, 60),
        (-6, 163),
        (-5, 442),
        (-4, 1202),
        (-3, 3265),
        (-2, 8869),
        (-1, 24109),
        (0, 65535),
    ])
    .expect("exponential ROM is non-empty")
});

/// Softmax kernel parameters, fixed per hardware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxConfig {
    /// Score vector length
    pub len: usize,
    /// Fractional bits of the input format
    pub frac_bits: u8,
}

impl Default for SoftmaxConfig {
    fn default() -> Self {
        Self {
            len: 8,
            frac_bits: Q8_8_FRAC_BITS,
        }
    }
}

/// Structured softmax result: probabilities plus the intermediate
/// exponential surrogates for diagnostics
#[derive(Debug, Clone)]
pub struct SoftmaxOutput {
    /// Approximated exponentials, one per input element
    pub exp: Vec<i64>,
    /// Normalized probability vector (Q0.15 for pow2, Q0.16 for LUT)
    pub probs: FixedVector,
}

/// Power-of-two softmax approximation.
///
/// Per element: `shift = clamp((x - max) >> F, -15, 0)`, surrogate
/// `2^(shift+15)`, then `(exp_i << 15) / exp_sum` with floor division.
/// Every output lies in [0, 2^15]; the output sum is close to 2^15 but not
/// algebraically equal to it because of the floor truncation.
pub fn softmax_pow2(input: &FixedVector, config: &SoftmaxConfig) -> Result<SoftmaxOutput> {
    let max_val = check_scores(input, config)?;

    let exp: Vec<i64> = input
        .data
        .iter()
        .map(|&x| {
            let shift = ((x - max_val) >> config.frac_bits).clamp(POW2_SHIFT_MIN, 0);
            1i64 << (shift + 15)
        })
        .collect();

    // The max element contributes 2^15, so the sum is always positive and
    // every quotient operand is non-negative: `/` here is floor division.
    let exp_sum: i64 = exp.iter().sum();
    let probs: Vec<i32> = exp.iter().map(|&e| ((e << 15) / exp_sum) as i32).collect();

    Ok(SoftmaxOutput {
        exp,
        probs: FixedVector::from_raw(probs, POW2_OUT_FRAC_BITS),
    })
}

/// LUT-based softmax approximation.
///
/// Per element: ROM index `(x - max) >> F` saturated to [-8, 0] by the ROM
/// addressing, Q0.16 exponential from the ROM, then normalization by
/// `recip = 2^16 / sum` (floor) and `(exp_i * recip) >> 16`. A zero sum
/// defines the reciprocal as 0 rather than faulting; the floor-to-zero
/// reciprocal for sums above 2^16 is the modeled hardware behavior.
pub fn softmax_lut(input: &FixedVector, config: &SoftmaxConfig) -> Result<SoftmaxOutput> {
    let max_val = check_scores(input, config)?;

    let exp: Vec<i64> = input
        .data
        .iter()
        .map(|&x| EXP_LUT.lookup(((x - max_val) >> config.frac_bits) as i64) as i64)
        .collect();

    let exp_sum: i64 = exp.iter().sum();
    let recip = if exp_sum == 0 {
        0
    } else {
        (1i64 << 16) / exp_sum
    };
    let probs: Vec<i32> = exp.iter().map(|&e| ((e * recip) >> 16) as i32).collect();

    Ok(SoftmaxOutput {
        exp,
        probs: FixedVector::from_raw(probs, LUT_OUT_FRAC_BITS),
    })
}

/// Shared input validation; returns the max score for stabilization
fn check_scores(input: &FixedVector, config: &SoftmaxConfig) -> Result<i32> {
    input.check_shape(config.len, config.frac_bits)?;
    input.max_raw().ok_or(KernelError::EmptyInput)
}
