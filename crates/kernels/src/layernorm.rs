//! Fixed-point layer normalization kernel
//!
//! Formats, stated per step: the input is Q8.8; mean is Q8.8; squared
//! differences widen to Q16.16 in i64; the variance stays Q16.16; the
//! reciprocal square root comes from a 16-entry Q16.16 ROM; the final
//! `>> 16` brings the product back to Q8.8.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use rtlgold_fixed_point::{floor_div, FixedVector, Q8_8_FRAC_BITS};

use crate::error::{KernelError, Result};
use crate::lut::LookupTable;

/// Reciprocal square root ROM, Q16.16: 2^16 / sqrt(i) for i in [1, 16].
/// Index 0 is absent; the addressing clamp starts at 1, which also covers
/// the zero-variance case without a divide hazard.
static RSQRT_LUT: Lazy<LookupTable> = Lazy::new(|| {
    LookupTable::build(&[
        (1, 65535),
        (2, 46340),
        (3, 37837),
        (4, 32768),
        (5, 29309),
        (6, 26755),
        (7, 24606),
        (8, 23170),
        (9, 21845),
        (10, 20724),
        (11, 19727),
        (12, 18868),
        (13, 18096),
        (14, 17476),
        (15, 16861),
        (16, 16384),
    ])
    .expect("rsqrt ROM is non-empty")
});

/// LayerNorm kernel parameters, fixed per hardware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerNormConfig {
    /// Input vector length
    pub len: usize,
    /// Fractional bits of the input format
    pub frac_bits: u8,
}

impl Default for LayerNormConfig {
    fn default() -> Self {
        Self {
            len: 8,
            frac_bits: Q8_8_FRAC_BITS,
        }
    }
}

/// Structured layernorm result with the intermediate statistics
#[derive(Debug, Clone)]
pub struct LayerNormOutput {
    /// Mean of the input, same format as the input
    pub mean: i64,
    /// Variance, Q16.16
    pub variance: i64,
    /// Reciprocal square root read from the ROM, Q16.16
    pub inv_std: i32,
    /// Normalized vector, same format as the input
    pub output: FixedVector,
}

/// Fixed-point layer normalization.
///
/// `mean = floor(sum / N)`; `var = floor(sum(diff^2) / N)`; ROM index
/// `var >> 16` saturated to [1, 16]; `y_i = ((x_i - mean) * inv_std) >> 16`.
/// Zero or near-zero variance saturates to index 1 (the largest
/// reciprocal) instead of faulting.
pub fn layernorm(input: &FixedVector, config: &LayerNormConfig) -> Result<LayerNormOutput> {
    input.check_shape(config.len, config.frac_bits)?;
    if input.is_empty() {
        return Err(KernelError::EmptyInput);
    }

    let n = input.len() as i64;
    let mean = floor_div(input.sum_raw(), n);

    let sum_sq: i64 = input
        .data
        .iter()
        .map(|&x| {
            let diff = x as i64 - mean;
            diff * diff
        })
        .sum();
    let variance = floor_div(sum_sq, n);

    let inv_std = RSQRT_LUT.lookup(variance >> 16);

    let output: Vec<i32> = input
        .data
        .iter()
        .map(|&x| (((x as i64 - mean) * inv_std as i64) >> 16) as i32)
        .collect();

    Ok(LayerNormOutput {
        mean,
        variance,
        inv_std,
        output: FixedVector::from_raw(output, config.frac_bits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q8_8(values: &[i32]) -> FixedVector {
        FixedVector::from_raw(values.iter().map(|&v| v << 8).collect(), Q8_8_FRAC_BITS)
    }

    #[test]
    fn test_reference_vector() {
        let input = q8_8(&[10, 20, 30, 40, 50, 60, 70, 80]);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();

        assert_eq!(out.mean, 45 << 8);
        assert_eq!(out.variance, 34_406_400);
        assert_eq!(out.inv_std, 16384); // variance >> 16 = 525 saturates to 16
        assert_eq!(
            out.output.data,
            vec![-2240, -1600, -960, -320, 320, 960, 1600, 2240]
        );
    }

    #[test]
    fn test_output_preserves_order() {
        let input = q8_8(&[10, 20, 30, 40, 50, 60, 70, 80]);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();
        for pair in out.output.data.windows(2) {
            assert!(pair[0] <= pair[1], "layernorm must preserve input order");
        }
    }

    #[test]
    fn test_mid_range_variance_bucket() {
        let input = q8_8(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();

        assert_eq!(out.mean, 1152);
        assert_eq!(out.variance, 344_064); // variance >> 16 = 5
        assert_eq!(out.inv_std, 29309);
        assert_eq!(
            out.output.data,
            vec![-401, -287, -172, -58, 57, 171, 286, 400]
        );
    }

    #[test]
    fn test_zero_variance_saturates_to_index_one() {
        let input = FixedVector::from_raw(vec![0; 8], Q8_8_FRAC_BITS);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();

        assert_eq!(out.variance, 0);
        assert_eq!(out.inv_std, 65535);
        assert_eq!(out.output.data, vec![0; 8]);
    }

    #[test]
    fn test_constant_input_saturates_to_index_one() {
        let input = q8_8(&[7; 8]);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();

        assert_eq!(out.mean, 7 << 8);
        assert_eq!(out.variance, 0);
        assert_eq!(out.inv_std, 65535);
        assert_eq!(out.output.data, vec![0; 8]);
    }

    #[test]
    fn test_negative_mean_uses_floor_division() {
        // Sum is -1 over 8 elements: floor lands at -1, truncation would give 0
        let input = FixedVector::from_raw(vec![-1, 0, 0, 0, 0, 0, 0, 0], Q8_8_FRAC_BITS);
        let out = layernorm(&input, &LayerNormConfig::default()).unwrap();
        assert_eq!(out.mean, -1);
    }

    #[test]
    fn test_length_mismatch() {
        let input = q8_8(&[1, 2, 3]);
        assert!(layernorm(&input, &LayerNormConfig::default()).is_err());
    }
}
