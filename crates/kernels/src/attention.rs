//! Multi-head scaled dot-product attention kernel
//!
//! Models the accelerator's attention block with identity Q/K/V
//! projections: the projections live outside this block, so Q, K and V are
//! all the input embedding matrix. Scores are scaled by a fixed right
//! shift instead of 1/sqrt(head_dim), and there is no softmax over the
//! scores; both simplifications are the hardware contract and must not be
//! replaced with the conventional formulas. The feed-forward stage passes
//! the attention output through unchanged, and the residual path adds the
//! input, the attention output and the feed-forward output.
//!
//! All accumulation is i64; only the documented `>> scale_shift` applies
//! truncation inside the block.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use rtlgold_fixed_point::FixedMatrix;

use crate::error::{KernelError, Result};

/// Attention block parameters, analogous to hardware synthesis parameters.
/// Golden and hardware runs must agree on these for a comparison to be
/// meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionConfig {
    /// Number of token positions
    pub seq_len: usize,
    /// Embedding width
    pub embed_dim: usize,
    /// Number of attention heads
    pub heads: usize,
    /// Fixed score scaling shift, standing in for 1/sqrt(head_dim)
    pub scale_shift: u32,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            seq_len: 4,
            embed_dim: 8,
            heads: 2,
            scale_shift: 6,
        }
    }
}

impl AttentionConfig {
    /// Load parameters from a JSON file shared with the hardware run
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| KernelError::Config(format!("{}: {e}", path.as_ref().display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| KernelError::Config(format!("{}: {e}", path.as_ref().display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Features per head
    pub fn head_dim(&self) -> usize {
        self.embed_dim / self.heads
    }

    /// Check the head split is well formed
    pub fn validate(&self) -> Result<()> {
        if self.heads == 0 || self.embed_dim % self.heads != 0 {
            return Err(KernelError::InvalidHeadSplit {
                embed_dim: self.embed_dim,
                heads: self.heads,
            });
        }
        Ok(())
    }
}

/// Structured attention result
#[derive(Debug, Clone)]
pub struct AttentionOutput {
    /// Raw attention block output, before residual
    pub attn: FixedMatrix,
    /// Final residual output: x + attn + ffn (ffn is a pass-through of attn)
    pub output: FixedMatrix,
}

/// Single-block multi-head attention with identity projections.
///
/// For each head h, query position i and head feature d:
/// `acc = sum_j ((sum_k Q[i,h,k] * K[j,h,k]) >> scale_shift) * V[j,h,d]`.
/// Heads are independent and computed in parallel; the per-head
/// accumulation order is fixed, so the result is bit-exact regardless of
/// scheduling.
pub fn attention(x: &FixedMatrix, config: &AttentionConfig) -> Result<AttentionOutput> {
    config.validate()?;
    if x.rows != config.seq_len || x.cols != config.embed_dim {
        return Err(KernelError::DimensionMismatch {
            expected: config.seq_len * config.embed_dim,
            got: x.rows * x.cols,
        });
    }

    let head_dim = config.head_dim();
    let seq_len = config.seq_len;

    // One [seq_len * head_dim] block per head, row-major within the head
    let head_blocks: Vec<Vec<i64>> = (0..config.heads)
        .into_par_iter()
        .map(|head| {
            let base = head * head_dim;
            let mut block = vec![0i64; seq_len * head_dim];

            for i in 0..seq_len {
                for d in 0..head_dim {
                    let mut acc = 0i64;
                    for j in 0..seq_len {
                        let mut dot = 0i64;
                        for k in 0..head_dim {
                            dot += x.get(i, base + k) * x.get(j, base + k);
                        }
                        acc += (dot >> config.scale_shift) * x.get(j, base + d);
                    }
                    block[i * head_dim + d] = acc;
                }
            }

            block
        })
        .collect();

    let mut attn = FixedMatrix::zeros(seq_len, config.embed_dim, x.frac_bits);
    for (head, block) in head_blocks.iter().enumerate() {
        for i in 0..seq_len {
            for d in 0..head_dim {
                attn.set(i, head * head_dim + d, block[i * head_dim + d]);
            }
        }
    }

    let ffn = attn.clone();
    let output = x.add(&attn)?.add(&ffn)?;

    Ok(AttentionOutput { attn, output })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The fixed verification input: x[i][j] = (i+1)*(j+2)
    fn reference_input(config: &AttentionConfig) -> FixedMatrix {
        FixedMatrix::from_fn(config.seq_len, config.embed_dim, 0, |i, j| {
            ((i + 1) * (j + 2)) as i64
        })
    }

    #[test]
    fn test_reference_residual_matrix() {
        let config = AttentionConfig::default();
        let x = reference_input(&config);
        let out = attention(&x, &config).unwrap();

        #[rustfmt::skip]
        let golden: Vec<i64> = vec![
             82, 123, 164, 205, 1242, 1449, 1656, 1863,
            188, 282, 376, 470, 2532, 2954, 3376, 3798,
            298, 447, 596, 745, 3858, 4501, 5144, 5787,
            396, 594, 792, 990, 5148, 6006, 6864, 7722,
        ];
        assert_eq!(out.output.as_slice(), golden.as_slice());
    }

    #[test]
    fn test_attention_block_output() {
        let config = AttentionConfig::default();
        let x = reference_input(&config);
        let out = attention(&x, &config).unwrap();

        #[rustfmt::skip]
        let attn: Vec<i64> = vec![
             40,  60,  80, 100,  618,  721,  824,  927,
             92, 138, 184, 230, 1260, 1470, 1680, 1890,
            146, 219, 292, 365, 1920, 2240, 2560, 2880,
            194, 291, 388, 485, 2562, 2989, 3416, 3843,
        ];
        assert_eq!(out.attn.as_slice(), attn.as_slice());
    }

    #[test]
    fn test_residual_is_input_plus_twice_attention() {
        // ffn passes the attention output through, so y - x == 2 * attn
        let config = AttentionConfig::default();
        let x = reference_input(&config);
        let out = attention(&x, &config).unwrap();

        for i in 0..config.seq_len {
            for j in 0..config.embed_dim {
                assert_eq!(
                    out.output.get(i, j),
                    x.get(i, j) + 2 * out.attn.get(i, j)
                );
            }
        }
    }

    #[test]
    fn test_zero_input_is_fixed_point() {
        let config = AttentionConfig::default();
        let x = FixedMatrix::zeros(config.seq_len, config.embed_dim, 0);
        let out = attention(&x, &config).unwrap();
        assert!(out.output.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_single_head_matches_manual_accumulation() {
        let config = AttentionConfig {
            seq_len: 2,
            embed_dim: 2,
            heads: 1,
            scale_shift: 6,
        };
        let x = FixedMatrix::from_raw(vec![3, 5, 7, 11], 2, 2, 0).unwrap();
        let out = attention(&x, &config).unwrap();

        // Row 0: dots are [34, 76]; shifted: [0, 1]; acc_d = 0*x[0,d] + 1*x[1,d]
        assert_eq!(out.attn.row(0), &[7, 11]);
        // Row 1: dots are [76, 170]; shifted: [1, 2]
        assert_eq!(out.attn.row(1), &[3 + 14, 5 + 22]);
    }

    #[test]
    fn test_invalid_head_split() {
        let config = AttentionConfig {
            seq_len: 4,
            embed_dim: 8,
            heads: 3,
            scale_shift: 6,
        };
        let x = FixedMatrix::zeros(4, 8, 0);
        assert!(matches!(
            attention(&x, &config),
            Err(KernelError::InvalidHeadSplit { embed_dim: 8, heads: 3 })
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let config = AttentionConfig::default();
        let x = FixedMatrix::zeros(3, 8, 0);
        assert!(matches!(
            attention(&x, &config),
            Err(KernelError::DimensionMismatch { .. })
        ));
    }
}
