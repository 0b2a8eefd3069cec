//! RtlGold Golden Kernels
//!
//! Fixed-point reference models for the transformer accelerator blocks:
//! softmax (power-of-two and LUT variants), layer normalization, and
//! multi-head scaled dot-product attention. Each kernel reproduces the
//! hardware's quantization, clamping, and truncation behavior exactly;
//! none of them is a numerically faithful implementation of the underlying
//! real-valued function, and none of them is meant to be.

mod attention;
mod error;
mod layernorm;
mod lut;
mod softmax;

pub use attention::{attention, AttentionConfig, AttentionOutput};
pub use error::{KernelError, Result};
pub use layernorm::{layernorm, LayerNormConfig, LayerNormOutput};
pub use lut::LookupTable;
pub use softmax::{softmax_lut, softmax_pow2, SoftmaxConfig, SoftmaxOutput};
