//! Write the attention golden trace for the fixed verification input
//!
//! The input matrix must match the RTL testbench stimulus:
//! x[i][j] = (i+1)*(j+2). Output is the final residual matrix, row-major,
//! one integer per line.
//!
//! Run with: cargo run -p rtlgold-harness --bin write_golden -- [path]

use tracing_subscriber::EnvFilter;

use rtlgold_fixed_point::FixedMatrix;
use rtlgold_kernels::{attention, AttentionConfig};
use rtlgold_harness::write_trace;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rtlgold=info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "golden.txt".to_string());

    let config = AttentionConfig::default();
    let x = FixedMatrix::from_fn(config.seq_len, config.embed_dim, 0, |i, j| {
        ((i + 1) * (j + 2)) as i64
    });

    let result = attention(&x, &config)?;
    write_trace(&path, result.output.as_slice())?;

    tracing::info!(
        seq_len = config.seq_len,
        embed_dim = config.embed_dim,
        heads = config.heads,
        "golden trace written"
    );
    println!("Golden trace written to {path}");

    Ok(())
}
