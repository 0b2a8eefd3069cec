//! Compare an RTL output trace against a golden trace
//!
//! Run with: cargo run -p rtlgold-harness --bin compare_trace -- rtl_output.txt golden.txt

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use rtlgold_harness::{compare, read_trace, Comparison};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rtlgold=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        eprintln!("Usage: compare_trace <hardware_trace> <golden_trace>");
        return ExitCode::FAILURE;
    }

    let hardware = match read_trace(&args[0]) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error reading hardware trace: {e}");
            return ExitCode::FAILURE;
        }
    };
    let golden = match read_trace(&args[1]) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error reading golden trace: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        hardware = %args[0],
        golden = %args[1],
        len = hardware.len(),
        "comparing traces"
    );

    match compare(&hardware, &golden) {
        Ok(Comparison::Pass) => {
            println!("PASS: hardware trace matches golden ({} values)", golden.len());
            ExitCode::SUCCESS
        }
        Ok(Comparison::Fail {
            index,
            hardware: h,
            golden: g,
        }) => {
            println!("FAIL: first mismatch at index {index} (hardware {h}, golden {g})");
            println!("HW  : {hardware:?}");
            println!("GOLD: {golden:?}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Comparison aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
