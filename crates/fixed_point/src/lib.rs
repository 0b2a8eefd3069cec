//! RtlGold Fixed-Point Values
//!
//! Qm.n fixed-point representation for the golden models. Values are plain
//! integers carrying an implicit scale of 2^n; every arithmetic step in the
//! verified path is integer multiply, floor division, or arithmetic shift.

mod error;
mod fixed;
mod matrix;
mod vector;

pub use error::{FixedPointError, Result};
pub use fixed::{floor_div, Fixed, MAX_FRAC_BITS, Q8_8_FRAC_BITS};
pub use matrix::FixedMatrix;
pub use vector::FixedVector;
