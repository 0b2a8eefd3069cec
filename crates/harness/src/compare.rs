//! Golden-vs-hardware sequence comparison

use crate::error::{HarnessError, Result};

/// Outcome of one comparison call. Has no identity beyond the single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Every element matched exactly
    Pass,
    /// First point of divergence, with both observed values
    Fail {
        index: usize,
        hardware: i64,
        golden: i64,
    },
}

impl Comparison {
    /// True when the hardware trace matched the golden trace
    pub fn is_pass(&self) -> bool {
        matches!(self, Comparison::Pass)
    }
}

/// Compare a hardware-produced sequence against the golden sequence.
///
/// Unequal lengths are an error (reported, never silently truncated).
/// Equality is element-wise and exact; the first mismatch is reported with
/// its index and both values. A mismatch is a result, not an error, so
/// verification runs can keep reporting instead of aborting.
pub fn compare(hardware: &[i64], golden: &[i64]) -> Result<Comparison> {
    if hardware.len() != golden.len() {
        return Err(HarnessError::LengthMismatch {
            hardware: hardware.len(),
            golden: golden.len(),
        });
    }

    for (index, (&h, &g)) in hardware.iter().zip(golden).enumerate() {
        if h != g {
            return Ok(Comparison::Fail {
                index,
                hardware: h,
                golden: g,
            });
        }
    }

    Ok(Comparison::Pass)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        let seqs: [&[i64]; 3] = [&[], &[0], &[82, 123, -164, 205, i64::MIN, i64::MAX]];
        for s in seqs {
            assert_eq!(compare(s, s).unwrap(), Comparison::Pass);
        }
    }

    #[test]
    fn test_first_mismatch_reported() {
        let golden = [10, 20, 30, 40];
        let hardware = [10, 21, 31, 40];
        assert_eq!(
            compare(&hardware, &golden).unwrap(),
            Comparison::Fail {
                index: 1,
                hardware: 21,
                golden: 20,
            }
        );
    }

    #[test]
    fn test_mismatch_at_last_position() {
        let golden = [1, 2, 3];
        let hardware = [1, 2, 4];
        assert_eq!(
            compare(&hardware, &golden).unwrap(),
            Comparison::Fail {
                index: 2,
                hardware: 4,
                golden: 3,
            }
        );
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let result = compare(&[1, 2, 3], &[1, 2]);
        assert!(matches!(
            result,
            Err(HarnessError::LengthMismatch {
                hardware: 3,
                golden: 2,
            })
        ));
    }

    #[test]
    fn test_no_tolerance() {
        // Off by one is a failure; there is no epsilon
        assert!(!compare(&[100], &[101]).unwrap().is_pass());
    }
}
