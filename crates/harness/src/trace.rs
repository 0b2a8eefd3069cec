//! Persisted trace format
//!
//! Newline-delimited decimal integers, one value per line, row-major for
//! matrices. Blank lines are ignored on read; the RTL testbench writers
//! occasionally emit a trailing newline.

use std::fs;
use std::path::Path;

use crate::error::{HarnessError, Result};

/// Read a newline-delimited integer trace
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut values = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed.parse::<i64>().map_err(|_| HarnessError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
        })?;
        values.push(value);
    }

    Ok(values)
}

/// Write a trace, one integer per line
pub fn write_trace<P: AsRef<Path>>(path: P, values: &[i64]) -> Result<()> {
    let path = path.as_ref();
    let mut content = String::with_capacity(values.len() * 8);
    for value in values {
        content.push_str(&value.to_string());
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.txt");

        let values = vec![82, -123, 0, 7722, i64::MAX];
        write_trace(&path, &values).unwrap();
        assert_eq!(read_trace(&path).unwrap(), values);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        fs::write(&path, "1\n\n2\n   \n3\n").unwrap();
        assert_eq!(read_trace(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_line_reported_with_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        fs::write(&path, "1\n2\nnot-a-number\n").unwrap();

        assert!(matches!(
            read_trace(&path),
            Err(HarnessError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_trace("/nonexistent/trace.txt"),
            Err(HarnessError::Io { .. })
        ));
    }
}
