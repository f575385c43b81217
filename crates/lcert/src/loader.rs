//! Readers for zero-ordinate and coefficient files

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lcert_interval::{Interval, Precision};
use tracing::info;

use crate::error::{LcertError, Result};
use crate::primes::{Encoding, PrimeTable};

fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> LcertError {
    LcertError::Parse {
        path: path.display().to_string(),
        line,
        reason: reason.into(),
    }
}

/// Whitespace-separated table with the ordinate in `column` (0-based).
///
/// Each ordinate is widened by `tolerance` on both sides. A literal zero is
/// the central-point term of self-dual families and stays exact.
pub fn read_zeros(
    path: &Path,
    column: usize,
    tolerance: &Interval,
    prec: Precision,
) -> Result<Vec<Interval>> {
    let reader = BufReader::new(File::open(path)?);
    let mut zeros = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let word = words.get(column).ok_or_else(|| {
            parse_error(path, i + 1, format!("no column {} in {:?}", column, line))
        })?;
        let zero = Interval::parse(prec, word).map_err(|e| parse_error(path, i + 1, e.to_string()))?;
        if zero.is_exact_zero() {
            zeros.push(zero);
        } else {
            zeros.push(zero.widen(tolerance));
        }
    }

    info!("read {} zeros from {}", zeros.len(), path.display());
    Ok(zeros)
}

/// Shifted two-token format: `"<high> <x><low>"` is read as `high ++ low`,
/// widened by `tolerance`, and `offset` (a power of ten) is added. At most
/// `lines` lines are read; lines with fewer than two tokens are skipped.
pub fn read_shifted_zeros(
    path: &Path,
    offset: &Interval,
    lines: usize,
    tolerance: &Interval,
    prec: Precision,
) -> Result<Vec<Interval>> {
    let reader = BufReader::new(File::open(path)?);
    let mut zeros = Vec::new();

    for (i, line) in reader.lines().take(lines).enumerate() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 {
            continue;
        }
        let low = words[1]
            .get(1..)
            .ok_or_else(|| parse_error(path, i + 1, "malformed low-order digits"))?;
        let literal = format!("{}{}", words[0], low);
        let zero =
            Interval::parse(prec, &literal).map_err(|e| parse_error(path, i + 1, e.to_string()))?;
        zeros.push(&zero.widen(tolerance) + offset);
    }

    info!("read {} shifted zeros from {}", zeros.len(), path.display());
    Ok(zeros)
}

/// One coefficient per line, term `n` on line `n`.
pub fn read_prime_table(path: &Path, encoding: Encoding) -> Result<PrimeTable> {
    let reader = BufReader::new(File::open(path)?);
    let literals = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
    let table = PrimeTable::from_literals(encoding, literals);
    info!("read {} coefficients from {}", table.len(), path.display());
    Ok(table)
}
