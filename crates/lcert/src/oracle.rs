//! Digamma evaluation
//!
//! The explicit formula needs ψ at a few family-dependent arguments. The
//! engine only sees the [`NumericOracle`] trait:
//!
//! - [`ProcessOracle`] shells out to the two ball-arithmetic helper programs
//!   (`riemann_digamma <x> <y>`, `general_digamma <x> <m>`) with a bounded
//!   timeout and a retry
//! - [`MpfrOracle`] evaluates real digamma in-process through MPFR
//! - [`StaticOracle`] replays fixed enclosures, for tests

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use lcert_interval::{ComplexInterval, Interval, Precision};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::config::OracleConfig;
use crate::error::{LcertError, Result};

/// Source of rigorous digamma enclosures.
pub trait NumericOracle {
    /// ψ((z − 3)/(−2)) at `z = x + iy`.
    fn riemann_digamma(&self, prec: Precision, x: &str, y: &str) -> Result<ComplexInterval>;

    /// ψ((1 − x + m)/2) for real `x`.
    fn shifted_digamma(&self, prec: Precision, x: &str, shift: &str) -> Result<Interval>;
}

/// Parse one output line of a helper program.
///
/// Accepts `"[mid] +/- [rad]"`, `"[mid +/- rad]"` and a bare literal (printed
/// when the radius is exactly zero).
pub fn parse_oracle_line(prec: Precision, line: &str) -> Result<Interval> {
    let strip = |s: &str| s.trim().trim_matches(|c| c == '[' || c == ']').trim().to_string();
    let malformed =
        |e: lcert_interval::IntervalError| LcertError::OracleUnavailable(format!("malformed output {:?}: {}", line, e));

    match line.split_once("+/-") {
        Some((mid, rad)) => {
            let mid = Interval::parse(prec, &strip(mid)).map_err(malformed)?;
            let rad = Interval::parse(prec, &strip(rad)).map_err(malformed)?;
            Ok(Interval::from_midpoint_radius(&mid, &rad))
        }
        None => Interval::parse(prec, &strip(line)).map_err(malformed),
    }
}

/// Runs the external ball-arithmetic helpers.
#[derive(Clone, Debug)]
pub struct ProcessOracle {
    riemann_program: PathBuf,
    general_program: PathBuf,
    timeout: Duration,
    retries: u32,
}

impl ProcessOracle {
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            riemann_program: config.riemann_program.clone(),
            general_program: config.general_program.clone(),
            timeout: config.timeout(),
            retries: config.retries,
        }
    }

    /// Non-empty stdout lines of one successful run, retried on failure.
    fn run(&self, program: &Path, args: &[&str]) -> Result<Vec<String>> {
        let mut last_error = String::new();
        for attempt in 0..=self.retries {
            match self.run_once(program, args) {
                Ok(lines) => return Ok(lines),
                Err(e) => {
                    warn!(
                        "oracle {} {:?} failed (attempt {}/{}): {}",
                        program.display(),
                        args,
                        attempt + 1,
                        self.retries + 1,
                        e
                    );
                    last_error = e;
                }
            }
        }
        Err(LcertError::OracleUnavailable(format!(
            "{}: {}",
            program.display(),
            last_error
        )))
    }

    fn run_once(&self, program: &Path, args: &[&str]) -> std::result::Result<Vec<String>, String> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to spawn: {}", e))?;

        // output is a couple of lines, well under the pipe buffer
        let status = match child
            .wait_timeout(self.timeout)
            .map_err(|e| format!("failed to wait: {}", e))?
        {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("timed out after {:?}", self.timeout));
            }
        };

        let mut stdout = String::new();
        if let Some(mut out) = child.stdout.take() {
            out.read_to_string(&mut stdout)
                .map_err(|e| format!("failed to read stdout: {}", e))?;
        }
        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut err) = child.stderr.take() {
                let _ = err.read_to_string(&mut stderr);
            }
            return Err(format!("exited with {}: {}", status, stderr.trim()));
        }

        debug!("oracle {} {:?} -> {:?}", program.display(), args, stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }
}

impl NumericOracle for ProcessOracle {
    fn riemann_digamma(&self, prec: Precision, x: &str, y: &str) -> Result<ComplexInterval> {
        let lines = self.run(&self.riemann_program, &[x, y])?;
        match lines.as_slice() {
            [re, im, ..] => Ok(ComplexInterval::new(
                parse_oracle_line(prec, re)?,
                parse_oracle_line(prec, im)?,
            )),
            _ => Err(LcertError::OracleUnavailable(format!(
                "{} printed {} lines, expected real and imaginary parts",
                self.riemann_program.display(),
                lines.len()
            ))),
        }
    }

    fn shifted_digamma(&self, prec: Precision, x: &str, shift: &str) -> Result<Interval> {
        let lines = self.run(&self.general_program, &[x, shift])?;
        match lines.first() {
            Some(line) => parse_oracle_line(prec, line),
            None => Err(LcertError::OracleUnavailable(format!(
                "{} printed nothing",
                self.general_program.display()
            ))),
        }
    }
}

/// In-process real digamma via MPFR.
///
/// ψ is increasing on the positive half-line, so evaluating the lower end
/// rounded down and the upper end rounded up encloses the range. The
/// Riemann argument is only real when `y = 0`; anything else needs the
/// external complex oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct MpfrOracle;

impl NumericOracle for MpfrOracle {
    fn riemann_digamma(&self, prec: Precision, x: &str, y: &str) -> Result<ComplexInterval> {
        let y = Interval::parse(prec, y)?;
        if !y.is_exact_zero() {
            return Err(LcertError::OracleUnavailable(
                "complex digamma off the real axis needs the external oracle".into(),
            ));
        }
        // (z - 3)/(-2) = (3 - x)/2 on the real axis
        let x = Interval::parse(prec, x)?;
        let three = Interval::from_i64(prec, 3);
        let two = Interval::from_i64(prec, 2);
        let arg = (&three - &x).try_div(&two)?;
        Ok(ComplexInterval::from_real(arg.digamma()?))
    }

    fn shifted_digamma(&self, prec: Precision, x: &str, shift: &str) -> Result<Interval> {
        let x = Interval::parse(prec, x)?;
        let m = Interval::parse(prec, shift)?;
        let one = Interval::one(prec);
        let two = Interval::from_i64(prec, 2);
        let arg = (&(&one - &x) + &m).try_div(&two)?;
        Ok(arg.digamma()?)
    }
}

/// Fixed answers keyed by argument text.
#[derive(Clone, Debug, Default)]
pub struct StaticOracle {
    riemann: HashMap<(String, String), ComplexInterval>,
    shifted: HashMap<(String, String), Interval>,
}

impl StaticOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_riemann(mut self, x: &str, y: &str, value: ComplexInterval) -> Self {
        self.riemann.insert((x.into(), y.into()), value);
        self
    }

    pub fn with_shifted(mut self, x: &str, shift: &str, value: Interval) -> Self {
        self.shifted.insert((x.into(), shift.into()), value);
        self
    }
}

impl NumericOracle for StaticOracle {
    fn riemann_digamma(&self, _prec: Precision, x: &str, y: &str) -> Result<ComplexInterval> {
        self.riemann
            .get(&(x.to_string(), y.to_string()))
            .cloned()
            .ok_or_else(|| LcertError::OracleUnavailable(format!("no value for ({}, {})", x, y)))
    }

    fn shifted_digamma(&self, _prec: Precision, x: &str, shift: &str) -> Result<Interval> {
        self.shifted
            .get(&(x.to_string(), shift.to_string()))
            .cloned()
            .ok_or_else(|| {
                LcertError::OracleUnavailable(format!("no value for ({}, m={})", x, shift))
            })
    }
}
