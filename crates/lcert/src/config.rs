//! Verifier configuration
//!
//! Everything has a default, so an empty TOML file (or none at all) is a
//! valid configuration:
//!
//! ```toml
//! precision_digits = 40
//! zero_tolerance = "1e-8"
//! max_radius = 100000
//!
//! [oracle]
//! riemann_program = "./riemann_digamma"
//! timeout_secs = 60
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lcert_interval::{Interval, Precision};
use serde::{Deserialize, Serialize};

use crate::error::{LcertError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// working precision in significant decimal digits
    pub precision_digits: u32,
    /// half-width added around each ordinate of a direct zero file
    pub zero_tolerance: String,
    /// half-width added around each ordinate of a shifted zero file
    pub shifted_zero_tolerance: String,
    /// stop the counterexample search at this radius
    pub max_radius: Option<u64>,
    /// search iterations between progress logs; 0 disables them
    pub progress_interval: u64,
    pub oracle: OracleConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            precision_digits: Precision::DEFAULT_DIGITS,
            zero_tolerance: "1e-8".into(),
            shifted_zero_tolerance: "1e-10".into(),
            max_radius: None,
            progress_interval: 1000,
            oracle: OracleConfig::default(),
        }
    }
}

impl VerifierConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn precision(&self) -> Precision {
        Precision::from_digits(self.precision_digits)
    }

    pub fn zero_tolerance(&self) -> Result<Interval> {
        Ok(Interval::parse(self.precision(), &self.zero_tolerance)?)
    }

    pub fn shifted_zero_tolerance(&self) -> Result<Interval> {
        Ok(Interval::parse(self.precision(), &self.shifted_zero_tolerance)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.precision_digits == 0 {
            return Err(LcertError::Configuration(
                "precision_digits must be positive".into(),
            ));
        }
        for (name, literal) in [
            ("zero_tolerance", &self.zero_tolerance),
            ("shifted_zero_tolerance", &self.shifted_zero_tolerance),
        ] {
            let tol = Interval::parse(self.precision(), literal)?;
            if tol.certainly_negative() {
                return Err(LcertError::Configuration(format!(
                    "{} must be non-negative, got {}",
                    name, literal
                )));
            }
        }
        if self.oracle.timeout_secs == 0 {
            return Err(LcertError::Configuration(
                "oracle.timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// External digamma helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    pub riemann_program: PathBuf,
    pub general_program: PathBuf,
    pub timeout_secs: u64,
    /// extra attempts after a failed run
    pub retries: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            riemann_program: PathBuf::from("./riemann_digamma"),
            general_program: PathBuf::from("./general_digamma"),
            timeout_secs: 60,
            retries: 1,
        }
    }
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
