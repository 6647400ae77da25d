// SPDX-License-Identifier: AGPL-3.0-only

//! Named pass/fail checks for the validation binary.
//!
//! Every check records the observed value, the reference, and the tolerance
//! mode; the summary prints one line per check and exits 0 only when all
//! pass. `--json` callers get the same summary as a serde document.

use serde::Serialize;

/// How a tolerance threshold is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToleranceMode {
    /// |observed - expected| < tolerance
    Absolute,
    /// observed < threshold
    UpperBound,
    /// observed > threshold
    LowerBound,
    /// boolean property
    Exact,
}

impl std::fmt::Display for ToleranceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute => write!(f, "abs"),
            Self::UpperBound => write!(f, "<"),
            Self::LowerBound => write!(f, ">"),
            Self::Exact => write!(f, "=="),
        }
    }
}

/// A single check and its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// Human-readable label
    pub label: String,
    /// Whether this check passed
    pub passed: bool,
    /// Observed value
    pub observed: f64,
    /// Reference value or threshold
    pub expected: f64,
    /// Tolerance (0 for exact and bound checks)
    pub tolerance: f64,
    /// How the comparison was made
    pub mode: ToleranceMode,
}

/// Accumulates checks for one validation run.
#[derive(Debug, Default, Serialize)]
#[must_use]
pub struct ValidationHarness {
    /// Name of the validation suite
    pub name: String,
    /// All checks performed, in order
    pub checks: Vec<Check>,
}

impl ValidationHarness {
    /// Start an empty suite.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            checks: Vec::new(),
        }
    }

    fn push(
        &mut self,
        label: &str,
        passed: bool,
        observed: f64,
        expected: f64,
        tolerance: f64,
        mode: ToleranceMode,
    ) {
        log::debug!("check {label}: passed={passed}");
        self.checks.push(Check {
            label: label.to_string(),
            passed,
            observed,
            expected,
            tolerance,
            mode,
        });
    }

    /// |observed - expected| < tolerance
    pub fn check_abs(&mut self, label: &str, observed: f64, expected: f64, tolerance: f64) {
        let passed = (observed - expected).abs() < tolerance;
        self.push(
            label,
            passed,
            observed,
            expected,
            tolerance,
            ToleranceMode::Absolute,
        );
    }

    /// observed < threshold
    pub fn check_upper(&mut self, label: &str, observed: f64, threshold: f64) {
        self.push(
            label,
            observed < threshold,
            observed,
            threshold,
            0.0,
            ToleranceMode::UpperBound,
        );
    }

    /// observed > threshold
    pub fn check_lower(&mut self, label: &str, observed: f64, threshold: f64) {
        self.push(
            label,
            observed > threshold,
            observed,
            threshold,
            0.0,
            ToleranceMode::LowerBound,
        );
    }

    /// A boolean property.
    pub fn check_bool(&mut self, label: &str, passed: bool) {
        self.push(
            label,
            passed,
            f64::from(u8::from(passed)),
            1.0,
            0.0,
            ToleranceMode::Exact,
        );
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Whether every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Labels of failed checks.
    #[must_use]
    pub fn failed_labels(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.label.as_str())
            .collect()
    }

    /// Human-readable summary, one line per check.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "═══ {} validation: {}/{} checks passed ═══\n",
            self.name,
            self.passed_count(),
            self.checks.len()
        );
        for check in &self.checks {
            let icon = if check.passed { "✓" } else { "✗" };
            out.push_str(&format!(
                "  {icon} {}: observed={:.6e}, expected={:.6e}, tol={:.2e} ({})\n",
                check.label, check.observed, check.expected, check.tolerance, check.mode
            ));
        }
        if self.all_passed() {
            out.push_str("ALL CHECKS PASSED\n");
        } else {
            out.push_str(&format!(
                "FAILED CHECKS: {}\n",
                self.failed_labels().join(", ")
            ));
        }
        out
    }

    /// Print the summary and exit 0 (all passed) or 1.
    pub fn finish(&self) -> ! {
        println!();
        print!("{}", self.summary());
        std::process::exit(i32::from(!self.all_passed()));
    }
}
