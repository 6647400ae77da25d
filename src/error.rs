// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for chain construction, eigensolve, and console input.
//!
//! Callers pattern-match on the failure mode (bad mass, unconverged Schur
//! iteration, exhausted prompt retries) instead of parsing strings.

use thiserror::Error;

/// Errors arising from chain construction, spectrum solves, or the driver.
#[derive(Debug, Error)]
pub enum PhononError {
    /// Generation count must be at least 1.
    #[error("generation count must be a positive integer, got {0}")]
    InvalidGenerations(u32),

    /// Generation count above the dense-solve ceiling.
    #[error("generation count {requested} exceeds the supported maximum of {max}")]
    TooManyGenerations {
        /// The rejected count
        requested: u32,
        /// Largest accepted count
        max: u32,
    },

    /// A mass was zero, negative, or not finite.
    #[error("mass at site {site} must be a positive finite number, got {value}")]
    NonPositiveMass {
        /// Chain index of the offending mass
        site: usize,
        /// The rejected value
        value: f64,
    },

    /// Spring constant must be positive and finite.
    #[error("stiffness must be a positive finite number, got {0}")]
    NonPositiveStiffness(f64),

    /// A chain needs at least one site.
    #[error("mass chain is empty")]
    EmptyChain,

    /// Real Schur factorization did not converge.
    #[error("eigenvalue decomposition failed to converge for a {0}x{0} coupling matrix")]
    EigenSolveFailed(usize),

    /// An eigenvalue carried an imaginary part above tolerance.
    #[error("eigenvalue {re:.6e}{im:+.6e}i is not real within tolerance")]
    ComplexEigenvalue {
        /// Real part
        re: f64,
        /// Imaginary part
        im: f64,
    },

    /// An eigenvalue was negative beyond the clamp threshold (imaginary frequency).
    #[error("eigenvalue {0:.6e} is negative: unstable mode with imaginary frequency")]
    UnstableMode(f64),

    /// The console prompt ran out of attempts.
    #[error("no valid input after {0} attempts")]
    RetriesExhausted(usize),

    /// Standard input closed before a valid answer was read.
    #[error("input stream closed before a valid answer was given")]
    InputClosed,

    /// Console or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering failed (wraps the plotters backend message).
    #[error("plot rendering failed: {0}")]
    Plot(String),

    /// JSON report serialization failed.
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PhononError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_generations() {
        let err = PhononError::InvalidGenerations(0);
        assert_eq!(
            err.to_string(),
            "generation count must be a positive integer, got 0"
        );
    }

    #[test]
    fn display_too_many_generations_names_ceiling() {
        let err = PhononError::TooManyGenerations {
            requested: 25,
            max: 18,
        };
        assert_eq!(
            err.to_string(),
            "generation count 25 exceeds the supported maximum of 18"
        );
    }

    #[test]
    fn display_non_positive_mass_names_site() {
        let err = PhononError::NonPositiveMass {
            site: 3,
            value: -1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("site 3"));
        assert!(msg.contains("-1.5"));
    }

    #[test]
    fn display_eigen_solve_failed() {
        let err = PhononError::EigenSolveFailed(21);
        assert!(err.to_string().contains("21x21"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: PhononError = io.into();
        assert!(matches!(err, PhononError::Io(_)));
    }

    #[test]
    fn error_trait_works() {
        let err = PhononError::EmptyChain;
        let dyn_err: &dyn std::error::Error = &err;
        assert_eq!(dyn_err.to_string(), "mass chain is empty");
    }
}
