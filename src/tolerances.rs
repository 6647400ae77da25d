// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized numerical tolerances with justification.
//!
//! Every threshold used by the solver, the tests, and the validation binary
//! is defined here. No ad-hoc magic numbers.
//!
//! | Category | Basis | Example |
//! |----------|-------|---------|
//! | Machine precision | IEEE 754 f64 | 1e-9 dense vs exact dispersion |
//! | Algorithm | Schur / bisection convergence | iteration caps |
//! | Model | Boundary-condition mismatch | π/(m+1) analytical bound |

// ═══════════════════════════════════════════════════════════════════
// Eigensolve
// ═══════════════════════════════════════════════════════════════════

/// Real Schur factorization: convergence threshold on sub-diagonal entries.
pub const SCHUR_EPS: f64 = f64::EPSILON;

/// Real Schur factorization: iteration cap (0 would mean unbounded).
///
/// Coupling matrices at 15 generations are ~1600 sites; Francis QR needs
/// a small multiple of n sweeps in practice.
pub const SCHUR_MAX_ITER: usize = 100_000;

/// Imaginary part accepted as rounding noise, relative to spectral radius.
///
/// The coupling matrix is similar to the symmetric `M^{-1/4} K M^{-1/4}`,
/// so its spectrum is real. Nearly degenerate pairs (localized modes far
/// apart on long chains) can split into a conjugate pair of width
/// ~sqrt(ε·‖A‖) on the non-symmetric Schur path, hence 1e-6 not 1e-12.
pub const IMAGINARY_PART_ABS: f64 = 1e-6;

/// Negative eigenvalues down to this value are clamped to zero before the
/// square root. The assembled matrix is positive definite up to similarity,
/// so anything below this is a real instability, not rounding.
pub const NEGATIVE_EIGENVALUE_CLAMP: f64 = 1e-10;

/// Dense eigensolve vs exact uniform-chain dispersion: absolute error.
pub const EIGENVALUE_ABS: f64 = 1e-9;

/// Dense eigensolve vs Sturm bisection on the symmetrized form.
pub const STURM_PARITY_ABS: f64 = 1e-8;

// ═══════════════════════════════════════════════════════════════════
// Sturm bisection
// ═══════════════════════════════════════════════════════════════════

/// LDLT pivot guard: substitute ±1e-300 when q = d − λ is nearly zero.
pub const TRIDIAG_STURM_PIVOT_GUARD: f64 = 1e-300;

/// Bisection iterations per eigenvalue; 200 halvings exhaust f64 range.
pub const STURM_MAX_BISECTIONS: usize = 200;

// ═══════════════════════════════════════════════════════════════════
// Quasicrystal structure
// ═══════════════════════════════════════════════════════════════════

/// Occurrence ratio vs golden ratio at 14 generations.
///
/// The flattened chain holds F(g) A-sites and F(g+1) − 1 B-sites, so the
/// ratio deviates from φ by ~1/F(g). At g = 14 (F = 377) that is 2.7e-3.
pub const GOLDEN_RATIO_CONVERGENCE: f64 = 5e-3;

/// Default gap factor for band detection: a spacing 4× the median spacing
/// separates bands.
pub const BAND_GAP_FACTOR: f64 = 4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)] // constants sanity check
    fn tolerances_are_positive() {
        for tol in [
            SCHUR_EPS,
            IMAGINARY_PART_ABS,
            NEGATIVE_EIGENVALUE_CLAMP,
            EIGENVALUE_ABS,
            STURM_PARITY_ABS,
            TRIDIAG_STURM_PIVOT_GUARD,
            GOLDEN_RATIO_CONVERGENCE,
            BAND_GAP_FACTOR,
        ] {
            assert!(tol > 0.0);
        }
    }

    #[test]
    #[allow(clippy::assertions_on_constants)] // constants sanity check
    fn tolerance_hierarchy() {
        assert!(TRIDIAG_STURM_PIVOT_GUARD < SCHUR_EPS);
        assert!(NEGATIVE_EIGENVALUE_CLAMP < EIGENVALUE_ABS);
        assert!(EIGENVALUE_ABS < STURM_PARITY_ABS);
    }
}
