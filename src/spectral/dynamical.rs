// SPDX-License-Identifier: AGPL-3.0-only

//! Mass-weighted coupling (dynamical) matrix of a harmonic atom chain.
//!
//! Nearest-neighbour springs of stiffness K, no wrap-around. The end rows
//! keep the full 2K diagonal, which makes this the fixed-end operator.
//! Row i is normalized by the mass at site i, and each coupling carries
//! the square root of the partner mass:
//!
//! ```text
//! A[i][i]   =  2K √m_i / m_i
//! A[i][i±1] = −K √m_{i±1} / m_i
//! ```
//!
//! `A = M⁻¹ K_mat M^{1/2}` is not symmetric, but it is similar to the
//! symmetric tridiagonal `S = M^{-1/4} K_mat M^{-1/4}`, so the spectrum is
//! real and positive. [`symmetrized_tridiagonal`] exposes `S` for the Sturm
//! bisection cross-check.

use nalgebra::DMatrix;

/// Assemble the dense coupling matrix for `masses` and spring constant `k`.
///
/// Entries beyond the first off-diagonals are zero.
#[must_use]
pub fn coupling_matrix(masses: &[f64], k: f64) -> DMatrix<f64> {
    let m = masses.len();
    let mut a = DMatrix::<f64>::zeros(m, m);

    for i in 0..m {
        a[(i, i)] = 2.0 * k * masses[i].sqrt() / masses[i];
        if i + 1 < m {
            a[(i, i + 1)] = -k * masses[i + 1].sqrt() / masses[i];
        }
        if i > 0 {
            a[(i, i - 1)] = -k * masses[i - 1].sqrt() / masses[i];
        }
    }
    a
}

/// Symmetric tridiagonal form similar to [`coupling_matrix`].
///
/// Returns (diagonal, off_diagonal) with
/// `d_i = 2K / √m_i` and `e_i = −K (m_i m_{i+1})^{-1/4}`.
#[must_use]
pub fn symmetrized_tridiagonal(masses: &[f64], k: f64) -> (Vec<f64>, Vec<f64>) {
    let diagonal = masses.iter().map(|&m| 2.0 * k / m.sqrt()).collect();
    let off_diag = masses
        .windows(2)
        .map(|w| -k / (w[0] * w[1]).powf(0.25))
        .collect();
    (diagonal, off_diag)
}
