// SPDX-License-Identifier: AGPL-3.0-only

//! Phonon spectrum of a one-dimensional harmonic chain.
//!
//! - `dynamical` — mass-weighted coupling matrix and its symmetrized form
//! - `solver` — dense eigendecomposition, sorting, frequency extraction
//! - `analytical` — closed-form uniform-chain frequencies
//! - `tridiag` — Sturm bisection on symmetric tridiagonal matrices
//! - `stats` — mass occurrence ratio and band detection
//!
//! # Provenance
//!
//! - Ashcroft & Mermin (1976), *Solid State Physics*, ch. 22 (harmonic chain)
//! - Kohmoto & Banavar (1986), Phys. Rev. B 34, 563 (Fibonacci phonons)
//! - Kohmoto, Sutherland & Iguchi (1987), Phys. Rev. Lett. 58, 2436

pub mod analytical;
pub mod dynamical;
pub mod solver;
pub mod stats;
pub mod tridiag;

pub use analytical::{
    boundary_mismatch_bound, closed_form, fixed_end_dispersion, REFERENCE_STIFFNESS,
};
pub use dynamical::{coupling_matrix, symmetrized_tridiagonal};
pub use solver::{solve, Diagnostics, PhononSpectrum, SpectrumResult};
pub use stats::{detect_bands, occurrence_ratio, Band, OccurrenceRatio, GOLDEN_RATIO};
pub use tridiag::{find_all_eigenvalues, sturm_count};
