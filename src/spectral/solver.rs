// SPDX-License-Identifier: AGPL-3.0-only

//! Phonon spectrum of a mass chain via dense eigendecomposition.
//!
//! The coupling matrix is non-symmetric, so the general path is used:
//! Hessenberg reduction and Francis double-shift QR (real Schur form),
//! giving complex eigenvalues in no particular order. Callers sort
//! explicitly through [`SpectrumResult::sorted_real_eigenvalues`] or
//! [`SpectrumResult::frequencies`], which decide how complex or negative
//! values are treated.

use nalgebra::{Complex, Schur};
use serde::Serialize;

use super::dynamical::coupling_matrix;
use super::stats::{occurrence_ratio, OccurrenceRatio};
use crate::chain::MassChain;
use crate::error::{PhononError, Result};
use crate::tolerances::{
    IMAGINARY_PART_ABS, NEGATIVE_EIGENVALUE_CLAMP, SCHUR_EPS, SCHUR_MAX_ITER,
};

/// Whether [`solve`] computes the mass occurrence diagnostics.
///
/// The generation count travels with the request so the report never
/// depends on state outside the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    /// No occurrence counting
    Skip,
    /// Count masses and report the ratio for this generation count
    Emit {
        /// Generation count reported alongside the ratio
        generations: u32,
    },
}

/// Eigenvalues (ω²) and mode indices of one chain.
#[derive(Debug, Clone)]
pub struct SpectrumResult {
    /// Eigenvalues as returned by the Schur factorization, unordered
    pub eigenvalues: Vec<Complex<f64>>,
    /// Mode indices 0..m
    pub modes: Vec<usize>,
    /// Occurrence ratio, when requested and the chain has two species
    pub occurrence: Option<OccurrenceRatio>,
}

/// Sorted spectrum ready for plotting or serialization.
#[derive(Debug, Clone, Serialize)]
pub struct PhononSpectrum {
    /// Mode indices 0..m
    pub modes: Vec<usize>,
    /// Ascending ω²
    pub eigenvalues: Vec<f64>,
    /// Ascending ω = √(ω²)
    pub frequencies: Vec<f64>,
}

impl SpectrumResult {
    /// Largest eigenvalue modulus; scales the imaginary-part tolerance.
    #[must_use]
    pub fn spectral_radius(&self) -> f64 {
        self.eigenvalues
            .iter()
            .map(|z| z.norm())
            .fold(0.0, f64::max)
    }

    /// Real parts in ascending order.
    ///
    /// # Errors
    /// `ComplexEigenvalue` if any imaginary part exceeds
    /// `IMAGINARY_PART_ABS` × max(1, spectral radius).
    pub fn sorted_real_eigenvalues(&self) -> Result<Vec<f64>> {
        let tol = IMAGINARY_PART_ABS * self.spectral_radius().max(1.0);
        let mut real = Vec::with_capacity(self.eigenvalues.len());
        for z in &self.eigenvalues {
            if z.im.abs() > tol {
                return Err(PhononError::ComplexEigenvalue { re: z.re, im: z.im });
            }
            real.push(z.re);
        }
        real.sort_by(f64::total_cmp);
        Ok(real)
    }

    /// Ascending phonon frequencies ω = √λ.
    ///
    /// Eigenvalues in `[-NEGATIVE_EIGENVALUE_CLAMP, 0)` are clamped to zero.
    ///
    /// # Errors
    /// `ComplexEigenvalue` as for [`Self::sorted_real_eigenvalues`];
    /// `UnstableMode` for an eigenvalue below the clamp.
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        self.sorted_real_eigenvalues()?
            .into_iter()
            .map(|lambda| {
                if lambda >= 0.0 {
                    Ok(lambda.sqrt())
                } else if lambda >= -NEGATIVE_EIGENVALUE_CLAMP {
                    log::warn!("clamping eigenvalue {lambda:.3e} to zero");
                    Ok(0.0)
                } else {
                    Err(PhononError::UnstableMode(lambda))
                }
            })
            .collect()
    }

    /// Sorted eigenvalues and frequencies together.
    ///
    /// # Errors
    /// As [`Self::frequencies`].
    pub fn to_spectrum(&self) -> Result<PhononSpectrum> {
        let eigenvalues = self.sorted_real_eigenvalues()?;
        let frequencies = self.frequencies()?;
        Ok(PhononSpectrum {
            modes: self.modes.clone(),
            eigenvalues,
            frequencies,
        })
    }
}

/// Compute the phonon spectrum of `chain` with spring constant `k`.
///
/// Builds the coupling matrix fresh, runs the real Schur factorization and
/// returns its eigenvalues unsorted with modes `0..m`.
///
/// # Errors
/// `NonPositiveStiffness` for `k <= 0`, `EigenSolveFailed` if the Schur
/// iteration does not converge.
pub fn solve(chain: &MassChain, k: f64, diagnostics: Diagnostics) -> Result<SpectrumResult> {
    if !(k.is_finite() && k > 0.0) {
        return Err(PhononError::NonPositiveStiffness(k));
    }

    let m = chain.len();
    let a = coupling_matrix(chain.masses(), k);
    log::debug!("solving {m}x{m} coupling matrix, K={k}");

    let schur = Schur::try_new(a, SCHUR_EPS, SCHUR_MAX_ITER)
        .ok_or(PhononError::EigenSolveFailed(m))?;
    let eigenvalues: Vec<Complex<f64>> = schur.complex_eigenvalues().iter().copied().collect();

    let occurrence = match diagnostics {
        Diagnostics::Skip => None,
        Diagnostics::Emit { generations } => {
            let ratio = occurrence_ratio(chain.masses(), generations);
            match &ratio {
                Some(r) => log::info!(
                    "mass occurrence ratio for {generations} generations = {:.6} ({} × {}, {} × {})",
                    r.ratio,
                    r.majority.1,
                    r.majority.0,
                    r.minority.1,
                    r.minority.0
                ),
                None => log::info!("single mass species: occurrence ratio skipped"),
            }
            ratio
        }
    };

    Ok(SpectrumResult {
        eigenvalues,
        modes: (0..m).collect(),
        occurrence,
    })
}
