// SPDX-License-Identifier: AGPL-3.0-only

//! One driver run end to end: chain → spectrum → optional reference and
//! diagnostics, collected into a serializable report.

use std::path::Path;

use serde::Serialize;

use crate::chain::{token_string, MassChain};
use crate::config::RunConfig;
use crate::error::Result;
use crate::spectral::{
    closed_form, detect_bands, solve, Band, Diagnostics, OccurrenceRatio, PhononSpectrum,
    REFERENCE_STIFFNESS,
};
use crate::tolerances::BAND_GAP_FACTOR;

/// Everything the driver prints, plots, or serializes for one run.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumReport {
    /// Generation count
    pub generations: u32,
    /// Mass of species A
    pub mass_a: f64,
    /// Mass of species B
    pub mass_b: f64,
    /// Spring constant
    pub stiffness: f64,
    /// Species sequence, e.g. "ABBABAB..."
    pub tokens: String,
    /// Site masses in chain order
    pub chain: Vec<f64>,
    /// Sorted eigenvalues and frequencies
    pub spectrum: PhononSpectrum,
    /// Closed-form frequencies, present only for equal masses at the
    /// reference stiffness
    pub analytical: Option<Vec<f64>>,
    /// Occurrence ratio, present only when requested and masses differ
    pub occurrence: Option<OccurrenceRatio>,
    /// Frequency bands separated by gaps
    pub bands: Vec<Band>,
}

/// Build the chain for `config`, solve it, and assemble the report.
///
/// Diagnostics are requested only when asked for and the masses differ.
/// The analytical reference is attached only when the masses are equal and
/// K equals [`REFERENCE_STIFFNESS`], the stiffness `closed_form` assumes.
///
/// # Errors
/// Chain validation and eigensolve errors.
pub fn analyze(config: &RunConfig) -> Result<SpectrumReport> {
    let chain = MassChain::fibonacci(config.generations, config.mass_a, config.mass_b)?;
    let diagnostics = if config.diagnostics && !config.uniform() {
        Diagnostics::Emit {
            generations: config.generations,
        }
    } else {
        Diagnostics::Skip
    };

    let result = solve(&chain, config.stiffness, diagnostics)?;
    let spectrum = result.to_spectrum()?;
    #[allow(clippy::float_cmp)] // flag value compared verbatim
    let reference_operator = config.uniform() && config.stiffness == REFERENCE_STIFFNESS;
    let analytical = reference_operator.then(|| closed_form(chain.masses(), &result.modes));
    let bands = detect_bands(&spectrum.frequencies, BAND_GAP_FACTOR);

    Ok(SpectrumReport {
        generations: config.generations,
        mass_a: config.mass_a,
        mass_b: config.mass_b,
        stiffness: config.stiffness,
        tokens: chain.tokens().map(token_string).unwrap_or_default(),
        chain: chain.masses().to_vec(),
        spectrum,
        analytical,
        occurrence: result.occurrence,
        bands,
    })
}

impl SpectrumReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// `Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to `path`.
    ///
    /// # Errors
    /// `Serialize` or `Io`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Largest |ω_computed − ω_analytical| over sorted modes, when the
    /// analytical reference is present.
    #[must_use]
    pub fn analytical_deviation(&self) -> Option<f64> {
        self.analytical.as_ref().map(|reference| {
            self.spectrum
                .frequencies
                .iter()
                .zip(reference)
                .map(|(w, r)| (w - r).abs())
                .fold(0.0, f64::max)
        })
    }
}
