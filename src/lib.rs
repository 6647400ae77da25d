// SPDX-License-Identifier: AGPL-3.0-only

//! Phonon spectrum of a one-dimensional Fibonacci quasicrystal.
//!
//! Builds the atom chain from the Fibonacci substitution rule, assembles the
//! mass-weighted coupling matrix, and extracts phonon frequencies by dense
//! eigendecomposition. Uniform chains are checked against the closed-form
//! dispersion; the mass-ratio / generation sweep exposes the fractal gap
//! structure of the spectrum.
//!
//! ## Modules
//!   - `chain` — substitution sequence and validated mass chain
//!   - `spectral` — coupling matrix, eigensolve, analytical reference, statistics
//!   - `report` — one run end to end, serializable
//!   - `sweep` — mass-ratio × generation grid on the rayon pool
//!   - `plot` — SVG charts (plotters)
//!   - `prompt` — console input validation with explicit retry policy
//!   - `config`, `tolerances`, `validation`, `error` — ambient support
//!
//! ## Binaries
//!   - `phonon_chain` — interactive / flag-driven driver
//!   - `validate_phonon` — named checks with exit code 0/1
//!
//! Chain length grows like φ^g and the dense eigensolve is O(n³), so runs
//! much beyond 15 generations are slow.

pub mod chain;
pub mod config;
pub mod error;
pub mod plot;
pub mod prompt;
pub mod report;
pub mod spectral;
pub mod sweep;
pub mod tolerances;
pub mod validation;

pub use error::{PhononError, Result};
