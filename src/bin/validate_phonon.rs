// SPDX-License-Identifier: AGPL-3.0-only

//! Fibonacci phonon validation.
//!
//! Checks the chain construction, coupling matrix, eigensolve, analytical
//! reference, and occurrence diagnostics against exact results:
//!
//! - Seed pair for g ≤ 2; chain length F(g+2) − 1; word length F(g)
//! - Coupling matrix tridiagonal
//! - Uniform unit chain: dense spectrum == 2 − 2cos(jπ/(m+1))
//! - Closed-form frequencies within the boundary bound π/(m+1)
//! - Dense Schur spectrum == Sturm bisection on the symmetrized form
//! - Occurrence ratio at g = 6 in (1, 2); skipped for equal masses;
//!   → φ by g = 14
//!
//! Exit code 0 when every check passes, 1 otherwise. `--json` prints the
//! harness as JSON instead of the text summary.

use std::process::ExitCode;

use clap::Parser;

use fibonacci_phonon::chain::{fibonacci_number, FibonacciSequence, MassChain};
use fibonacci_phonon::spectral::{
    boundary_mismatch_bound, closed_form, coupling_matrix, find_all_eigenvalues,
    fixed_end_dispersion, solve, symmetrized_tridiagonal, Diagnostics,
};
use fibonacci_phonon::tolerances::{EIGENVALUE_ABS, GOLDEN_RATIO_CONVERGENCE, STURM_PARITY_ABS};
use fibonacci_phonon::validation::ValidationHarness;
use fibonacci_phonon::Result;

#[derive(Parser, Debug)]
#[command(name = "validate_phonon", about = "Validate the Fibonacci phonon solver")]
struct Cli {
    /// Emit the check list as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.json {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║  Fibonacci Quasicrystal Phonon Validation                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
    }

    let mut harness = ValidationHarness::new("fibonacci_phonon");
    if let Err(err) = run_checks(&mut harness) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    if cli.json {
        match serde_json::to_string_pretty(&harness) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
        return if harness.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    harness.finish();
}

fn run_checks(harness: &mut ValidationHarness) -> Result<()> {
    check_sequence(harness);
    check_tridiagonal(harness)?;
    check_uniform_dispersion(harness)?;
    check_sturm_parity(harness)?;
    check_occurrence(harness)?;
    Ok(())
}

/// Seed pair, chain length, and word length.
fn check_sequence(harness: &mut ValidationHarness) {
    let seeds_ok = [1, 2]
        .iter()
        .all(|&g| FibonacciSequence::generate(g).flatten().len() == 2);
    harness.check_bool("g<=2 yields seed pair", seeds_ok);

    let lengths_ok = (2..=14).all(|g| {
        let len = FibonacciSequence::generate(g).flatten().len() as u64;
        fibonacci_number(g + 2) == Some(len + 1)
    });
    harness.check_bool("chain length F(g+2)-1", lengths_ok);

    let words_ok = (3..=14).all(|g| {
        fibonacci_number(g) == Some(FibonacciSequence::generate(g).word().len() as u64)
    });
    harness.check_bool("word length F(g)", words_ok);
}

/// No entries beyond the first off-diagonals.
fn check_tridiagonal(harness: &mut ValidationHarness) -> Result<()> {
    let chain = MassChain::fibonacci(8, 1.0, 3.0)?;
    let a = coupling_matrix(chain.masses(), 1.0);
    let m = chain.len();
    let max_outside = (0..m)
        .flat_map(|i| (0..m).map(move |j| (i, j)))
        .filter(|(i, j)| i.abs_diff(*j) > 1)
        .map(|(i, j)| a[(i, j)].abs())
        .fold(0.0, f64::max);
    harness.check_abs("coupling matrix tridiagonal", max_outside, 0.0, f64::MIN_POSITIVE);
    Ok(())
}

/// Uniform unit chain vs exact and closed-form dispersion.
fn check_uniform_dispersion(harness: &mut ValidationHarness) -> Result<()> {
    let chain = MassChain::fibonacci(7, 1.0, 1.0)?;
    let result = solve(&chain, 1.0, Diagnostics::Skip)?;
    let computed = result.sorted_real_eigenvalues()?;
    let m = chain.len();

    let exact = fixed_end_dispersion(m, 1.0, 1.0);
    let max_err = computed
        .iter()
        .zip(&exact)
        .map(|(c, e)| (c - e).abs())
        .fold(0.0, f64::max);
    log::info!("[1] Uniform chain, m={m}: max |λ - λ_exact| = {max_err:.3e}");
    harness.check_abs("uniform spectrum vs exact", max_err, 0.0, EIGENVALUE_ABS);

    let freq = result.frequencies()?;
    let analytic = closed_form(chain.masses(), &result.modes);
    let max_dev = freq
        .iter()
        .zip(&analytic)
        .map(|(w, a)| (w - a).abs())
        .fold(0.0, f64::max);
    let bound = boundary_mismatch_bound(m);
    log::info!("    closed-form deviation {max_dev:.3e} (bound {bound:.3e})");
    harness.check_upper("closed form within boundary bound", max_dev, bound + EIGENVALUE_ABS);

    harness.check_bool(
        "uniform eigenvalues non-negative",
        computed.iter().all(|&l| l >= 0.0),
    );
    Ok(())
}

/// Dense non-symmetric path vs Sturm bisection on the similar symmetric form.
fn check_sturm_parity(harness: &mut ValidationHarness) -> Result<()> {
    for (g, ratio) in [(8, 2.0), (9, 5.0)] {
        let chain = MassChain::fibonacci(g, 1.0, ratio)?;
        let dense = solve(&chain, 1.0, Diagnostics::Skip)?.sorted_real_eigenvalues()?;
        let (d, e) = symmetrized_tridiagonal(chain.masses(), 1.0);
        let sturm = find_all_eigenvalues(&d, &e);
        let max_err = dense
            .iter()
            .zip(&sturm)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        log::info!("[2] g={g}, ratio={ratio}: dense vs Sturm max error {max_err:.3e}");
        harness.check_abs(
            &format!("dense vs Sturm g={g} ratio={ratio}"),
            max_err,
            0.0,
            STURM_PARITY_ABS,
        );
    }
    Ok(())
}

/// Mass occurrence ratio: bounded at g=6, skipped for equal masses, → φ.
fn check_occurrence(harness: &mut ValidationHarness) -> Result<()> {
    let chain = MassChain::fibonacci(6, 1.0, 2.0)?;
    let ratio = solve(&chain, 1.0, Diagnostics::Emit { generations: 6 })?
        .occurrence
        .map_or(f64::NAN, |o| o.ratio);
    log::info!("[3] occurrence ratio g=6: {ratio:.6}");
    harness.check_lower("g=6 ratio > 1", ratio, 1.0);
    harness.check_upper("g=6 ratio < 2", ratio, 2.0);

    let uniform = MassChain::fibonacci(6, 2.0, 2.0)?;
    let skipped = solve(&uniform, 1.0, Diagnostics::Emit { generations: 6 })?
        .occurrence
        .is_none();
    harness.check_bool("ratio skipped for equal masses", skipped);

    let long = MassChain::fibonacci(14, 1.0, 2.0)?;
    let golden_dev = fibonacci_phonon::spectral::occurrence_ratio(long.masses(), 14)
        .map_or(f64::INFINITY, |o| o.golden_deviation());
    log::info!("    g=14 golden ratio deviation {golden_dev:.3e}");
    harness.check_upper("g=14 ratio near golden", golden_dev, GOLDEN_RATIO_CONVERGENCE);
    Ok(())
}
