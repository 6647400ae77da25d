// SPDX-License-Identifier: AGPL-3.0-only

//! Phonon frequency in a Fibonacci quasicrystal.
//!
//! Asks for (or takes from flags) the generation count, the two atom masses,
//! and whether to run the mass-ratio sweep; when the masses differ, also
//! whether to print the atom chain and mass occurrence ratio. Renders
//! frequency vs mode to SVG, overlaying the closed-form solution for equal
//! masses.
//!
//! ```text
//! phonon_chain                                  # fully interactive
//! phonon_chain -g 10 --mass-a 1 --mass-b 2 --sweep n --diagnostics y
//! RUST_LOG=debug phonon_chain -g 8 --mass-a 1 --mass-b 1 --sweep n --json out.json
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fibonacci_phonon::chain::MAX_GENERATIONS;
use fibonacci_phonon::config::{RunConfig, RunOverrides, SweepConfig, DEFAULT_STIFFNESS};
use fibonacci_phonon::prompt::{
    parse_choice, parse_positive_float, parse_positive_int, Prompter, RetryPolicy,
};
use fibonacci_phonon::report::{analyze, SpectrumReport};
use fibonacci_phonon::sweep::{run_sweep, SweepPanel};
use fibonacci_phonon::{plot, Result};

#[derive(Parser, Debug)]
#[command(
    name = "phonon_chain",
    version,
    about = "Phonon spectrum of a Fibonacci quasicrystal chain"
)]
struct Cli {
    /// Number of Fibonacci generations (prompted if absent)
    #[arg(short, long, value_parser = generation_count)]
    generations: Option<u32>,

    /// Mass of atom A (prompted if absent)
    #[arg(long, value_parser = positive_float)]
    mass_a: Option<f64>,

    /// Mass of atom B (prompted if absent)
    #[arg(long, value_parser = positive_float)]
    mass_b: Option<f64>,

    /// Run the mass-ratio / generation sweep: y or n (prompted if absent)
    #[arg(long, value_parser = yes_no)]
    sweep: Option<bool>,

    /// Print atom chain and occurrence ratio: y or n (prompted if absent and masses differ)
    #[arg(long, value_parser = yes_no)]
    diagnostics: Option<bool>,

    /// Spring constant K (the closed-form overlay is drawn only for K = 1)
    #[arg(long, default_value_t = DEFAULT_STIFFNESS, value_parser = positive_float)]
    stiffness: f64,

    /// Directory for SVG charts
    #[arg(long, default_value = "phonon_plots")]
    output_dir: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    no_plot: bool,

    /// Write the spectrum report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Give up after this many invalid answers per prompt (default: keep asking)
    #[arg(long)]
    max_retries: Option<usize>,
}

fn generation_count(s: &str) -> std::result::Result<u32, String> {
    let g = parse_positive_int(s).map_err(|_| "must be a positive integer".to_string())?;
    if g > MAX_GENERATIONS {
        return Err(format!("at most {MAX_GENERATIONS} generations are supported"));
    }
    Ok(g)
}

fn positive_float(s: &str) -> std::result::Result<f64, String> {
    parse_positive_float(s).map_err(|_| "must be a positive number".to_string())
}

fn yes_no(s: &str) -> std::result::Result<bool, String> {
    parse_choice(s).map_err(|_| "must be y or n".to_string())
}

fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let overrides = RunOverrides {
        generations: cli.generations,
        mass_a: cli.mass_a,
        mass_b: cli.mass_b,
        sweep: cli.sweep,
        diagnostics: cli.diagnostics,
        stiffness: cli.stiffness,
        output_dir: (!cli.no_plot).then(|| cli.output_dir.clone()),
    };
    let policy = cli.max_retries.map_or(RetryPolicy::Unbounded, RetryPolicy::Limited);
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout(), policy);
    RunConfig::resolve(&overrides, &mut prompter)
}

fn print_report(report: &SpectrumReport) {
    let freq = &report.spectrum.frequencies;
    println!();
    println!(
        "Fibonacci chain: {} generations, {} sites, M_A={}, M_B={}, K={}",
        report.generations,
        report.chain.len(),
        report.mass_a,
        report.mass_b,
        report.stiffness
    );
    if let (Some(lo), Some(hi)) = (freq.first(), freq.last()) {
        println!("  Frequency range: [{lo:.6}, {hi:.6}]");
    }
    println!("  Bands (gap-separated): {}", report.bands.len());

    if let Some(occ) = &report.occurrence {
        println!();
        println!("Atom chain: {}", report.tokens);
        println!(
            "Ratio of mass occurrence for {} generations = {:.6}",
            occ.generations, occ.ratio
        );
        println!("  (golden ratio deviation {:.3e})", occ.golden_deviation());
    }

    if let Some(dev) = report.analytical_deviation() {
        println!("  Max deviation from closed-form frequencies: {dev:.3e}");
    }
}

fn print_sweep(panels: &[SweepPanel]) {
    println!();
    println!("Sweep: band count per (generations, mass ratio)");
    for panel in panels {
        let counts: Vec<String> = panel
            .points
            .iter()
            .map(|p| format!("{}:{}", p.ratio, p.bands.len()))
            .collect();
        println!("  g={:>2}  {}", panel.generations, counts.join("  "));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    let report = analyze(&config)?;
    print_report(&report);

    if let Some(path) = &cli.json {
        report.write_json(path)?;
        println!("  Report written to {}", path.display());
    }

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("spectrum.svg");
        plot::render_spectrum(&path, &report.spectrum, report.analytical.as_deref())?;
        println!("  Spectrum chart: {}", path.display());
    }

    if config.sweep {
        let sweep = SweepConfig {
            stiffness: config.stiffness,
            ..SweepConfig::default()
        };
        let panels = run_sweep(&sweep)?;
        print_sweep(&panels);
        if let Some(dir) = &config.output_dir {
            let paths = plot::render_sweep(dir, &panels)?;
            println!("  {} sweep charts in {}", paths.len(), dir.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
