// SPDX-License-Identifier: AGPL-3.0-only

//! Resolved run configuration.
//!
//! The driver collects command-line flags into [`RunOverrides`] and
//! [`RunConfig::resolve`] prompts for whatever is missing. The library never
//! reads flags or the environment itself.

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::prompt::{Choice, Prompter};

/// Spring constant used by the driver and the sweep.
pub const DEFAULT_STIFFNESS: f64 = 1.0;

/// Everything one driver run needs.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Fibonacci generation count (≥ 1)
    pub generations: u32,
    /// Mass of species A
    pub mass_a: f64,
    /// Mass of species B
    pub mass_b: f64,
    /// Spring constant K
    pub stiffness: f64,
    /// Print the atom chain and occurrence ratio (only honoured for unequal masses)
    pub diagnostics: bool,
    /// Run the mass-ratio / generation sweep
    pub sweep: bool,
    /// Directory receiving SVG charts; `None` disables plotting
    pub output_dir: Option<PathBuf>,
}

impl RunConfig {
    /// True when both species carry the same mass, which selects the
    /// analytical overlay and suppresses diagnostics.
    #[must_use]
    #[allow(clippy::float_cmp)] // user-entered values compared verbatim
    pub fn uniform(&self) -> bool {
        self.mass_a == self.mass_b
    }
}

/// Values fixed before any prompting. `None` fields are asked for.
#[derive(Debug, Clone)]
pub struct RunOverrides {
    /// Generation count
    pub generations: Option<u32>,
    /// Mass of species A
    pub mass_a: Option<f64>,
    /// Mass of species B
    pub mass_b: Option<f64>,
    /// Run the sweep
    pub sweep: Option<bool>,
    /// Print diagnostics; only consulted when the masses differ
    pub diagnostics: Option<bool>,
    /// Spring constant K (never prompted)
    pub stiffness: f64,
    /// Chart directory (never prompted)
    pub output_dir: Option<PathBuf>,
}

impl Default for RunOverrides {
    fn default() -> Self {
        Self {
            generations: None,
            mass_a: None,
            mass_b: None,
            sweep: None,
            diagnostics: None,
            stiffness: DEFAULT_STIFFNESS,
            output_dir: None,
        }
    }
}

/// Take `value` if present, otherwise ask.
fn or_prompt<T>(value: Option<T>, ask: impl FnOnce() -> Result<T>) -> Result<T> {
    match value {
        Some(v) => Ok(v),
        None => ask(),
    }
}

impl RunConfig {
    /// Fill every missing value through `prompter`.
    ///
    /// Prompts run in order: generations, mass A, mass B, sweep. The
    /// diagnostics question is asked last and only when the masses differ;
    /// equal masses force it off without touching the input.
    ///
    /// # Errors
    /// Prompt failures: `RetriesExhausted`, `InputClosed`, or `Io`.
    pub fn resolve<R: BufRead, W: Write>(
        overrides: &RunOverrides,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Self> {
        let generations = or_prompt(overrides.generations, || prompter.generations())?;
        let mass_a = or_prompt(overrides.mass_a, || prompter.mass("A"))?;
        let mass_b = or_prompt(overrides.mass_b, || prompter.mass("B"))?;
        let sweep = or_prompt(overrides.sweep, || prompter.choice(Choice::Plot))?;

        let mut config = Self {
            generations,
            mass_a,
            mass_b,
            stiffness: overrides.stiffness,
            diagnostics: false,
            sweep,
            output_dir: overrides.output_dir.clone(),
        };
        if !config.uniform() {
            config.diagnostics =
                or_prompt(overrides.diagnostics, || prompter.choice(Choice::Print))?;
        }
        log::debug!("resolved config: {config:?}");
        Ok(config)
    }
}

/// Grid of the mass-ratio / generation sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepConfig {
    /// Generation counts, one chart each
    pub generations: RangeInclusive<u32>,
    /// Integer mass ratios M_B / M_A, one series each
    pub ratios: RangeInclusive<u32>,
    /// Mass of species A; species B gets `ratio × mass_a`
    pub mass_a: f64,
    /// Spring constant K
    pub stiffness: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            generations: 6..=14,
            ratios: 2..=11,
            mass_a: 1.0,
            stiffness: DEFAULT_STIFFNESS,
        }
    }
}

impl SweepConfig {
    /// Number of (generation, ratio) solves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.clone().count() * self.ratios.clone().count()
    }

    /// True when either axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhononError;
    use crate::prompt::RetryPolicy;
    use std::io::{Cursor, Read};

    #[test]
    fn default_sweep_grid() {
        let cfg = SweepConfig::default();
        assert_eq!(cfg.len(), 90);
        assert_eq!(cfg.generations, 6..=14);
        assert_eq!(cfg.ratios, 2..=11);
    }

    #[test]
    fn empty_sweep_grid() {
        let cfg = SweepConfig {
            generations: 5..=4,
            ..SweepConfig::default()
        };
        assert!(cfg.is_empty());
    }

    #[test]
    fn uniform_masses() {
        let cfg = RunConfig {
            generations: 5,
            mass_a: 1.0,
            mass_b: 1.0,
            stiffness: DEFAULT_STIFFNESS,
            diagnostics: false,
            sweep: false,
            output_dir: None,
        };
        assert!(cfg.uniform());
        assert!(!RunConfig { mass_b: 2.0, ..cfg }.uniform());
    }

    #[test]
    fn equal_masses_skip_diagnostics_prompt() {
        let mut input = Cursor::new("5\n2\n2\nn\nleftover\n");
        let mut prompter = Prompter::new(&mut input, Vec::new(), RetryPolicy::Unbounded);
        let cfg = RunConfig::resolve(&RunOverrides::default(), &mut prompter).expect("resolve");
        assert_eq!(cfg.generations, 5);
        assert!(!cfg.diagnostics);
        assert!(!cfg.sweep);

        let out = String::from_utf8(prompter.into_writer()).expect("utf8");
        assert!(!out.contains(Choice::Print.prompt()));
        let mut rest = String::new();
        input.read_to_string(&mut rest).expect("read rest");
        assert_eq!(rest, "leftover\n");
    }

    #[test]
    fn distinct_masses_ask_diagnostics_last() {
        let mut prompter = Prompter::new(
            Cursor::new("6\n1\n2\ny\nn\n"),
            Vec::new(),
            RetryPolicy::Unbounded,
        );
        let cfg = RunConfig::resolve(&RunOverrides::default(), &mut prompter).expect("resolve");
        assert!(cfg.sweep);
        assert!(!cfg.diagnostics);

        let out = String::from_utf8(prompter.into_writer()).expect("utf8");
        let plot = out.find(Choice::Plot.prompt()).expect("sweep asked");
        let print = out.find(Choice::Print.prompt()).expect("diagnostics asked");
        assert!(plot < print);
    }

    #[test]
    fn overrides_skip_their_prompts() {
        let overrides = RunOverrides {
            generations: Some(7),
            mass_a: Some(1.0),
            mass_b: Some(3.0),
            sweep: Some(false),
            diagnostics: Some(true),
            ..RunOverrides::default()
        };
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new(), RetryPolicy::Unbounded);
        let cfg = RunConfig::resolve(&overrides, &mut prompter).expect("no prompt needed");
        assert!(cfg.diagnostics);
        assert!((cfg.mass_b - 3.0).abs() < 1e-15);
        assert!(prompter.into_writer().is_empty());
    }

    #[test]
    fn partial_overrides_prompt_only_for_the_rest() {
        let overrides = RunOverrides {
            generations: Some(4),
            mass_a: Some(1.0),
            ..RunOverrides::default()
        };
        let mut prompter = Prompter::new(
            Cursor::new("1\nn\n"),
            Vec::new(),
            RetryPolicy::Unbounded,
        );
        let cfg = RunConfig::resolve(&overrides, &mut prompter).expect("resolve");
        assert!(cfg.uniform());
        let out = String::from_utf8(prompter.into_writer()).expect("utf8");
        assert!(!out.contains("number of generations"));
        assert!(!out.contains("atom A"));
        assert!(out.contains("atom B"));
    }

    #[test]
    fn closed_input_surfaces_as_error() {
        let mut prompter = Prompter::new(Cursor::new("3\n"), Vec::new(), RetryPolicy::Unbounded);
        assert!(matches!(
            RunConfig::resolve(&RunOverrides::default(), &mut prompter),
            Err(PhononError::InputClosed)
        ));
    }
}
