// SPDX-License-Identifier: AGPL-3.0-only

//! Mass-ratio / generation sweep.
//!
//! Each (generation, ratio) pair is an independent chain build and solve
//! with no shared state, so the grid runs on the rayon pool and is collected
//! back in (generation, ratio) order.

use rayon::prelude::*;
use serde::Serialize;

use crate::chain::MassChain;
use crate::config::SweepConfig;
use crate::error::Result;
use crate::spectral::{detect_bands, solve, Band, Diagnostics};
use crate::tolerances::BAND_GAP_FACTOR;

/// Spectrum of one (generation, ratio) chain.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// Generation count
    pub generations: u32,
    /// Mass ratio M_B / M_A
    pub ratio: u32,
    /// Ascending phonon frequencies
    pub frequencies: Vec<f64>,
    /// Bands separated by gaps in the frequency spectrum
    pub bands: Vec<Band>,
}

/// All ratios for one generation count: one chart's worth of data.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPanel {
    /// Generation count
    pub generations: u32,
    /// One entry per ratio, ascending
    pub points: Vec<SweepPoint>,
}

/// Solve one point of the grid.
///
/// # Errors
/// Propagates chain construction and eigensolve errors.
pub fn sweep_point(config: &SweepConfig, generations: u32, ratio: u32) -> Result<SweepPoint> {
    let chain = MassChain::fibonacci(
        generations,
        config.mass_a,
        config.mass_a * f64::from(ratio),
    )?;
    let frequencies = solve(&chain, config.stiffness, Diagnostics::Skip)?.frequencies()?;
    let bands = detect_bands(&frequencies, BAND_GAP_FACTOR);
    log::debug!(
        "sweep g={generations} ratio={ratio}: {} modes, {} bands",
        frequencies.len(),
        bands.len()
    );
    Ok(SweepPoint {
        generations,
        ratio,
        frequencies,
        bands,
    })
}

/// Run the whole grid, grouped into one panel per generation count.
///
/// # Errors
/// The first error encountered by any point.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<SweepPanel>> {
    let grid: Vec<(u32, u32)> = config
        .generations
        .clone()
        .flat_map(|g| config.ratios.clone().map(move |r| (g, r)))
        .collect();
    log::info!(
        "sweep: {} solves on {} threads",
        grid.len(),
        rayon::current_num_threads()
    );

    let points: Vec<SweepPoint> = grid
        .par_iter()
        .map(|&(g, r)| sweep_point(config, g, r))
        .collect::<Result<_>>()?;

    let mut panels: Vec<SweepPanel> = Vec::new();
    for point in points {
        match panels.last_mut() {
            Some(panel) if panel.generations == point.generations => panel.points.push(point),
            _ => panels.push(SweepPanel {
                generations: point.generations,
                points: vec![point],
            }),
        }
    }
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::fibonacci_number;

    fn small_config() -> SweepConfig {
        SweepConfig {
            generations: 4..=6,
            ratios: 2..=4,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn sweep_panels_in_order() {
        let panels = run_sweep(&small_config()).expect("sweep");
        assert_eq!(panels.len(), 3);
        for (panel, g) in panels.iter().zip(4..=6) {
            assert_eq!(panel.generations, g);
            let ratios: Vec<u32> = panel.points.iter().map(|p| p.ratio).collect();
            assert_eq!(ratios, vec![2, 3, 4]);
            for p in &panel.points {
                assert_eq!(Some(p.frequencies.len() as u64 + 1), fibonacci_number(g + 2));
            }
        }
    }

    #[test]
    fn sweep_point_matches_direct_solve() {
        let cfg = small_config();
        let point = sweep_point(&cfg, 5, 3).expect("point");
        let chain = MassChain::fibonacci(5, 1.0, 3.0).expect("chain");
        let direct = solve(&chain, 1.0, Diagnostics::Skip)
            .expect("solve")
            .frequencies()
            .expect("frequencies");
        assert_eq!(point.frequencies, direct);
    }

    #[test]
    fn heavier_b_opens_a_gap() {
        let cfg = SweepConfig {
            generations: 10..=10,
            ratios: 8..=8,
            ..SweepConfig::default()
        };
        let point = sweep_point(&cfg, 10, 8).expect("point");
        assert!(point.bands.len() >= 2, "bands={:?}", point.bands);
        let total: usize = point.bands.iter().map(|b| b.modes).sum();
        assert_eq!(total, point.frequencies.len());
    }

    #[test]
    fn empty_grid_gives_no_panels() {
        let cfg = SweepConfig {
            ratios: 3..=2,
            ..SweepConfig::default()
        };
        assert!(run_sweep(&cfg).expect("sweep").is_empty());
    }
}
